use axum::{extract::State, routing::post, Json, Router};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions::get_quiz_candidates, Question},
    server::{app::AppState, error::ApiError, extract::JsonBody},
    telemetry::QUIZ_DRAWS,
};

use super::ApiResponse;

/// Category id that stands for "every category".
const ALL_CATEGORIES: i64 = 0;

#[derive(Deserialize)]
struct QuizRequest {
    #[serde(default)]
    previous_questions: Vec<i64>,
    quiz_category: Option<QuizCategory>,
}

// clients send the whole category object, only the id matters
#[derive(Deserialize)]
struct QuizCategory {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

#[derive(Serialize)]
struct QuizDraw {
    success: bool,
    question: Option<Question>,
}

async fn play_quiz(
    State(pool): State<SqlitePool>,
    JsonBody(request): JsonBody<QuizRequest>,
) -> ApiResponse<Json<QuizDraw>> {
    let category = request.quiz_category.ok_or(ApiError::Unprocessable)?;
    let filter = (category.id != ALL_CATEGORIES).then_some(category.id);

    let candidates = get_quiz_candidates(&pool, filter, &request.previous_questions)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "failed to load quiz candidates");
            ApiError::Unprocessable
        })?;
    let question = candidates.choose(&mut rand::thread_rng()).cloned();

    let outcome = if question.is_some() {
        "question"
    } else {
        "exhausted"
    };
    QUIZ_DRAWS.with_label_values(&[outcome]).inc();
    tracing::debug!(
        category = category.id,
        seen = request.previous_questions.len(),
        remaining = candidates.len(),
        outcome,
        "quiz draw"
    );

    Ok(Json(QuizDraw {
        success: true,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(play_quiz))
        .with_state(state)
}
