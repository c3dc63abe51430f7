use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories::get_all_categories, questions},
        NewQuestion, Question, StoreError,
    },
    server::{
        app::AppState,
        deserializers::deserialize_non_empty_string,
        error::ApiError,
        extract::{JsonBody, PathParam, QueryParams},
        pagination::Pagination,
    },
    telemetry::QUESTIONS_CREATED,
};

use super::{ApiResponse, CategoryMap};

#[derive(Deserialize)]
struct QuestionForm {
    #[serde(default, deserialize_with = "deserialize_non_empty_string")]
    question: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_empty_string")]
    answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    category: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    difficulty: Option<i64>,
}

impl QuestionForm {
    fn validated(&self) -> Option<NewQuestion<'_>> {
        Some(NewQuestion {
            question: self.question.as_deref()?,
            answer: self.answer.as_deref()?,
            category: self.category?,
            difficulty: self.difficulty?,
        })
    }
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    #[serde(default, deserialize_with = "deserialize_non_empty_string")]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: CategoryMap,
    current_category: Option<i64>,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<i64>,
}

#[derive(Serialize)]
struct Created {
    success: bool,
    created: i64,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
    deleted: i64,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    QueryParams(pagination): QueryParams<Pagination>,
) -> ApiResponse<Json<QuestionsPage>> {
    let selection = questions::get_all_questions(&pool).await?;
    let total_questions = selection.len();
    let current = pagination.slice(selection);
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }
    let categories = get_all_categories(&pool).await?;

    Ok(Json(QuestionsPage {
        success: true,
        questions: current,
        total_questions,
        categories: CategoryMap(categories),
        current_category: None,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    JsonBody(form): JsonBody<QuestionForm>,
) -> ApiResponse<Json<Created>> {
    let new_question = form.validated().ok_or(ApiError::Unprocessable)?;
    let id = questions::create_question(&pool, &new_question)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "failed to create question");
            ApiError::Unprocessable
        })?;
    QUESTIONS_CREATED.inc();
    tracing::info!(id, category = new_question.category, "question created");

    Ok(Json(Created {
        success: true,
        created: id,
    }))
}

// Clients have always seen 422 for an unknown id here, not 404.
async fn delete_question(
    State(pool): State<SqlitePool>,
    PathParam(id): PathParam<i64>,
) -> ApiResponse<Json<Deleted>> {
    match questions::delete_question(&pool, id).await {
        Ok(()) => {
            tracing::info!(id, "question deleted");
            Ok(Json(Deleted {
                success: true,
                deleted: id,
            }))
        }
        Err(StoreError::NotFound) => Err(ApiError::Unprocessable),
        Err(err) => {
            tracing::error!(error = %err, id, "failed to delete question");
            Err(ApiError::Unprocessable)
        }
    }
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    QueryParams(pagination): QueryParams<Pagination>,
    JsonBody(body): JsonBody<SearchBody>,
) -> ApiResponse<Json<SearchResults>> {
    let term = body.search_term.ok_or(ApiError::NotFound)?;
    let matches = questions::search_questions(&pool, &term).await?;
    if matches.is_empty() {
        return Err(ApiError::NotFound);
    }
    let current = pagination.slice(matches);

    // total_questions is the size of this page, not of every match; clients
    // written against the existing API rely on it.
    Ok(Json(SearchResults {
        success: true,
        total_questions: current.len(),
        questions: current,
        current_category: None,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/search", post(search_questions))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
