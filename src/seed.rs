//! CSV import and export of the trivia tables.

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use std::path::Path;

use crate::db::queries::categories::{get_all_categories, import_categories};
use crate::db::queries::questions::{get_all_questions, import_questions};
use crate::db::{Category, Question};

pub const CATEGORIES_FILE: &str = "categories.csv";
pub const QUESTIONS_FILE: &str = "questions.csv";

/// Row counts moved by an import or export.
#[derive(Debug, PartialEq, Eq)]
pub struct Transferred {
    pub categories: usize,
    pub questions: usize,
}

pub async fn export_data(pool: &SqlitePool, dir: &Path) -> anyhow::Result<Transferred> {
    let categories = get_all_categories(pool).await?;
    let questions = get_all_questions(pool).await?;
    if !dir.exists() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create {}", dir.display()))?;
    }
    write_to(&dir.join(CATEGORIES_FILE), &categories)?;
    write_to(&dir.join(QUESTIONS_FILE), &questions)?;
    Ok(Transferred {
        categories: categories.len(),
        questions: questions.len(),
    })
}

/// Categories go in first so questions never point at a category that is
/// only created later in the same import.
pub async fn import_data(pool: &SqlitePool, dir: &Path) -> anyhow::Result<Transferred> {
    let categories: Vec<Category> = read_from(&dir.join(CATEGORIES_FILE))?;
    let questions: Vec<Question> = read_from(&dir.join(QUESTIONS_FILE))?;
    let transferred = Transferred {
        categories: categories.len(),
        questions: questions.len(),
    };
    import_categories(pool, categories).await?;
    import_questions(pool, questions).await?;
    Ok(transferred)
}

fn write_to<T: Serialize>(path: &Path, data: &[T]) -> anyhow::Result<()> {
    let mut wtr =
        csv::Writer::from_path(path).with_context(|| format!("Cannot write {}", path.display()))?;
    for line in data {
        wtr.serialize(line)?;
    }
    wtr.flush()?;
    Ok(())
}

fn read_from<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let mut rdr =
        csv::Reader::from_path(path).with_context(|| format!("Cannot read {}", path.display()))?;
    let mut out = Vec::new();
    for record in rdr.deserialize() {
        let record: T = record.with_context(|| format!("Bad record in {}", path.display()))?;
        out.push(record);
    }
    Ok(out)
}
