use std::collections::BTreeMap;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::{get_all_categories, get_category},
            questions::{count_questions, get_questions_for_category},
        },
        Question,
    },
    server::app::AppState,
};

use super::{ApiError, ApiResponse};

#[derive(Serialize)]
struct CategoriesResponse {
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct CategoryQuestionsResponse {
    questions: Vec<Question>,
    total_questions: i64,
    current_category: i64,
}

/// Category labels keyed by id, the shape the game renders its sidebar from.
pub(super) async fn categories_by_id(pool: &SqlitePool) -> sqlx::Result<BTreeMap<i64, String>> {
    Ok(get_all_categories(pool)
        .await?
        .into_iter()
        .map(|c| (c.id, c.kind))
        .collect())
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<CategoriesResponse>> {
    Ok(Json(CategoriesResponse {
        categories: categories_by_id(&pool).await?,
    }))
}

async fn category_questions(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResponse<Json<CategoryQuestionsResponse>> {
    let Path(id) = path.map_err(|_| ApiError::NotFound)?;
    let category = get_category(&pool, id).await?;
    let questions = get_questions_for_category(&pool, category.id).await?;
    Ok(Json(CategoryQuestionsResponse {
        questions,
        total_questions: count_questions(&pool).await?,
        current_category: category.id,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(category_questions))
        .with_state(state)
}
