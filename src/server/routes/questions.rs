use std::collections::BTreeMap;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::questions::{self, count_questions, get_question_by_id, get_questions_page},
        NewQuestion, Question,
    },
    server::{
        app::{AppState, PageSize},
        deserializers::{deserialize_page, first_page, FIRST_PAGE},
    },
    telemetry::{QUESTIONS_CREATED_CNTR, QUESTIONS_DELETED_CNTR},
};

use super::{categories::categories_by_id, ApiError, ApiResponse};

#[derive(Deserialize)]
struct PageQuery {
    #[serde(default = "first_page", deserialize_with = "deserialize_page")]
    page: i64,
}

/// The add form and the search box post to the same endpoint.
#[derive(Deserialize)]
#[serde(untagged)]
enum QuestionsRequest {
    Search {
        #[serde(rename = "searchTerm", alias = "search")]
        search_term: String,
    },
    Create(NewQuestion),
}

#[derive(Serialize)]
struct QuestionsPage {
    questions: Vec<Question>,
    total_questions: i64,
    categories: BTreeMap<i64, String>,
    current_category: Option<i64>,
}

#[derive(Serialize)]
struct DeletedQuestion {
    deleted: i64,
    questions: Vec<Question>,
    total_questions: i64,
}

#[derive(Serialize)]
struct CreatedQuestion {
    created: i64,
}

#[derive(Serialize)]
struct SearchResults {
    questions: Vec<Question>,
    total_questions: i64,
}

#[derive(Serialize)]
#[serde(untagged)]
enum QuestionsPostResponse {
    Created(CreatedQuestion),
    Found(SearchResults),
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    State(PageSize(per_page)): State<PageSize>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResponse<Json<QuestionsPage>> {
    // repeated or otherwise odd query strings read as the first page, like an unparsable one
    let page = query.map(|Query(query)| query.page).unwrap_or(FIRST_PAGE);
    let questions = get_questions_page(&pool, page, per_page).await?;
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(QuestionsPage {
        questions,
        total_questions: count_questions(&pool).await?,
        categories: categories_by_id(&pool).await?,
        current_category: None,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    State(PageSize(per_page)): State<PageSize>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResponse<Json<DeletedQuestion>> {
    let Path(id) = path.map_err(|_| ApiError::NotFound)?;
    get_question_by_id(&pool, id).await?;
    questions::delete_question(&pool, id)
        .await
        .map_err(ApiError::from_mutation)?;
    QUESTIONS_DELETED_CNTR.inc();
    tracing::info!("Deleted question {id}");

    let (questions, total_questions) = first_page_after_delete(&pool, per_page).await?;
    Ok(Json(DeletedQuestion {
        deleted: id,
        questions,
        total_questions,
    }))
}

/// Part of the delete itself, so a failure here is a failed mutation too.
async fn first_page_after_delete(
    pool: &SqlitePool,
    per_page: i64,
) -> ApiResponse<(Vec<Question>, i64)> {
    let questions = get_questions_page(pool, FIRST_PAGE, per_page)
        .await
        .map_err(ApiError::from_mutation)?;
    let total = count_questions(pool)
        .await
        .map_err(ApiError::from_mutation)?;
    Ok((questions, total))
}

async fn post_questions(
    State(pool): State<SqlitePool>,
    payload: Result<Json<QuestionsRequest>, JsonRejection>,
) -> ApiResponse<Json<QuestionsPostResponse>> {
    let Json(request) =
        payload.map_err(|rejection| ApiError::Unprocessable(rejection.body_text()))?;
    let response = match request {
        QuestionsRequest::Search { search_term } => {
            QuestionsPostResponse::Found(search(&pool, &search_term).await?)
        }
        QuestionsRequest::Create(new_question) => {
            QuestionsPostResponse::Created(create(&pool, new_question).await?)
        }
    };
    Ok(Json(response))
}

async fn search(pool: &SqlitePool, term: &str) -> ApiResponse<SearchResults> {
    Ok(SearchResults {
        questions: questions::search_questions(pool, term).await?,
        total_questions: count_questions(pool).await?,
    })
}

async fn create(pool: &SqlitePool, new_question: NewQuestion) -> ApiResponse<CreatedQuestion> {
    if new_question.question.trim().is_empty() || new_question.answer.trim().is_empty() {
        return Err(ApiError::Unprocessable(
            "question and answer must not be blank".to_owned(),
        ));
    }
    let id = questions::create_question(pool, &new_question)
        .await
        .map_err(ApiError::from_mutation)?;
    QUESTIONS_CREATED_CNTR.inc();
    tracing::info!("Created question {id} in category {}", new_question.category);

    Ok(CreatedQuestion { created: id })
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(post_questions))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::tests::memory_pool;

    #[tokio::test]
    async fn failing_reads_after_delete_are_422() {
        let pool = memory_pool().await;
        sqlx::query("ALTER TABLE questions RENAME TO retired_questions")
            .execute(&pool)
            .await
            .unwrap();

        let err = first_page_after_delete(&pool, 10).await.unwrap_err();
        assert!(matches!(err, ApiError::Unprocessable(_)));
    }

    #[tokio::test]
    async fn page_after_delete_reports_total() {
        let pool = memory_pool().await;
        let (questions, total) = first_page_after_delete(&pool, 10).await.unwrap();
        assert!(questions.is_empty());
        assert_eq!(total, 0);
    }
}
