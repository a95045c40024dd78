use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::get_category,
            questions::{get_all_questions, get_questions_for_category},
        },
        Question,
    },
    quiz::{pick_unseen, QuizScope},
    server::{app::AppState, deserializers::deserialize_lenient_id},
    telemetry::QUIZ_QUESTIONS_CNTR,
};

use super::{ApiError, ApiResponse};

#[derive(Deserialize)]
struct QuizCategory {
    #[serde(deserialize_with = "deserialize_lenient_id")]
    id: i64,
}

#[derive(Deserialize)]
struct QuizRequest {
    quiz_category: QuizCategory,
    previous_questions: Vec<i64>,
}

#[derive(Serialize)]
struct QuizQuestion {
    question: Option<Question>,
}

async fn next_question(
    State(pool): State<SqlitePool>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> ApiResponse<Json<QuizQuestion>> {
    let Json(request) =
        payload.map_err(|rejection| ApiError::Unprocessable(rejection.body_text()))?;
    let scope = QuizScope::from(request.quiz_category.id);
    let candidates = match scope {
        QuizScope::All => get_all_questions(&pool).await?,
        QuizScope::Category(id) => {
            let category = get_category(&pool, id).await?;
            get_questions_for_category(&pool, category.id).await?
        }
    };

    let question = pick_unseen(
        candidates,
        &request.previous_questions,
        &mut rand::thread_rng(),
    );
    match &question {
        Some(question) => {
            let label = match scope {
                QuizScope::All => "all".to_owned(),
                QuizScope::Category(id) => id.to_string(),
            };
            QUIZ_QUESTIONS_CNTR.with_label_values(&[label.as_str()]).inc();
            tracing::debug!("Serving quiz question {}", question.id);
        }
        None => tracing::debug!(
            "Quiz exhausted after {} questions",
            request.previous_questions.len()
        ),
    }

    Ok(Json(QuizQuestion { question }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
