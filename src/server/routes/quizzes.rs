use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories::get_category, questions::random_question},
        Question,
    },
    server::{app::AppState, deserializers::deserialize_int, error::ApiError, extract::ApiJson},
    telemetry::{QUIZ_EXHAUSTED, QUIZ_QUESTIONS_SERVED},
};

use super::{ApiResponse, NO_CATEGORY};

#[derive(Deserialize, Debug)]
struct QuizRequest {
    #[serde(default)]
    previous_questions: Vec<i64>,
    quiz_category: QuizCategory,
}

// the client also sends the category label as `type`, only the id matters
#[derive(Deserialize, Debug)]
struct QuizCategory {
    #[serde(deserialize_with = "deserialize_int")]
    id: i64,
}

#[derive(Serialize)]
struct QuizResponse {
    success: bool,
    #[serde(flatten)]
    turn: QuizTurn,
}

#[derive(Serialize)]
#[serde(untagged)]
enum QuizTurn {
    Next { question: Question, answer: String },
    // serialized as `question: false, answer: false`
    Finished { question: bool, answer: bool },
}

impl QuizTurn {
    fn finished() -> Self {
        QuizTurn::Finished {
            question: false,
            answer: false,
        }
    }
}

#[tracing::instrument(skip(pool))]
async fn next_question(
    State(pool): State<SqlitePool>,
    ApiJson(request): ApiJson<QuizRequest>,
) -> ApiResponse<QuizResponse> {
    let category_id = request.quiz_category.id;
    let category = if category_id == NO_CATEGORY {
        None
    } else {
        match get_category(&pool, category_id).await? {
            Some(category) => Some(category.id),
            None => return Err(ApiError::NotFound),
        }
    };

    let label = category_id.to_string();
    let turn = match random_question(&pool, category, &request.previous_questions).await? {
        Some(question) => {
            QUIZ_QUESTIONS_SERVED.with_label_values(&[&label]).inc();
            let answer = question.answer.clone();
            QuizTurn::Next { question, answer }
        }
        None => {
            tracing::debug!("No questions left");
            QUIZ_EXHAUSTED.with_label_values(&[&label]).inc();
            QuizTurn::finished()
        }
    };

    Ok(Json(QuizResponse {
        success: true,
        turn,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
