use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories::get_category_types, questions},
        NewQuestion, Page, Question,
    },
    server::{
        app::AppState,
        deserializers::{
            deserialize_lenient_page, deserialize_optional_int, deserialize_search_term,
            first_page,
        },
        error::ApiError,
        extract::{ApiJson, ApiPath, ApiQuery},
    },
    telemetry::QUESTION_MUTATIONS,
};

use super::{ApiResponse, NO_CATEGORY};

#[derive(Deserialize, Debug)]
struct PageQuery {
    #[serde(default = "first_page", deserialize_with = "deserialize_lenient_page")]
    page: i64,
}

/// Body of `POST /questions`: a search whenever `searchTerm` is present,
/// otherwise a new question.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum QuestionsRequest {
    Search(SearchRequest),
    Create(QuestionDraft),
}

#[derive(Deserialize, Debug)]
struct SearchRequest {
    #[serde(rename = "searchTerm", deserialize_with = "deserialize_search_term")]
    search_term: String,
}

// every field is optional here so a missing one is reported as 400 by `validate`
#[derive(Deserialize, Debug, Default)]
struct QuestionDraft {
    #[serde(default)]
    question: String,
    #[serde(default)]
    answer: String,
    #[serde(default, deserialize_with = "deserialize_optional_int")]
    difficulty: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_int")]
    category: Option<i64>,
}

impl QuestionDraft {
    fn validate(self) -> Result<NewQuestion, ApiError> {
        if self.question.is_empty() || self.answer.is_empty() {
            return Err(ApiError::BadRequest);
        }
        match (self.difficulty, self.category) {
            (Some(difficulty), Some(category)) => Ok(NewQuestion {
                question: self.question,
                answer: self.answer,
                category,
                difficulty,
            }),
            _ => Err(ApiError::BadRequest),
        }
    }
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<Vec<String>>,
    #[serde(rename = "current_Category")]
    current_category: i64,
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
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResponse<QuestionsPage> {
    let page = Page::new(query.page).ok_or(ApiError::NotFound)?;
    let questions = questions::get_questions_page(&pool, page).await?;
    if questions.is_empty() {
        tracing::debug!("Page {} is empty", page.number());
        return Err(ApiError::NotFound);
    }

    Ok(Json(QuestionsPage {
        success: true,
        questions,
        total_questions: questions::count_questions(&pool).await?,
        categories: Some(get_category_types(&pool).await?),
        current_category: NO_CATEGORY,
    }))
}

async fn post_questions(
    State(pool): State<SqlitePool>,
    ApiQuery(query): ApiQuery<PageQuery>,
    ApiJson(request): ApiJson<QuestionsRequest>,
) -> Result<Response, ApiError> {
    match request {
        QuestionsRequest::Search(search) => {
            Ok(Json(search_questions(&pool, search, query.page).await?).into_response())
        }
        QuestionsRequest::Create(draft) => {
            Ok(Json(create_question(&pool, draft).await?).into_response())
        }
    }
}

#[tracing::instrument(skip(pool))]
async fn search_questions(
    pool: &SqlitePool,
    search: SearchRequest,
    page: i64,
) -> Result<QuestionsPage, ApiError> {
    let page = Page::new(page).ok_or(ApiError::NotFound)?;
    let results = questions::search_questions(pool, &search.search_term, page).await?;
    if results.questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(QuestionsPage {
        success: true,
        questions: results.questions,
        total_questions: results.total,
        categories: None,
        current_category: NO_CATEGORY,
    })
}

async fn create_question(pool: &SqlitePool, draft: QuestionDraft) -> Result<Created, ApiError> {
    let question = draft.validate()?;
    let id = questions::create_question(pool, &question)
        .await
        .map_err(|e| {
            tracing::warn!("Cannot store question: {e}");
            ApiError::BadRequest
        })?;
    QUESTION_MUTATIONS.with_label_values(&["created"]).inc();
    tracing::info!(id, "Question created");

    Ok(Created {
        success: true,
        created: id,
    })
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResponse<Deleted> {
    if !questions::delete_question(&pool, id).await? {
        tracing::debug!(id, "Nothing to delete");
        return Err(ApiError::Unprocessable);
    }
    QUESTION_MUTATIONS.with_label_values(&["deleted"]).inc();
    tracing::info!(id, "Question deleted");

    Ok(Json(Deleted {
        success: true,
        deleted: id,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(post_questions))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
