use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::{get_category, get_category_types},
            questions::{count_questions, get_questions_for_category},
        },
        Question,
    },
    server::{app::AppState, error::ApiError, extract::ApiPath},
};

use super::ApiResponse;

#[derive(Serialize)]
struct CategoriesResponse {
    success: bool,
    categories: Vec<String>,
}

#[derive(Serialize)]
struct CategoryQuestionsResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: i64,
    categories: Vec<String>,
    #[serde(rename = "current_Category")]
    current_category: i64,
}

// an empty table is still a valid listing, unlike an empty page of questions
async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<CategoriesResponse> {
    Ok(Json(CategoriesResponse {
        success: true,
        categories: get_category_types(&pool).await?,
    }))
}

#[tracing::instrument(skip(pool))]
async fn category_questions(
    State(pool): State<SqlitePool>,
    ApiPath(category_id): ApiPath<i64>,
) -> ApiResponse<CategoryQuestionsResponse> {
    if get_category(&pool, category_id).await?.is_none() {
        tracing::debug!("No such category");
        return Err(ApiError::NotFound);
    }
    let questions = get_questions_for_category(&pool, category_id).await?;
    if questions.is_empty() {
        tracing::debug!("Category has no questions");
        return Err(ApiError::NotFound);
    }

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions,
        total_questions: count_questions(&pool).await?,
        categories: get_category_types(&pool).await?,
        current_category: category_id,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{category_id}/questions", get(category_questions))
        .with_state(state)
}
