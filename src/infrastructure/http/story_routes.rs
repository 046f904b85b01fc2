//! User story API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::dto::{
    CreateStoryRequestDto, StoryCreatedDto, StoryDetailDto, StoryListDto,
};
use crate::application::handlers::GetStoryQuery;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::state::AppState;

/// Create a story
pub async fn create_story(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateStoryRequestDto>,
) -> Result<(StatusCode, Json<StoryCreatedDto>), ApiError> {
    let cancel = state.shutdown.child_token();
    let id = state.dispatcher.create_story(req.into(), &cancel).await?;

    Ok((StatusCode::CREATED, Json(StoryCreatedDto { id })))
}

/// List all stories
pub async fn list_stories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StoryListDto>, ApiError> {
    let cancel = state.shutdown.child_token();
    let stories = state.dispatcher.get_all_stories(&cancel).await?;

    Ok(Json(stories))
}

/// Get a story with its tasks
pub async fn get_story(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<StoryDetailDto>, ApiError> {
    let cancel = state.shutdown.child_token();
    let story = state
        .dispatcher
        .get_story(GetStoryQuery::new(id), &cancel)
        .await?;

    Ok(Json(story))
}
