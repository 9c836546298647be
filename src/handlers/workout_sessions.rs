use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::Value;

use super::{json_body, path_id, MessageResponse};
use crate::error::{AppError, Result};
use crate::models::{WorkoutSession, WorkoutSessionInput};
use crate::repositories::WorkoutSessionRepository;
use crate::validation::{SessionSchema, ValidationErrors};

#[derive(Clone)]
pub struct WorkoutSessionsState {
    pub session_repo: WorkoutSessionRepository,
}

fn member_not_found() -> AppError {
    AppError::NotFound("Member not found".to_string())
}

fn session_not_found() -> AppError {
    AppError::NotFound("Workout session not found".to_string())
}

async fn find_session(state: &WorkoutSessionsState, session_id: i64) -> Result<WorkoutSession> {
    state
        .session_repo
        .find_by_id(session_id)
        .await?
        .ok_or_else(session_not_found)
}

/// The member in the path owns the new session; a `member_id` in the body is ignored.
pub async fn create(
    State(state): State<WorkoutSessionsState>,
    path: std::result::Result<Path<i64>, PathRejection>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<WorkoutSession>)> {
    let member_id = path_id(path, member_not_found)?;
    let input = WorkoutSessionInput::validate(&json_body(body)?, SessionSchema::Create)?;

    if input.member_id.is_some_and(|body_id| body_id != member_id) {
        tracing::debug!(member_id, "Ignoring member_id from request body");
    }

    let session = state
        .session_repo
        .create(member_id, &input)
        .await
        .map_err(|e| {
            if e.is_foreign_key_violation() {
                member_not_found()
            } else {
                e
            }
        })?;
    tracing::info!(session_id = session.session_id, member_id, "Workout session created");

    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn list(State(state): State<WorkoutSessionsState>) -> Result<Json<Vec<WorkoutSession>>> {
    let sessions = state.session_repo.find_all().await?;
    Ok(Json(sessions))
}

pub async fn show(
    State(state): State<WorkoutSessionsState>,
    path: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<WorkoutSession>> {
    let session_id = path_id(path, session_not_found)?;
    let session = find_session(&state, session_id).await?;
    Ok(Json(session))
}

pub async fn update(
    State(state): State<WorkoutSessionsState>,
    path: std::result::Result<Path<i64>, PathRejection>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let session_id = path_id(path, session_not_found)?;
    find_session(&state, session_id).await?;
    let input = WorkoutSessionInput::validate(&json_body(body)?, SessionSchema::Update)?;
    let member_id = input
        .member_id
        .ok_or_else(|| AppError::Internal("member_id missing from validated session".to_string()))?;

    let updated = state
        .session_repo
        .update(session_id, member_id, &input)
        .await
        .map_err(|e| {
            if e.is_foreign_key_violation() {
                let mut errors = ValidationErrors::new();
                errors.add("member_id", "Member does not exist.");
                AppError::Validation(errors)
            } else {
                e
            }
        })?;
    if !updated {
        return Err(session_not_found());
    }
    tracing::info!(session_id, member_id, "Workout session updated");

    Ok(MessageResponse::new("Workout session details updated successfully"))
}

pub async fn delete(
    State(state): State<WorkoutSessionsState>,
    path: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>> {
    let session_id = path_id(path, session_not_found)?;
    find_session(&state, session_id).await?;

    if !state.session_repo.delete(session_id).await? {
        return Err(session_not_found());
    }
    tracing::info!(session_id, "Workout session removed");

    Ok(MessageResponse::new("Workout session removed successfully"))
}
