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
use crate::models::{Member, MemberInput, WorkoutSession};
use crate::repositories::{MemberRepository, WorkoutSessionRepository};

#[derive(Clone)]
pub struct MembersState {
    pub member_repo: MemberRepository,
    pub session_repo: WorkoutSessionRepository,
}

fn member_not_found() -> AppError {
    AppError::NotFound("Member not found".to_string())
}

async fn find_member(state: &MembersState, id: i64) -> Result<Member> {
    state
        .member_repo
        .find_by_id(id)
        .await?
        .ok_or_else(member_not_found)
}

pub async fn create(
    State(state): State<MembersState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Member>)> {
    let input = MemberInput::validate(&json_body(body)?)?;

    let member = state.member_repo.create(&input).await?;
    tracing::info!(member_id = member.id, "Member created");

    Ok((StatusCode::CREATED, Json(member)))
}

pub async fn list(State(state): State<MembersState>) -> Result<Json<Vec<Member>>> {
    let members = state.member_repo.find_all().await?;
    Ok(Json(members))
}

pub async fn show(
    State(state): State<MembersState>,
    path: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<Member>> {
    let id = path_id(path, member_not_found)?;
    let member = find_member(&state, id).await?;
    Ok(Json(member))
}

pub async fn update(
    State(state): State<MembersState>,
    path: std::result::Result<Path<i64>, PathRejection>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let id = path_id(path, member_not_found)?;
    find_member(&state, id).await?;
    let input = MemberInput::validate(&json_body(body)?)?;

    if !state.member_repo.update(id, &input).await? {
        return Err(member_not_found());
    }
    tracing::info!(member_id = id, "Member updated");

    Ok(MessageResponse::new("Member details updated successfully"))
}

/// Fails with a conflict while the member still owns workout sessions.
pub async fn delete(
    State(state): State<MembersState>,
    path: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>> {
    let id = path_id(path, member_not_found)?;
    find_member(&state, id).await?;

    let deleted = state.member_repo.delete(id).await.map_err(|e| {
        if e.is_foreign_key_violation() {
            AppError::Conflict("Member still has workout sessions".to_string())
        } else {
            e
        }
    })?;
    if !deleted {
        return Err(member_not_found());
    }
    tracing::info!(member_id = id, "Member removed");

    Ok(MessageResponse::new("Member removed successfully"))
}

pub async fn workout_sessions(
    State(state): State<MembersState>,
    path: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<WorkoutSession>>> {
    let id = path_id(path, member_not_found)?;
    let member = find_member(&state, id).await?;
    let sessions = state.session_repo.find_by_member(member.id).await?;
    Ok(Json(sessions))
}
