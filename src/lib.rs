pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod migrations;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod validation;

use axum::Router;

use db::DbPool;
use handlers::{members::MembersState, workout_sessions::WorkoutSessionsState};
use repositories::{MemberRepository, WorkoutSessionRepository};

/// Wire repositories over `pool` into the full application router.
pub fn build_app(pool: DbPool) -> Router {
    let member_repo = MemberRepository::new(pool.clone());
    let session_repo = WorkoutSessionRepository::new(pool);

    let members_state = MembersState {
        member_repo,
        session_repo: session_repo.clone(),
    };
    let sessions_state = WorkoutSessionsState { session_repo };

    routes::create_router(members_state, sessions_state)
}
