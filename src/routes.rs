use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handlers::{members, workout_sessions};

pub fn create_router(
    members_state: members::MembersState,
    sessions_state: workout_sessions::WorkoutSessionsState,
) -> Router {
    Router::new()
        // Member routes
        .route("/members", get(members::list).post(members::create))
        .route(
            "/members/{id}",
            get(members::show)
                .put(members::update)
                .delete(members::delete),
        )
        .route(
            "/members/{id}/workout_sessions",
            get(members::workout_sessions),
        )
        .with_state(members_state)
        // Workout session routes; POST takes the owning member id, the rest a session id
        .route("/workout_sessions", get(workout_sessions::list))
        .route(
            "/workout_sessions/{id}",
            get(workout_sessions::show)
                .post(workout_sessions::create)
                .put(workout_sessions::update)
                .delete(workout_sessions::delete),
        )
        .with_state(sessions_state)
        .layer(TraceLayer::new_for_http())
}
