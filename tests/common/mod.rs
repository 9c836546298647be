#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use fitness_center::db::{create_memory_pool, DbPool};
use fitness_center::migrations::run_migrations_for_tests;
use fitness_center::models::{Member, MemberInput, WorkoutSession, WorkoutSessionInput};
use fitness_center::repositories::{MemberRepository, WorkoutSessionRepository};

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

pub fn create_test_app(pool: DbPool) -> Router {
    fitness_center::build_app(pool)
}

/// Send one request through the router and return status plus parsed JSON body.
pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

pub async fn create_test_member(pool: &DbPool, name: &str, age: i64) -> Member {
    MemberRepository::new(pool.clone())
        .create(&MemberInput {
            name: name.to_string(),
            age,
        })
        .await
        .unwrap()
}

pub async fn create_test_session(
    pool: &DbPool,
    member_id: i64,
    date: NaiveDate,
    activity: &str,
) -> WorkoutSession {
    WorkoutSessionRepository::new(pool.clone())
        .create(
            member_id,
            &WorkoutSessionInput {
                date,
                session_time: "morning".to_string(),
                activity: activity.to_string(),
                calories_burned: 300,
                duration_minutes: 30,
                member_id: None,
            },
        )
        .await
        .unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
