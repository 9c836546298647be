mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use fitness_center::repositories::MemberRepository;

#[tokio::test]
async fn test_create_then_get_member() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let (status, created) = common::send(
        app.clone(),
        Method::POST,
        "/members",
        Some(json!({"name": "Alice", "age": 29})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Alice");
    assert_eq!(created["age"], 29);
    let id = created["id"].as_i64().expect("id should be an integer");

    let (status, fetched) =
        common::send(app, Method::GET, &format!("/members/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, json!({"id": id, "name": "Alice", "age": 29}));
}

#[tokio::test]
async fn test_create_member_empty_name_persists_nothing() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let (status, body) = common::send(
        app,
        Method::POST,
        "/members",
        Some(json!({"name": "", "age": 30})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"name": ["Shorter than minimum length 1."]}));

    let members = MemberRepository::new(pool).find_all().await.unwrap();
    assert!(members.is_empty());
}

#[tokio::test]
async fn test_create_member_missing_age() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let (status, body) =
        common::send(app, Method::POST, "/members", Some(json!({"name": "Bob"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"age": ["Missing data for required field."]}));
    assert!(MemberRepository::new(pool).find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_member_rejects_client_id() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let (status, body) = common::send(
        app,
        Method::POST,
        "/members",
        Some(json!({"id": 42, "name": "Eve", "age": 22})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"id": ["Unknown field."]}));
}

#[tokio::test]
async fn test_create_member_malformed_json() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = tower::ServiceExt::oneshot(
        app,
        axum::http::Request::builder()
            .method(Method::POST)
            .uri("/members")
            .header(axum::http::header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from("{not json"))
            .unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_members_in_insert_order() {
    let pool = common::setup_test_db();
    common::create_test_member(&pool, "First", 20).await;
    common::create_test_member(&pool, "Second", 30).await;
    let app = common::create_test_app(pool);

    let (status, body) = common::send(app, Method::GET, "/members", None).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["First", "Second"]);
}

#[tokio::test]
async fn test_list_members_empty() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let (status, body) = common::send(app, Method::GET, "/members", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_get_missing_member_returns_404() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let (status, body) = common::send(app, Method::GET, "/members/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Member not found");
}

#[tokio::test]
async fn test_update_member_replaces_fields() {
    let pool = common::setup_test_db();
    let member = common::create_test_member(&pool, "Carol", 40).await;
    let app = common::create_test_app(pool);
    let uri = format!("/members/{}", member.id);

    let (status, body) = common::send(
        app.clone(),
        Method::PUT,
        &uri,
        Some(json!({"name": "Caroline", "age": 41})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Member details updated successfully"}));

    let (_, fetched) = common::send(app, Method::GET, &uri, None).await;
    assert_eq!(fetched["name"], "Caroline");
    assert_eq!(fetched["age"], 41);
}

#[tokio::test]
async fn test_update_member_requires_all_fields() {
    let pool = common::setup_test_db();
    let member = common::create_test_member(&pool, "Dan", 50).await;
    let app = common::create_test_app(pool.clone());

    let (status, body) = common::send(
        app,
        Method::PUT,
        &format!("/members/{}", member.id),
        Some(json!({"age": 51})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"name": ["Missing data for required field."]}));

    let unchanged = MemberRepository::new(pool)
        .find_by_id(member.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged, member);
}

#[tokio::test]
async fn test_update_missing_member_checks_existence_first() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    // Invalid body, but the unknown id wins
    let (status, _) =
        common::send(app, Method::PUT, "/members/77", Some(json!({"name": ""}))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_member_then_get_returns_404() {
    let pool = common::setup_test_db();
    let member = common::create_test_member(&pool, "Frank", 33).await;
    let app = common::create_test_app(pool);
    let uri = format!("/members/{}", member.id);

    let (status, body) = common::send(app.clone(), Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Member removed successfully"}));

    let (status, _) = common::send(app.clone(), Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = common::send(app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_member_with_sessions_conflicts() {
    let pool = common::setup_test_db();
    let member = common::create_test_member(&pool, "Gina", 27).await;
    common::create_test_session(&pool, member.id, common::date(2024, 5, 1), "Yoga").await;
    let app = common::create_test_app(pool.clone());

    let (status, body) =
        common::send(app, Method::DELETE, &format!("/members/{}", member.id), None).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Member still has workout sessions");
    assert!(MemberRepository::new(pool)
        .find_by_id(member.id)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_member_sessions_only_lists_own() {
    let pool = common::setup_test_db();
    let alice = common::create_test_member(&pool, "Alice", 29).await;
    let bob = common::create_test_member(&pool, "Bob", 31).await;
    let first = common::create_test_session(&pool, alice.id, common::date(2024, 1, 2), "Run").await;
    common::create_test_session(&pool, bob.id, common::date(2024, 1, 3), "Swim").await;
    let second = common::create_test_session(&pool, alice.id, common::date(2024, 1, 1), "Lift").await;
    let app = common::create_test_app(pool);

    let (status, body) = common::send(
        app,
        Method::GET,
        &format!("/members/{}/workout_sessions", alice.id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["session_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, [first.session_id, second.session_id]);
    assert!(body
        .as_array()
        .unwrap()
        .iter()
        .all(|s| s["member_id"] == alice.id));
}

#[tokio::test]
async fn test_member_sessions_for_missing_member() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let (status, _) = common::send(app, Method::GET, "/members/5/workout_sessions", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_integer_member_id_returns_json_404() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    for (method, uri, body) in [
        (Method::GET, "/members/abc", None),
        (Method::PUT, "/members/abc", Some(json!({"name": "Zed", "age": 9}))),
        (Method::DELETE, "/members/abc", None),
        (Method::GET, "/members/abc/workout_sessions", None),
    ] {
        let (status, response) = common::send(app.clone(), method, uri, body).await;

        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(
            response,
            json!({"error": "Not Found", "message": "Member not found"})
        );
    }
}
