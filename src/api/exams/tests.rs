use axum::http::{Method, StatusCode};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

use crate::test_support;

fn exam_payload() -> serde_json::Value {
    json!({
        "title": "Driving theory exam",
        "description": "Theory exam, session A",
        "candidate_id": 7,
        "candidate_name": "Sarah Martin",
        "date": "05/05/2023 14:30:00",
        "location_name": "Montut",
        "latitude": 47.3215806,
        "longitude": 5.0414701
    })
}

async fn seed_exams(pool: &PgPool, count: usize) {
    for i in 0..count {
        test_support::insert_exam(
            pool,
            1_000 + i as i64,
            &format!("Candidate {i:02}"),
            &format!("2023-05-05 {:02}:{:02}:00", 8 + i / 60, i % 60),
            "Montut",
        )
        .await;
    }
}

#[tokio::test]
async fn admin_sees_paginated_exams_newest_first() {
    let ctx = test_support::setup_test_context().await;

    let admin =
        test_support::insert_admin(ctx.state.db(), "Boss", "boss@v3.admin", "secret-pass").await;
    let token = test_support::issue_token(ctx.state.db(), ctx.state.settings(), admin.id).await;

    seed_exams(ctx.state.db(), 35).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/api/exams", Some(&token), None))
        .await
        .expect("list exams");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");

    let exams = body["exams"].as_array().expect("exams array");
    assert_eq!(exams.len(), 30);

    let dates: Vec<&str> = exams.iter().map(|exam| exam["date"].as_str().unwrap()).collect();
    assert!(dates.windows(2).all(|pair| pair[0] >= pair[1]), "dates not descending: {dates:?}");

    assert_eq!(body["meta"]["current_page"], 1);
    assert_eq!(body["meta"]["last_page"], 2);
    assert_eq!(body["meta"]["per_page"], 30);
    assert_eq!(body["meta"]["total"], 35);
    assert_eq!(body["meta"]["from"], 1);
    assert_eq!(body["meta"]["to"], 30);
    assert_eq!(body["links"]["first"], "/api/exams?page=1");
    assert_eq!(body["links"]["last"], "/api/exams?page=2");
    assert!(body["links"]["prev"].is_null());
    assert_eq!(body["links"]["next"], "/api/exams?page=2");

    let response = ctx
        .app
        .oneshot(test_support::json_request(Method::GET, "/api/exams?page=2", Some(&token), None))
        .await
        .expect("list exams page 2");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["exams"].as_array().map(Vec::len), Some(5));
    assert_eq!(body["meta"]["from"], 31);
    assert_eq!(body["meta"]["to"], 35);
    assert!(body["links"]["next"].is_null());
    assert_eq!(body["links"]["prev"], "/api/exams?page=1");
}

#[tokio::test]
async fn ordering_follows_the_order_parameter() {
    let ctx = test_support::setup_test_context().await;

    let admin =
        test_support::insert_admin(ctx.state.db(), "Boss", "boss@v3.admin", "secret-pass").await;
    let token = test_support::issue_token(ctx.state.db(), ctx.state.settings(), admin.id).await;

    seed_exams(ctx.state.db(), 3).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/exams?order=asc",
            Some(&token),
            None,
        ))
        .await
        .expect("list asc");

    let body = test_support::read_json(response).await;
    let dates: Vec<&str> =
        body["exams"].as_array().unwrap().iter().map(|e| e["date"].as_str().unwrap()).collect();
    assert!(dates.windows(2).all(|pair| pair[0] <= pair[1]), "dates not ascending: {dates:?}");

    // Anything other than asc sorts descending.
    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/exams?order=sideways",
            Some(&token),
            None,
        ))
        .await
        .expect("list fallback order");

    let body = test_support::read_json(response).await;
    let dates: Vec<&str> =
        body["exams"].as_array().unwrap().iter().map(|e| e["date"].as_str().unwrap()).collect();
    assert!(dates.windows(2).all(|pair| pair[0] >= pair[1]), "dates not descending: {dates:?}");
}

#[tokio::test]
async fn limit_and_page_shape_the_listing() {
    let ctx = test_support::setup_test_context().await;

    let admin =
        test_support::insert_admin(ctx.state.db(), "Boss", "boss@v3.admin", "secret-pass").await;
    let token = test_support::issue_token(ctx.state.db(), ctx.state.settings(), admin.id).await;

    seed_exams(ctx.state.db(), 12).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/exams?limit=5&page=3",
            Some(&token),
            None,
        ))
        .await
        .expect("list page 3");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["exams"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["meta"]["per_page"], 5);
    assert_eq!(body["meta"]["current_page"], 3);
    assert_eq!(body["meta"]["last_page"], 3);
    assert_eq!(body["meta"]["from"], 11);
    assert_eq!(body["meta"]["to"], 12);
}

#[tokio::test]
async fn malformed_listing_parameters_fall_back_to_defaults() {
    let ctx = test_support::setup_test_context().await;

    let admin =
        test_support::insert_admin(ctx.state.db(), "Boss", "boss@v3.admin", "secret-pass").await;
    let token = test_support::issue_token(ctx.state.db(), ctx.state.settings(), admin.id).await;

    seed_exams(ctx.state.db(), 32).await;

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/exams?order=sideways&limit=abc&page=zero",
            Some(&token),
            None,
        ))
        .await
        .expect("list with malformed params");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["exams"].as_array().map(Vec::len), Some(30));
    assert_eq!(body["meta"]["per_page"], 30);
    assert_eq!(body["meta"]["current_page"], 1);
}

#[tokio::test]
async fn location_filter_is_a_case_insensitive_substring() {
    let ctx = test_support::setup_test_context().await;

    let admin =
        test_support::insert_admin(ctx.state.db(), "Boss", "boss@v3.admin", "secret-pass").await;
    let token = test_support::issue_token(ctx.state.db(), ctx.state.settings(), admin.id).await;

    test_support::insert_exam(ctx.state.db(), 1, "Sarah", "2023-05-05 09:00:00", "Montut").await;
    test_support::insert_exam(ctx.state.db(), 2, "Peter", "2023-05-06 09:00:00", "Grand Montut")
        .await;
    test_support::insert_exam(ctx.state.db(), 3, "Paula", "2023-05-07 09:00:00", "Paris").await;

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/exams?location=montut",
            Some(&token),
            None,
        ))
        .await
        .expect("list filtered");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["meta"]["total"], 2);
    let locations: Vec<&str> = body["exams"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["locationName"].as_str().unwrap())
        .collect();
    assert!(locations.iter().all(|name| name.to_lowercase().contains("montut")));
}

#[tokio::test]
async fn date_filter_matches_a_substring() {
    let ctx = test_support::setup_test_context().await;

    let admin =
        test_support::insert_admin(ctx.state.db(), "Boss", "boss@v3.admin", "secret-pass").await;
    let token = test_support::issue_token(ctx.state.db(), ctx.state.settings(), admin.id).await;

    test_support::insert_exam(ctx.state.db(), 1, "Sarah", "2023-05-05 09:00:00", "Montut").await;
    test_support::insert_exam(ctx.state.db(), 2, "Peter", "2023-05-06 09:00:00", "Montut").await;
    test_support::insert_exam(ctx.state.db(), 3, "Paula", "2023-06-01 09:00:00", "Montut").await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/exams?date=2023-05",
            Some(&token),
            None,
        ))
        .await
        .expect("list by date");

    let body = test_support::read_json(response).await;
    assert_eq!(body["meta"]["total"], 2);

    // Filters conjoin.
    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/exams?date=2023-05&location=paris",
            Some(&token),
            None,
        ))
        .await
        .expect("list combined");

    let body = test_support::read_json(response).await;
    assert_eq!(body["meta"]["total"], 0);
    assert_eq!(body["exams"], json!([]));
    assert!(body["meta"]["from"].is_null());
    assert!(body["meta"]["to"].is_null());
}

#[tokio::test]
async fn filter_wildcards_match_literally() {
    let ctx = test_support::setup_test_context().await;

    let admin =
        test_support::insert_admin(ctx.state.db(), "Boss", "boss@v3.admin", "secret-pass").await;
    let token = test_support::issue_token(ctx.state.db(), ctx.state.settings(), admin.id).await;

    test_support::insert_exam(ctx.state.db(), 1, "Sarah", "2023-05-05 09:00:00", "Hall 50%").await;
    test_support::insert_exam(ctx.state.db(), 2, "Peter", "2023-05-06 09:00:00", "Hall 50x").await;

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/exams?location=50%25",
            Some(&token),
            None,
        ))
        .await
        .expect("list with percent");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["exams"][0]["locationName"], "Hall 50%");
}

#[tokio::test]
async fn listing_requires_an_administrator() {
    let ctx = test_support::setup_test_context().await;

    let candidate =
        test_support::insert_user(ctx.state.db(), "Sarah Martin", "sarah@example.com", "secret-pass")
            .await;
    let token = test_support::issue_token(ctx.state.db(), ctx.state.settings(), candidate.id).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/api/exams", Some(&token), None))
        .await
        .expect("list as candidate");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::NOT_FOUND, "response: {body}");
    assert_eq!(body["msg"], "Not found.");

    let response = ctx
        .app
        .oneshot(test_support::json_request(Method::GET, "/api/exams", None, None))
        .await
        .expect("list without token");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED, "response: {body}");
    assert_eq!(body["msg"], "Unauthenticated.");
}

#[tokio::test]
async fn create_exam_round_trip() {
    let ctx = test_support::setup_test_context().await;

    let admin =
        test_support::insert_admin(ctx.state.db(), "Boss", "boss@v3.admin", "secret-pass").await;
    let token = test_support::issue_token(ctx.state.db(), ctx.state.settings(), admin.id).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/exams",
            Some(&token),
            Some(exam_payload()),
        ))
        .await
        .expect("create exam");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::CREATED, "response: {body}");
    assert_eq!(body["title"], "Driving theory exam");
    assert_eq!(body["candidate_id"], 7);
    assert_eq!(body["candidate_name"], "Sarah Martin");
    assert_eq!(body["date"], "05/05/2023 14:30:00");
    assert_eq!(body["location_name"], "Montut");
    assert!(body["created_at"].is_string());
    let exam_id = body["id"].as_i64().expect("exam id");

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/exams/{exam_id}"),
            Some(&token),
            None,
        ))
        .await
        .expect("show exam");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["exam"]["id"], exam_id);
    assert_eq!(body["exam"]["candidateName"], "Sarah Martin");
}

#[tokio::test]
async fn create_exam_rejects_duplicate_bookings() {
    let ctx = test_support::setup_test_context().await;

    let admin =
        test_support::insert_admin(ctx.state.db(), "Boss", "boss@v3.admin", "secret-pass").await;
    let token = test_support::issue_token(ctx.state.db(), ctx.state.settings(), admin.id).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/exams",
            Some(&token),
            Some(exam_payload()),
        ))
        .await
        .expect("first booking");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/exams",
            Some(&token),
            Some(exam_payload()),
        ))
        .await
        .expect("duplicate booking");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "response: {body}");
    assert_eq!(body["msg"], "Candidate is already booked in for an exam at this time.");

    // A different description is a different booking.
    let mut payload = exam_payload();
    payload["description"] = json!("Theory exam, session B");
    let response = ctx
        .app
        .oneshot(test_support::json_request(Method::POST, "/api/exams", Some(&token), Some(payload)))
        .await
        .expect("distinct booking");
    assert_eq!(response.status(), StatusCode::CREATED);
}

// Read routes go through the resource shape with camelCase keys; create
// and update echo the stored record with snake_case keys.
#[tokio::test]
async fn read_routes_camel_case_keys_while_writes_echo_the_record() {
    let ctx = test_support::setup_test_context().await;

    let admin =
        test_support::insert_admin(ctx.state.db(), "Boss", "boss@v3.admin", "secret-pass").await;
    let token = test_support::issue_token(ctx.state.db(), ctx.state.settings(), admin.id).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/exams",
            Some(&token),
            Some(exam_payload()),
        ))
        .await
        .expect("create exam");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::CREATED, "response: {body}");
    assert_eq!(body["candidate_name"], "Sarah Martin");
    assert_eq!(body["location_name"], "Montut");
    assert!(body["candidateName"].is_null());
    let exam_id = body["id"].as_i64().expect("exam id");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/exams/{exam_id}"),
            Some(&token),
            None,
        ))
        .await
        .expect("show exam");

    let body = test_support::read_json(response).await;
    let exam = body["exam"].as_object().expect("exam object");
    let resource_keys = [
        "id", "title", "description", "candidateId", "candidateName", "date", "locationName",
        "latitude", "longitude",
    ];
    for key in resource_keys {
        assert!(exam.contains_key(key), "missing {key}: {body}");
    }
    assert!(!exam.contains_key("candidate_name"), "snake_case leaked: {body}");
    assert!(!exam.contains_key("created_at"), "timestamps leaked: {body}");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/api/exams", Some(&token), None))
        .await
        .expect("list exams");

    let body = test_support::read_json(response).await;
    assert_eq!(body["exams"][0]["candidateId"], 7);
    assert!(body["exams"][0]["candidate_id"].is_null());

    let response = ctx
        .app
        .oneshot(test_support::json_request(Method::GET, "/api/exams/search/sarah", None, None))
        .await
        .expect("search exams");

    let body = test_support::read_json(response).await;
    assert_eq!(body["exams"][0]["locationName"], "Montut");
    assert!(body["exams"][0]["location_name"].is_null());
}

#[tokio::test]
async fn create_exam_validates_the_payload() {
    let ctx = test_support::setup_test_context().await;

    let admin =
        test_support::insert_admin(ctx.state.db(), "Boss", "boss@v3.admin", "secret-pass").await;
    let token = test_support::issue_token(ctx.state.db(), ctx.state.settings(), admin.id).await;

    let mut bad_date = exam_payload();
    bad_date["date"] = json!("whenever works");
    let mut empty_title = exam_payload();
    empty_title["title"] = json!("");
    let mut bad_latitude = exam_payload();
    bad_latitude["latitude"] = json!(95.0);

    for payload in [bad_date, empty_title, bad_latitude] {
        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(
                Method::POST,
                "/api/exams",
                Some(&token),
                Some(payload.clone()),
            ))
            .await
            .expect("create exam");

        let status = response.status();
        let body = test_support::read_json(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {payload}, response: {body}");
    }
}

#[tokio::test]
async fn create_exam_envelopes_a_missing_field() {
    let ctx = test_support::setup_test_context().await;

    let admin =
        test_support::insert_admin(ctx.state.db(), "Boss", "boss@v3.admin", "secret-pass").await;
    let token = test_support::issue_token(ctx.state.db(), ctx.state.settings(), admin.id).await;

    let mut payload = exam_payload();
    payload.as_object_mut().unwrap().remove("title");

    let response = ctx
        .app
        .oneshot(test_support::json_request(Method::POST, "/api/exams", Some(&token), Some(payload)))
        .await
        .expect("create without title");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "response: {body}");
    assert!(body["msg"].is_string(), "no msg key: {body}");
}

#[tokio::test]
async fn create_exam_requires_an_administrator() {
    let ctx = test_support::setup_test_context().await;

    let candidate =
        test_support::insert_user(ctx.state.db(), "Sarah Martin", "sarah@example.com", "secret-pass")
            .await;
    let token = test_support::issue_token(ctx.state.db(), ctx.state.settings(), candidate.id).await;

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/exams",
            Some(&token),
            Some(exam_payload()),
        ))
        .await
        .expect("create as candidate");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::NOT_FOUND, "response: {body}");
    assert_eq!(body["msg"], "Not found.");
}

#[tokio::test]
async fn owner_views_updates_and_deletes_their_booking() {
    let ctx = test_support::setup_test_context().await;

    let owner =
        test_support::insert_user(ctx.state.db(), "Sarah Martin", "sarah@example.com", "secret-pass")
            .await;
    let token = test_support::issue_token(ctx.state.db(), ctx.state.settings(), owner.id).await;

    let exam = test_support::insert_exam(
        ctx.state.db(),
        owner.id,
        "Sarah Martin",
        "2023-05-05 14:30:00",
        "Montut",
    )
    .await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/exams/{}", exam.id),
            Some(&token),
            None,
        ))
        .await
        .expect("show own exam");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["exam"]["id"], exam.id);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::PUT,
            &format!("/api/exams/{}", exam.id),
            Some(&token),
            Some(json!({"location_name": "Grand Montut"})),
        ))
        .await
        .expect("update own exam");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["location_name"], "Grand Montut");
    assert_eq!(body["candidate_name"], "Sarah Martin");
    assert!(body["exam"].is_null());

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::DELETE,
            &format!("/api/exams/{}", exam.id),
            Some(&token),
            None,
        ))
        .await
        .expect("delete own exam");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body, json!(1));
}

#[tokio::test]
async fn administrator_cannot_update_a_booking_they_do_not_own() {
    let ctx = test_support::setup_test_context().await;

    let owner =
        test_support::insert_user(ctx.state.db(), "Sarah Martin", "sarah@example.com", "secret-pass")
            .await;
    let admin =
        test_support::insert_admin(ctx.state.db(), "Boss", "boss@v3.admin", "secret-pass").await;
    let token = test_support::issue_token(ctx.state.db(), ctx.state.settings(), admin.id).await;

    let exam = test_support::insert_exam(
        ctx.state.db(),
        owner.id,
        "Sarah Martin",
        "2023-05-05 14:30:00",
        "Montut",
    )
    .await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/exams/{}", exam.id),
            Some(&token),
            None,
        ))
        .await
        .expect("show as admin");
    assert_eq!(response.status(), StatusCode::OK);

    // Amending stays with the owning candidate.
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::PUT,
            &format!("/api/exams/{}", exam.id),
            Some(&token),
            Some(json!({"location_name": "Grand Montut"})),
        ))
        .await
        .expect("update as admin");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::NOT_FOUND, "response: {body}");
    assert_eq!(body["msg"], "Not found.");

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::DELETE,
            &format!("/api/exams/{}", exam.id),
            Some(&token),
            None,
        ))
        .await
        .expect("delete as admin");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn strangers_cannot_see_or_touch_a_booking() {
    let ctx = test_support::setup_test_context().await;

    let owner =
        test_support::insert_user(ctx.state.db(), "Sarah Martin", "sarah@example.com", "secret-pass")
            .await;
    let stranger =
        test_support::insert_user(ctx.state.db(), "Peter Quinn", "peter@example.com", "secret-pass")
            .await;
    let token = test_support::issue_token(ctx.state.db(), ctx.state.settings(), stranger.id).await;

    let exam = test_support::insert_exam(
        ctx.state.db(),
        owner.id,
        "Sarah Martin",
        "2023-05-05 14:30:00",
        "Montut",
    )
    .await;

    let attempts = [
        (Method::GET, None),
        (Method::PUT, Some(json!({"location_name": "Elsewhere"}))),
        (Method::DELETE, None),
    ];

    for (method, payload) in attempts {
        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(
                method.clone(),
                &format!("/api/exams/{}", exam.id),
                Some(&token),
                payload,
            ))
            .await
            .expect("stranger request");

        let status = response.status();
        let body = test_support::read_json(response).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "method: {method}, response: {body}");
        assert_eq!(body["msg"], "Not found.");
    }
}

#[tokio::test]
async fn missing_and_malformed_exam_ids_are_not_found() {
    let ctx = test_support::setup_test_context().await;

    let admin =
        test_support::insert_admin(ctx.state.db(), "Boss", "boss@v3.admin", "secret-pass").await;
    let token = test_support::issue_token(ctx.state.db(), ctx.state.settings(), admin.id).await;

    for uri in ["/api/exams/999999", "/api/exams/not-a-number"] {
        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(Method::GET, uri, Some(&token), None))
            .await
            .expect("show exam");

        let status = response.status();
        let body = test_support::read_json(response).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "uri: {uri}, response: {body}");
        assert_eq!(body["msg"], "Not found.");
    }
}

#[tokio::test]
async fn update_changes_only_the_provided_fields() {
    let ctx = test_support::setup_test_context().await;

    let owner =
        test_support::insert_user(ctx.state.db(), "Sarah Martin", "sarah@example.com", "secret-pass")
            .await;
    let token = test_support::issue_token(ctx.state.db(), ctx.state.settings(), owner.id).await;

    let exam = test_support::insert_exam(
        ctx.state.db(),
        owner.id,
        "Sarah Martin",
        "2023-05-05 14:30:00",
        "Montut",
    )
    .await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::PUT,
            &format!("/api/exams/{}", exam.id),
            Some(&token),
            Some(json!({"date": "2023-06-10 09:00:00"})),
        ))
        .await
        .expect("update date");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["date"], "2023-06-10 09:00:00");
    assert_eq!(body["location_name"], "Montut");
    assert_eq!(body["title"], exam.title);

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::PUT,
            &format!("/api/exams/{}", exam.id),
            Some(&token),
            Some(json!({"date": "sometime soon"})),
        ))
        .await
        .expect("update bad date");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "response: {body}");
}

#[tokio::test]
async fn search_matches_candidate_names_without_a_token() {
    let ctx = test_support::setup_test_context().await;

    test_support::insert_exam(ctx.state.db(), 1, "Sarah Martin", "2023-05-05 09:00:00", "Montut")
        .await;
    test_support::insert_exam(ctx.state.db(), 2, "Sarah Connor", "2023-05-06 09:00:00", "Paris")
        .await;
    test_support::insert_exam(ctx.state.db(), 3, "Peter Quinn", "2023-05-07 09:00:00", "Montut")
        .await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/api/exams/search/sarah", None, None))
        .await
        .expect("search");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    let exams = body["exams"].as_array().expect("exams array");
    assert_eq!(exams.len(), 2);
    assert_eq!(exams[0]["candidateName"], "Sarah Martin");
    assert_eq!(exams[1]["candidateName"], "Sarah Connor");

    // A miss is an empty collection, not an error.
    let response = ctx
        .app
        .oneshot(test_support::json_request(Method::GET, "/api/exams/search/nobody", None, None))
        .await
        .expect("search miss");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body, json!({"exams": []}));
}

#[tokio::test]
async fn search_wildcards_match_literally() {
    let ctx = test_support::setup_test_context().await;

    test_support::insert_exam(ctx.state.db(), 1, "Sarah 100%", "2023-05-05 09:00:00", "Montut")
        .await;
    test_support::insert_exam(ctx.state.db(), 2, "Sarah 100x", "2023-05-06 09:00:00", "Montut")
        .await;

    let response = ctx
        .app
        .oneshot(test_support::json_request(Method::GET, "/api/exams/search/100%25", None, None))
        .await
        .expect("search percent");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    let exams = body["exams"].as_array().expect("exams array");
    assert_eq!(exams.len(), 1);
    assert_eq!(exams[0]["candidateName"], "Sarah 100%");
}
