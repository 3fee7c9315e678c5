// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP API tests against an in-memory store.

use axum::http::StatusCode;
use habit_hike::db::MemoryStore;
use habit_hike::models::{DailyScoreLog, DayScore, Habit, Hike, HikeStatus};
use serde_json::json;
use tower::ServiceExt;

mod common;
use common::{
    body_json, create_test_app, create_test_app_with, date, get_request, json_request,
};

#[tokio::test]
async fn test_health_reports_collection_sizes() {
    let (app, _state, _store) = create_test_app();

    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["hikes"], 0);
    assert_eq!(body["scoreLogs"], 0);
}

#[tokio::test]
async fn test_full_hike_flow() {
    let (app, _state, store) = create_test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/hikes",
            json!({
                "title": "Spring Ascent",
                "startDate": "2024-01-01",
                "targetDate": "2024-04-10",
                "targetScore": 1000
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let hike = body_json(response).await;
    assert_eq!(hike["status"], "DRAFT");
    let hike_id = hike["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/hikes/{}/start", hike_id),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ACTIVE");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/hikes/{}/habits", hike_id),
            json!({ "name": "Run", "icon": "shoe" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let habit = body_json(response).await;
    assert_eq!(habit["positiveScore"], 10);
    assert_eq!(habit["negativeScore"], -5);
    let habit_id = habit["id"].as_str().unwrap().to_string();

    for (day, score) in [("2024-01-01", 1), ("2024-01-02", 1), ("2024-01-03", 0)] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/habits/{}/scores", habit_id),
                json!({ "date": day, "score": score }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(get_request("/api/hikes/open"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let open = body_json(response).await;
    assert_eq!(open["hike"]["id"], hike_id.as_str());
    assert_eq!(open["hike"]["totalScore"], 15);
    assert_eq!(open["hike"]["habits"][0]["completedDays"], 2);
    assert_eq!(open["hike"]["habits"][0]["currentStreak"], 0);
    assert_eq!(open["hike"]["milestones"].as_array().unwrap().len(), 10);
    assert_eq!(open["hike"]["nextMilestone"]["name"], "Base Camp");
    assert!(open["dayNumber"].is_number());

    assert_eq!(store.hikes().len(), 1);
    assert_eq!(store.habits().len(), 1);
    assert_eq!(store.score_logs().len(), 3);
}

#[tokio::test]
async fn test_open_hike_when_none() {
    let (app, _state, _store) = create_test_app();

    let response = app.oneshot(get_request("/api/hikes/open")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["hike"].is_null());
    assert!(body["dayNumber"].is_null());
}

#[tokio::test]
async fn test_relog_returns_updated_habit() {
    let (app, state, _store) = create_test_app();
    let habit_id = {
        let mut session = state.session.lock().await;
        let hike = session
            .create_hike(common::new_hike("Spring", 500.0))
            .unwrap();
        session
            .add_habit(&hike.id, common::new_habit("Read", "book"))
            .unwrap()
            .id
    };

    let uri = format!("/api/habits/{}/scores", habit_id);
    app.clone()
        .oneshot(json_request(
            "POST",
            &uri,
            json!({ "date": "2024-01-05", "score": 1 }),
        ))
        .await
        .unwrap();
    let response = app
        .oneshot(json_request(
            "POST",
            &uri,
            json!({ "date": "2024-01-05", "score": 0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let habit = body_json(response).await;
    assert_eq!(habit["scoreLogs"].as_array().unwrap().len(), 1);
    assert_eq!(habit["totalScore"], -5);
}

#[tokio::test]
async fn test_invalid_score_is_bad_request() {
    let (app, state, store) = create_test_app();
    let habit_id = {
        let mut session = state.session.lock().await;
        let hike = session
            .create_hike(common::new_hike("Spring", 500.0))
            .unwrap();
        session
            .add_habit(&hike.id, common::new_habit("Read", "book"))
            .unwrap()
            .id
    };

    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/api/habits/{}/scores", habit_id),
            json!({ "date": "2024-01-05", "score": 2 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "bad_request");
    assert!(store.score_logs().is_empty());
}

#[tokio::test]
async fn test_unknown_habit_is_not_found() {
    let (app, _state, _store) = create_test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/habits/missing/scores",
            json!({ "date": "2024-01-05", "score": 1 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(
            axum::http::Request::builder()
                .method("DELETE")
                .uri("/api/habits/missing")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_habit_on_unknown_hike_is_not_found() {
    let (app, _state, store) = create_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/hikes/missing/habits",
            json!({ "name": "Run" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(store.habits().is_empty());
}

#[tokio::test]
async fn test_create_hike_validation() {
    let (app, _state, _store) = create_test_app();

    let bad_requests = [
        json!({ "title": "", "targetDate": "2024-04-10" }),
        json!({ "title": "a".repeat(101), "targetDate": "2024-04-10" }),
        json!({
            "title": "Backwards",
            "startDate": "2024-04-10",
            "targetDate": "2024-01-01"
        }),
        json!({
            "title": "Negative",
            "startDate": "2024-01-01",
            "targetDate": "2024-04-10",
            "targetScore": -10
        }),
    ];

    for body in bad_requests {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/hikes", body.clone()))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "expected 400 for {}",
            body
        );
    }
}

#[tokio::test]
async fn test_invalid_status_transition_is_bad_request() {
    let (app, state, _store) = create_test_app();
    let hike_id = {
        let mut session = state.session.lock().await;
        let hike = session
            .create_hike(common::new_hike("Spring", 500.0))
            .unwrap();
        session.complete_hike(&hike.id).unwrap();
        hike.id
    };

    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/api/hikes/{}/abandon", hike_id),
            json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_habit_merges_fields() {
    let (app, state, store) = create_test_app();
    let habit_id = {
        let mut session = state.session.lock().await;
        let hike = session
            .create_hike(common::new_hike("Spring", 500.0))
            .unwrap();
        session
            .add_habit(&hike.id, common::new_habit("Read", "book"))
            .unwrap()
            .id
    };

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/habits/{}", habit_id),
            json!({ "notes": "Twenty pages", "positiveScore": 15 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let habit = body_json(response).await;
    assert_eq!(habit["name"], "Read");
    assert_eq!(habit["notes"], "Twenty pages");
    assert_eq!(habit["positiveScore"], 15);
    assert_eq!(store.habits()[0].positive_score, 15);
}

#[tokio::test]
async fn test_templates_and_copy_into_new_hike() {
    let (app, state, _store) = create_test_app();
    let (template_id, second_id) = {
        let mut session = state.session.lock().await;
        let first = session
            .create_hike(common::new_hike("Spring", 500.0))
            .unwrap();
        let habit = session
            .add_habit(&first.id, common::new_habit("Read", "book"))
            .unwrap();
        let second = session
            .create_hike(common::new_hike("Summer", 500.0))
            .unwrap();
        (habit.id, second.id)
    };

    let response = app
        .clone()
        .oneshot(get_request("/api/habits/templates"))
        .await
        .unwrap();
    let templates = body_json(response).await;
    assert_eq!(templates.as_array().unwrap().len(), 1);
    assert_eq!(templates[0]["id"], template_id.as_str());

    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/api/hikes/{}/habits/from-template", second_id),
            json!({ "templateId": template_id }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let habit = body_json(response).await;
    assert_eq!(habit["hikeId"], second_id.as_str());
    assert_eq!(habit["name"], "Read");
}

#[tokio::test]
async fn test_delete_habit_reports_removed_logs() {
    let (app, state, store) = create_test_app();
    let habit_id = {
        let mut session = state.session.lock().await;
        let hike = session
            .create_hike(common::new_hike("Spring", 500.0))
            .unwrap();
        let habit = session
            .add_habit(&hike.id, common::new_habit("Read", "book"))
            .unwrap();
        session
            .log_score(&habit.id, common::date(2024, 1, 1), 1)
            .unwrap();
        session
            .log_score(&habit.id, common::date(2024, 1, 2), 1)
            .unwrap();
        habit.id
    };

    let response = app
        .oneshot(
            axum::http::Request::builder()
                .method("DELETE")
                .uri(format!("/api/habits/{}", habit_id))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["removedLogs"], 2);
    assert!(store.habits().is_empty());
    assert!(store.score_logs().is_empty());
}

#[tokio::test]
async fn test_failed_save_is_server_error() {
    let (app, _state, store) = create_test_app();
    store.set_fail_saves(true);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/hikes",
            json!({
                "title": "Spring",
                "startDate": "2024-01-01",
                "targetDate": "2024-04-10"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "persistence_error");
}

#[tokio::test]
async fn test_out_of_range_habit_scores_are_bad_request() {
    let (app, state, store) = create_test_app();
    let (hike_id, habit_id) = {
        let mut session = state.session.lock().await;
        let hike = session
            .create_hike(common::new_hike("Spring", 500.0))
            .unwrap();
        let habit = session
            .add_habit(&hike.id, common::new_habit("Read", "book"))
            .unwrap();
        (hike.id, habit.id)
    };

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/hikes/{}/habits", hike_id),
            json!({ "name": "Greedy", "positiveScore": i64::MAX }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/habits/{}", habit_id),
            json!({ "negativeScore": i64::MIN }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(store.habits().len(), 1);
    assert_eq!(store.habits()[0].negative_score, -5);
}

#[tokio::test]
async fn test_preloaded_extreme_scores_still_derive() {
    let hike = Hike {
        id: "h1".to_string(),
        title: "Legacy".to_string(),
        start_date: date(2024, 1, 1),
        target_date: date(2024, 4, 10),
        target_score: 1000.0,
        status: HikeStatus::Active,
    };
    let habit = Habit {
        id: "a".to_string(),
        hike_id: "h1".to_string(),
        name: "Imported".to_string(),
        icon: "star".to_string(),
        notes: String::new(),
        weight: 1.0,
        positive_score: i64::MAX,
        negative_score: -5,
    };
    let logs = (1..=3)
        .map(|d| DailyScoreLog {
            id: format!("l{}", d),
            habit_id: "a".to_string(),
            date: date(2024, 1, d),
            score: DayScore::Completed,
        })
        .collect();
    let (app, _state, _store) =
        create_test_app_with(MemoryStore::with_data(vec![hike], vec![habit], logs));

    let response = app.oneshot(get_request("/api/hikes/open")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let open = body_json(response).await;
    assert_eq!(open["hike"]["id"], "h1");
    assert_eq!(open["hike"]["totalScore"], i64::MAX);
    assert!(open["hike"]["nextMilestone"].is_null());
}
