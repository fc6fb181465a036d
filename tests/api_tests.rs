// tests/api_tests.rs

use std::sync::Arc;

use quiz_backend::{
    config::Config,
    models::question::NewQuestion,
    routes,
    state::AppState,
    store::{QuestionStore, SqliteQuestionStore},
};

const ADMIN_TOKEN: &str = "test-admin-token";

fn test_config(admin_token: Option<&str>) -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        rust_log: "error".to_string(),
        cors_origin: "http://localhost:3000".to_string(),
        admin_token: admin_token.map(str::to_string),
    }
}

fn question(text: &str, correct: &str) -> NewQuestion {
    NewQuestion {
        question_text: text.to_string(),
        option_a: "Option A".to_string(),
        option_b: "Option B".to_string(),
        option_c: "Option C".to_string(),
        option_d: "Option D".to_string(),
        correct_option: correct.to_string(),
    }
}

/// Spawns the app on a random port, backed by a fresh in-memory database holding
/// two questions: #1 (correct "A") and #2 (correct "B").
/// Returns the base URL and the store handle.
async fn spawn_app_with(admin_token: Option<&str>) -> (String, SqliteQuestionStore) {
    let config = test_config(admin_token);

    // 1. Open the store (runs migrations)
    let store = SqliteQuestionStore::connect(&config.database_url)
        .await
        .expect("Failed to open in-memory database");

    // 2. Seed
    store.insert(&question("Test question 1?", "A")).await.unwrap();
    store.insert(&question("Test question 2?", "B")).await.unwrap();

    // 3. Build the router
    let state = AppState {
        store: Arc::new(store.clone()),
        config,
    };
    let app = routes::create_router(state);

    // 4. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // 5. Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, store)
}

async fn spawn_app() -> (String, SqliteQuestionStore) {
    spawn_app_with(None).await
}

async fn submit(address: &str, body: serde_json::Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{}/api/quiz/submit", address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request")
}

#[tokio::test]
async fn unknown_route_returns_json_404() {
    let (address, _store) = spawn_app().await;

    let response = reqwest::get(format!("{}/random_path_that_does_not_exist", address))
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn questions_are_listed_without_answers() {
    let (address, _store) = spawn_app().await;

    let response = reqwest::get(format!("{}/api/quiz/questions", address))
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    let questions = body["questions"].as_array().expect("questions array");
    assert_eq!(questions.len(), 2);

    for q in questions {
        for field in ["id", "question_text", "option_a", "option_b", "option_c", "option_d"] {
            assert!(q.get(field).is_some(), "missing {}", field);
        }
        assert!(q.get("correct_option").is_none());
    }

    let ids: Vec<i64> = questions.iter().map(|q| q["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, [1, 2]);
    assert_eq!(questions[0]["question_text"], "Test question 1?");
}

#[tokio::test]
async fn empty_bank_lists_no_questions() {
    let (address, store) = spawn_app().await;
    store.clear().await.unwrap();

    let body: serde_json::Value = reqwest::get(format!("{}/api/quiz/questions", address))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["questions"], serde_json::json!([]));
}

#[tokio::test]
async fn all_correct_answers_score_100() {
    let (address, _store) = spawn_app().await;

    let response = submit(&address, serde_json::json!({ "answers": { "1": "A", "2": "B" } })).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["score"], 100);
    assert_eq!(body["correctCount"], 2);
    assert_eq!(body["totalQuestions"], 2);
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn mixed_answers_score_50() {
    let (address, _store) = spawn_app().await;

    let response = submit(&address, serde_json::json!({ "answers": { "1": "A", "2": "C" } })).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["score"], 50);
    assert_eq!(body["correctCount"], 1);
    assert_eq!(body["totalQuestions"], 2);

    let results = body["results"].as_array().unwrap();
    let first = results.iter().find(|r| r["questionId"] == 1).unwrap();
    let second = results.iter().find(|r| r["questionId"] == 2).unwrap();
    assert_eq!(first["isCorrect"], true);
    assert_eq!(second["isCorrect"], false);
    assert_eq!(second["userAnswer"], "C");
    assert_eq!(second["correctAnswer"], "B");
}

#[tokio::test]
async fn all_wrong_answers_score_0() {
    let (address, _store) = spawn_app().await;

    let response = submit(&address, serde_json::json!({ "answers": { "1": "D", "2": "D" } })).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["correctCount"], 0);
    assert_eq!(body["score"], 0);
}

#[tokio::test]
async fn unknown_question_ids_are_ignored() {
    let (address, _store) = spawn_app().await;

    let response = submit(
        &address,
        serde_json::json!({ "answers": { "1": "A", "999": "A", "nope": "B" } }),
    )
    .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["totalQuestions"], 1);
    assert_eq!(body["correctCount"], 1);
    assert_eq!(body["score"], 100);
    assert_eq!(body["results"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn only_unknown_ids_score_0() {
    let (address, _store) = spawn_app().await;

    let body: serde_json::Value = submit(&address, serde_json::json!({ "answers": { "77": "A" } }))
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(body["score"], 0);
    assert_eq!(body["totalQuestions"], 0);
    assert_eq!(body["results"], serde_json::json!([]));
}

#[tokio::test]
async fn results_follow_submission_order() {
    let (address, _store) = spawn_app().await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/quiz/submit", address))
        .header("Content-Type", "application/json")
        .body(r#"{"answers":{"2":"B","1":"A"}}"#)
        .send()
        .await
        .unwrap();

    let body: serde_json::Value = response.json().await.unwrap();
    let ids: Vec<i64> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["questionId"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, [2, 1]);
}

#[tokio::test]
async fn invalid_answers_format_is_rejected() {
    let (address, _store) = spawn_app().await;

    for body in [
        serde_json::json!({ "answers": "invalid" }),
        serde_json::json!({ "answers": [1, 2] }),
        serde_json::json!({ "answers": null }),
        serde_json::json!({}),
        serde_json::json!([{ "1": "A" }]),
        serde_json::json!([{ "answers": { "1": "A" } }]),
        serde_json::json!("answers"),
    ] {
        let response = submit(&address, body.clone()).await;
        assert_eq!(response.status().as_u16(), 400, "body {}", body);

        let error: serde_json::Value = response.json().await.unwrap();
        assert_eq!(error["error"], "invalid answers format");
    }
}

#[tokio::test]
async fn non_string_answers_are_graded_wrong() {
    let (address, _store) = spawn_app().await;

    let response = submit(&address, serde_json::json!({ "answers": { "1": "A", "2": null } })).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["totalQuestions"], 2);
    assert_eq!(body["correctCount"], 1);
    assert_eq!(body["score"], 50);
    assert_eq!(body["results"][1]["userAnswer"], "null");
    assert_eq!(body["results"][1]["isCorrect"], false);

    let body: serde_json::Value = submit(&address, serde_json::json!({ "answers": { "1": 2 } }))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["totalQuestions"], 1);
    assert_eq!(body["correctCount"], 0);
    assert_eq!(body["results"][0]["userAnswer"], "2");
}

#[tokio::test]
async fn ids_with_trailing_text_use_their_leading_integer() {
    let (address, _store) = spawn_app().await;

    let body: serde_json::Value = submit(&address, serde_json::json!({ "answers": { "1abc": "A" } }))
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(body["totalQuestions"], 1);
    assert_eq!(body["correctCount"], 1);
    assert_eq!(body["results"][0]["questionId"], 1);
}

#[tokio::test]
async fn wrong_method_returns_json_405() {
    let (address, _store) = spawn_app().await;

    let response = reqwest::get(format!("{}/api/quiz/submit", address))
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 405);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Method Not Allowed");
}

#[tokio::test]
async fn malformed_json_is_a_client_error() {
    let (address, _store) = spawn_app().await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/quiz/submit", address))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let error: serde_json::Value = response.json().await.unwrap();
    assert!(error["error"].is_string());
}

#[tokio::test]
async fn health_reports_ok() {
    let (address, _store) = spawn_app().await;

    let response = reqwest::get(format!("{}/health", address)).await.unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "OK");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn health_is_independent_of_store() {
    let (address, store) = spawn_app().await;
    store.close().await;

    let health = reqwest::get(format!("{}/health", address)).await.unwrap();
    assert_eq!(health.status().as_u16(), 200);
    let body: serde_json::Value = health.json().await.unwrap();
    assert_eq!(body["status"], "OK");

    let questions = reqwest::get(format!("{}/api/quiz/questions", address))
        .await
        .unwrap();
    assert_eq!(questions.status().as_u16(), 500);
    let body: serde_json::Value = questions.json().await.unwrap();
    assert!(body["error"].is_string());

    let submission = submit(&address, serde_json::json!({ "answers": { "1": "A" } })).await;
    assert_eq!(submission.status().as_u16(), 500);
}

#[tokio::test]
async fn admin_api_is_absent_without_token() {
    let (address, _store) = spawn_app().await;

    let response = reqwest::Client::new()
        .delete(format!("{}/api/admin/questions", address))
        .bearer_auth(ADMIN_TOKEN)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn admin_requires_bearer_token() {
    let (address, _store) = spawn_app_with(Some(ADMIN_TOKEN)).await;
    let client = reqwest::Client::new();

    let missing = client
        .get(format!("{}/api/admin/questions/1", address))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 401);

    let wrong = client
        .get(format!("{}/api/admin/questions/1", address))
        .bearer_auth("not-the-token")
        .send()
        .await
        .unwrap();
    assert_eq!(wrong.status().as_u16(), 401);
}

#[tokio::test]
async fn admin_question_lifecycle() {
    let (address, _store) = spawn_app_with(Some(ADMIN_TOKEN)).await;
    let client = reqwest::Client::new();

    // Create
    let created = client
        .post(format!("{}/api/admin/questions", address))
        .bearer_auth(ADMIN_TOKEN)
        .json(&serde_json::json!({
            "question_text": "What is the chemical symbol for gold?<script>alert(1)</script>",
            "option_a": "Go",
            "option_b": "Gd",
            "option_c": "Au",
            "option_d": "Ag",
            "correct_option": "C"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status().as_u16(), 201);
    let id = created.json::<serde_json::Value>().await.unwrap()["id"]
        .as_i64()
        .unwrap();
    assert_eq!(id, 3);

    // Read back with the answer, sanitized
    let fetched: serde_json::Value = client
        .get(format!("{}/api/admin/questions/{}", address, id))
        .bearer_auth(ADMIN_TOKEN)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["correct_option"], "C");
    assert_eq!(fetched["question_text"], "What is the chemical symbol for gold?");

    // Missing id
    let missing = client
        .get(format!("{}/api/admin/questions/404", address))
        .bearer_auth(ADMIN_TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 404);

    // Clear, twice
    for _ in 0..2 {
        let cleared = client
            .delete(format!("{}/api/admin/questions", address))
            .bearer_auth(ADMIN_TOKEN)
            .send()
            .await
            .unwrap();
        assert_eq!(cleared.status().as_u16(), 204);
    }

    let body: serde_json::Value = reqwest::get(format!("{}/api/quiz/questions", address))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["questions"], serde_json::json!([]));
}

#[tokio::test]
async fn admin_rejects_invalid_question() {
    let (address, _store) = spawn_app_with(Some(ADMIN_TOKEN)).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/admin/questions", address))
        .bearer_auth(ADMIN_TOKEN)
        .json(&serde_json::json!({
            "question_text": "Pick one",
            "option_a": "1",
            "option_b": "2",
            "option_c": "3",
            "option_d": "4",
            "correct_option": "E"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}
