// tests/submission_tests.rs

use std::str::FromStr;

use satchecker::{config::Config, routes, state::AppState};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Helper to spawn the app on a random port against a throwaway SQLite
/// database. Returns the base URL and a pool for direct assertions.
async fn spawn_app(admins: &[&str]) -> (String, SqlitePool) {
    let db_path = std::env::temp_dir().join(format!("satchecker_test_{}.db", uuid::Uuid::new_v4()));
    let database_url = format!("sqlite://{}", db_path.display());

    let options = SqliteConnectOptions::from_str(&database_url)
        .expect("Invalid SQLite URL")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to open test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let config = Config {
        database_url,
        admin_users: admins.iter().map(|s| s.to_string()).collect(),
        rust_log: "error".to_string(),
    };

    let state = AppState {
        pool: pool.clone(),
        config,
    };
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, pool)
}

async fn send(client: &reqwest::Client, address: &str, sender: &str, text: &str) -> String {
    client
        .post(format!("{}/api/message", address))
        .json(&serde_json::json!({ "sender": sender, "text": text }))
        .send()
        .await
        .expect("Failed to execute request")
        .text()
        .await
        .expect("Failed to read reply body")
}

fn math_key() -> String {
    vec!["3"; 44].join(";")
}

fn math_answers() -> String {
    vec!["3"; 44].join(",")
}

fn english_key() -> String {
    vec!["a"; 54].join(";")
}

fn english_answers() -> String {
    vec!["a"; 54].join(",")
}

#[tokio::test]
async fn perfect_math_submission_scores_full_marks() {
    let (address, _pool) = spawn_app(&["admin"]).await;
    let client = reqwest::Client::new();

    let reply = send(
        &client,
        &address,
        "admin",
        &format!("/addtest geo01 math {}", math_key()),
    )
    .await;
    assert_eq!(
        reply,
        "Answer key for math part of test 'geo01' added successfully."
    );

    let reply = send(
        &client,
        &address,
        "sam",
        &format!("geo01_math*{}", math_answers()),
    )
    .await;
    assert!(reply.contains("Math part completed!"), "reply: {}", reply);
    assert!(reply.contains("Score: 44/44"), "reply: {}", reply);
    assert!(reply.contains("Mistakes:\nNone"), "reply: {}", reply);
    assert!(!reply.contains("Overall Score"), "reply: {}", reply);
}

#[tokio::test]
async fn one_wrong_answer_is_reported_as_a_mistake() {
    let (address, _pool) = spawn_app(&["admin"]).await;
    let client = reqwest::Client::new();

    send(
        &client,
        &address,
        "admin",
        &format!("/addtest geo01 math {}", math_key()),
    )
    .await;

    let mut answers: Vec<&str> = vec!["3"; 44];
    answers[0] = "4";
    let reply = send(
        &client,
        &address,
        "sam",
        &format!("geo01_math*{}", answers.join(",")),
    )
    .await;

    assert!(reply.contains("Score: 43/44"), "reply: {}", reply);
    assert!(
        reply.contains("Q1: Correct=['3'], Your=4"),
        "reply: {}",
        reply
    );
}

#[tokio::test]
async fn case_and_spacing_do_not_affect_grading() {
    let (address, _pool) = spawn_app(&["admin"]).await;
    let client = reqwest::Client::new();

    send(
        &client,
        &address,
        "admin",
        &format!("/addtest eng01 english {}", english_key()),
    )
    .await;

    let answers = vec![" A "; 54].join(",");
    let reply = send(&client, &address, "sam", &format!("eng01_english*{}", answers)).await;
    assert!(reply.contains("Score: 54/54"), "reply: {}", reply);
}

#[tokio::test]
async fn english_submission_with_invalid_choice_is_rejected_before_grading() {
    let (address, pool) = spawn_app(&["admin"]).await;
    let client = reqwest::Client::new();

    send(
        &client,
        &address,
        "admin",
        &format!("/addtest eng01 english {}", english_key()),
    )
    .await;

    let mut answers: Vec<&str> = vec!["a"; 54];
    answers[2] = "e";
    let reply = send(
        &client,
        &address,
        "sam",
        &format!("eng01_english*{}", answers.join(",")),
    )
    .await;

    assert!(
        reply.contains("Q3: Invalid answer 'e'. Must be a, b, c, or d."),
        "reply: {}",
        reply
    );

    // No partial score may be saved.
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM student_results WHERE student_name = 'sam'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn wrong_answer_count_is_rejected() {
    let (address, _pool) = spawn_app(&["admin"]).await;
    let client = reqwest::Client::new();

    send(
        &client,
        &address,
        "admin",
        &format!("/addtest geo01 math {}", math_key()),
    )
    .await;

    let reply = send(&client, &address, "sam", "geo01_math*3,3").await;
    assert!(
        reply.contains("You entered 2 answers, but the math part requires 44 answers."),
        "reply: {}",
        reply
    );
}

#[tokio::test]
async fn duplicate_submission_never_changes_the_stored_score() {
    let (address, pool) = spawn_app(&["admin"]).await;
    let client = reqwest::Client::new();

    send(
        &client,
        &address,
        "admin",
        &format!("/addtest geo01 math {}", math_key()),
    )
    .await;
    send(
        &client,
        &address,
        "sam",
        &format!("geo01_math*{}", math_answers()),
    )
    .await;

    // A second, worse submission must be rejected, not graded.
    let mut answers: Vec<&str> = vec!["9"; 44];
    answers[0] = "3";
    let reply = send(
        &client,
        &address,
        "sam",
        &format!("geo01_math*{}", answers.join(",")),
    )
    .await;
    assert_eq!(reply, "You have already completed this test. Results are saved.");

    let score: i64 = sqlx::query_scalar(
        "SELECT score FROM student_results
         WHERE student_name = 'sam' AND test_code = 'geo01' AND part = 'math'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(score, 44);
}

#[tokio::test]
async fn unknown_test_code_is_reported() {
    let (address, _pool) = spawn_app(&[]).await;
    let client = reqwest::Client::new();

    let reply = send(
        &client,
        &address,
        "sam",
        &format!("nope_math*{}", math_answers()),
    )
    .await;
    assert_eq!(reply, "Test code 'nope' for part 'math' not found.");
}

#[tokio::test]
async fn completing_both_parts_reports_the_overall_score_once() {
    let (address, _pool) = spawn_app(&["admin"]).await;
    let client = reqwest::Client::new();

    send(
        &client,
        &address,
        "admin",
        &format!("/addtest geo01 math {}", math_key()),
    )
    .await;
    send(
        &client,
        &address,
        "admin",
        &format!("/addtest geo01 english {}", english_key()),
    )
    .await;

    let first = send(
        &client,
        &address,
        "sam",
        &format!("geo01_math*{}", math_answers()),
    )
    .await;
    assert!(!first.contains("Overall Score"), "reply: {}", first);

    let second = send(
        &client,
        &address,
        "sam",
        &format!("geo01_english*{}", english_answers()),
    )
    .await;
    assert!(
        second.contains("Both parts completed!\nOverall Score: 98/98"),
        "reply: {}",
        second
    );
}

#[tokio::test]
async fn plain_text_without_star_gets_no_reply() {
    let (address, _pool) = spawn_app(&[]).await;
    let client = reqwest::Client::new();

    let reply = send(&client, &address, "sam", "hello there").await;
    assert_eq!(reply, "");
}
