mod common;

use axum::Router;
use axum_test::TestServer;
use sqlx::PgPool;

use legacy_redirector::{AppState, api};

fn test_app(state: AppState) -> Router {
    Router::new().merge(api::routes::routes()).with_state(state)
}

#[sqlx::test]
async fn redirect_success(pool: PgPool) {
    common::seed_redirect(
        &pool,
        "a9Xc",
        "news.example.org",
        "https://news.example.org/story/12",
    )
    .await;

    let server = TestServer::new(test_app(common::create_test_state(pool.clone()))).unwrap();

    let response = server.get("/out/a9Xc").await;
    response.assert_status(axum::http::StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.header("location"),
        "https://news.example.org/story/12"
    );

    assert_eq!(common::redirect_hits(&pool, "a9Xc").await, 1);
}

#[sqlx::test]
async fn redirect_rewrites_affiliate_destination(pool: PgPool) {
    common::seed_redirect(
        &pool,
        "bY7q",
        "www.ebay.co.uk",
        "https://www.ebay.co.uk/itm/230675?utm_source=feed",
    )
    .await;

    let server = TestServer::new(test_app(common::create_test_state(pool.clone()))).unwrap();

    let response = server.get("/out/bY7q").await;
    response.assert_status(axum::http::StatusCode::TEMPORARY_REDIRECT);

    let location = response.header("location");
    let location = location.to_str().unwrap();
    assert!(location.starts_with("https://rover.ebay.com/rover/1/"));

    // The stored row keeps the original destination.
    let stored = sqlx::query_scalar::<_, String>("SELECT url FROM redirects WHERE short_url = $1")
        .bind("bY7q")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, "https://www.ebay.co.uk/itm/230675?utm_source=feed");
}

#[sqlx::test]
async fn unknown_token_is_not_found(pool: PgPool) {
    common::seed_redirect(
        &pool,
        "a9Xc",
        "news.example.org",
        "https://news.example.org/story/12",
    )
    .await;

    let server = TestServer::new(test_app(common::create_test_state(pool.clone()))).unwrap();

    let response = server.get("/out/missing").await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);

    assert_eq!(common::redirect_hits(&pool, "a9Xc").await, 0);
}
