//! HTTP-level integration tests for `/api/users/{user_id}/favorites`.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, get_auth, post_json_auth};
use serde_json::json;
use sqlx::PgPool;

use figures_db::repositories::FavoriteRepo;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_fresh_user_has_no_favorites(pool: PgPool) {
    let (user_id, token) = common::signed_in_user(&pool, "alice").await;

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/users/{user_id}/favorites"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_favorites_require_token(pool: PgPool) {
    let (user_id, _token) = common::signed_in_user(&pool, "alice").await;
    let product = common::seed_product(&pool, "Luffy figure", "29.99").await;

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/users/{user_id}/favorites"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/users/{user_id}/favorites"),
        json!({ "product_id": product.id }),
        "not-a-token",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Nothing was written by the rejected request.
    assert!(FavoriteRepo::list(&pool, user_id).await.unwrap().is_empty());
}

/// Favoriting the same product twice yields two rows.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_favorites_are_kept(pool: PgPool) {
    let (user_id, token) = common::signed_in_user(&pool, "alice").await;
    let product = common::seed_product(&pool, "Luffy figure", "29.99").await;
    let uri = format!("/api/users/{user_id}/favorites");

    for _ in 0..2 {
        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            &uri,
            json!({ "product_id": product.id }),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let listed = body_json(get_auth(common::build_test_app(pool), &uri, &token).await).await;
    assert_eq!(listed.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_product_is_not_found(pool: PgPool) {
    let (user_id, token) = common::signed_in_user(&pool, "alice").await;

    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/users/{user_id}/favorites"),
        json!({ "product_id": 999_999 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

/// Deleting a missing or already-deleted favorite answers 204 and changes nothing.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_remove_is_idempotent(pool: PgPool) {
    let (user_id, token) = common::signed_in_user(&pool, "alice").await;
    let product = common::seed_product(&pool, "Luffy figure", "29.99").await;
    let kept = FavoriteRepo::add(&pool, user_id, product.id).await.unwrap();
    let removed = FavoriteRepo::add(&pool, user_id, product.id).await.unwrap();

    for id in [removed.id, removed.id, 424_242] {
        let response = delete_auth(
            common::build_test_app(pool.clone()),
            &format!("/api/users/{user_id}/favorites/{id}"),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let remaining = FavoriteRepo::list(&pool, user_id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, kept.id);
}

/// A caller cannot read, add to, or delete from another user's favorites.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_other_users_favorites_are_forbidden(pool: PgPool) {
    let (alice_id, _alice_token) = common::signed_in_user(&pool, "alice").await;
    let (_bob_id, bob_token) = common::signed_in_user(&pool, "bob").await;
    let product = common::seed_product(&pool, "Luffy figure", "29.99").await;
    let favorite = FavoriteRepo::add(&pool, alice_id, product.id).await.unwrap();
    let uri = format!("/api/users/{alice_id}/favorites");

    let response = get_auth(common::build_test_app(pool.clone()), &uri, &bob_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        json!({ "product_id": product.id }),
        &bob_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("{uri}/{}", favorite.id),
        &bob_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let remaining = FavoriteRepo::list(&pool, alice_id).await.unwrap();
    assert_eq!(remaining.len(), 1);
}
