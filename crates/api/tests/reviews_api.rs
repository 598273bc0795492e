//! HTTP-level integration tests for reviews and ratings under
//! `/videos/{id}`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, code_header, create_user, create_video, delete_auth, get, get_auth,
    post_json_auth, put_json_auth, token_for,
};
use reviewniverse_db::repositories::VideoRepo;
use serde_json::json;
use sqlx::PgPool;

fn review_body(title: &str) -> serde_json::Value {
    json!({
        "title": title,
        "content": "Worth a watch.",
        "rating": 4.5,
        "is_spoiler": false,
    })
}

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

/// A created review carries snapshots of the author and video.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_review_snapshots_author(pool: PgPool) {
    let video = create_video(&pool, "Reviewed", true).await;
    let user = create_user(&pool, "critic@example.com", "critic").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/v1/videos/{}/reviews", video.id),
        review_body("Great"),
        &token_for(&user),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(code_header(&response), "REVIEW_CREATE_SUCC");
    let json = body_json(response).await;
    assert_eq!(json["data"]["user_nickname"], "critic");
    assert_eq!(json["data"]["video_title"], "Reviewed");
    assert_eq!(json["data"]["rating"], 4.5);

    let video = VideoRepo::find_by_id(&pool, video.id).await.unwrap().unwrap();
    assert_eq!(video.review_count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_review_validation(pool: PgPool) {
    let video = create_video(&pool, "Strict", true).await;
    let hidden = create_video(&pool, "Draft", false).await;
    let user = create_user(&pool, "strict@example.com", "strict").await;
    let token = token_for(&user);

    let mut body = review_body("Odd rating");
    body["rating"] = json!(4.3);
    let app = common::build_test_app(pool.clone());
    let response =
        post_json_auth(app, &format!("/v1/videos/{}/reviews", video.id), body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(code_header(&response), "INVALID_PARAM_RATING");

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/v1/videos/{}/reviews", hidden.id),
        review_body("Too early"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(code_header(&response), "VIDEO_NOT_FOUND");

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/v1/videos/{}/reviews", video.id),
        json!({ "content": "no title" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(code_header(&response), "INVALID_REQUEST");
}

/// Private reviews are excluded from the public list and the count.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_excludes_private_reviews(pool: PgPool) {
    let video = create_video(&pool, "Listed", true).await;
    let user = create_user(&pool, "lister@example.com", "lister").await;
    let token = token_for(&user);
    let uri = format!("/v1/videos/{}/reviews", video.id);

    let app = common::build_test_app(pool.clone());
    post_json_auth(app, &uri, review_body("Public one"), &token).await;
    let mut private = review_body("Private one");
    private["is_private"] = json!(true);
    let app = common::build_test_app(pool.clone());
    post_json_auth(app, &uri, private, &token).await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(code_header(&response), "REVIEW_READ_LIST_SUCC");
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["data"][0]["title"], "Public one");

    let video = VideoRepo::find_by_id(&pool, video.id).await.unwrap().unwrap();
    assert_eq!(video.review_count, 1);
}

/// Update and delete check existence, video match and authorship in order.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_review_update_and_delete_authorization(pool: PgPool) {
    let video = create_video(&pool, "Owned", true).await;
    let other_video = create_video(&pool, "Elsewhere", true).await;
    let author = create_user(&pool, "author@example.com", "author").await;
    let stranger = create_user(&pool, "stranger@example.com", "stranger").await;
    let author_token = token_for(&author);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/v1/videos/{}/reviews", video.id),
        review_body("Mine"),
        &author_token,
    )
    .await;
    let review_id = body_json(response).await["data"]["id"].as_i64().unwrap();
    let uri = format!("/v1/videos/{}/reviews/{review_id}", video.id);

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/v1/videos/{}/reviews/999999", video.id),
        json!({ "title": "x" }),
        &author_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(code_header(&response), "REVIEW_NOT_FOUND");

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/v1/videos/{}/reviews/{review_id}", other_video.id),
        json!({ "title": "x" }),
        &author_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(code_header(&response), "REVIEW_NOT_MATCH");

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &uri, &token_for(&stranger)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(code_header(&response), "USER_NOT_MATCH");

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(app, &uri, json!({ "title": "Edited" }), &author_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(code_header(&response), "REVIEW_UPDATE_SUCC");

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &uri, &author_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(code_header(&response), "REVIEW_DELETE_SUCC");

    let video = VideoRepo::find_by_id(&pool, video.id).await.unwrap().unwrap();
    assert_eq!(video.review_count, 0);
}

// ---------------------------------------------------------------------------
// Ratings
// ---------------------------------------------------------------------------

/// The video average follows every upsert and delete.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rating_upsert_and_average(pool: PgPool) {
    let video = create_video(&pool, "Rated", true).await;
    let first = create_user(&pool, "first@example.com", "first").await;
    let second = create_user(&pool, "second@example.com", "second").await;
    let uri = format!("/v1/videos/{}/ratings", video.id);

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(app, &uri, json!({ "rating": 5.0 }), &token_for(&first)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(code_header(&response), "RATING_UPDATE_SUCC");
    assert_eq!(body_json(response).await["data"]["video_rating"], 5.0);

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(app, &uri, json!({ "rating": 2.0 }), &token_for(&second)).await;
    assert_eq!(body_json(response).await["data"]["video_rating"], 3.5);

    // Replacing a rating does not add a row.
    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(app, &uri, json!({ "rating": 3.0 }), &token_for(&second)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["rating"], 3.0);
    assert_eq!(json["data"]["video_rating"], 4.0);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &uri, &token_for(&second)).await;
    assert_eq!(code_header(&response), "RATING_READ_SUCC");
    let json = body_json(response).await;
    assert_eq!(json["data"]["rating"], 3.0);
    assert_eq!(json["data"]["video_rating"], 4.0);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &uri, &token_for(&first)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(code_header(&response), "RATING_DELETE_SUCC");

    let video = VideoRepo::find_by_id(&pool, video.id).await.unwrap().unwrap();
    assert_eq!(video.rating, 3.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rating_errors(pool: PgPool) {
    let video = create_video(&pool, "Picky", true).await;
    let user = create_user(&pool, "picky@example.com", "picky").await;
    let token = token_for(&user);
    let uri = format!("/v1/videos/{}/ratings", video.id);

    for bad in [0.0, 5.5, 3.3] {
        let app = common::build_test_app(pool.clone());
        let response = put_json_auth(app, &uri, json!({ "rating": bad }), &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{bad}");
        assert_eq!(code_header(&response), "INVALID_PARAM_RATING");
    }

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &uri, &token).await;
    assert!(body_json(response).await["data"]["rating"].is_null());

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(code_header(&response), "RATING_NOT_FOUND");

    let app = common::build_test_app(pool);
    let response = put_json_auth(app, "/v1/videos/999999/ratings", json!({ "rating": 3.0 }), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(code_header(&response), "VIDEO_NOT_FOUND");
}
