//! HTTP-level integration tests for the `/users` resource: sign-up,
//! availability checks, response tiers and owner-only updates.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    body_json, code_header, create_user, delete_auth, get, get_auth, multipart_auth,
    patch_json_auth, post_json, token_for, FormPart, IMAGE_BASE_URL, TEST_PASSWORD,
};
use reviewniverse_db::repositories::UserRepo;
use serde_json::json;
use sqlx::PgPool;

fn signup_body(email: &str, nickname: &str) -> serde_json::Value {
    json!({
        "user_type": "10",
        "email": email,
        "password": "review!pass1",
        "nickname": nickname,
        "is_privacy_agree": true,
        "is_terms_agree": true,
        "is_age_agree": true,
        "is_marketing_agree": false,
    })
}

// ---------------------------------------------------------------------------
// Sign-up
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_signup_success(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = post_json(app, "/v1/users", signup_body("new@example.com", "newbie")).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(code_header(&response), "USER_CREATE_SUCC");
    let json = body_json(response).await;
    assert_eq!(json["code"], "USER_CREATE_SUCC");
    assert_eq!(json["data"]["email"], "new@example.com");
    assert_eq!(json["data"]["nickname"], "newbie");
    assert!(json["data"].get("password_hash").is_none());

    let stored = UserRepo::find_by_email(&pool, "new@example.com")
        .await
        .unwrap()
        .expect("user should be stored");
    assert_ne!(stored.password_hash.as_deref(), Some("review!pass1"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_signup_missing_fields(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/v1/users", json!({ "email": "a@example.com" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(code_header(&response), "USER_CREATE_REQUIRED_FIELDS");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_signup_requires_agreements_in_order(pool: PgPool) {
    let mut body = signup_body("agree@example.com", "agree");
    body["is_privacy_agree"] = json!(false);
    body["is_terms_agree"] = json!(false);

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/v1/users", body.clone()).await;
    assert_eq!(code_header(&response), "USER_AGREE_PRIVACY_REQUIRED");

    body["is_privacy_agree"] = json!(true);
    let app = common::build_test_app(pool);
    let response = post_json(app, "/v1/users", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(code_header(&response), "USER_AGREE_TERMS_REQUIRED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_signup_rejects_weak_password(pool: PgPool) {
    let mut body = signup_body("weak@example.com", "weak");
    body["password"] = json!("onlyletters");

    let app = common::build_test_app(pool);
    let response = post_json(app, "/v1/users", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(code_header(&response), "VALID_PWD_NOT_INC_NUMBER_ERR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_signup_duplicate_email_and_nickname(pool: PgPool) {
    create_user(&pool, "taken@example.com", "taken").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/v1/users", signup_body("taken@example.com", "other")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(code_header(&response), "EMAIL_ALREADY_EXIST");

    let app = common::build_test_app(pool);
    let response = post_json(app, "/v1/users", signup_body("fresh@example.com", "taken")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(code_header(&response), "NICKNAME_ALREADY_EXIST");
}

// ---------------------------------------------------------------------------
// Availability checks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_nickname_check_codes(pool: PgPool) {
    create_user(&pool, "nick@example.com", "existing").await;

    let cases = [
        ("/v1/users/nickname?nickname=existing", "VALID_NICK_EXIST"),
        ("/v1/users/nickname?nickname=fresh", "VALID_NICK_SUCC"),
        ("/v1/users/nickname?nickname=a", "VALID_NICK_FAIL"),
        ("/v1/users/nickname", "VALID_NICK_FAIL"),
    ];
    for (uri, expected) in cases {
        let app = common::build_test_app(pool.clone());
        let response = get(app, uri).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT, "{uri}");
        assert_eq!(code_header(&response), expected, "{uri}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_email_check_reports_account_type(pool: PgPool) {
    create_user(&pool, "member@example.com", "member").await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/v1/users/email?email=member@example.com").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(code_header(&response), "VALID_EMAIL_EXIST_10");

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/v1/users/email?email=nobody@example.com").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(code_header(&response), "VALID_EMAIL_SUCC");

    let app = common::build_test_app(pool);
    let response = get(app, "/v1/users/email?email=not-an-email").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(code_header(&response), "VALID_EMAIL_PATTERN_ERR");
}

// ---------------------------------------------------------------------------
// Response tiers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_profile_masks_email_and_me_does_not(pool: PgPool) {
    let user = create_user(&pool, "reader@example.com", "reader").await;
    let token = token_for(&user);

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/v1/users/{}/profile", user.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let profile = body_json(response).await;
    assert_ne!(profile["data"]["email"], "reader@example.com");
    assert_eq!(profile["data"]["user_type"], "10");
    assert!(profile["data"].get("is_marketing_agree").is_none());

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/v1/users/{}", user.id), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["data"]["email"], "reader@example.com");
    assert_eq!(me["data"]["is_marketing_agree"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_requires_token_and_ownership(pool: PgPool) {
    let owner = create_user(&pool, "owner@example.com", "owner").await;
    let other = create_user(&pool, "other@example.com", "other").await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/v1/users/{}", owner.id)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(code_header(&response), "ACCESS_TOKEN_REQUIRE");

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("/v1/users/{}", owner.id), &token_for(&other)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(code_header(&response), "USER_NOT_MATCH");

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/v1/users/{}", owner.id), "garbage").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(code_header(&response), "ACCESS_TOKEN_INVALID");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_empty_page_is_no_content(pool: PgPool) {
    create_user(&pool, "found@example.com", "findme").await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/v1/users?nm=find").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["data"][0]["nickname"], "findme");

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/v1/users?nm=zzz").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(code_header(&response), "SEARCH_NOT_FOUND");

    let app = common::build_test_app(pool);
    let response = get(app, "/v1/users?p=abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(code_header(&response), "INVALID_PARAM_PAGE");
}

// ---------------------------------------------------------------------------
// Owner updates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_nickname(pool: PgPool) {
    let user = create_user(&pool, "rename@example.com", "before").await;
    create_user(&pool, "holder@example.com", "holder").await;
    let token = token_for(&user);
    let uri = format!("/v1/users/{}/nickname", user.id);

    let app = common::build_test_app(pool.clone());
    let response = patch_json_auth(app, &uri, json!({ "nickname": "holder" }), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(code_header(&response), "NICKNAME_ALREADY_EXIST");

    let app = common::build_test_app(pool);
    let response = patch_json_auth(app, &uri, json!({ "nickname": "after" }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(code_header(&response), "USER_UPDATE_NICKNAME_SUCC");
    let json = body_json(response).await;
    assert_eq!(json["data"]["nickname"], "after");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_password_checks_current(pool: PgPool) {
    let user = create_user(&pool, "pw@example.com", "pwuser").await;
    let token = token_for(&user);
    let uri = format!("/v1/users/{}/password", user.id);

    let app = common::build_test_app(pool.clone());
    let body = json!({ "password_origin": "wrong!pass1", "password_new": "fresh!pass2" });
    let response = patch_json_auth(app, &uri, body, &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(code_header(&response), "USER_LOGIN_AUTH_FAIL");

    let app = common::build_test_app(pool.clone());
    let body = json!({ "password_origin": TEST_PASSWORD, "password_new": "fresh!pass2" });
    let response = patch_json_auth(app, &uri, body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(code_header(&response), "USER_UPDATE_PASSWORD_SUCC");

    let app = common::build_test_app(pool);
    let login = json!({ "email": "pw@example.com", "password": "fresh!pass2", "user_type": "10" });
    let response = post_json(app, "/v1/users/login", login).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_marketing_and_profile_text(pool: PgPool) {
    let user = create_user(&pool, "prefs@example.com", "prefs").await;
    let token = token_for(&user);

    let app = common::build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &format!("/v1/users/{}/marketing", user.id),
        json!({ "is_marketing_agree": true }),
        &token,
    )
    .await;
    assert_eq!(code_header(&response), "USER_UPDATE_ISAGREE_SUCC");
    assert_eq!(body_json(response).await["data"]["is_marketing_agree"], true);

    let app = common::build_test_app(pool);
    let response = patch_json_auth(
        app,
        &format!("/v1/users/{}/profile_text", user.id),
        json!({ "profile_text": "I watch everything." }),
        &token,
    )
    .await;
    assert_eq!(code_header(&response), "USER_UPDATE_PROFILE_SUCC");
    assert_eq!(body_json(response).await["data"]["profile_text"], "I watch everything.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_profile_image_replaces_object(pool: PgPool) {
    let user = create_user(&pool, "pic@example.com", "pic").await;
    let token = token_for(&user);
    let uri = format!("/v1/users/{}/profile_image", user.id);
    let (app, storage) = common::build_test_app_with_storage(pool);

    let first = [FormPart::File {
        name: "profile_image",
        filename: "me.png",
        content_type: "image/png",
        data: b"first",
    }];
    let response = multipart_auth(app.clone(), Method::PATCH, &uri, &first, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(code_header(&response), "USER_UPDATE_PROFILE_IMAGE_SUCC");
    let json = body_json(response).await;
    let url = json["data"]["profile_image"].as_str().unwrap().to_string();
    assert!(url.starts_with(IMAGE_BASE_URL));
    let first_keys = storage.keys();
    assert_eq!(first_keys.len(), 1);
    assert!(first_keys[0].starts_with(&format!("profile/{}/", user.id)));

    // A second upload replaces and removes the first object.
    let second = [FormPart::File {
        name: "profile_image",
        filename: "me2.jpg",
        content_type: "image/jpeg",
        data: b"second",
    }];
    let response = multipart_auth(app, Method::PATCH, &uri, &second, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let keys = storage.keys();
    assert_eq!(keys.len(), 1);
    assert_ne!(keys, first_keys);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_rejects_type_and_size(pool: PgPool) {
    let user = create_user(&pool, "bad@example.com", "badfile").await;
    let token = token_for(&user);
    let uri = format!("/v1/users/{}/profile_image", user.id);
    let (app, storage) = common::build_test_app_with_storage(pool);

    let wrong_type = [FormPart::File {
        name: "profile_image",
        filename: "notes.txt",
        content_type: "text/plain",
        data: b"text",
    }];
    let response = multipart_auth(app.clone(), Method::PATCH, &uri, &wrong_type, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(code_header(&response), "FILE_TYPE_ERR");

    let big = vec![0u8; 2048];
    let too_big = [FormPart::File {
        name: "profile_image",
        filename: "big.png",
        content_type: "image/png",
        data: &big,
    }];
    let response = multipart_auth(app.clone(), Method::PATCH, &uri, &too_big, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(code_header(&response), "FILE_SIZE_ERR");

    let missing = [FormPart::Text("nickname", "ignored")];
    let response = multipart_auth(app, Method::PATCH, &uri, &missing, &token).await;
    assert_eq!(code_header(&response), "FILE_NOT_FOUND");

    assert!(storage.keys().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_multipart_update_applies_present_fields(pool: PgPool) {
    let user = create_user(&pool, "multi@example.com", "multi").await;
    let token = token_for(&user);
    let app = common::build_test_app(pool);

    let parts = [
        FormPart::Text("nickname", "renamed"),
        FormPart::Text("birth_year", "1990"),
        FormPart::Text("profile_text", ""),
    ];
    let response = multipart_auth(
        app,
        Method::PUT,
        &format!("/v1/users/{}", user.id),
        &parts,
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(code_header(&response), "USER_UPDATE_SUCC");
    let json = body_json(response).await;
    assert_eq!(json["data"]["nickname"], "renamed");
    assert_eq!(json["data"]["birth_year"], 1990);
    assert!(json["data"]["profile_text"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_account(pool: PgPool) {
    let user = create_user(&pool, "bye@example.com", "bye").await;
    let token = token_for(&user);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/v1/users/{}", user.id), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(code_header(&response), "USER_DELETE_SUCC");

    assert!(UserRepo::find_by_id(&pool, user.id).await.unwrap().is_none());

    // The token now points at a missing user.
    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/v1/users/{}", user.id), &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(code_header(&response), "USER_NOT_FOUND");
}
