//! Integration tests for likes, views, reviews and ratings.
//!
//! Every mutation recounts the denormalized counters on the video and the
//! user inside its own transaction; these tests check the counters after
//! each step.

use reviewniverse_core::search::Page;
use reviewniverse_db::models::review::{CreateVideoReview, UpdateVideoReview};
use reviewniverse_db::models::user::{CreateUser, User};
use reviewniverse_db::models::video::{CreateVideo, Video};
use reviewniverse_db::repositories::{
    LikeRepo, RatingRepo, ReviewRepo, UserRepo, VideoRepo, ViewLogRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, name: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            user_type: "10".to_string(),
            email: format!("{name}@example.com"),
            password_hash: Some("hash".to_string()),
            nickname: name.to_string(),
            is_privacy_agree: true,
            is_terms_agree: true,
            is_age_agree: true,
            is_marketing_agree: false,
        },
    )
    .await
    .unwrap()
}

async fn seed_video(pool: &PgPool, title: &str) -> Video {
    VideoRepo::create(
        pool,
        &CreateVideo {
            video_type: "10".to_string(),
            title: title.to_string(),
            synopsis: None,
            release: Some("2024".to_string()),
            runtime: None,
            notice_age: None,
            platform_code: None,
            platform_id: None,
            is_confirm: true,
            genre_ids: vec![],
            actors: vec![],
            staff: vec![],
            watches: vec![],
            thumbnails: vec![],
        },
    )
    .await
    .unwrap()
}

fn new_review(video: &Video, user: &User, title: &str, is_private: bool) -> CreateVideoReview {
    CreateVideoReview {
        video_id: video.id,
        user_id: user.id,
        title: title.to_string(),
        content: "content".to_string(),
        rating: 0.0,
        is_spoiler: false,
        is_expect: false,
        is_private,
        user_nickname: user.nickname.clone(),
        user_profile_image: user.profile_image.clone(),
        video_title: video.title.clone(),
    }
}

async fn reload_video(pool: &PgPool, id: i64) -> Video {
    VideoRepo::find_by_id(pool, id).await.unwrap().unwrap()
}

async fn reload_user(pool: &PgPool, id: i64) -> User {
    UserRepo::find_by_id(pool, id).await.unwrap().unwrap()
}

// ---------------------------------------------------------------------------
// Likes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_like_toggle_flips_and_recounts(pool: PgPool) {
    let user = seed_user(&pool, "liker").await;
    let video = seed_video(&pool, "Liked").await;

    let first = LikeRepo::toggle(&pool, video.id, user.id).await.unwrap().unwrap();
    assert!(first.is_like);
    assert_eq!(first.like_count, 1);
    assert_eq!(reload_user(&pool, user.id).await.like_count, 1);

    let like = LikeRepo::find(&pool, video.id, user.id).await.unwrap().unwrap();
    assert_eq!(like.video_title, "Liked");

    let second = LikeRepo::toggle(&pool, video.id, user.id).await.unwrap().unwrap();
    assert!(!second.is_like);
    assert_eq!(second.like_count, 0);
    assert_eq!(reload_video(&pool, video.id).await.like_count, 0);
    assert_eq!(reload_user(&pool, user.id).await.like_count, 0);

    let third = LikeRepo::toggle(&pool, video.id, user.id).await.unwrap().unwrap();
    assert!(third.is_like);
    assert_eq!(third.like_count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_like_toggle_on_missing_video(pool: PgPool) {
    let user = seed_user(&pool, "nobody").await;
    assert!(LikeRepo::toggle(&pool, 999_999, user.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_counter_recount_keeps_updated_at(pool: PgPool) {
    let user = seed_user(&pool, "stamp").await;
    let video = seed_video(&pool, "Stamped").await;

    LikeRepo::toggle(&pool, video.id, user.id).await.unwrap();

    let reloaded = reload_video(&pool, video.id).await;
    assert_eq!(reloaded.updated_at, video.updated_at);
    assert_eq!(reload_user(&pool, user.id).await.updated_at, user.updated_at);
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_view_is_logged_once_per_ip_per_day(pool: PgPool) {
    let video = seed_video(&pool, "Viewed").await;

    let count = ViewLogRepo::record_view(&pool, video.id, None, Some("10.0.0.1"))
        .await
        .unwrap();
    assert_eq!(count, Some(1));

    let count = ViewLogRepo::record_view(&pool, video.id, None, Some("10.0.0.1"))
        .await
        .unwrap();
    assert_eq!(count, Some(1), "same IP on the same day is not counted twice");

    let count = ViewLogRepo::record_view(&pool, video.id, None, Some("10.0.0.2"))
        .await
        .unwrap();
    assert_eq!(count, Some(2));

    assert_eq!(ViewLogRepo::count_for_video(&pool, video.id).await.unwrap(), 2);
    assert_eq!(reload_video(&pool, video.id).await.view_count, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_view_on_deleted_video(pool: PgPool) {
    let video = seed_video(&pool, "Gone").await;
    VideoRepo::soft_delete(&pool, video.id).await.unwrap();

    let count = ViewLogRepo::record_view(&pool, video.id, None, Some("10.0.0.1"))
        .await
        .unwrap();
    assert!(count.is_none());
}

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_review_counts_exclude_private(pool: PgPool) {
    let user = seed_user(&pool, "critic").await;
    let video = seed_video(&pool, "Reviewed").await;

    let public = ReviewRepo::create(&pool, &new_review(&video, &user, "Public", false))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(public.user_nickname, "critic");
    assert_eq!(public.video_title, "Reviewed");

    let private = ReviewRepo::create(&pool, &new_review(&video, &user, "Private", true))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(reload_video(&pool, video.id).await.review_count, 1);
    assert_eq!(reload_user(&pool, user.id).await.review_count, 2);

    let page = Page::new(None, None, 1).unwrap();
    let (total, reviews) = ReviewRepo::list_public(&pool, video.id, page).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(reviews[0].id, public.id);

    // Publishing the private review makes it count.
    let updated = ReviewRepo::update(
        &pool,
        private.id,
        video.id,
        &UpdateVideoReview {
            is_private: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.title, "Private");
    assert_eq!(reload_video(&pool, video.id).await.review_count, 2);

    assert!(ReviewRepo::delete(&pool, public.id, video.id, user.id)
        .await
        .unwrap());
    assert_eq!(reload_video(&pool, video.id).await.review_count, 1);
    assert_eq!(reload_user(&pool, user.id).await.review_count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_review_update_requires_matching_video(pool: PgPool) {
    let user = seed_user(&pool, "mismatch").await;
    let video = seed_video(&pool, "First").await;
    let other = seed_video(&pool, "Second").await;

    let review = ReviewRepo::create(&pool, &new_review(&video, &user, "Mine", false))
        .await
        .unwrap()
        .unwrap();

    let result = ReviewRepo::update(&pool, review.id, other.id, &UpdateVideoReview::default())
        .await
        .unwrap();
    assert!(result.is_none());
    assert!(!ReviewRepo::delete(&pool, review.id, other.id, user.id)
        .await
        .unwrap());
}

// ---------------------------------------------------------------------------
// Ratings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rating_average_rounds_to_one_decimal(pool: PgPool) {
    let a = seed_user(&pool, "ratera").await;
    let b = seed_user(&pool, "raterb").await;
    let c = seed_user(&pool, "raterc").await;
    let video = seed_video(&pool, "Rated").await;

    let (_, avg) = RatingRepo::upsert(&pool, video.id, a.id, 5.0).await.unwrap().unwrap();
    assert_eq!(avg, 5.0);
    RatingRepo::upsert(&pool, video.id, b.id, 4.0).await.unwrap();
    let (_, avg) = RatingRepo::upsert(&pool, video.id, c.id, 4.0).await.unwrap().unwrap();
    // 13 / 3 = 4.333...
    assert_eq!(avg, 4.3);

    // Re-rating replaces rather than adds.
    let (row, avg) = RatingRepo::upsert(&pool, video.id, a.id, 1.0).await.unwrap().unwrap();
    assert_eq!(row.rating, 1.0);
    assert_eq!(avg, 3.0);
    assert_eq!(reload_user(&pool, a.id).await.rating_count, 1);

    assert!(RatingRepo::delete(&pool, video.id, a.id).await.unwrap());
    assert!(!RatingRepo::delete(&pool, video.id, a.id).await.unwrap());
    assert_eq!(reload_video(&pool, video.id).await.rating, 4.0);
    assert_eq!(reload_user(&pool, a.id).await.rating_count, 0);

    RatingRepo::delete(&pool, video.id, b.id).await.unwrap();
    RatingRepo::delete(&pool, video.id, c.id).await.unwrap();
    assert_eq!(reload_video(&pool, video.id).await.rating, 0.0);
}
