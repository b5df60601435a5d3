use sqlx::PgPool;
use std::sync::Arc;
use warbler_service::models::users::NewUser;
use warbler_service::services::user_service::UserService;
use warbler_service::setup_services;
use warbler_service::utils::errors::ModelError;

fn service(pool: PgPool) -> UserService {
    setup_services(Arc::new(pool))
}

fn new_user(username: &str, email: &str, password: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        image_url: None,
    }
}

async fn signup_pair(service: &UserService) -> (i64, i64) {
    let user1 = service
        .signup(new_user("test1", "email1@email.com", "password"))
        .await
        .unwrap();
    let user2 = service
        .signup(new_user("test2", "email2@email.com", "password"))
        .await
        .unwrap();
    (user1.id, user2.id)
}

#[sqlx::test]
async fn fresh_user_has_no_followers_or_messages(pool: PgPool) {
    let service = service(pool);
    let user = service
        .signup(new_user("testuser", "test@test.com", "password"))
        .await
        .unwrap();

    assert!(service.followers(user.id).await.unwrap().is_empty());
    assert!(service.following(user.id).await.unwrap().is_empty());
    assert!(service.messages(user.id).await.unwrap().is_empty());
}

#[sqlx::test]
async fn follow_is_directed(pool: PgPool) {
    let service = service(pool);
    let (user1, user2) = signup_pair(&service).await;

    service.follow(user1, user2).await.unwrap();

    let following1 = service.following(user1).await.unwrap();
    let followers2 = service.followers(user2).await.unwrap();
    assert_eq!(following1.len(), 1);
    assert_eq!(following1[0].id, user2);
    assert_eq!(followers2.len(), 1);
    assert_eq!(followers2[0].id, user1);

    // the reverse relation is not established
    assert!(service.following(user2).await.unwrap().is_empty());
    assert!(service.followers(user1).await.unwrap().is_empty());
}

#[sqlx::test]
async fn is_following_matches_the_follows_table(pool: PgPool) {
    let service = service(pool);
    let (user1, user2) = signup_pair(&service).await;

    service.follow(user1, user2).await.unwrap();

    assert!(service.is_following(user1, user2).await.unwrap());
    assert!(!service.is_following(user2, user1).await.unwrap());
}

#[sqlx::test]
async fn is_followed_by_matches_the_follows_table(pool: PgPool) {
    let service = service(pool);
    let (user1, user2) = signup_pair(&service).await;

    service.follow(user1, user2).await.unwrap();

    assert!(service.is_followed_by(user2, user1).await.unwrap());
    assert!(!service.is_followed_by(user1, user2).await.unwrap());
}

#[sqlx::test]
async fn duplicate_follow_is_a_conflict(pool: PgPool) {
    let service = service(pool);
    let (user1, user2) = signup_pair(&service).await;

    service.follow(user1, user2).await.unwrap();
    let err = service.follow(user1, user2).await.unwrap_err();
    assert!(matches!(err, ModelError::AlreadyFollowing));
}

#[sqlx::test]
async fn following_an_unknown_user_is_an_integrity_error(pool: PgPool) {
    let service = service(pool);
    let (user1, _) = signup_pair(&service).await;

    let err = service.follow(user1, 999_999).await.unwrap_err();
    assert!(err.is_integrity());
}

#[sqlx::test]
async fn unfollow_removes_the_edge_and_is_idempotent(pool: PgPool) {
    let service = service(pool);
    let (user1, user2) = signup_pair(&service).await;

    service.follow(user1, user2).await.unwrap();
    service.unfollow(user1, user2).await.unwrap();
    assert!(!service.is_following(user1, user2).await.unwrap());

    // unfollowing again is not an error
    service.unfollow(user1, user2).await.unwrap();
}

#[sqlx::test]
async fn valid_signup_stores_a_bcrypt_hash(pool: PgPool) {
    let service = service(pool);
    let user = service
        .signup(new_user("testthisisatest", "testing@stest.com", "password"))
        .await
        .unwrap();

    let stored = service.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.username, "testthisisatest");
    assert_eq!(stored.email, "testing@stest.com");
    assert_ne!(stored.password, "password");
    assert!(stored.password.starts_with("$2b$"));
}

#[sqlx::test]
async fn duplicate_username_signup_is_an_integrity_error(pool: PgPool) {
    let service = service(pool);
    signup_pair(&service).await;

    let err = service
        .signup(new_user("test1", "other@email.com", "password"))
        .await
        .unwrap_err();
    assert!(err.is_integrity());
}

#[sqlx::test]
async fn duplicate_email_signup_is_an_integrity_error(pool: PgPool) {
    let service = service(pool);
    signup_pair(&service).await;

    let err = service
        .signup(new_user("testtest", "email1@email.com", "password"))
        .await
        .unwrap_err();
    assert!(err.is_integrity());
}

#[sqlx::test]
async fn empty_password_signup_fails_before_any_insert(pool: PgPool) {
    let service = service(pool);

    let err = service
        .signup(new_user("testtest", "email@email.com", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, ModelError::InvalidPassword));

    // nothing was staged or committed
    assert!(service
        .find_by_username("testtest")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test]
async fn authenticate_returns_the_matching_user(pool: PgPool) {
    let service = service(pool);
    let (user1, _) = signup_pair(&service).await;

    let user = service.authenticate("test1", "password").await.unwrap();
    assert_eq!(user.unwrap().id, user1);
}

#[sqlx::test]
async fn authenticate_with_unknown_username_returns_none(pool: PgPool) {
    let service = service(pool);
    signup_pair(&service).await;

    let user = service
        .authenticate("badusername", "password")
        .await
        .unwrap();
    assert!(user.is_none());
}

#[sqlx::test]
async fn authenticate_with_wrong_password_returns_none(pool: PgPool) {
    let service = service(pool);
    signup_pair(&service).await;

    let user = service.authenticate("test1", "badpassword").await.unwrap();
    assert!(user.is_none());
}

#[sqlx::test]
async fn posted_messages_come_back_newest_first(pool: PgPool) {
    let service = service(pool);
    let (user1, user2) = signup_pair(&service).await;

    service.post_message(user1, "first warble").await.unwrap();
    service.post_message(user1, "second warble").await.unwrap();

    let messages = service.messages(user1).await.unwrap();
    let texts: Vec<&str> = messages.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, ["second warble", "first warble"]);
    assert!(messages.iter().all(|m| m.user_id == user1));
    assert!(service.messages(user2).await.unwrap().is_empty());
}

#[sqlx::test]
async fn deleting_a_user_cascades_follows_and_messages(pool: PgPool) {
    let service = service(pool);
    let (user1, user2) = signup_pair(&service).await;

    service.follow(user1, user2).await.unwrap();
    service.post_message(user2, "about to vanish").await.unwrap();

    assert!(service.delete_user(user2).await.unwrap());

    assert!(service.find_by_id(user2).await.unwrap().is_none());
    assert!(!service.is_following(user1, user2).await.unwrap());
    assert!(service.following(user1).await.unwrap().is_empty());
    // deleting an already-deleted user reports absence
    assert!(!service.delete_user(user2).await.unwrap());
}
