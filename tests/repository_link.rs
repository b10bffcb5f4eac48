use chrono::{Duration, Utc};
use link_tracker::domain::entities::{InsertOutcome, Link, NewLink};
use link_tracker::domain::repositories::LinkRepository;
use link_tracker::infrastructure::persistence::PgLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_link(code: &str, owner: i64) -> NewLink {
    NewLink {
        short_code: code.to_string(),
        long_url_desktop: "https://example.com".to_string(),
        long_url_mobile: Some("https://m.example.com".to_string()),
        name: Some("Example".to_string()),
        expiry: None,
        image_url: None,
        created_by: owner,
    }
}

async fn created(repo: &PgLinkRepository, new: NewLink) -> Link {
    match repo.insert(new).await.unwrap() {
        InsertOutcome::Created(link) => link,
        InsertOutcome::CodeTaken => panic!("short code unexpectedly taken"),
    }
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_insert_link(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let expiry = Utc::now() + Duration::days(3);

    let mut new = new_link("test123", 5);
    new.expiry = Some(expiry);
    let link = created(&repo, new).await;

    assert_eq!(link.short_code, "test123");
    assert_eq!(link.long_url_mobile.as_deref(), Some("https://m.example.com"));
    assert_eq!(link.created_by, 5);
    assert_eq!(link.expiry.map(|e| e.timestamp()), Some(expiry.timestamp()));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_insert_duplicate_code_is_code_taken(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    created(&repo, new_link("dup123", 1)).await;

    let outcome = repo.insert(new_link("dup123", 2)).await.unwrap();

    assert!(matches!(outcome, InsertOutcome::CodeTaken));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_by_code_and_id(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let link = created(&repo, new_link("abc123", 1)).await;

    let by_code = repo.find_by_code("abc123").await.unwrap().unwrap();
    let by_id = repo.find_by_id(link.id).await.unwrap().unwrap();

    assert_eq!(by_code, link);
    assert_eq!(by_id, link);
    assert!(repo.exists_by_code("abc123").await.unwrap());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_missing(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.find_by_code("notfound").await.unwrap().is_none());
    assert!(repo.find_by_id(12345).await.unwrap().is_none());
    assert!(!repo.exists_by_code("notfound").await.unwrap());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_list_by_owner_newest_first(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let first = created(&repo, new_link("own001", 9)).await;
    created(&repo, new_link("oth001", 10)).await;
    let second = created(&repo, new_link("own002", 9)).await;

    let links = repo.list_by_owner(9).await.unwrap();

    let ids: Vec<i64> = links.iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_ping(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    assert!(repo.ping().await.is_ok());
}
