use keyward::domain::services::key_digest;
use keyward::domain::services::key_lifecycle::{
    KeyLifecycle, KeyLifecycleError, KeyLifecycleService,
};
use keyward::domain::services::secret_generator::OsSecretGenerator;
use keyward::domain::value_objects::ids::OwnerId;
use keyward::infrastructure::db::postgres::PostgresDatabase;
use keyward::infrastructure::db::repositories::Repositories;
use std::sync::Arc;

fn test_db_url() -> Option<String> {
    std::env::var("DATABASE_URL").ok()
}

async fn setup() -> Option<KeyLifecycle> {
    let url = test_db_url()?;
    let db = Arc::new(PostgresDatabase::connect(&url, 2).await.unwrap());
    db.migrate().await.unwrap();
    let repos = Repositories::postgres(db);
    Some(KeyLifecycle::new(
        repos.api_key.clone(),
        Arc::new(OsSecretGenerator),
    ))
}

#[tokio::test]
async fn given_created_key_when_listed_should_store_digest_not_plaintext() {
    let Some(lifecycle) = setup().await else {
        return;
    };
    let owner = OwnerId::new();

    let (record, secret) = lifecycle.create(Some(owner), "Prod").await.unwrap();
    let listed = lifecycle.list(Some(owner)).await.unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, record.id);
    assert!(key_digest::matches(secret.expose(), &listed[0].digest));
    assert_ne!(listed[0].digest.as_str(), secret.expose());

    lifecycle.delete(Some(owner), record.id).await.unwrap();
}

#[tokio::test]
async fn given_two_keys_when_listed_should_return_newest_first() {
    let Some(lifecycle) = setup().await else {
        return;
    };
    let owner = OwnerId::new();

    let (first, _) = lifecycle.create(Some(owner), "First").await.unwrap();
    let (second, _) = lifecycle.create(Some(owner), "Second").await.unwrap();
    let ids: Vec<_> = lifecycle
        .list(Some(owner))
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();

    assert_eq!(ids, vec![second.id, first.id]);

    lifecycle.delete(Some(owner), first.id).await.unwrap();
    lifecycle.delete(Some(owner), second.id).await.unwrap();
}

#[tokio::test]
async fn given_key_when_toggled_and_deleted_twice_should_end_not_found() {
    let Some(lifecycle) = setup().await else {
        return;
    };
    let owner = OwnerId::new();
    let (record, _) = lifecycle.create(Some(owner), "Prod").await.unwrap();

    let off = lifecycle
        .set_active(Some(owner), record.id, false)
        .await
        .unwrap();
    assert!(!off.is_active);
    assert_eq!(off.digest, record.digest);

    lifecycle.delete(Some(owner), record.id).await.unwrap();
    let err = lifecycle.delete(Some(owner), record.id).await.unwrap_err();
    assert_eq!(err, KeyLifecycleError::NotFound);
}

#[tokio::test]
async fn given_key_when_rotated_should_swap_rows_in_one_step() {
    let Some(lifecycle) = setup().await else {
        return;
    };
    let owner = OwnerId::new();
    let (old, _) = lifecycle.create(Some(owner), "Prod").await.unwrap();

    let (new, _) = lifecycle.rotate(Some(owner), old.id).await.unwrap();
    let listed = lifecycle.list(Some(owner)).await.unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, new.id);
    assert_eq!(listed[0].key_name, "Prod");

    lifecycle.delete(Some(owner), new.id).await.unwrap();
}

#[tokio::test]
async fn given_foreign_owner_when_deleting_should_not_find_key() {
    let Some(lifecycle) = setup().await else {
        return;
    };
    let owner = OwnerId::new();
    let (record, _) = lifecycle.create(Some(owner), "Prod").await.unwrap();

    let err = lifecycle
        .delete(Some(OwnerId::new()), record.id)
        .await
        .unwrap_err();
    assert_eq!(err, KeyLifecycleError::NotFound);

    lifecycle.delete(Some(owner), record.id).await.unwrap();
}
