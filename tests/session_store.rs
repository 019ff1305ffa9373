#![cfg(feature = "migration")]

mod common;

use std::collections::HashMap;

use common::setup_db;
use content_catalog::entity::session;
use content_catalog::DbSessionStore;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;
use time::{Duration, OffsetDateTime};
use tower_sessions::session::{Id, Record};
use tower_sessions::{ExpiredDeletion, SessionStore};

fn record(expires_in: Duration) -> Record {
    let mut data = HashMap::new();
    data.insert("user_id".to_string(), json!("alice"));
    Record {
        id: Id::default(),
        data,
        expiry_date: OffsetDateTime::now_utc() + expires_in,
    }
}

#[tokio::test]
async fn create_then_load_round_trips_data() {
    let store = DbSessionStore::new(setup_db().await);
    let mut rec = record(Duration::hours(1));

    store.create(&mut rec).await.unwrap();
    let loaded = store.load(&rec.id).await.unwrap().expect("session stored");

    assert_eq!(loaded.id, rec.id);
    assert_eq!(loaded.data.get("user_id"), Some(&json!("alice")));
}

#[tokio::test]
async fn save_overwrites_existing_record() {
    let store = DbSessionStore::new(setup_db().await);
    let mut rec = record(Duration::hours(1));
    store.create(&mut rec).await.unwrap();

    rec.data.insert("user_id".to_string(), json!("bob"));
    store.save(&rec).await.unwrap();

    let loaded = store.load(&rec.id).await.unwrap().unwrap();
    assert_eq!(loaded.data.get("user_id"), Some(&json!("bob")));
}

#[tokio::test]
async fn save_inserts_unknown_record() {
    let store = DbSessionStore::new(setup_db().await);
    let rec = record(Duration::hours(1));

    store.save(&rec).await.unwrap();

    assert!(store.load(&rec.id).await.unwrap().is_some());
}

#[tokio::test]
async fn expired_sessions_are_invisible_and_swept() {
    let db = setup_db().await;
    let store = DbSessionStore::new(db.clone());

    let mut live = record(Duration::hours(1));
    let mut stale = record(Duration::hours(-1));
    store.create(&mut live).await.unwrap();
    store.create(&mut stale).await.unwrap();

    assert!(store.load(&stale.id).await.unwrap().is_none());

    store.delete_expired().await.unwrap();

    assert_eq!(session::Entity::find().count(&db).await.unwrap(), 1);
    assert!(store.load(&live.id).await.unwrap().is_some());
}

#[tokio::test]
async fn delete_removes_record() {
    let store = DbSessionStore::new(setup_db().await);
    let mut rec = record(Duration::hours(1));
    store.create(&mut rec).await.unwrap();

    store.delete(&rec.id).await.unwrap();

    assert!(store.load(&rec.id).await.unwrap().is_none());
}
