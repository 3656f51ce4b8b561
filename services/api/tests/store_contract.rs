//! Behaviour every `DocumentStore` adapter must share. The checks run against
//! the in-memory store always, and against PostgreSQL when
//! `TEST_DATABASE_URL` points at a server the tests may create schemas on.

use std::str::FromStr;

use api_lib::adapters::{InMemoryStore, PgDocumentStore};
use serde_json::{json, Value};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tutorhub_core::domain::{Collection, Document, Filter, FindOptions, Sort, ID_FIELD};
use tutorhub_core::ports::{DocumentStore, PortError};
use uuid::Uuid;

fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        _ => panic!("test document must be an object"),
    }
}

/// Every check tags its documents with a fresh `run` marker and only looks at
/// its own documents, so the checks can share one store.
async fn insert_tagged(store: &dyn DocumentStore, run: &str, value: Value) -> String {
    let mut document = doc(value);
    document.insert("run".into(), json!(run));
    store
        .insert_one(Collection::Tutorials, document)
        .await
        .unwrap()
        .inserted_id
}

fn names(docs: &[Document]) -> Vec<&str> {
    docs.iter().map(|d| d["name"].as_str().unwrap()).collect()
}

async fn sorts_across_types(store: &dyn DocumentStore) {
    let run = Uuid::new_v4().to_string();
    for value in [
        json!({ "name": "a", "price": 5 }),
        json!({ "name": "b", "price": "ten" }),
        json!({ "name": "c" }),
        json!({ "name": "d", "price": true }),
        json!({ "name": "e", "price": null }),
        json!({ "name": "f", "price": { "amount": 1 } }),
        json!({ "name": "g", "price": [1] }),
        json!({ "name": "h", "price": 2.5 }),
        json!({ "name": "i", "price": 5 }),
        json!({ "name": "j", "price": "Ten" }),
    ] {
        insert_tagged(store, &run, value).await;
    }
    let mine = Filter::new().eq("run", run.as_str());

    let ascending = store
        .find(Collection::Tutorials, &mine, &FindOptions::sorted(Sort::ascending("price")))
        .await
        .unwrap();
    assert_eq!(names(&ascending), vec!["c", "e", "h", "a", "i", "j", "b", "f", "g", "d"]);

    let descending = store
        .find(Collection::Tutorials, &mine, &FindOptions::sorted(Sort::descending("price")))
        .await
        .unwrap();
    assert_eq!(names(&descending), vec!["d", "g", "f", "b", "j", "a", "i", "h", "c", "e"]);

    let natural = store
        .find(Collection::Tutorials, &mine, &FindOptions::default())
        .await
        .unwrap();
    assert_eq!(names(&natural), vec!["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]);
}

async fn filters_like_equality(store: &dyn DocumentStore) {
    let run = Uuid::new_v4().to_string();
    insert_tagged(store, &run, json!({ "name": "null", "email": null, "price": 10 })).await;
    insert_tagged(store, &run, json!({ "name": "missing", "tags": ["go", "rust"] })).await;
    insert_tagged(store, &run, json!({ "name": "set", "email": "a@x.com", "price": 10.0 })).await;
    let mine = || Filter::new().eq("run", run.as_str());

    let without_email = store
        .find(Collection::Tutorials, &mine().eq("email", Value::Null), &FindOptions::default())
        .await
        .unwrap();
    assert_eq!(names(&without_email), vec!["null", "missing"]);

    let by_email = store
        .find(Collection::Tutorials, &mine().eq("email", "a@x.com"), &FindOptions::default())
        .await
        .unwrap();
    assert_eq!(names(&by_email), vec!["set"]);

    let by_price = store
        .find(Collection::Tutorials, &mine().eq("price", 10), &FindOptions::default())
        .await
        .unwrap();
    assert_eq!(names(&by_price), vec!["null", "set"]);

    let partial_array = store
        .find(Collection::Tutorials, &mine().eq("tags", json!(["go"])), &FindOptions::default())
        .await
        .unwrap();
    assert!(partial_array.is_empty());
}

async fn reports_update_counts(store: &dyn DocumentStore) {
    let run = Uuid::new_v4().to_string();
    let id = insert_tagged(store, &run, json!({ "language": "Go", "price": 10 })).await;

    let changed = store
        .update_by_id(Collection::Tutorials, &id, doc(json!({ "price": 12, "_id": "other" })))
        .await
        .unwrap();
    assert_eq!((changed.matched_count, changed.modified_count), (1, 1));

    let unchanged = store
        .update_by_id(Collection::Tutorials, &id, doc(json!({ "price": 12 })))
        .await
        .unwrap();
    assert_eq!((unchanged.matched_count, unchanged.modified_count), (1, 0));

    let unknown = store
        .update_by_id(Collection::Tutorials, "no-such-id", doc(json!({ "price": 1 })))
        .await
        .unwrap();
    assert_eq!((unknown.matched_count, unknown.modified_count), (0, 0));

    let stored = store.find_by_id(Collection::Tutorials, &id).await.unwrap().unwrap();
    assert_eq!(stored["language"], "Go");
    assert_eq!(stored["price"], 12);
    assert_eq!(stored[ID_FIELD], json!(id));
}

async fn increments_whole_numbers(store: &dyn DocumentStore) {
    let run = Uuid::new_v4().to_string();
    let fresh = insert_tagged(store, &run, json!({})).await;
    let float = insert_tagged(store, &run, json!({ "review": 2.0 })).await;
    let full = insert_tagged(store, &run, json!({ "review": i64::MAX })).await;
    let text = insert_tagged(store, &run, json!({ "review": "lots" })).await;

    let bump = |id: String| async move {
        store.increment_by_id(Collection::Tutorials, &id, "review").await
    };
    assert_eq!(bump(fresh.clone()).await.unwrap(), Some(1));
    assert_eq!(bump(fresh.clone()).await.unwrap(), Some(2));
    assert_eq!(bump(float).await.unwrap(), Some(3));
    assert_eq!(bump("no-such-id".into()).await.unwrap(), None);
    assert!(matches!(bump(full.clone()).await, Err(PortError::Unexpected(_))));
    assert!(matches!(bump(text).await, Err(PortError::Unexpected(_))));

    let untouched = store.find_by_id(Collection::Tutorials, &full).await.unwrap().unwrap();
    assert_eq!(untouched["review"], i64::MAX);
    let counted = store.find_by_id(Collection::Tutorials, &fresh).await.unwrap().unwrap();
    assert_eq!(counted["review"], 2);
}

async fn deletes_once(store: &dyn DocumentStore) {
    let run = Uuid::new_v4().to_string();
    let id = insert_tagged(store, &run, json!({ "language": "Go" })).await;

    assert_eq!(store.delete_by_id(Collection::Tutorials, &id).await.unwrap().deleted_count, 1);
    assert_eq!(store.delete_by_id(Collection::Tutorials, &id).await.unwrap().deleted_count, 0);
    assert!(store.find_by_id(Collection::Tutorials, &id).await.unwrap().is_none());
    assert!(store
        .find_by_id(Collection::BookedTutors, "no-such-id")
        .await
        .unwrap()
        .is_none());
}

async fn run_contract(store: &dyn DocumentStore) {
    sorts_across_types(store).await;
    filters_like_equality(store).await;
    reports_update_counts(store).await;
    increments_whole_numbers(store).await;
    deletes_once(store).await;
}

#[tokio::test]
async fn in_memory_store_honours_the_store_contract() {
    run_contract(&InMemoryStore::new()).await;
}

/// Runs the contract inside a throwaway schema so the target database keeps
/// no trace of the run.
#[tokio::test]
async fn postgres_store_honours_the_store_contract() {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL is not set, skipping the PostgreSQL store contract");
        return;
    };
    let schema = format!("contract_{}", Uuid::new_v4().simple());

    let admin = PgPool::connect(&url).await.expect("failed to connect to TEST_DATABASE_URL");
    sqlx::query(&format!("CREATE SCHEMA \"{}\"", schema))
        .execute(&admin)
        .await
        .expect("failed to create test schema");

    let options = PgConnectOptions::from_str(&url)
        .expect("invalid TEST_DATABASE_URL")
        .options([("search_path", schema.as_str())]);
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .connect_with(options)
        .await
        .expect("failed to connect with the test schema");
    let store = PgDocumentStore::new(pool.clone());
    store.run_migrations().await.expect("migrations failed");

    run_contract(&store).await;

    pool.close().await;
    sqlx::query(&format!("DROP SCHEMA \"{}\" CASCADE", schema))
        .execute(&admin)
        .await
        .expect("failed to drop test schema");
}
