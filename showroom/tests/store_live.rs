//! Product store integration tests against the embedded database
//! Run: cargo test -p showroom --test store_live

use std::time::Duration;

use shared::Product;
use showroom::db::DbService;
use showroom::db::store::{ProductStore, Snapshot, Subscription, SurrealProductStore};

async fn open_store() -> SurrealProductStore {
    let db = DbService::open_in_memory().await.unwrap();
    SurrealProductStore::new(db.db)
}

fn product(id: &str, name: &str, price: f64) -> Product {
    let mut p = Product::new(id.to_string(), name.to_string());
    p.price = price;
    p
}

/// Wait (bounded) for a snapshot matching `pred`, skipping intermediates
async fn next_matching<F>(sub: &mut Subscription, pred: F) -> Snapshot
where
    F: Fn(&Snapshot) -> bool,
{
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let snapshot = sub.recv().await.expect("subscription ended early");
            if pred(&snapshot) {
                return snapshot;
            }
        }
    })
    .await
    .expect("timed out waiting for snapshot")
}

#[tokio::test]
async fn find_all_returns_records_sorted_by_name() {
    let store = open_store().await;
    store.set(product("3", "Table", 500.0)).await.unwrap();
    store.set(product("1", "Chair", 150000.0)).await.unwrap();
    store.set(product("2", "Lamp", 75.0)).await.unwrap();

    let all = store.find_all().await.unwrap();
    let names: Vec<&str> = all.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Chair", "Lamp", "Table"]);
    // Record keys come back as the original ids
    assert_eq!(all[0].id, "1");
    assert_eq!(all[0].price, 150000.0);
}

#[tokio::test]
async fn all_fields_survive_the_round_trip() {
    let store = open_store().await;
    let mut chair = product("c1", "Chair", 150000.0);
    chair.category = "Seating".into();
    chair.description = "Solid oak dining chair".into();
    chair.stock = 10;
    chair.images = vec!["data:image/png;base64,AAAA".into(), "https://x/y.png".into()];
    chair.features = vec!["solid wood".into(), "hand carved".into()];
    chair.specifications.insert("Material".into(), "Oak".into());
    chair.specifications.insert("Weight".into(), "6kg".into());

    store.set(chair.clone()).await.unwrap();
    let all = store.find_all().await.unwrap();
    assert_eq!(all, vec![chair]);
}

#[tokio::test]
async fn set_with_existing_id_is_an_upsert() {
    let store = open_store().await;
    store.set(product("1", "Chair", 100.0)).await.unwrap();
    store.set(product("1", "Chair", 200.0)).await.unwrap();

    let all = store.find_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].price, 200.0);
}

#[tokio::test]
async fn delete_removes_the_record_and_tolerates_absent_ids() {
    let store = open_store().await;
    store.set(product("1", "Chair", 100.0)).await.unwrap();

    store.delete("1").await.unwrap();
    assert!(store.find_all().await.unwrap().is_empty());

    // Deleting something that is not there is not an error
    store.delete("ghost").await.unwrap();
}

#[tokio::test]
async fn watch_delivers_initial_snapshot_then_full_snapshots_per_change() {
    let store = open_store().await;
    store.set(product("1", "Chair", 100.0)).await.unwrap();

    let mut sub = store.watch().await.unwrap();

    let initial = sub.recv().await.unwrap();
    assert_eq!(initial.len(), 1);
    assert_eq!(initial[0].name, "Chair");

    store.set(product("2", "Armoire", 900.0)).await.unwrap();
    let snapshot = next_matching(&mut sub, |s| s.len() == 2).await;
    // Every push is the whole collection, already name-sorted
    let names: Vec<&str> = snapshot.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Armoire", "Chair"]);

    store.delete("1").await.unwrap();
    let snapshot = next_matching(&mut sub, |s| s.len() == 1).await;
    assert_eq!(snapshot[0].name, "Armoire");
}

#[tokio::test]
async fn cancelled_watch_stops_delivering() {
    let store = open_store().await;
    let mut sub = store.watch().await.unwrap();
    assert!(sub.recv().await.is_some());

    sub.cancel();
    store.set(product("1", "Chair", 100.0)).await.unwrap();

    // Anything already buffered may drain, then the channel closes
    let ended = tokio::time::timeout(Duration::from_secs(5), async {
        while sub.recv().await.is_some() {}
    })
    .await;
    assert!(ended.is_ok());
}

#[tokio::test]
async fn records_persist_across_reopen() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("catalog.db");

    {
        let db = DbService::new(&path).await.unwrap();
        let store = SurrealProductStore::new(db.db);
        store.set(product("1", "Chair", 150000.0)).await.unwrap();
    }

    let db = DbService::new(&path).await.unwrap();
    let store = SurrealProductStore::new(db.db);
    let all = store.find_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Chair");
}
