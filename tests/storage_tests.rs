mod common;

use std::sync::Arc;

use bytes::Bytes;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{ObjectStore, PutPayload};

use common::assertions::{assert_invalid_argument, assert_not_found, ids};
use common::stations::{station, OLD_CITY};

use sabai::config::{StorageBackend, StorageConfig};
use sabai::proximity::{nearby, NearbyQuery};
use sabai::source::StationSource;
use sabai::storage::{sample_stations, StationStore, STATIONS_KEY};

#[tokio::test]
async fn test_empty_store_loads_empty() {
    let store = StationStore::in_memory();
    assert!(store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_save_and_load_round_trip() {
    let store = StationStore::in_memory();
    let mut st = station("s42", 18.79, 98.99);
    st.rating = Some(4.0);
    st.note = Some("behind the temple".into());
    st.photos = vec!["data:image/png;base64,iVBORw0KGgo=".into()];

    store.save(&[st.clone()]).await.expect("save should succeed");
    let loaded = store.load().await.expect("load should succeed");
    assert_eq!(loaded, vec![st]);
}

#[tokio::test]
async fn test_upsert_replaces_whole_record() {
    let store = StationStore::in_memory();
    store.save(&sample_stations()).await.unwrap();

    let mut replacement = station("s1", 18.7882, 98.9965);
    replacement.name = "Moon Muang RO (renamed)".into();
    store.upsert(replacement.clone()).await.unwrap();

    let loaded = store.load().await.unwrap();
    assert_eq!(ids(&loaded), vec!["s1", "s2"]);
    assert_eq!(loaded[0], replacement);
    // The old rating does not survive a whole-record replacement.
    assert!(loaded[0].rating.is_none());
}

#[tokio::test]
async fn test_upsert_appends_new_id() {
    let store = StationStore::in_memory();
    store.save(&sample_stations()).await.unwrap();
    store.upsert(station("s3", 18.79, 98.98)).await.unwrap();
    assert_eq!(ids(&store.load().await.unwrap()), vec!["s1", "s2", "s3"]);
}

#[tokio::test]
async fn test_insert_unique_suffixes_taken_ids() {
    let store = StationStore::in_memory();
    let a = store.insert_unique(station("x", 1.0, 1.0), "s100").await.unwrap();
    let b = store.insert_unique(station("x", 1.0, 1.0), "s100").await.unwrap();
    let c = store.insert_unique(station("x", 1.0, 1.0), "s100").await.unwrap();
    assert_eq!((a.id.as_str(), b.id.as_str(), c.id.as_str()), ("s100", "s100-1", "s100-2"));
}

#[tokio::test]
async fn test_remove() {
    let store = StationStore::in_memory();
    store.save(&sample_stations()).await.unwrap();

    assert!(store.remove("s1").await.unwrap());
    assert!(!store.remove("s1").await.unwrap());
    assert_eq!(ids(&store.load().await.unwrap()), vec!["s2"]);
}

#[tokio::test]
async fn test_get() {
    let store = StationStore::in_memory();
    store.save(&sample_stations()).await.unwrap();

    assert_eq!(store.get("s2").await.unwrap().name, "Sample RO — Ratchadamnoen");
    assert_not_found(&store.get("missing").await);
}

#[tokio::test]
async fn test_seed_if_empty_only_once() {
    let store = StationStore::in_memory();
    assert_eq!(store.seed_if_empty(&sample_stations()).await.unwrap(), 2);
    assert_eq!(store.seed_if_empty(&sample_stations()).await.unwrap(), 0);
    assert_eq!(store.snapshot().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_corrupt_document_reads_as_empty() {
    let inner = Arc::new(InMemory::new());
    inner
        .put(&Path::from(STATIONS_KEY), PutPayload::from(Bytes::from("{not json")))
        .await
        .unwrap();

    let store = StationStore::new(inner);
    assert!(store.load().await.unwrap().is_empty());

    // The next write replaces the corrupt document.
    store.upsert(station("fresh", 0.0, 0.0)).await.unwrap();
    assert_eq!(ids(&store.load().await.unwrap()), vec!["fresh"]);
}

#[tokio::test]
async fn test_reads_legacy_browser_format() {
    let legacy = r#"[
        {"id":"s1","name":"Sample RO — Moon Muang","lat":18.7882,"lng":98.9965,"price":0.6,"photos":[],"rating":4.6,"reviews":[]},
        {"id":"s1700000000000","name":"Local","lat":18.79,"lng":98.99,"price":1,"note":"","photos":[],"rating":0,"reviews":[]}
    ]"#;
    let inner = Arc::new(InMemory::new());
    inner
        .put(&Path::from(STATIONS_KEY), PutPayload::from(Bytes::from(legacy)))
        .await
        .unwrap();

    let loaded = StationStore::new(inner).load().await.unwrap();
    assert_eq!(ids(&loaded), vec!["s1", "s1700000000000"]);
    assert_eq!(loaded[1].price, 1.0);
}

#[tokio::test]
async fn test_invalid_records_are_not_written() {
    let store = StationStore::in_memory();
    store.save(&sample_stations()).await.unwrap();

    let mut bad = station("bad", 95.0, 0.0);
    bad.price = -3.0;
    assert_invalid_argument(&store.upsert(bad.clone()).await);
    assert_invalid_argument(&store.insert_unique(bad.clone(), "bad").await);

    let mut batch = sample_stations();
    batch.push(bad);
    assert_invalid_argument(&store.save(&batch).await);

    let mut free = station("free", 18.79, 98.99);
    free.price = -0.01;
    assert_invalid_argument(&store.upsert(free).await);

    assert_eq!(ids(&store.load().await.unwrap()), vec!["s1", "s2"]);
}

#[tokio::test]
async fn test_stored_invalid_record_is_skipped() {
    let raw = r#"[
        {"id":"s1","name":"Moon Muang","lat":18.7882,"lng":98.9965,"price":0.6},
        {"id":"bad","name":"Nowhere","lat":95.0,"lng":0.0,"price":-3.0}
    ]"#;
    let inner = Arc::new(InMemory::new());
    inner
        .put(&Path::from(STATIONS_KEY), PutPayload::from(Bytes::from(raw)))
        .await
        .unwrap();

    let store = StationStore::new(inner);
    let snapshot = store.snapshot().await.unwrap();
    assert_eq!(ids(&snapshot), vec!["s1"]);

    let ranked = nearby(&snapshot, &NearbyQuery::new(OLD_CITY, 2_000.0)).unwrap();
    assert_eq!(ranked.len(), 1);
}

#[tokio::test]
async fn test_local_backend_persists_to_disk() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = StorageConfig {
        backend: StorageBackend::Local,
        root: dir.path().join("data"),
        ..Default::default()
    };

    let store = StationStore::from_config(&config).unwrap();
    store.save(&sample_stations()).await.unwrap();
    assert!(dir.path().join("data").join(STATIONS_KEY).exists());

    // A fresh store over the same directory sees the same stations.
    let reopened = StationStore::from_config(&config).unwrap();
    assert_eq!(ids(&reopened.load().await.unwrap()), vec!["s1", "s2"]);
}

#[tokio::test]
async fn test_concurrent_upserts_are_not_lost() {
    let store = StationStore::in_memory();
    let mut handles = Vec::new();
    for i in 0..20 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.upsert(station(&format!("c{i}"), 0.0, 0.0)).await.unwrap();
        }));
    }
    for h in handles {
        h.await.unwrap();
    }
    assert_eq!(store.load().await.unwrap().len(), 20);
}
