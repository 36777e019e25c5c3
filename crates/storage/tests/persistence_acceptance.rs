use storage::{KeyValueStore, Storage};

#[tokio::test]
async fn values_survive_reopening_the_database() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("tracker.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    {
        let storage = Storage::new(&database_url).await.expect("open");
        storage
            .set("jobTrackerJobs", r#"[{"id":1}]"#)
            .await
            .expect("set jobs");
        storage
            .set("jobTrackerFilter", "interview")
            .await
            .expect("set filter");
        storage.pool().close().await;
    }

    let reopened = Storage::new(&database_url).await.expect("reopen");
    assert_eq!(
        reopened.get("jobTrackerJobs").await.expect("jobs").as_deref(),
        Some(r#"[{"id":1}]"#)
    );
    assert_eq!(
        reopened
            .get("jobTrackerFilter")
            .await
            .expect("filter")
            .as_deref(),
        Some("interview")
    );
}

#[tokio::test]
async fn store_is_usable_through_trait_object() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let store: std::sync::Arc<dyn KeyValueStore> = std::sync::Arc::new(storage);
    store.set("jobTrackerSort", "company").await.expect("set");
    assert_eq!(
        store.get("jobTrackerSort").await.expect("get").as_deref(),
        Some("company")
    );
}
