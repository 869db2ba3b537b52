use std::fs;

use wellmerge_core::config::StorageConfig;
use wellmerge_core::key::ObjectLocation;
use wellmerge_io::build_storage_from_config;

fn temp_root(name: &str) -> std::path::PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("wellmerge-storage-tests-{name}"));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn cfg(uri: String) -> StorageConfig {
    StorageConfig {
        uri,
        ..StorageConfig::default()
    }
}

#[tokio::test]
async fn test_file_storage_builder_write_read() {
    let root = temp_root("fs");
    let storage = build_storage_from_config(&cfg(format!("file://{}", root.display())))
        .expect("fs storage");

    let location = ObjectLocation::new("enriched", "jobs/2023/acme.csv");
    storage.put(&location, b"a,b\n1,2\n".to_vec()).await.expect("put");
    assert_eq!(storage.get(&location).await.expect("get"), b"a,b\n1,2\n");
    assert!(root.join("enriched/jobs/2023/acme.csv").is_file());
}

#[tokio::test]
async fn test_file_storage_missing_object_is_not_found() {
    let root = temp_root("missing");
    let storage = build_storage_from_config(&cfg(format!("file://{}", root.display())))
        .expect("fs storage");

    let err = storage
        .get(&ObjectLocation::new("incoming", "nope.csv"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_file_storage_rejects_escaping_keys() {
    let root = temp_root("escape");
    let storage = build_storage_from_config(&cfg(format!("file://{}", root.display())))
        .expect("fs storage");

    let err = storage
        .put(&ObjectLocation::new("incoming", "../outside.csv"), Vec::new())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("invalid object key"));
}

#[test]
fn test_invalid_scheme_errors() {
    let err = build_storage_from_config(&cfg("ftp://example.com/in".into()))
        .err()
        .expect("should fail");
    assert!(err.to_string().contains("unsupported storage scheme"));
}

#[cfg(not(feature = "s3"))]
#[test]
fn test_s3_without_feature_fails() {
    let err = build_storage_from_config(&cfg("s3://".into()))
        .err()
        .expect("feature missing");
    assert!(err.to_string().contains("without the `s3` feature"));
}
