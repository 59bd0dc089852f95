//! Tests for the JSON log sink

use super::{format_record, JsonLogConfig, JsonLogError, JsonLogSink};
use crate::sink::EntrySink;
use cachescope_core::{CacheRecord, CacheRecordContent, Error};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;

fn set_record(key: &str) -> CacheRecord {
    CacheRecord::new(
        CacheRecordContent::Set {
            key: key.to_string(),
            value: json!({"price": 9.99}),
            expiration: Some(10),
        },
        None,
    )
}

#[tokio::test]
async fn test_sink_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("nested").join("cache.jsonl");

    let sink = JsonLogSink::new(&log_path).await;
    assert!(sink.is_ok());
    assert!(fs::metadata(&log_path).await.is_ok());
}

#[tokio::test]
async fn test_records_are_written_as_json_lines() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("cache.jsonl");
    let sink = JsonLogSink::new(&log_path).await.unwrap();

    sink.record(set_record("product:7")).await.unwrap();
    sink.record(set_record("product:8")).await.unwrap();
    sink.flush().await.unwrap();

    let content = fs::read_to_string(&log_path).await.unwrap();
    let lines: Vec<serde_json::Value> = content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["content"]["key"], "product:7");
    assert_eq!(lines[0]["content"]["expiration"], 10);
    assert_eq!(lines[1]["tags"], json!(["product:8"]));
}

#[tokio::test]
async fn test_rotation_moves_full_log_aside() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("cache.jsonl");
    let config = JsonLogConfig::new(&log_path)
        .with_max_file_size(Some(100))
        .with_backup_count(2)
        .with_size_check_interval(1);
    let sink = JsonLogSink::from_config(config).await.unwrap();

    for i in 0..10 {
        sink.record(set_record(&format!("product:{i}"))).await.unwrap();
    }
    sink.flush().await.unwrap();

    let backup_1 = format!("{}.1", log_path.display());
    let backup_2 = format!("{}.2", log_path.display());
    let backup_3 = format!("{}.3", log_path.display());
    assert!(fs::metadata(&log_path).await.is_ok());
    assert!(fs::metadata(&backup_1).await.is_ok());
    assert!(fs::metadata(&backup_2).await.is_ok());
    assert!(fs::metadata(&backup_3).await.is_err());

    // Every record is a single line, so one record per file after rotation
    let current = fs::read_to_string(&log_path).await.unwrap();
    assert_eq!(current.lines().count(), 1);
    assert!(current.contains("product:9"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_writers_never_rotate_an_undersized_file() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("cache.jsonl");
    let config = JsonLogConfig::new(&log_path)
        .with_max_file_size(Some(1000))
        .with_backup_count(50)
        .with_size_check_interval(1);
    let sink = Arc::new(JsonLogSink::from_config(config).await.unwrap());

    let handles: Vec<_> = (0..400)
        .map(|i| {
            let sink = Arc::clone(&sink);
            tokio::spawn(async move { sink.record(set_record(&format!("product:{i}"))).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    sink.flush().await.unwrap();

    let mut backups = 0;
    for index in 1..=50 {
        let path = format!("{}.{index}", log_path.display());
        let Ok(meta) = fs::metadata(&path).await else {
            continue;
        };
        backups += 1;
        assert!(
            meta.len() > 1000,
            "backup {index} holds only {} bytes",
            meta.len()
        );
    }
    assert!(backups > 0);
}

#[tokio::test]
async fn test_rotation_disabled() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("cache.jsonl");
    let config = JsonLogConfig::new(&log_path)
        .with_max_file_size(None)
        .with_size_check_interval(1);
    let sink = JsonLogSink::from_config(config).await.unwrap();

    for i in 0..5 {
        sink.record(set_record(&format!("k{i}"))).await.unwrap();
    }

    let content = fs::read_to_string(&log_path).await.unwrap();
    assert_eq!(content.lines().count(), 5);
    assert!(fs::metadata(format!("{}.1", log_path.display())).await.is_err());
}

#[tokio::test]
async fn test_closed_sink_reports_sink_error() {
    let temp_dir = TempDir::new().unwrap();
    let sink = JsonLogSink::new(temp_dir.path().join("cache.jsonl"))
        .await
        .unwrap();
    sink.close().await;

    let err = sink.record(set_record("k")).await.unwrap_err();
    assert!(err.is_sink());
    assert!(matches!(err, Error::Sink { ref sink, .. } if sink == "json_log"));
}

#[test]
fn test_format_record_is_single_line() {
    let formatted = format_record(&set_record("product:7")).unwrap();
    assert!(!formatted.contains('\n'));
    let parsed: serde_json::Value = serde_json::from_str(&formatted).unwrap();
    assert_eq!(parsed["type"], "cache");
    assert_eq!(parsed["content"]["type"], "set");
}

#[test]
fn test_error_conversion() {
    let err: Error = JsonLogError::Closed.into();
    assert_eq!(
        err.to_string(),
        "sink 'json_log' failed to record entry: log writer is closed"
    );
}
