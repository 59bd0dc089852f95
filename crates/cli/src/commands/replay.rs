use crate::stdout_sink::StdoutSink;
use anyhow::{bail, Context};
use cachescope_core::{CacheEvent, EventEmitter, CORRELATION_ID_KEY};
use cachescope_recorder::{CacheWatcher, EntrySink, JsonLogSink, TracingSink, WatcherConfig};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::info;

/// Counts from one replay run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub events: u64,
    pub ignored: u64,
}

/// Where replayed records go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordTarget {
    /// JSON lines on stdout
    Stdout,
    /// JSON lines appended to a rotating file
    File(PathBuf),
    /// Structured `tracing` events, written by the log subscriber
    Log,
}

/// Open the sink for `target`; the file sink is also returned so it can be flushed
pub async fn open_sink(
    target: &RecordTarget,
) -> anyhow::Result<(Arc<dyn EntrySink>, Option<Arc<JsonLogSink>>)> {
    Ok(match target {
        RecordTarget::Stdout => (Arc::new(StdoutSink::new()) as Arc<dyn EntrySink>, None),
        RecordTarget::Log => (Arc::new(TracingSink::new()) as Arc<dyn EntrySink>, None),
        RecordTarget::File(path) => {
            let log_sink = Arc::new(
                JsonLogSink::new(path)
                    .await
                    .with_context(|| format!("Failed to open record log '{}'", path.display()))?,
            );
            (log_sink.clone() as Arc<dyn EntrySink>, Some(log_sink))
        }
    })
}

pub async fn execute(
    input: &str,
    target: RecordTarget,
    config: WatcherConfig,
    correlation_id: Option<String>,
) -> anyhow::Result<()> {
    let (sink, log_sink) = open_sink(&target).await?;

    let watcher = Arc::new(CacheWatcher::with_config(sink, &config)?);
    let emitter = EventEmitter::default();
    watcher.register(&emitter).await;

    if let Some(correlation_id) = correlation_id {
        let mut context = HashMap::new();
        context.insert(CORRELATION_ID_KEY.to_string(), correlation_id);
        emitter.set_correlation_context(context).await;
    }

    let summary = if input == "-" {
        replay_events(BufReader::new(tokio::io::stdin()), &emitter, &watcher).await?
    } else {
        let file = tokio::fs::File::open(input)
            .await
            .with_context(|| format!("Failed to open event file '{input}'"))?;
        replay_events(BufReader::new(file), &emitter, &watcher).await?
    };

    if let Some(log_sink) = log_sink {
        log_sink.flush().await?;
    }

    let stats = emitter.stats();
    info!(
        events = summary.events,
        ignored = summary.ignored,
        failed = stats.events_failed,
        "Replay finished"
    );

    if stats.events_failed > 0 {
        bail!(
            "{} of {} events could not be recorded",
            stats.events_failed,
            summary.events
        );
    }
    Ok(())
}

/// Emit every JSON-lines event from `reader`, skipping blank lines
pub async fn replay_events<R>(
    reader: R,
    emitter: &EventEmitter,
    watcher: &CacheWatcher,
) -> anyhow::Result<ReplaySummary>
where
    R: AsyncBufRead + Unpin,
{
    let mut summary = ReplaySummary::default();
    let mut lines = reader.lines();
    let mut line_number = 0usize;

    while let Some(line) = lines.next_line().await.context("Failed to read event stream")? {
        line_number += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event: CacheEvent = serde_json::from_str(line)
            .with_context(|| format!("Invalid cache event on line {line_number}"))?;

        summary.events += 1;
        if !watcher.is_enabled() || watcher.should_ignore(event.key()) {
            summary.ignored += 1;
        }
        emitter.emit(event).await;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cachescope_core::CacheRecordKind;
    use cachescope_recorder::MemorySink;

    const EVENTS: &str = r#"{"event":"hit","key":"user:42","value":"Alice"}

{"event":"missed","key":"illuminate:queue:restart"}
{"event":"written","key":"product:7","value":{"price":9.99},"expiration_minutes":null}
{"event":"forgotten","key":"session:abc"}
"#;

    async fn setup() -> (EventEmitter, Arc<CacheWatcher>, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let watcher = Arc::new(CacheWatcher::new(sink.clone()));
        let emitter = EventEmitter::default();
        watcher.register(&emitter).await;
        (emitter, watcher, sink)
    }

    #[tokio::test]
    async fn test_replay_records_events() {
        let (emitter, watcher, sink) = setup().await;

        let summary = replay_events(BufReader::new(EVENTS.as_bytes()), &emitter, &watcher)
            .await
            .unwrap();

        assert_eq!(summary, ReplaySummary { events: 4, ignored: 1 });
        let kinds: Vec<_> = sink.records().iter().map(|r| r.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                CacheRecordKind::Hit,
                CacheRecordKind::Set,
                CacheRecordKind::Forget
            ]
        );
    }

    #[tokio::test]
    async fn test_open_sink_selects_target() {
        let (sink, log_sink) = open_sink(&RecordTarget::Log).await.unwrap();
        assert_eq!(sink.name(), "tracing");
        assert!(log_sink.is_none());

        let (sink, _) = open_sink(&RecordTarget::Stdout).await.unwrap();
        assert_eq!(sink.name(), "stdout");

        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("records.jsonl");
        let (sink, log_sink) = open_sink(&RecordTarget::File(path.clone())).await.unwrap();
        assert_eq!(sink.name(), "json_log");
        assert!(log_sink.is_some());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_replay_reports_bad_line() {
        let (emitter, watcher, _sink) = setup().await;
        let input = "{\"event\":\"hit\",\"key\":\"a\",\"value\":1}\n{\"event\":\"exploded\"}\n";

        let err = replay_events(BufReader::new(input.as_bytes()), &emitter, &watcher)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
