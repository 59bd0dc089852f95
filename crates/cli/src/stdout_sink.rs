use async_trait::async_trait;
use cachescope_core::{CacheRecord, Error, Result};
use cachescope_recorder::sink::json_log::format_record;
use cachescope_recorder::EntrySink;
use tokio::io::{AsyncWriteExt, Stdout};
use tokio::sync::Mutex;

/// Writes each record to stdout as one JSON line
pub struct StdoutSink {
    stdout: Mutex<Stdout>,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self {
            stdout: Mutex::new(tokio::io::stdout()),
        }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntrySink for StdoutSink {
    async fn record(&self, entry: CacheRecord) -> Result<()> {
        let mut line = format_record(&entry)?;
        line.push('\n');

        let mut stdout = self.stdout.lock().await;
        stdout
            .write_all(line.as_bytes())
            .await
            .map_err(|e| Error::sink(self.name(), e.to_string()))?;
        stdout
            .flush()
            .await
            .map_err(|e| Error::sink(self.name(), e.to_string()))
    }

    fn name(&self) -> &'static str {
        "stdout"
    }
}
