use cachescope_recorder::WatcherConfig;

/// Classification of a key under the current configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStatus {
    Ignored,
    Recorded,
    RecordedHidden,
}

impl KeyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyStatus::Ignored => "ignored",
            KeyStatus::Recorded => "recorded",
            KeyStatus::RecordedHidden => "recorded (value hidden)",
        }
    }
}

pub fn classify(config: &WatcherConfig, keys: &[String]) -> anyhow::Result<Vec<KeyStatus>> {
    let ignore = config.ignore_filter()?;
    let hidden = config.hidden_patterns()?;

    Ok(keys
        .iter()
        .map(|key| {
            if !config.enabled || ignore.should_ignore(key) {
                KeyStatus::Ignored
            } else if hidden.is_match(key) {
                KeyStatus::RecordedHidden
            } else {
                KeyStatus::Recorded
            }
        })
        .collect())
}

pub fn execute(config: &WatcherConfig, keys: &[String]) -> anyhow::Result<()> {
    for (key, status) in keys.iter().zip(classify(config, keys)?) {
        println!("{key}\t{}", status.as_str());
    }
    Ok(())
}
