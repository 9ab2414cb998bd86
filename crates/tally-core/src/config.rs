use serde::Deserialize;

/// Top-level queue configuration, deserializable from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    pub store: StoreConfig,
    pub worker: WorkerConfig,
}

/// Backing store location.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: String,
}

/// Worker thread tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Capacity of the producer command channel. Producers block once it
    /// fills, which is the intended back-pressure during a long drain.
    pub command_channel_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: "data/tally".to_string(),
        }
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            command_channel_capacity: 1024,
        }
    }
}
