use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::auth::AttributeMap;
use crate::kafka::KafkaConfig;

/// Application configuration, loaded once at start-up and never mutated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Cluster id -> connection settings
    pub connections: HashMap<String, KafkaConfig>,
    pub topic: TopicSettings,
    pub security: SecuritySettings,
}

impl AppConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
        Self::from_json(&raw)
            .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Topic classification and listing options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicSettings {
    #[serde(rename = "internal_regexps", alias = "internalRegexps")]
    pub internal_regexps: Vec<String>,
    #[serde(rename = "stream_regexps", alias = "streamRegexps")]
    pub stream_regexps: Vec<String>,
    /// Skip the (costly) consumer group lookup when assembling topic details
    #[serde(rename = "skip_consumer_groups", alias = "skipConsumerGroups")]
    pub skip_consumer_groups: bool,
}

impl Default for TopicSettings {
    fn default() -> Self {
        Self {
            internal_regexps: vec!["^_.*$".into()],
            stream_regexps: vec![
                "^.*-changelog$".into(),
                "^.*-repartition$".into(),
                "^.*-rekey$".into(),
            ],
            skip_consumer_groups: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SecuritySettings {
    /// Groups whose attributes apply to every request, authenticated or not
    #[serde(rename = "default_groups", alias = "defaultGroups")]
    pub default_groups: Vec<String>,
    pub groups: HashMap<String, GroupSettings>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupSettings {
    pub attributes: AttributeMap,
}
