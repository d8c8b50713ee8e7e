use regex::Regex;

use crate::config::TopicSettings;

/// Compile a configured pattern so that it only matches a whole topic name.
pub(crate) fn compile_full_match(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{pattern})$"))
}

/// Static internal/stream classification of topic names, built once at start-up.
#[derive(Debug, Clone)]
pub struct ClassificationPolicy {
    internal: Vec<Regex>,
    stream: Vec<Regex>,
}

impl ClassificationPolicy {
    /// Compile the configured pattern lists. A malformed pattern is a
    /// configuration error and aborts start-up.
    pub fn new(settings: &TopicSettings) -> anyhow::Result<Self> {
        Ok(Self {
            internal: compile_all("internal_regexps", &settings.internal_regexps)?,
            stream: compile_all("stream_regexps", &settings.stream_regexps)?,
        })
    }

    pub fn is_internal(&self, name: &str) -> bool {
        self.internal.iter().any(|r| r.is_match(name))
    }

    pub fn is_stream(&self, name: &str) -> bool {
        self.stream.iter().any(|r| r.is_match(name))
    }
}

fn compile_all(key: &str, patterns: &[String]) -> anyhow::Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            compile_full_match(p)
                .map_err(|e| anyhow::anyhow!("Invalid pattern '{}' in topic.{}: {}", p, key, e))
        })
        .collect()
}
