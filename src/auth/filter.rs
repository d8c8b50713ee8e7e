use log::{debug, warn};
use regex::Regex;

use super::attributes::{list_attribute, Principal, TOPICS_FILTER_REGEXP};
use super::groups::GroupAttributeSource;
use crate::topic::classification::compile_full_match;

#[derive(Debug, Clone)]
struct TopicPattern {
    source: String,
    // None when the pattern failed to compile; such an entry never matches
    regex: Option<Regex>,
}

/// Topic-name allow-list resolved for one request.
///
/// An empty filter places no restriction. A non-empty one admits a topic
/// when its name fully matches any of the patterns, so every source that
/// contributes patterns widens what the caller can see.
#[derive(Debug, Clone, Default)]
pub struct TopicFilter {
    patterns: Vec<TopicPattern>,
}

impl TopicFilter {
    /// A filter that lets every topic through.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let source: String = p.into();
                let regex = match compile_full_match(&source) {
                    Ok(r) => Some(r),
                    Err(e) => {
                        warn!("Ignoring invalid {} pattern '{}': {}", TOPICS_FILTER_REGEXP, source, e);
                        None
                    }
                };
                TopicPattern { source, regex }
            })
            .collect();
        Self { patterns }
    }

    /// Collect the patterns of the principal (if any), followed by those of
    /// the default groups.
    pub fn resolve(
        principal: Option<&Principal>,
        default_groups: &[String],
        groups: &dyn GroupAttributeSource,
    ) -> Self {
        let mut sources: Vec<String> = Vec::new();
        if let Some(p) = principal {
            sources.extend_from_slice(list_attribute(&p.attributes, TOPICS_FILTER_REGEXP));
        }
        let group_attributes = groups.attributes(default_groups);
        sources.extend_from_slice(list_attribute(&group_attributes, TOPICS_FILTER_REGEXP));

        debug!(
            "Resolved {} topic filter pattern(s) for {}",
            sources.len(),
            principal.map(|p| p.name.as_str()).unwrap_or("anonymous")
        );
        Self::from_patterns(sources)
    }

    pub fn is_unrestricted(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn allows(&self, name: &str) -> bool {
        self.is_unrestricted()
            || self
                .patterns
                .iter()
                .any(|p| p.regex.as_ref().is_some_and(|r| r.is_match(name)))
    }

    /// The patterns in resolution order, as they were supplied.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.source.as_str())
    }
}
