use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Attribute key carrying the topic allow-list of a principal or group.
pub const TOPICS_FILTER_REGEXP: &str = "topics-filter-regexp";

/// Value of a single authentication attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    List(Vec<String>),
}

impl AttributeValue {
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AttributeValue::List(items) => Some(items),
            AttributeValue::Text(_) => None,
        }
    }
}

pub type AttributeMap = HashMap<String, AttributeValue>;

/// List entries stored under `key`, or nothing when the key is absent or
/// holds a plain text value.
pub fn list_attribute<'a>(attributes: &'a AttributeMap, key: &str) -> &'a [String] {
    attributes
        .get(key)
        .and_then(AttributeValue::as_list)
        .unwrap_or(&[])
}

/// The authenticated caller of a request, as handed over by the
/// authentication layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub name: String,
    #[serde(default)]
    pub attributes: AttributeMap,
}

impl Principal {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), attributes: AttributeMap::new() }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Shortcut for a principal restricted to the given topic patterns.
    pub fn with_topic_filters<I, S>(self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = patterns.into_iter().map(Into::into).collect();
        self.with_attribute(TOPICS_FILTER_REGEXP, AttributeValue::List(list))
    }
}

/// Merge attribute maps in order. List values are concatenated without
/// duplicates (first occurrence wins); text values keep the first one seen.
/// A list always takes precedence over text under the same key.
pub fn merge_attributes<'a, I>(maps: I) -> AttributeMap
where
    I: IntoIterator<Item = &'a AttributeMap>,
{
    let mut merged = AttributeMap::new();
    for map in maps {
        // sorted so that merging stays deterministic across HashMap orders
        let mut keys: Vec<&String> = map.keys().collect();
        keys.sort();
        for key in keys {
            let value = &map[key];
            match merged.get_mut(key) {
                None => {
                    merged.insert(key.clone(), value.clone());
                }
                Some(AttributeValue::List(existing)) => {
                    for item in value.as_list().unwrap_or(&[]) {
                        if !existing.contains(item) {
                            existing.push(item.clone());
                        }
                    }
                }
                Some(existing @ AttributeValue::Text(_)) => {
                    if let AttributeValue::List(items) = value {
                        *existing = AttributeValue::List(items.clone());
                    }
                }
            }
        }
    }
    merged
}
