use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::classification::ClassificationPolicy;

/// Display modes of the topic list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TopicListView {
    All,
    #[default]
    HideInternal,
    HideInternalStream,
    HideStream,
}

impl TopicListView {
    pub const VALUES: [TopicListView; 4] = [
        TopicListView::All,
        TopicListView::HideInternal,
        TopicListView::HideInternalStream,
        TopicListView::HideStream,
    ];

    /// Whether a topic named `name` is shown in this view.
    pub fn passes(self, policy: &ClassificationPolicy, name: &str) -> bool {
        match self {
            TopicListView::All => true,
            TopicListView::HideStream => !policy.is_stream(name),
            TopicListView::HideInternal => !policy.is_internal(name),
            TopicListView::HideInternalStream => {
                !policy.is_internal(name) && !policy.is_stream(name)
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TopicListView::All => "ALL",
            TopicListView::HideInternal => "HIDE_INTERNAL",
            TopicListView::HideInternalStream => "HIDE_INTERNAL_STREAM",
            TopicListView::HideStream => "HIDE_STREAM",
        }
    }
}

impl fmt::Display for TopicListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TopicListView {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TopicListView::VALUES
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("Unknown topic list view '{}'", s))
    }
}
