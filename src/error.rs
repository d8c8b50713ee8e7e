/// Failures surfaced by the topic catalog to its callers.
///
/// A topic hidden by the caller's topic filter and a topic the cluster does
/// not know about are both reported as `NotFound`.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Topic '{topic}' doesn't exist")]
    NotFound { topic: String },
    /// A collaborator broke its contract, e.g. a described partition came
    /// back without offsets.
    #[error("Partition offsets '{partition}' doesn't exist for topic {topic}")]
    InconsistentState { topic: String, partition: i32 },
    /// The Kafka client (or another collaborator) call itself failed.
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

impl CatalogError {
    pub(crate) fn not_found(topic: &str) -> Self {
        CatalogError::NotFound { topic: topic.to_string() }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
