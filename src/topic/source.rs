//! Interfaces of the collaborators the topic catalog pulls its data from.

use std::collections::HashMap;

use async_trait::async_trait;

use super::model::{
    AccessControlEntry, ConfigEntry, ConsumerGroup, LogDir, PartitionOffsets, TopicDescription,
};

#[async_trait]
pub trait KafkaAdmin: Send + Sync {
    /// Names of all topics of the cluster, in no particular order.
    async fn list_topics(&self, cluster: &str) -> anyhow::Result<Vec<String>>;

    /// Topics unknown to the cluster are absent from the returned map.
    async fn describe_topics(
        &self,
        cluster: &str,
        names: &[String],
    ) -> anyhow::Result<HashMap<String, TopicDescription>>;

    async fn describe_offsets(
        &self,
        cluster: &str,
        names: &[String],
    ) -> anyhow::Result<HashMap<String, Vec<PartitionOffsets>>>;

    async fn create_topic(
        &self,
        cluster: &str,
        name: &str,
        partitions: i32,
        replication_factor: i32,
        configs: &[ConfigEntry],
    ) -> anyhow::Result<()>;

    async fn delete_topic(&self, cluster: &str, name: &str) -> anyhow::Result<()>;
}

#[async_trait]
pub trait ConsumerGroupSource: Send + Sync {
    async fn find_by_topic(&self, cluster: &str, topic: &str) -> anyhow::Result<Vec<ConsumerGroup>>;
}

#[async_trait]
pub trait LogDirSource: Send + Sync {
    async fn find_by_topic(&self, cluster: &str, topic: &str) -> anyhow::Result<Vec<LogDir>>;
}

#[async_trait]
pub trait ConfigSource: Send + Sync {
    async fn find_by_topic(&self, cluster: &str, topic: &str) -> anyhow::Result<Vec<ConfigEntry>>;
}

#[async_trait]
pub trait AclSource: Send + Sync {
    async fn find_by_topic(
        &self,
        cluster: &str,
        topic: &str,
    ) -> anyhow::Result<Vec<AccessControlEntry>>;
}

/// Stand-in for data the connected client cannot report. Always empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

#[async_trait]
impl LogDirSource for Unavailable {
    async fn find_by_topic(&self, _cluster: &str, _topic: &str) -> anyhow::Result<Vec<LogDir>> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl AclSource for Unavailable {
    async fn find_by_topic(
        &self,
        _cluster: &str,
        _topic: &str,
    ) -> anyhow::Result<Vec<AccessControlEntry>> {
        Ok(Vec::new())
    }
}
