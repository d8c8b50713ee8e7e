use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use log::debug;
use rdkafka::error::RDKafkaErrorCode;
use rdkafka::metadata::MetadataTopic;

use super::service::KafkaModule;
use crate::topic::source::KafkaAdmin;
use crate::topic::{ConfigEntry, PartitionInfo, PartitionOffsets, TopicDescription};

/// Topics the brokers manage for their own coordination.
const BROKER_INTERNAL_TOPICS: [&str; 2] = ["__consumer_offsets", "__transaction_state"];

fn describe(topic: &MetadataTopic) -> TopicDescription {
    let partitions = topic
        .partitions()
        .iter()
        .map(|p| PartitionInfo {
            id: p.id(),
            leader: (p.leader() >= 0).then_some(p.leader()),
            replicas: p.replicas().to_vec(),
            isr: p.isr().to_vec(),
        })
        .collect();
    TopicDescription {
        name: topic.name().to_string(),
        internal: BROKER_INTERNAL_TOPICS.contains(&topic.name()),
        partitions,
    }
}

/// Metadata errors other than "unknown topic" are failures of the lookup.
fn check_topic(topic: &MetadataTopic) -> anyhow::Result<bool> {
    match topic.error() {
        None => Ok(true),
        Some(err) => {
            let code = RDKafkaErrorCode::from(err);
            if code == RDKafkaErrorCode::UnknownTopicOrPartition {
                Ok(false)
            } else {
                Err(anyhow::anyhow!("Metadata error for topic '{}': {}", topic.name(), code))
            }
        }
    }
}

#[async_trait]
impl KafkaAdmin for KafkaModule {
    async fn list_topics(&self, cluster: &str) -> anyhow::Result<Vec<String>> {
        let c = self.cluster(cluster)?.clone();
        tokio::task::spawn_blocking(move || -> anyhow::Result<Vec<String>> {
            let md = c.admin.inner().fetch_metadata(None, c.timeout())?;
            Ok(md.topics().iter().map(|t| t.name().to_string()).collect())
        })
        .await?
    }

    async fn describe_topics(
        &self,
        cluster: &str,
        names: &[String],
    ) -> anyhow::Result<HashMap<String, TopicDescription>> {
        let c = self.cluster(cluster)?.clone();
        let wanted: HashSet<String> = names.iter().cloned().collect();
        tokio::task::spawn_blocking(move || -> anyhow::Result<HashMap<String, TopicDescription>> {
            // Full metadata: a per-topic request could auto-create the topic
            let md = c.admin.inner().fetch_metadata(None, c.timeout())?;
            let mut out = HashMap::new();
            for t in md.topics().iter().filter(|t| wanted.contains(t.name())) {
                if check_topic(t)? {
                    out.insert(t.name().to_string(), describe(t));
                }
            }
            debug!("Described {} of {} requested topic(s)", out.len(), wanted.len());
            Ok(out)
        })
        .await?
    }

    async fn describe_offsets(
        &self,
        cluster: &str,
        names: &[String],
    ) -> anyhow::Result<HashMap<String, Vec<PartitionOffsets>>> {
        let c = self.cluster(cluster)?.clone();
        let wanted: HashSet<String> = names.iter().cloned().collect();
        tokio::task::spawn_blocking(move || -> anyhow::Result<HashMap<String, Vec<PartitionOffsets>>> {
            let client = c.admin.inner();
            let md = client.fetch_metadata(None, c.timeout())?;
            let mut out = HashMap::new();
            for t in md.topics().iter().filter(|t| wanted.contains(t.name())) {
                if !check_topic(t)? {
                    continue;
                }
                let mut offsets = Vec::with_capacity(t.partitions().len());
                for p in t.partitions() {
                    let (low, high) = client.fetch_watermarks(t.name(), p.id(), c.timeout())?;
                    offsets.push(PartitionOffsets { partition: p.id(), first_offset: low, last_offset: high });
                }
                out.insert(t.name().to_string(), offsets);
            }
            Ok(out)
        })
        .await?
    }

    async fn create_topic(
        &self,
        cluster: &str,
        name: &str,
        partitions: i32,
        replication_factor: i32,
        configs: &[ConfigEntry],
    ) -> anyhow::Result<()> {
        self.create(cluster, name, partitions, replication_factor, configs).await
    }

    async fn delete_topic(&self, cluster: &str, name: &str) -> anyhow::Result<()> {
        self.delete(cluster, name).await
    }
}
