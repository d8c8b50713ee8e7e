use std::collections::HashMap;

use async_trait::async_trait;
use log::{debug, warn};
use rdkafka::consumer::Consumer;
use rdkafka::topic_partition_list::TopicPartitionList;
use rdkafka::Offset;

use super::service::KafkaModule;
use crate::topic::source::ConsumerGroupSource;
use crate::topic::{ConsumerGroup, ConsumerGroupOffset};

const CONSUMER_PROTOCOL: &str = "consumer";

#[async_trait]
impl ConsumerGroupSource for KafkaModule {
    /// Consumer groups holding a committed offset on at least one partition of `topic`.
    /// Offset readers are reused across calls, one per group and cluster.
    async fn find_by_topic(&self, cluster: &str, topic: &str) -> anyhow::Result<Vec<ConsumerGroup>> {
        let c = self.cluster(cluster)?.clone();
        let topic = topic.to_string();
        tokio::task::spawn_blocking(move || -> anyhow::Result<Vec<ConsumerGroup>> {
            let client = c.admin.inner();
            let md = client.fetch_metadata(None, c.timeout())?;
            let Some(t) = md.topics().iter().find(|t| t.name() == topic) else {
                return Ok(Vec::new());
            };

            let mut high_watermarks = HashMap::new();
            let mut tpl = TopicPartitionList::new();
            for p in t.partitions() {
                let (_low, high) = client.fetch_watermarks(&topic, p.id(), c.timeout())?;
                high_watermarks.insert(p.id(), high);
                tpl.add_partition(&topic, p.id());
            }

            let groups = client.fetch_group_list(None, c.timeout())?;
            let mut out = Vec::new();
            for g in groups.groups().iter().filter(|g| g.protocol_type() == CONSUMER_PROTOCOL) {
                let reader = c.group_reader(g.name())?;
                let committed = match reader.committed_offsets(tpl.clone(), c.timeout()) {
                    Ok(committed) => committed,
                    Err(e) => {
                        warn!("Skipping group '{}': cannot read committed offsets: {}", g.name(), e);
                        continue;
                    }
                };
                let offsets: Vec<ConsumerGroupOffset> = committed
                    .elements()
                    .iter()
                    .filter_map(|e| match e.offset() {
                        Offset::Offset(o) => Some(ConsumerGroupOffset {
                            topic: topic.clone(),
                            partition: e.partition(),
                            offset: Some(o),
                            lag: high_watermarks.get(&e.partition()).map(|h| (h - o).max(0)),
                        }),
                        _ => None,
                    })
                    .collect();
                if offsets.is_empty() {
                    continue;
                }
                out.push(ConsumerGroup {
                    id: g.name().to_string(),
                    state: g.state().to_string(),
                    members: g.members().len(),
                    offsets,
                });
            }
            debug!("Found {} consumer group(s) for topic '{}'", out.len(), topic);
            out.sort_by(|a, b| a.id.cmp(&b.id));
            Ok(out)
        })
        .await?
    }
}
