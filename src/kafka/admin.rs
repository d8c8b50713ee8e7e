use async_trait::async_trait;
use rdkafka::admin::{NewTopic, ResourceSpecifier, TopicReplication};

use super::service::KafkaModule;
use crate::topic::source::ConfigSource;
use crate::topic::ConfigEntry;

impl KafkaModule {
    pub(crate) async fn create(
        &self,
        cluster: &str,
        name: &str,
        partitions: i32,
        replication_factor: i32,
        configs: &[ConfigEntry],
    ) -> anyhow::Result<()> {
        let c = self.cluster(cluster)?;
        let mut new_topic = NewTopic::new(name, partitions, TopicReplication::Fixed(replication_factor));
        for entry in configs {
            if let Some(value) = entry.value.as_deref() {
                new_topic = new_topic.set(&entry.name, value);
            }
        }

        let results = c.admin.create_topics(&[new_topic], &c.admin_options()).await?;
        for result in results {
            if let Err((topic, code)) = result {
                return Err(anyhow::anyhow!("Failed to create topic '{}': {}", topic, code));
            }
        }
        Ok(())
    }

    pub(crate) async fn delete(&self, cluster: &str, name: &str) -> anyhow::Result<()> {
        let c = self.cluster(cluster)?;
        let results = c.admin.delete_topics(&[name], &c.admin_options()).await?;
        for result in results {
            if let Err((topic, code)) = result {
                return Err(anyhow::anyhow!("Failed to delete topic '{}': {}", topic, code));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ConfigSource for KafkaModule {
    async fn find_by_topic(&self, cluster: &str, topic: &str) -> anyhow::Result<Vec<ConfigEntry>> {
        let c = self.cluster(cluster)?;
        let resources = c
            .admin
            .describe_configs(&[ResourceSpecifier::Topic(topic)], &c.admin_options())
            .await?;

        let mut out = Vec::new();
        for resource in resources {
            let resource = resource
                .map_err(|code| anyhow::anyhow!("Failed to describe configs of topic '{}': {}", topic, code))?;
            out.extend(resource.entries.into_iter().map(|e| ConfigEntry {
                name: e.name,
                value: e.value,
                read_only: e.is_read_only,
                default: e.is_default,
                sensitive: e.is_sensitive,
            }));
        }
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }
}
