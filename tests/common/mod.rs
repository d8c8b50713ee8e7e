#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use rktopics::auth::{AttributeMap, AttributeValue, ConfiguredGroups, TOPICS_FILTER_REGEXP};
use rktopics::config::{GroupSettings, SecuritySettings, TopicSettings};
use rktopics::topic::source::{AclSource, ConfigSource, ConsumerGroupSource, KafkaAdmin, LogDirSource};
use rktopics::topic::{
    AccessControlEntry, ConfigEntry, ConsumerGroup, LogDir, PartitionInfo, PartitionOffsets, Sources,
    TopicCatalog, TopicDescription,
};

pub const CLUSTER: &str = "local";

#[derive(Debug, Clone)]
pub struct FakeTopic {
    pub description: TopicDescription,
    pub offsets: Vec<PartitionOffsets>,
    pub log_dirs: Vec<LogDir>,
    pub configs: Vec<ConfigEntry>,
    pub consumer_groups: Vec<ConsumerGroup>,
    pub acls: Vec<AccessControlEntry>,
}

impl FakeTopic {
    /// One partition led by broker 1 holding ten records.
    pub fn simple(name: &str) -> Self {
        Self {
            description: TopicDescription {
                name: name.to_string(),
                internal: false,
                partitions: vec![PartitionInfo { id: 0, leader: Some(1), replicas: vec![1], isr: vec![1] }],
            },
            offsets: vec![PartitionOffsets { partition: 0, first_offset: 0, last_offset: 10 }],
            log_dirs: Vec::new(),
            configs: Vec::new(),
            consumer_groups: Vec::new(),
            acls: Vec::new(),
        }
    }
}

/// In-memory cluster implementing every collaborator of the catalog.
#[derive(Default)]
pub struct FakeCluster {
    pub topics: Mutex<BTreeMap<String, FakeTopic>>,
    /// Topics whose log dir lookup fails
    pub broken: HashSet<String>,
    pub consumer_group_calls: Mutex<usize>,
}

impl FakeCluster {
    pub fn with_topics(names: &[&str]) -> Self {
        let cluster = Self::default();
        for name in names {
            cluster.insert(FakeTopic::simple(name));
        }
        cluster
    }

    pub fn insert(&self, topic: FakeTopic) {
        self.topics
            .lock()
            .unwrap()
            .insert(topic.description.name.clone(), topic);
    }

    fn topic(&self, cluster: &str, name: &str) -> anyhow::Result<Option<FakeTopic>> {
        check_cluster(cluster)?;
        Ok(self.topics.lock().unwrap().get(name).cloned())
    }
}

fn check_cluster(cluster: &str) -> anyhow::Result<()> {
    if cluster == CLUSTER {
        Ok(())
    } else {
        Err(anyhow::anyhow!("Unknown cluster '{}'", cluster))
    }
}

#[async_trait]
impl KafkaAdmin for FakeCluster {
    async fn list_topics(&self, cluster: &str) -> anyhow::Result<Vec<String>> {
        check_cluster(cluster)?;
        // reversed so callers cannot rely on upstream ordering
        Ok(self.topics.lock().unwrap().keys().rev().cloned().collect())
    }

    async fn describe_topics(
        &self,
        cluster: &str,
        names: &[String],
    ) -> anyhow::Result<HashMap<String, TopicDescription>> {
        check_cluster(cluster)?;
        let topics = self.topics.lock().unwrap();
        Ok(names
            .iter()
            .filter_map(|n| topics.get(n).map(|t| (n.clone(), t.description.clone())))
            .collect())
    }

    async fn describe_offsets(
        &self,
        cluster: &str,
        names: &[String],
    ) -> anyhow::Result<HashMap<String, Vec<PartitionOffsets>>> {
        check_cluster(cluster)?;
        let topics = self.topics.lock().unwrap();
        Ok(names
            .iter()
            .filter_map(|n| topics.get(n).map(|t| (n.clone(), t.offsets.clone())))
            .collect())
    }

    async fn create_topic(
        &self,
        cluster: &str,
        name: &str,
        partitions: i32,
        replication_factor: i32,
        configs: &[ConfigEntry],
    ) -> anyhow::Result<()> {
        check_cluster(cluster)?;
        if self.topics.lock().unwrap().contains_key(name) {
            return Err(anyhow::anyhow!("Topic '{}' already exists", name));
        }
        let replicas: Vec<i32> = (1..=replication_factor).collect();
        let mut topic = FakeTopic::simple(name);
        topic.description.partitions = (0..partitions)
            .map(|id| PartitionInfo { id, leader: Some(1), replicas: replicas.clone(), isr: replicas.clone() })
            .collect();
        topic.offsets = (0..partitions)
            .map(|id| PartitionOffsets { partition: id, first_offset: 0, last_offset: 0 })
            .collect();
        topic.configs = configs.to_vec();
        self.insert(topic);
        Ok(())
    }

    async fn delete_topic(&self, cluster: &str, name: &str) -> anyhow::Result<()> {
        check_cluster(cluster)?;
        self.topics
            .lock()
            .unwrap()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| anyhow::anyhow!("Topic '{}' does not exist", name))
    }
}

#[async_trait]
impl ConsumerGroupSource for FakeCluster {
    async fn find_by_topic(&self, cluster: &str, topic: &str) -> anyhow::Result<Vec<ConsumerGroup>> {
        *self.consumer_group_calls.lock().unwrap() += 1;
        Ok(self.topic(cluster, topic)?.map(|t| t.consumer_groups).unwrap_or_default())
    }
}

#[async_trait]
impl LogDirSource for FakeCluster {
    async fn find_by_topic(&self, cluster: &str, topic: &str) -> anyhow::Result<Vec<LogDir>> {
        if self.broken.contains(topic) {
            return Err(anyhow::anyhow!("log dirs unavailable for '{}'", topic));
        }
        Ok(self.topic(cluster, topic)?.map(|t| t.log_dirs).unwrap_or_default())
    }
}

#[async_trait]
impl ConfigSource for FakeCluster {
    async fn find_by_topic(&self, cluster: &str, topic: &str) -> anyhow::Result<Vec<ConfigEntry>> {
        Ok(self.topic(cluster, topic)?.map(|t| t.configs).unwrap_or_default())
    }
}

#[async_trait]
impl AclSource for FakeCluster {
    async fn find_by_topic(&self, cluster: &str, topic: &str) -> anyhow::Result<Vec<AccessControlEntry>> {
        Ok(self.topic(cluster, topic)?.map(|t| t.acls).unwrap_or_default())
    }
}

pub fn filter_attributes(patterns: &[&str]) -> AttributeMap {
    let mut attributes = AttributeMap::new();
    attributes.insert(
        TOPICS_FILTER_REGEXP.to_string(),
        AttributeValue::List(patterns.iter().map(|p| p.to_string()).collect()),
    );
    attributes
}

/// Security settings with a single default group restricted to `patterns`.
pub fn default_group_filters(patterns: &[&str]) -> SecuritySettings {
    let mut security = SecuritySettings::default();
    security.default_groups = vec!["reader".to_string()];
    security
        .groups
        .insert("reader".to_string(), GroupSettings { attributes: filter_attributes(patterns) });
    security
}

pub fn catalog_with(
    cluster: Arc<FakeCluster>,
    settings: &TopicSettings,
    security: &SecuritySettings,
) -> TopicCatalog {
    let sources = Sources {
        admin: cluster.clone(),
        consumer_groups: cluster.clone(),
        log_dirs: cluster.clone(),
        configs: cluster.clone(),
        acls: cluster,
        groups: Arc::new(ConfiguredGroups::new(&security.groups)),
    };
    TopicCatalog::new(settings, security, sources).expect("valid settings")
}

pub fn catalog(cluster: Arc<FakeCluster>) -> TopicCatalog {
    catalog_with(cluster, &TopicSettings::default(), &SecuritySettings::default())
}
