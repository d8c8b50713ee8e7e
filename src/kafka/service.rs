use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{debug, info};
use rdkafka::admin::{AdminClient, AdminOptions};
use rdkafka::client::DefaultClientContext;
use rdkafka::consumer::BaseConsumer;

use super::client::{create_admin, create_group_reader};
use super::types::KafkaConfig;
use crate::auth::GroupAttributeSource;
use crate::topic::source::Unavailable;
use crate::topic::Sources;

/// A connected cluster: its settings plus a shared admin client.
#[derive(Clone)]
pub(crate) struct Cluster {
    pub config: KafkaConfig,
    pub admin: Arc<AdminClient<DefaultClientContext>>,
    /// Offset readers by consumer group id, created on first use
    readers: Arc<Mutex<HashMap<String, Arc<BaseConsumer>>>>,
}

impl Cluster {
    pub fn timeout(&self) -> Duration {
        self.config.request_timeout()
    }

    pub fn admin_options(&self) -> AdminOptions {
        AdminOptions::new()
            .operation_timeout(Some(self.timeout()))
            .request_timeout(Some(self.timeout()))
    }

    /// Shared reader for the committed offsets of `group_id`.
    pub fn group_reader(&self, group_id: &str) -> anyhow::Result<Arc<BaseConsumer>> {
        let mut readers = self
            .readers
            .lock()
            .map_err(|_| anyhow::anyhow!("Offset reader cache is poisoned"))?;
        if let Some(reader) = readers.get(group_id) {
            return Ok(Arc::clone(reader));
        }
        let reader = Arc::new(create_group_reader(&self.config, group_id)?);
        debug!("Created offset reader for group '{}' on {}", group_id, self.config.broker);
        readers.insert(group_id.to_string(), Arc::clone(&reader));
        Ok(reader)
    }
}

/// rdkafka-backed access to every configured cluster.
pub struct KafkaModule {
    clusters: HashMap<String, Cluster>,
}

impl KafkaModule {
    /// Create one admin client per configured connection.
    pub fn new(connections: &HashMap<String, KafkaConfig>) -> anyhow::Result<Self> {
        let mut clusters = HashMap::with_capacity(connections.len());
        for (id, config) in connections {
            let admin = create_admin(config)
                .map_err(|e| anyhow::anyhow!("Failed to configure cluster '{}': {}", id, e))?;
            info!("Configured cluster '{}' ({})", id, config.broker);
            clusters.insert(
                id.clone(),
                Cluster {
                    config: config.clone(),
                    admin: Arc::new(admin),
                    readers: Arc::default(),
                },
            );
        }
        Ok(Self { clusters })
    }

    pub fn cluster_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.clusters.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub(crate) fn cluster(&self, id: &str) -> anyhow::Result<&Cluster> {
        self.clusters
            .get(id)
            .ok_or_else(|| anyhow::anyhow!("Unknown cluster '{}'", id))
    }

    /// Wire this module into the catalog. Log dirs and ACLs cannot be read
    /// through librdkafka and are reported empty.
    pub fn into_sources(self, groups: Arc<dyn GroupAttributeSource>) -> Sources {
        let module = Arc::new(self);
        Sources {
            admin: module.clone(),
            consumer_groups: module.clone(),
            log_dirs: Arc::new(Unavailable),
            configs: module,
            acls: Arc::new(Unavailable),
            groups,
        }
    }
}
