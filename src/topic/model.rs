use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

/// Topic layout as reported by the admin client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicDescription {
    pub name: String,
    /// Flag set by the broker itself (e.g. `__consumer_offsets`)
    pub internal: bool,
    pub partitions: Vec<PartitionInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionInfo {
    pub id: i32,
    /// Broker id of the leader, `None` while the partition is leaderless
    pub leader: Option<i32>,
    pub replicas: Vec<i32>,
    pub isr: Vec<i32>,
}

/// First and last offset of one partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionOffsets {
    pub partition: i32,
    pub first_offset: i64,
    pub last_offset: i64,
}

/// Size of one partition replica on a broker's log directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogDir {
    pub broker: i32,
    pub path: String,
    pub topic: String,
    pub partition: i32,
    pub size: u64,
    pub offset_lag: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerGroup {
    pub id: String,
    pub state: String,
    pub members: usize,
    pub offsets: Vec<ConsumerGroupOffset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerGroupOffset {
    pub topic: String,
    pub partition: i32,
    pub offset: Option<i64>,
    pub lag: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControlEntry {
    pub principal: String,
    pub host: String,
    pub operation: String,
    pub permission_type: String,
    pub pattern_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub name: String,
    pub value: Option<String>,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub sensitive: bool,
}

impl ConfigEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            read_only: false,
            default: false,
            sensitive: false,
        }
    }
}

/// A replica of a partition on a broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionNode {
    pub id: i32,
    pub leader: bool,
    pub in_sync: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub id: i32,
    pub nodes: Vec<PartitionNode>,
    pub log_dirs: Vec<LogDir>,
    pub first_offset: i64,
    pub last_offset: i64,
}

impl Partition {
    fn assemble(info: &PartitionInfo, log_dirs: Vec<LogDir>, offsets: PartitionOffsets) -> Self {
        let nodes = info
            .replicas
            .iter()
            .map(|&id| PartitionNode {
                id,
                leader: info.leader == Some(id),
                in_sync: info.isr.contains(&id),
            })
            .collect();
        Self {
            id: info.id,
            nodes,
            log_dirs,
            first_offset: offsets.first_offset,
            last_offset: offsets.last_offset,
        }
    }

    pub fn leader(&self) -> Option<&PartitionNode> {
        self.nodes.iter().find(|n| n.leader)
    }

    pub fn size(&self) -> i64 {
        self.last_offset - self.first_offset
    }

    pub fn log_dir_size(&self) -> u64 {
        self.log_dirs.iter().map(|d| d.size).sum()
    }

    pub fn is_under_replicated(&self) -> bool {
        self.nodes.iter().any(|n| !n.in_sync)
    }
}

/// Aggregated view of a single topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    pub internal: bool,
    pub config_internal: bool,
    pub config_stream: bool,
    pub partitions: Vec<Partition>,
    pub consumer_groups: Vec<ConsumerGroup>,
    pub acls: Vec<AccessControlEntry>,
}

impl Topic {
    /// Attach per-partition log dirs and offsets to a described topic.
    ///
    /// Every described partition must have an offset entry.
    pub fn assemble(
        description: TopicDescription,
        consumer_groups: Vec<ConsumerGroup>,
        log_dirs: Vec<LogDir>,
        offsets: &[PartitionOffsets],
        acls: Vec<AccessControlEntry>,
        config_internal: bool,
        config_stream: bool,
    ) -> CatalogResult<Self> {
        let partitions = description
            .partitions
            .iter()
            .map(|info| -> CatalogResult<Partition> {
                let offset = offsets
                    .iter()
                    .find(|o| o.partition == info.id)
                    .copied()
                    .ok_or_else(|| CatalogError::InconsistentState {
                        topic: description.name.clone(),
                        partition: info.id,
                    })?;
                let dirs = log_dirs
                    .iter()
                    .filter(|d| d.partition == info.id)
                    .cloned()
                    .collect();
                Ok(Partition::assemble(info, dirs, offset))
            })
            .collect::<CatalogResult<Vec<_>>>()?;

        Ok(Self {
            name: description.name,
            internal: description.internal,
            config_internal,
            config_stream,
            partitions,
            consumer_groups,
            acls,
        })
    }

    pub fn is_internal(&self) -> bool {
        self.internal || self.config_internal
    }

    pub fn is_stream(&self) -> bool {
        self.config_stream
    }

    pub fn replica_count(&self) -> usize {
        self.distinct_nodes(|_| true)
    }

    pub fn in_sync_replica_count(&self) -> usize {
        self.distinct_nodes(|n| n.in_sync)
    }

    fn distinct_nodes(&self, keep: impl Fn(&PartitionNode) -> bool) -> usize {
        self.partitions
            .iter()
            .flat_map(|p| p.nodes.iter())
            .filter(|n| keep(*n))
            .map(|n| n.id)
            .collect::<BTreeSet<_>>()
            .len()
    }

    pub fn log_dirs(&self) -> Vec<&LogDir> {
        self.partitions.iter().flat_map(|p| p.log_dirs.iter()).collect()
    }

    /// Bytes on disk across all partitions, `None` when no log dir was reported.
    pub fn log_dir_size(&self) -> Option<u64> {
        if self.partitions.iter().all(|p| p.log_dirs.is_empty()) {
            return None;
        }
        Some(self.partitions.iter().map(Partition::log_dir_size).sum())
    }

    /// Number of records currently retained across all partitions.
    pub fn size(&self) -> i64 {
        self.partitions.iter().map(Partition::size).sum()
    }

    pub fn partition_size(&self, partition: i32) -> Option<i64> {
        self.partitions
            .iter()
            .find(|p| p.id == partition)
            .map(Partition::size)
    }
}
