use std::sync::Arc;

use log::{debug, info, warn};
use tokio::task::JoinHandle;

use super::classification::ClassificationPolicy;
use super::model::{ConfigEntry, PartitionOffsets, Topic, TopicDescription};
use super::source::{AclSource, ConfigSource, ConsumerGroupSource, KafkaAdmin, LogDirSource};
use super::view::TopicListView;
use crate::auth::{GroupAttributeSource, Principal, TopicFilter};
use crate::config::{SecuritySettings, TopicSettings};
use crate::error::{CatalogError, CatalogResult};

const CLEANUP_POLICY: &str = "cleanup.policy";
const CLEANUP_POLICY_COMPACT: &str = "compact";

/// Everything the catalog reads from. Cheap to clone.
#[derive(Clone)]
pub struct Sources {
    pub admin: Arc<dyn KafkaAdmin>,
    pub consumer_groups: Arc<dyn ConsumerGroupSource>,
    pub log_dirs: Arc<dyn LogDirSource>,
    pub configs: Arc<dyn ConfigSource>,
    pub acls: Arc<dyn AclSource>,
    pub groups: Arc<dyn GroupAttributeSource>,
}

/// Lists, describes, creates and deletes topics on behalf of a caller.
///
/// The catalog holds no per-request state: the caller's principal is passed to
/// every operation and its topic filter is resolved on the spot.
#[derive(Clone)]
pub struct TopicCatalog {
    policy: Arc<ClassificationPolicy>,
    default_groups: Arc<[String]>,
    skip_consumer_groups: bool,
    sources: Sources,
}

impl TopicCatalog {
    pub fn new(
        settings: &TopicSettings,
        security: &SecuritySettings,
        sources: Sources,
    ) -> anyhow::Result<Self> {
        for id in &security.default_groups {
            if !sources.groups.contains(id) {
                warn!("Default group '{}' is not declared in security.groups; ignoring", id);
            }
        }
        Ok(Self {
            policy: Arc::new(ClassificationPolicy::new(settings)?),
            default_groups: security.default_groups.clone().into(),
            skip_consumer_groups: settings.skip_consumer_groups,
            sources,
        })
    }

    pub fn policy(&self) -> &ClassificationPolicy {
        &self.policy
    }

    /// Topic patterns the principal is allowed to see.
    pub fn topic_filter(&self, principal: Option<&Principal>) -> TopicFilter {
        TopicFilter::resolve(principal, &self.default_groups, self.sources.groups.as_ref())
    }

    /// Names of the visible topics, sorted case-insensitively.
    pub async fn list_names(
        &self,
        cluster: &str,
        view: TopicListView,
        search: Option<&str>,
        principal: Option<&Principal>,
    ) -> CatalogResult<Vec<String>> {
        let filter = self.topic_filter(principal);
        self.list_names_with(cluster, view, search, &filter).await
    }

    async fn list_names_with(
        &self,
        cluster: &str,
        view: TopicListView,
        search: Option<&str>,
        filter: &TopicFilter,
    ) -> CatalogResult<Vec<String>> {
        let all = self.sources.admin.list_topics(cluster).await?;
        let total = all.len();

        let mut names: Vec<String> = all
            .into_iter()
            .filter(|name| search.map_or(true, |s| name.contains(s)))
            .filter(|name| view.passes(&self.policy, name))
            .filter(|name| filter.allows(name))
            .collect();
        names.sort_by_cached_key(|n| (n.to_lowercase(), n.clone()));

        debug!(
            "Listed {} of {} topic(s) on cluster '{}' (view {}, search {:?})",
            names.len(),
            total,
            cluster,
            view,
            search
        );
        Ok(names)
    }

    /// Start one detail fetch per visible topic.
    ///
    /// The fetches run concurrently and independently: a failing topic does
    /// not cancel the others and completion order is unspecified.
    pub async fn list_details(
        &self,
        cluster: &str,
        view: TopicListView,
        search: Option<&str>,
        principal: Option<&Principal>,
    ) -> CatalogResult<Vec<PendingTopic>> {
        let filter = Arc::new(self.topic_filter(principal));
        let names = self.list_names_with(cluster, view, search, &filter).await?;

        Ok(names
            .into_iter()
            .map(|name| {
                let catalog = self.clone();
                let filter = Arc::clone(&filter);
                let cluster = cluster.to_string();
                let topic = name.clone();
                let handle = tokio::spawn(async move {
                    catalog.find_by_name_with(&cluster, &topic, &filter).await
                });
                PendingTopic { name, handle }
            })
            .collect())
    }

    /// Describe a single topic. Topics hidden from the principal are reported
    /// exactly like topics that do not exist.
    pub async fn find_by_name(
        &self,
        cluster: &str,
        name: &str,
        principal: Option<&Principal>,
    ) -> CatalogResult<Topic> {
        let filter = self.topic_filter(principal);
        self.find_by_name_with(cluster, name, &filter).await
    }

    async fn find_by_name_with(
        &self,
        cluster: &str,
        name: &str,
        filter: &TopicFilter,
    ) -> CatalogResult<Topic> {
        let found = if filter.allows(name) {
            self.find_by_names(cluster, &[name.to_string()], filter)
                .await?
                .into_iter()
                .next()
        } else {
            None
        };
        found.ok_or_else(|| CatalogError::not_found(name))
    }

    /// Describe the given topics, dropping the ones the filter hides or the
    /// cluster does not know. Results are ordered by name.
    pub(crate) async fn find_by_names(
        &self,
        cluster: &str,
        names: &[String],
        filter: &TopicFilter,
    ) -> CatalogResult<Vec<Topic>> {
        let admin = &self.sources.admin;
        let descriptions = admin.describe_topics(cluster, names).await?;
        let mut offsets = admin.describe_offsets(cluster, names).await?;

        let mut described: Vec<TopicDescription> = descriptions
            .into_values()
            .filter(|d| filter.allows(&d.name))
            .collect();
        described.sort_by(|a, b| a.name.cmp(&b.name));

        let mut topics = Vec::with_capacity(described.len());
        for description in described {
            let topic_offsets = offsets.remove(&description.name).unwrap_or_default();
            topics.push(self.assemble(cluster, description, &topic_offsets).await?);
        }
        Ok(topics)
    }

    async fn assemble(
        &self,
        cluster: &str,
        description: TopicDescription,
        offsets: &[PartitionOffsets],
    ) -> CatalogResult<Topic> {
        let name = description.name.clone();
        let consumer_groups = if self.skip_consumer_groups {
            Vec::new()
        } else {
            self.sources.consumer_groups.find_by_topic(cluster, &name).await?
        };
        let log_dirs = self.sources.log_dirs.find_by_topic(cluster, &name).await?;
        let acls = self.sources.acls.find_by_topic(cluster, &name).await?;

        Topic::assemble(
            description,
            consumer_groups,
            log_dirs,
            offsets,
            acls,
            self.policy.is_internal(&name),
            self.policy.is_stream(&name),
        )
    }

    pub async fn create(
        &self,
        cluster: &str,
        name: &str,
        partitions: i32,
        replication_factor: i32,
        configs: &[ConfigEntry],
    ) -> CatalogResult<()> {
        self.sources
            .admin
            .create_topic(cluster, name, partitions, replication_factor, configs)
            .await?;
        info!(
            "Created topic '{}' on cluster '{}' ({} partitions, replication {})",
            name, cluster, partitions, replication_factor
        );
        Ok(())
    }

    /// Delete a topic. A topic hidden from the principal is `NotFound`.
    pub async fn delete(
        &self,
        cluster: &str,
        name: &str,
        principal: Option<&Principal>,
    ) -> CatalogResult<()> {
        if !self.topic_filter(principal).allows(name) {
            return Err(CatalogError::not_found(name));
        }
        self.sources.admin.delete_topic(cluster, name).await?;
        info!("Deleted topic '{}' on cluster '{}'", name, cluster);
        Ok(())
    }

    /// Records can only be deleted from non-internal, compacted topics.
    pub async fn can_delete_records(&self, cluster: &str, topic: &Topic) -> CatalogResult<bool> {
        if topic.is_internal() {
            return Ok(false);
        }
        let configs = self.sources.configs.find_by_topic(cluster, &topic.name).await?;
        Ok(configs.iter().any(|c| {
            c.name == CLEANUP_POLICY
                && c.value.as_deref().is_some_and(|v| v.contains(CLEANUP_POLICY_COMPACT))
        }))
    }
}

/// Detail fetch of one listed topic, running in the background.
pub struct PendingTopic {
    name: String,
    handle: JoinHandle<CatalogResult<Topic>>,
}

impl PendingTopic {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn wait(self) -> CatalogResult<Topic> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(CatalogError::Upstream(anyhow::anyhow!(
                "Detail fetch for topic '{}' did not complete: {}",
                self.name,
                e
            ))),
        }
    }
}

/// Await a batch of detail fetches, keeping the listing order.
pub async fn join_details(pending: Vec<PendingTopic>) -> Vec<(String, CatalogResult<Topic>)> {
    let mut out = Vec::with_capacity(pending.len());
    for p in pending {
        let name = p.name.clone();
        out.push((name, p.wait().await));
    }
    out
}
