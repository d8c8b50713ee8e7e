use rdkafka::admin::AdminClient;
use rdkafka::client::DefaultClientContext;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::BaseConsumer;

use super::security::configure_security;
use super::types::KafkaConfig;

/// Settings shared by every client created for a cluster.
fn base_config(config: &KafkaConfig) -> anyhow::Result<ClientConfig> {
    let mut cc = ClientConfig::new();
    cc.set("bootstrap.servers", &config.broker);
    cc.set("client.id", "rktopics");
    cc.set("socket.timeout.ms", "10000");
    cc.set("metadata.max.age.ms", "10000");
    cc.set("reconnect.backoff.ms", "100");
    cc.set("reconnect.backoff.max.ms", "10000");
    configure_security(&mut cc, config)?;
    Ok(cc)
}

/// Build the admin client used for metadata, configs and topic management.
pub(crate) fn create_admin(config: &KafkaConfig) -> anyhow::Result<AdminClient<DefaultClientContext>> {
    let admin: AdminClient<DefaultClientContext> = base_config(config)?.create()?;
    Ok(admin)
}

/// Build a consumer bound to `group_id`, only used to read its committed offsets.
/// It never subscribes, so it does not join the group.
pub(crate) fn create_group_reader(config: &KafkaConfig, group_id: &str) -> anyhow::Result<BaseConsumer> {
    let mut cc = base_config(config)?;
    cc.set("group.id", group_id);
    cc.set("enable.auto.commit", "false");
    cc.set("enable.auto.offset.store", "false");
    cc.set("allow.auto.create.topics", "false");
    let consumer: BaseConsumer = cc.create()?;
    Ok(consumer)
}
