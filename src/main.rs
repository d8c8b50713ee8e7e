use std::sync::Arc;

use rktopics::auth::ConfiguredGroups;
use rktopics::config::AppConfig;
use rktopics::kafka::KafkaModule;
use rktopics::topic::{join_details, TopicCatalog, TopicListView};

const USAGE: &str = "usage: rktopics <config.json> <cluster> [ALL|HIDE_INTERNAL|HIDE_INTERNAL_STREAM|HIDE_STREAM] [search]";

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run(std::env::args().skip(1).collect()).await {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

async fn run(args: Vec<String>) -> anyhow::Result<()> {
    let [config_path, cluster, rest @ ..] = args.as_slice() else {
        return Err(anyhow::anyhow!(USAGE));
    };
    let view: TopicListView = match rest.first() {
        Some(v) => v.parse()?,
        None => TopicListView::default(),
    };
    let search = rest.get(1).map(String::as_str);

    let config = AppConfig::from_file(config_path)?;
    let groups = Arc::new(ConfiguredGroups::new(&config.security.groups));
    let sources = KafkaModule::new(&config.connections)?.into_sources(groups);
    let catalog = TopicCatalog::new(&config.topic, &config.security, sources)?;

    let pending = catalog.list_details(cluster, view, search, None).await?;
    for (name, result) in join_details(pending).await {
        match result {
            Ok(topic) => println!(
                "{}\tpartitions={}\treplicas={}\tin_sync={}\tcount={}\tinternal={}\tstream={}",
                name,
                topic.partitions.len(),
                topic.replica_count(),
                topic.in_sync_replica_count(),
                topic.size(),
                topic.is_internal(),
                topic.is_stream(),
            ),
            Err(e) => println!("{name}\terror={e}"),
        }
    }
    Ok(())
}
