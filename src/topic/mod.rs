mod catalog;
pub(crate) mod classification;
mod model;
pub mod source;
mod view;

pub use catalog::{join_details, PendingTopic, Sources, TopicCatalog};
pub use classification::ClassificationPolicy;
pub use model::{
    AccessControlEntry, ConfigEntry, ConsumerGroup, ConsumerGroupOffset, LogDir, Partition,
    PartitionInfo, PartitionNode, PartitionOffsets, Topic, TopicDescription,
};
pub use view::TopicListView;
