mod attributes;
mod filter;
mod groups;

pub use attributes::{
    list_attribute, merge_attributes, AttributeMap, AttributeValue, Principal, TOPICS_FILTER_REGEXP,
};
pub use filter::TopicFilter;
pub use groups::{ConfiguredGroups, GroupAttributeSource};
