use std::collections::HashMap;

use log::debug;

use super::attributes::{merge_attributes, AttributeMap};
use crate::config::GroupSettings;

/// Maps group identifiers to their merged attribute map.
pub trait GroupAttributeSource: Send + Sync {
    fn attributes(&self, group_ids: &[String]) -> AttributeMap;

    /// Whether `group_id` is known. Sources that cannot tell report every group.
    fn contains(&self, _group_id: &str) -> bool {
        true
    }
}

/// Group attributes declared in the `security.groups` configuration section.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredGroups {
    groups: HashMap<String, AttributeMap>,
}

impl ConfiguredGroups {
    pub fn new(groups: &HashMap<String, GroupSettings>) -> Self {
        Self {
            groups: groups
                .iter()
                .map(|(id, g)| (id.clone(), g.attributes.clone()))
                .collect(),
        }
    }
}

impl GroupAttributeSource for ConfiguredGroups {
    fn attributes(&self, group_ids: &[String]) -> AttributeMap {
        let maps = group_ids.iter().filter_map(|id| {
            let found = self.groups.get(id);
            if found.is_none() {
                debug!("Group '{}' is not declared in security.groups; ignoring", id);
            }
            found
        });
        merge_attributes(maps)
    }

    fn contains(&self, group_id: &str) -> bool {
        self.groups.contains_key(group_id)
    }
}
