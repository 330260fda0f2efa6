use serde::{Deserialize, Serialize};
use shared::{ZoneId, ZoneMap};

/// Ordered set of zone ids owned by one workflow (intake, work, done)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSet {
    ids: Vec<ZoneId>,
}

impl ZoneSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ZoneId>,
    {
        let mut set = Self::new();
        for id in ids {
            set.insert(id.into());
        }
        set
    }

    /// Ids in insertion order
    pub fn as_slice(&self) -> &[ZoneId] {
        &self.ids
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|z| z == id)
    }

    /// Returns false if the id was already present
    pub fn insert(&mut self, id: ZoneId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|z| z != id);
        self.ids.len() != before
    }

    /// Add if absent, remove if present. Returns whether the id is now in the set.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.remove(id) {
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    /// Move every id into `other`, leaving this set empty
    pub fn drain_into(&mut self, other: &mut ZoneSet) {
        for id in self.ids.drain(..) {
            other.insert(id);
        }
    }

    /// Drop ids that the zone map does not know (after a category change)
    pub fn retain_known(&mut self, zones: &ZoneMap) {
        self.ids.retain(|id| zones.contains(id));
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::VehicleCategory;

    #[test]
    fn test_toggle_keeps_order() {
        let mut set = ZoneSet::new();
        assert!(set.toggle("hood"));
        assert!(set.toggle("roof"));
        assert!(set.toggle("trunk"));
        assert!(!set.toggle("roof"));
        assert_eq!(set.as_slice(), &["hood".to_string(), "trunk".to_string()]);
    }

    #[test]
    fn test_insert_is_unique() {
        let mut set = ZoneSet::from_ids(["hood", "hood", "roof"]);
        assert_eq!(set.len(), 2);
        assert!(!set.insert("roof".into()));
    }

    #[test]
    fn test_drain_into_completed() {
        let mut selected = ZoneSet::from_ids(["hood", "roof"]);
        let mut done = ZoneSet::from_ids(["roof"]);
        selected.drain_into(&mut done);
        assert!(selected.is_empty());
        assert_eq!(done.iter().collect::<Vec<_>>(), vec!["roof", "hood"]);
    }

    #[test]
    fn test_retain_known_drops_foreign_ids() {
        let mut set = ZoneSet::from_ids(["tailgate", "hood"]);
        set.retain_known(&ZoneMap::for_category(VehicleCategory::Sedan));
        assert_eq!(set.as_slice(), &["hood".to_string()]);
    }
}
