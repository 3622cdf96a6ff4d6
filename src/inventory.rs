//! Item multiset owned by a game session.

use crate::item::Item;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Stack {
    pub item: Item,
    pub count: u32,
}

/// Items keyed by name. Every stored stack has `count > 0`; a stack that
/// runs out is dropped from the map.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(from = "StoredInventory")]
pub struct Inventory {
    stacks: BTreeMap<String, Stack>,
}

#[derive(Deserialize)]
struct StoredInventory {
    #[serde(default)]
    stacks: BTreeMap<String, Stack>,
}

impl From<StoredInventory> for Inventory {
    /// Empty stacks in a save file are dropped on load.
    fn from(stored: StoredInventory) -> Self {
        let stacks = stored
            .stacks
            .into_iter()
            .filter(|(_, stack)| stack.count > 0)
            .collect();
        Self { stacks }
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `qty` units, merging with an existing stack of the same name.
    /// The stored item keeps the magnitudes it was first granted with.
    pub fn add_item(&mut self, item: Item, qty: u32) {
        if qty == 0 {
            tracing::debug!(item = %item.name, "ignoring zero-quantity grant");
            return;
        }
        match self.stacks.get_mut(&item.name) {
            Some(stack) => stack.count = stack.count.saturating_add(qty),
            None => {
                self.stacks
                    .insert(item.name.clone(), Stack { item, count: qty });
            }
        }
    }

    /// Removes exactly one unit. Returns false when nothing was there.
    pub fn remove_item(&mut self, name: &str) -> bool {
        let Some(stack) = self.stacks.get_mut(name) else {
            return false;
        };
        if stack.count > 1 {
            stack.count -= 1;
            return true;
        }
        // an empty stack can only come from outside; drop it either way
        let had_one = stack.count == 1;
        self.stacks.remove(name);
        had_one
    }

    pub fn item_count(&self, name: &str) -> u32 {
        self.stacks.get(name).map_or(0, |s| s.count)
    }

    pub fn get(&self, name: &str) -> Option<&Item> {
        self.stacks.get(name).map(|s| &s.item)
    }

    /// Unique items with their counts, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&Item, u32)> {
        self.stacks.values().map(|s| (&s.item, s.count))
    }

    /// First food item by name order, if any.
    pub fn first_food(&self) -> Option<&Item> {
        self.iter().map(|(i, _)| i).find(|i| i.is_food())
    }

    /// First gift item by name order, if any.
    pub fn first_gift(&self) -> Option<&Item> {
        self.iter().map(|(i, _)| i).find(|i| !i.is_food())
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.stacks.values().map(|s| s.count as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_merges_by_name() {
        let mut inv = Inventory::new();
        inv.add_item(Item::food("kibble", 20.0), 2);
        inv.add_item(Item::food("kibble", 99.0), 3);
        assert_eq!(inv.item_count("kibble"), 5);
        assert_eq!(inv.get("kibble").and_then(Item::fullness_value), Some(20.0));
        assert_eq!(inv.iter().count(), 1);
    }

    #[test]
    fn test_zero_quantity_is_ignored() {
        let mut inv = Inventory::new();
        inv.add_item(Item::gift("ball", 10.0), 0);
        assert!(inv.is_empty());
        assert_eq!(inv.item_count("ball"), 0);
    }

    #[test]
    fn test_remove_drops_empty_stacks() {
        let mut inv = Inventory::new();
        inv.add_item(Item::gift("ball", 10.0), 2);
        assert!(inv.remove_item("ball"));
        assert_eq!(inv.item_count("ball"), 1);
        assert!(inv.remove_item("ball"));
        assert_eq!(inv.item_count("ball"), 0);
        assert!(inv.get("ball").is_none());
        assert!(inv.is_empty());
        assert!(!inv.remove_item("ball"));
    }

    #[test]
    fn test_enumeration_and_totals() {
        let mut inv = Inventory::new();
        inv.add_item(Item::gift("yarn", 30.0), 1);
        inv.add_item(Item::food("apple", 10.0), 4);
        inv.add_item(Item::food("kibble", 25.0), 2);

        let names: Vec<_> = inv.iter().map(|(i, n)| (i.name.as_str(), n)).collect();
        assert_eq!(names, vec![("apple", 4), ("kibble", 2), ("yarn", 1)]);
        assert_eq!(inv.total(), 7);
        assert_eq!(inv.first_food().map(|i| i.name.as_str()), Some("apple"));
        assert_eq!(inv.first_gift().map(|i| i.name.as_str()), Some("yarn"));
    }

    #[test]
    fn test_counts_never_hold_zero_entries() {
        let mut inv = Inventory::new();
        inv.add_item(Item::food("apple", 10.0), 1);
        inv.remove_item("apple");
        inv.add_item(Item::food("pear", 10.0), 1);
        assert!(inv.iter().all(|(_, n)| n > 0));
    }

    #[test]
    fn test_loaded_empty_stacks_are_dropped() {
        let json = r#"{"stacks":{
            "apple":{"item":{"name":"apple","kind":{"Food":{"fullness":10.0}}},"count":0},
            "yarn":{"item":{"name":"yarn","kind":{"Gift":{"happiness":30.0}}},"count":2}
        }}"#;
        let mut inv: Inventory = serde_json::from_str(json).unwrap();
        assert!(inv.get("apple").is_none());
        assert_eq!(inv.item_count("apple"), 0);
        assert!(!inv.remove_item("apple"));
        assert_eq!(inv.item_count("yarn"), 2);
        assert_eq!(inv.total(), 2);
        assert!(inv.first_food().is_none());
    }

    #[test]
    fn test_remove_on_empty_stack_reports_nothing_removed() {
        let mut inv = Inventory::new();
        inv.stacks.insert(
            "apple".into(),
            Stack {
                item: Item::food("apple", 10.0),
                count: 0,
            },
        );
        assert!(!inv.remove_item("apple"));
        assert!(inv.is_empty());
    }
}
