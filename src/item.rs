use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    Food { fullness: f32 },
    Gift { happiness: f32 },
}

/// A consumable. Two items with the same name are the same item, whatever
/// their magnitudes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub kind: ItemKind,
}

impl Item {
    pub fn food(name: impl Into<String>, fullness: f32) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Food { fullness },
        }
    }

    pub fn gift(name: impl Into<String>, happiness: f32) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Gift { happiness },
        }
    }

    pub fn fullness_value(&self) -> Option<f32> {
        match self.kind {
            ItemKind::Food { fullness } => Some(fullness),
            ItemKind::Gift { .. } => None,
        }
    }

    pub fn happiness_value(&self) -> Option<f32> {
        match self.kind {
            ItemKind::Gift { happiness } => Some(happiness),
            ItemKind::Food { .. } => None,
        }
    }

    pub fn is_food(&self) -> bool {
        matches!(self.kind, ItemKind::Food { .. })
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
