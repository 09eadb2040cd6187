//! Snapshots: independent copies of the store handed to layout and rendering.
//!
//! The layout engine writes `target` and `color` on snapshot rows; nothing here
//! can reach back into the store.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::entity::{EntityId, UnitEntity};
use crate::types::{ColorCategory, Grouping};

/// Layout-assigned screen position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub x: f32,
    pub y: f32,
}

impl Target {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One snapshot row: a copy of the entity plus renderer-only metadata.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntity {
    #[serde(flatten)]
    pub entity: UnitEntity,
    /// `Some(i)` when touched by the most recent transition; `i` orders the
    /// re-entry animation.
    pub stagger: Option<u8>,
    pub target: Option<Target>,
    pub color: ColorCategory,
}

impl SnapshotEntity {
    pub fn new(entity: UnitEntity, stagger: Option<u8>) -> Self {
        Self {
            entity,
            stagger,
            target: None,
            color: ColorCategory::Base,
        }
    }

    pub fn id(&self) -> EntityId {
        self.entity.id
    }

    pub fn recently_regrouped(&self) -> bool {
        self.stagger.is_some()
    }
}

/// Conceptual group counts (distinct leaders per grouping).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GroupCounts {
    pub flats: u32,
    pub rods: u32,
    pub units: u32,
}

impl GroupCounts {
    /// Count distinct groups among `entities`.
    pub fn from_entities<'a>(entities: impl IntoIterator<Item = &'a UnitEntity>) -> Self {
        let mut flats = BTreeSet::new();
        let mut rods = BTreeSet::new();
        let mut units = 0;
        for e in entities {
            match e.grouping() {
                Grouping::Flat => {
                    flats.insert(e.group_leader_id());
                }
                Grouping::Rod => {
                    rods.insert(e.group_leader_id());
                }
                Grouping::Unit => units += 1,
            }
        }
        Self {
            flats: flats.len() as u32,
            rods: rods.len() as u32,
            units,
        }
    }

    /// Place-value total: `flats*100 + rods*10 + units`.
    pub fn total(&self) -> u32 {
        self.flats * 100 + self.rods * 10 + self.units
    }
}

/// Ordered copy of every entity in the store.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// The value the store was initialized with.
    pub value: u32,
    pub entities: Vec<SnapshotEntity>,
}

impl Snapshot {
    pub fn counts(&self) -> GroupCounts {
        GroupCounts::from_entities(self.entities.iter().map(|e| &e.entity))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&SnapshotEntity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    /// Rows touched by the most recent transition.
    pub fn regrouped(&self) -> impl Iterator<Item = &SnapshotEntity> {
        self.entities.iter().filter(|e| e.recently_regrouped())
    }

    /// Largest stagger ordinal present, if any entity was regrouped.
    pub fn max_stagger(&self) -> Option<u8> {
        self.entities.iter().filter_map(|e| e.stagger).max()
    }

    /// True once every row has a layout target.
    pub fn is_laid_out(&self) -> bool {
        self.entities.iter().all(|e| e.target.is_some())
    }
}
