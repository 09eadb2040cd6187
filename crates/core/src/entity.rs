//! Unit entities - one square of the represented integer.

use serde::{Deserialize, Serialize};

use crate::types::Grouping;

/// Stable entity identifier, unique for the lifetime of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unit-{}", self.0)
    }
}

/// Current group membership of an entity.
///
/// A lone unit carries no payload: it leads itself and has no index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "grouping", rename_all = "lowercase")]
pub enum Membership {
    Unit,
    Rod { leader: EntityId, index: u8 },
    Flat { leader: EntityId, index: u8 },
}

/// One unit square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitEntity {
    pub id: EntityId,
    /// Position in the line of squares when the value was materialized.
    pub original_index: u32,
    /// Total order over manipulation events; larger is more recent.
    pub display_order: u64,
    #[serde(flatten)]
    pub membership: Membership,
}

impl UnitEntity {
    /// Create a lone unit.
    pub fn new(id: EntityId, original_index: u32, display_order: u64) -> Self {
        Self {
            id,
            original_index,
            display_order,
            membership: Membership::Unit,
        }
    }

    pub fn grouping(&self) -> Grouping {
        match self.membership {
            Membership::Unit => Grouping::Unit,
            Membership::Rod { .. } => Grouping::Rod,
            Membership::Flat { .. } => Grouping::Flat,
        }
    }

    /// Id of the group representative (self for a lone unit).
    pub fn group_leader_id(&self) -> EntityId {
        match self.membership {
            Membership::Unit => self.id,
            Membership::Rod { leader, .. } | Membership::Flat { leader, .. } => leader,
        }
    }

    pub fn index_in_group(&self) -> u8 {
        match self.membership {
            Membership::Unit => 0,
            Membership::Rod { index, .. } | Membership::Flat { index, .. } => index,
        }
    }

    pub fn is_leader(&self) -> bool {
        self.group_leader_id() == self.id
    }

    /// True when this entity belongs to `grouping` with the given leader.
    pub fn in_group(&self, grouping: Grouping, leader: EntityId) -> bool {
        self.grouping() == grouping && self.group_leader_id() == leader
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lone_unit_leads_itself() {
        let e = UnitEntity::new(EntityId(7), 3, 3);
        assert_eq!(e.grouping(), Grouping::Unit);
        assert_eq!(e.group_leader_id(), EntityId(7));
        assert_eq!(e.index_in_group(), 0);
        assert!(e.is_leader());
    }

    #[test]
    fn rod_member_reports_leader_and_index() {
        let mut e = UnitEntity::new(EntityId(12), 12, 12);
        e.membership = Membership::Rod {
            leader: EntityId(10),
            index: 2,
        };
        assert_eq!(e.grouping(), Grouping::Rod);
        assert_eq!(e.group_leader_id(), EntityId(10));
        assert_eq!(e.index_in_group(), 2);
        assert!(!e.is_leader());
        assert!(e.in_group(Grouping::Rod, EntityId(10)));
        assert!(!e.in_group(Grouping::Flat, EntityId(10)));
    }

    #[test]
    fn entity_id_displays_like_a_dom_key() {
        assert_eq!(EntityId(42).to_string(), "unit-42");
    }
}
