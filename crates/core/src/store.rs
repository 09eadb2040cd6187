//! Group store - owns the unit entities and their group memberships
//!
//! The store materializes an integer as unit squares, groups them canonically
//! (flats, then rods, then loose units) and exposes the four regrouping
//! transitions. Every transition either fully applies or leaves the store
//! untouched.
//!
//! # Recency
//!
//! Transitions never take an argument. Which group is affected follows from
//! `display_order`, a counter bumped for every entity a transition touches:
//!
//! - decompositions split the group whose leader has the highest order;
//! - `compose_units_to_rod` takes the ten loose units with the highest order;
//! - `compose_rods_to_flat` takes the ten rods whose leaders have the highest order.

use arrayvec::ArrayVec;

use crate::entity::{EntityId, Membership, UnitEntity};
use crate::snapshot::{GroupCounts, Snapshot, SnapshotEntity};
use crate::types::{BlockAction, Grouping, FLAT_SIZE, GROUP_FANOUT, MAX_VALUE, ROD_SIZE};

/// One planned membership change: entity position, new membership, stagger.
type Step = (usize, Membership, u8);

/// Authoritative collection of unit entities.
#[derive(Debug, Clone)]
pub struct GroupStore {
    entities: Vec<UnitEntity>,
    /// Stagger hints from the most recent transition, parallel to `entities`.
    hints: Vec<Option<u8>>,
    value: u32,
    /// Never reset, so ids are not reused across re-initialization.
    next_id: u32,
    next_display_order: u64,
}

impl GroupStore {
    /// Create an empty store (value 0)
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            hints: Vec::new(),
            value: 0,
            next_id: 0,
            next_display_order: 0,
        }
    }

    /// Create a store initialized with `n`
    pub fn with_value(n: u32) -> Self {
        let mut store = Self::new();
        store.initialize(n);
        store
    }

    /// Replace the whole population with `n` canonically grouped units.
    ///
    /// `n` is clamped to `0..=MAX_VALUE`; the clamped value is returned.
    pub fn initialize(&mut self, n: u32) -> u32 {
        let n = n.min(MAX_VALUE);

        self.entities.clear();
        self.entities.reserve(n as usize);
        for i in 0..n {
            let id = EntityId(self.next_id);
            self.next_id = self.next_id.wrapping_add(1);
            self.entities.push(UnitEntity::new(id, i, i as u64));
        }
        self.hints.clear();
        self.hints.resize(n as usize, None);
        self.value = n;
        self.next_display_order = n as u64;

        self.apply_canonical_grouping();

        let counts = self.counts();
        log::debug!(
            "initialized {}: {} flats, {} rods, {} units",
            n,
            counts.flats,
            counts.rods,
            counts.units
        );
        n
    }

    /// Flats over the lowest creation indices, then rods, then loose units.
    fn apply_canonical_grouping(&mut self) {
        let n = self.entities.len();
        let flats = n / FLAT_SIZE;
        let rods = (n % FLAT_SIZE) / ROD_SIZE;

        let mut cursor = 0;
        for _ in 0..flats {
            let leader = self.entities[cursor].id;
            for (index, e) in self.entities[cursor..cursor + FLAT_SIZE].iter_mut().enumerate() {
                e.membership = Membership::Flat {
                    leader,
                    index: index as u8,
                };
            }
            cursor += FLAT_SIZE;
        }
        for _ in 0..rods {
            let leader = self.entities[cursor].id;
            for (index, e) in self.entities[cursor..cursor + ROD_SIZE].iter_mut().enumerate() {
                e.membership = Membership::Rod {
                    leader,
                    index: index as u8,
                };
            }
            cursor += ROD_SIZE;
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entities(&self) -> &[UnitEntity] {
        &self.entities
    }

    pub fn counts(&self) -> GroupCounts {
        GroupCounts::from_entities(&self.entities)
    }

    /// Independent copy of the current population, with the stagger hints of
    /// the most recent transition attached.
    pub fn snapshot(&self) -> Snapshot {
        let entities = self
            .entities
            .iter()
            .zip(&self.hints)
            .map(|(e, hint)| SnapshotEntity::new(*e, *hint))
            .collect();
        Snapshot {
            value: self.value,
            entities,
        }
    }

    /// Split the most recent flat into ten rods.
    ///
    /// Members are taken in ascending group index; each decade becomes a rod
    /// led by its first member and staggered by its decade number.
    pub fn decompose_flat(&mut self) -> bool {
        let Some(leader) = self.latest_leader(Grouping::Flat) else {
            return false;
        };
        let members = self.members_of(Grouping::Flat, leader);
        if !self.check_group_size(Grouping::Flat, leader, members.len()) {
            return false;
        }

        let plan: Vec<Step> = members
            .iter()
            .enumerate()
            .map(|(i, &pos)| {
                let decade = i / ROD_SIZE;
                let rod_leader = self.entities[members[decade * ROD_SIZE]].id;
                let membership = Membership::Rod {
                    leader: rod_leader,
                    index: (i % ROD_SIZE) as u8,
                };
                (pos, membership, decade as u8)
            })
            .collect();

        self.commit(&plan);
        log::debug!("decomposed flat {} into ten rods", leader);
        true
    }

    /// Split the most recent rod into ten loose units.
    pub fn decompose_rod(&mut self) -> bool {
        let Some(leader) = self.latest_leader(Grouping::Rod) else {
            return false;
        };
        let members = self.members_of(Grouping::Rod, leader);
        if !self.check_group_size(Grouping::Rod, leader, members.len()) {
            return false;
        }

        let plan: Vec<Step> = members
            .iter()
            .enumerate()
            .map(|(i, &pos)| (pos, Membership::Unit, i as u8))
            .collect();

        self.commit(&plan);
        log::debug!("decomposed rod {} into ten units", leader);
        true
    }

    /// Bundle the ten newest loose units into a rod.
    ///
    /// Selection order is descending `display_order`; the first selected unit
    /// leads the rod.
    pub fn compose_units_to_rod(&mut self) -> bool {
        let mut units: Vec<usize> = self
            .entities
            .iter()
            .enumerate()
            .filter(|(_, e)| e.grouping() == Grouping::Unit)
            .map(|(pos, _)| pos)
            .collect();
        if units.len() < GROUP_FANOUT {
            return false;
        }
        units.sort_by(|&a, &b| {
            self.entities[b]
                .display_order
                .cmp(&self.entities[a].display_order)
        });

        let selected: ArrayVec<usize, GROUP_FANOUT> =
            units.into_iter().take(GROUP_FANOUT).collect();
        let leader = self.entities[selected[0]].id;

        let plan: Vec<Step> = selected
            .iter()
            .enumerate()
            .map(|(i, &pos)| {
                let membership = Membership::Rod {
                    leader,
                    index: i as u8,
                };
                (pos, membership, i as u8)
            })
            .collect();

        self.commit(&plan);
        log::debug!("composed ten units into rod {}", leader);
        true
    }

    /// Bundle the ten newest rods into a flat.
    ///
    /// Rods are concatenated in descending leader order, each in ascending
    /// group index; every source rod shares one stagger step.
    pub fn compose_rods_to_flat(&mut self) -> bool {
        let mut rod_leaders: Vec<&UnitEntity> = self
            .entities
            .iter()
            .filter(|e| e.grouping() == Grouping::Rod && e.is_leader())
            .collect();
        if rod_leaders.len() < GROUP_FANOUT {
            return false;
        }
        rod_leaders.sort_by(|a, b| b.display_order.cmp(&a.display_order));
        let selected: ArrayVec<EntityId, GROUP_FANOUT> = rod_leaders
            .into_iter()
            .take(GROUP_FANOUT)
            .map(|e| e.id)
            .collect();

        let mut ordered = Vec::with_capacity(FLAT_SIZE);
        for &rod in &selected {
            let members = self.members_of(Grouping::Rod, rod);
            if !self.check_group_size(Grouping::Rod, rod, members.len()) {
                return false;
            }
            ordered.extend(members);
        }
        let leader = self.entities[ordered[0]].id;

        let plan: Vec<Step> = ordered
            .iter()
            .enumerate()
            .map(|(i, &pos)| {
                let membership = Membership::Flat {
                    leader,
                    index: i as u8,
                };
                (pos, membership, (i / ROD_SIZE) as u8)
            })
            .collect();

        self.commit(&plan);
        log::debug!("composed ten rods into flat {}", leader);
        true
    }

    /// Apply an action; returns whether the store changed.
    pub fn apply(&mut self, action: BlockAction) -> bool {
        match action {
            BlockAction::DecomposeFlat => self.decompose_flat(),
            BlockAction::DecomposeRod => self.decompose_rod(),
            BlockAction::ComposeRod => self.compose_units_to_rod(),
            BlockAction::ComposeFlat => self.compose_rods_to_flat(),
            BlockAction::SetValue(n) => {
                self.initialize(n);
                true
            }
        }
    }

    /// Leader of the most recently formed group of `grouping`.
    fn latest_leader(&self, grouping: Grouping) -> Option<EntityId> {
        self.entities
            .iter()
            .filter(|e| e.grouping() == grouping && e.is_leader())
            .max_by_key(|e| e.display_order)
            .map(|e| e.id)
    }

    /// Positions of a group's members, in ascending group index.
    fn members_of(&self, grouping: Grouping, leader: EntityId) -> Vec<usize> {
        let mut members: Vec<usize> = self
            .entities
            .iter()
            .enumerate()
            .filter(|(_, e)| e.in_group(grouping, leader))
            .map(|(pos, _)| pos)
            .collect();
        members.sort_by_key(|&pos| self.entities[pos].index_in_group());
        members
    }

    fn check_group_size(&self, grouping: Grouping, leader: EntityId, found: usize) -> bool {
        let expected = grouping.size();
        debug_assert_eq!(
            found,
            expected,
            "{} {} has {} members",
            grouping.as_str(),
            leader,
            found
        );
        if found != expected {
            log::error!(
                "{} {} has {} members, expected {}; transition skipped",
                grouping.as_str(),
                leader,
                found,
                expected
            );
            return false;
        }
        true
    }

    /// Apply a fully validated plan: clear old hints, then regroup, tag and
    /// re-order every touched entity in plan order.
    fn commit(&mut self, plan: &[Step]) {
        self.hints.fill(None);
        for &(pos, membership, stagger) in plan {
            let e = &mut self.entities[pos];
            e.membership = membership;
            e.display_order = self.next_display_order;
            self.next_display_order += 1;
            self.hints[pos] = Some(stagger);
        }
    }
}

impl Default for GroupStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Check every structural invariant of the store.
    fn assert_consistent(store: &GroupStore) {
        let mut groups: HashMap<(Grouping, EntityId), Vec<u8>> = HashMap::new();
        for e in store.entities() {
            groups
                .entry((e.grouping(), e.group_leader_id()))
                .or_default()
                .push(e.index_in_group());
        }
        for ((grouping, leader), mut indices) in groups {
            indices.sort_unstable();
            let expected: Vec<u8> = (0..grouping.size() as u8).collect();
            assert_eq!(indices, expected, "{:?} {} malformed", grouping, leader);
            let lead = store.entities().iter().find(|e| e.id == leader).unwrap();
            assert!(lead.is_leader());
        }

        let mut orders: Vec<u64> = store.entities().iter().map(|e| e.display_order).collect();
        orders.sort_unstable();
        orders.dedup();
        assert_eq!(orders.len(), store.len(), "display orders must be unique");
        assert_eq!(store.counts().total(), store.value());
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = GroupStore::new();
        assert!(store.is_empty());
        assert_eq!(store.value(), 0);
        assert_eq!(store.counts(), GroupCounts::default());
    }

    #[test]
    fn test_initialize_canonical_grouping() {
        let store = GroupStore::with_value(123);
        assert_eq!(store.len(), 123);
        assert_eq!(
            store.counts(),
            GroupCounts {
                flats: 1,
                rods: 2,
                units: 3
            }
        );

        // Flats consume the lowest indices, then rods, then units.
        let e = store.entities();
        assert_eq!(e[0].grouping(), Grouping::Flat);
        assert_eq!(e[99].grouping(), Grouping::Flat);
        assert_eq!(e[99].index_in_group(), 99);
        assert_eq!(e[100].grouping(), Grouping::Rod);
        assert_eq!(e[100].group_leader_id(), e[100].id);
        assert_eq!(e[119].group_leader_id(), e[110].id);
        assert_eq!(e[120].grouping(), Grouping::Unit);
        for (i, u) in e.iter().enumerate() {
            assert_eq!(u.original_index, i as u32);
            assert_eq!(u.display_order, i as u64);
        }
        assert_consistent(&store);
    }

    #[test]
    fn test_initialize_clamps_to_max() {
        let mut store = GroupStore::new();
        assert_eq!(store.initialize(5000), MAX_VALUE);
        assert_eq!(store.len(), MAX_VALUE as usize);
        assert_consistent(&store);
    }

    #[test]
    fn test_initialize_zero() {
        let mut store = GroupStore::with_value(42);
        assert_eq!(store.initialize(0), 0);
        assert!(store.is_empty());
        assert!(!store.decompose_flat());
        assert!(!store.decompose_rod());
        assert!(!store.compose_units_to_rod());
        assert!(!store.compose_rods_to_flat());
    }

    #[test]
    fn test_ids_not_reused_after_reinitialize() {
        let mut store = GroupStore::with_value(5);
        let first: Vec<EntityId> = store.entities().iter().map(|e| e.id).collect();
        store.initialize(5);
        assert!(store.entities().iter().all(|e| !first.contains(&e.id)));
    }

    #[test]
    fn test_decompose_flat_staggers_by_decade() {
        let mut store = GroupStore::with_value(100);
        assert!(store.decompose_flat());
        assert_eq!(store.counts().rods, 10);

        let snap = store.snapshot();
        for (i, row) in snap.entities.iter().enumerate() {
            assert_eq!(row.stagger, Some((i / 10) as u8));
            assert_eq!(row.entity.index_in_group(), (i % 10) as u8);
            assert_eq!(row.entity.group_leader_id(), snap.entities[i / 10 * 10].id());
            assert_eq!(row.entity.display_order, 100 + i as u64);
        }
        assert_consistent(&store);
    }

    #[test]
    fn test_decompose_rod_makes_units_one_by_one() {
        let mut store = GroupStore::with_value(10);
        assert!(store.decompose_rod());
        let snap = store.snapshot();
        assert_eq!(snap.counts().units, 10);
        for (i, row) in snap.entities.iter().enumerate() {
            assert!(row.entity.is_leader());
            assert_eq!(row.stagger, Some(i as u8));
        }
        assert_consistent(&store);
    }

    #[test]
    fn test_compose_units_takes_newest_units() {
        let mut store = GroupStore::with_value(15);
        // Rod back to units: those ten are now the newest.
        assert!(store.decompose_rod());
        let newest: Vec<EntityId> = store.entities()[..10].iter().map(|e| e.id).collect();

        assert!(store.compose_units_to_rod());
        let snap = store.snapshot();
        let rod: Vec<&SnapshotEntity> = snap
            .entities
            .iter()
            .filter(|e| e.entity.grouping() == Grouping::Rod)
            .collect();
        assert_eq!(rod.len(), 10);
        assert!(rod.iter().all(|e| newest.contains(&e.id())));

        // Leader is the unit with the highest previous order (last returned).
        let leader = rod[0].entity.group_leader_id();
        assert_eq!(leader, store.entities()[9].id);
        assert_consistent(&store);
    }

    #[test]
    fn test_compose_units_fails_with_nine() {
        let mut store = GroupStore::with_value(9);
        let before = store.snapshot();
        assert!(!store.compose_units_to_rod());
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_compose_rods_to_flat_orders_by_rod_recency() {
        let mut store = GroupStore::with_value(100);
        assert!(store.decompose_flat());
        assert!(store.compose_rods_to_flat());
        assert_eq!(
            store.counts(),
            GroupCounts {
                flats: 1,
                rods: 0,
                units: 0
            }
        );

        // Newest rod (last decade, entities 90..99) now occupies indices 0..9.
        let e = store.entities();
        assert_eq!(e[90].index_in_group(), 0);
        assert!(e[90].is_leader());
        assert_eq!(e[99].index_in_group(), 9);
        assert_eq!(e[0].index_in_group(), 90);

        let snap = store.snapshot();
        assert_eq!(snap.entities[90].stagger, Some(0));
        assert_eq!(snap.entities[0].stagger, Some(9));
        assert_consistent(&store);
    }

    #[test]
    fn test_failed_transition_keeps_hints() {
        let mut store = GroupStore::with_value(10);
        assert!(store.decompose_rod());
        assert!(!store.decompose_rod());
        assert_eq!(store.snapshot().regrouped().count(), 10);
    }

    #[test]
    fn test_success_clears_previous_hints() {
        let mut store = GroupStore::with_value(120);
        assert!(store.decompose_rod());
        assert!(store.decompose_flat());
        let snap = store.snapshot();
        assert_eq!(snap.regrouped().count(), 100);
        assert!(snap.entities[110..].iter().all(|e| e.stagger.is_none()));
    }

    #[test]
    fn test_apply_dispatch() {
        let mut store = GroupStore::new();
        assert!(store.apply(BlockAction::SetValue(20)));
        assert!(store.apply(BlockAction::DecomposeRod));
        assert!(store.apply(BlockAction::ComposeRod));
        assert!(!store.apply(BlockAction::ComposeFlat));
        assert!(!store.apply(BlockAction::DecomposeFlat));
        assert_consistent(&store);
    }
}
