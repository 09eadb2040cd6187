//! Layout engine - assigns a screen position and color to every entity
//!
//! The layout is a pure function of a snapshot and a [`LayoutGeometry`]: the
//! same input always yields bit-identical targets. Each grouping is drawn in
//! its own place-value column and packed left-to-right, bottom-to-top, so the
//! stacks grow upward like a bar chart.
//!
//! ```text
//!  x=0                 x=column_width+gap      x=ones_x_offset
//! +-------------------+-------------------+-------------------+
//! |  flats (10x10)    |  rods (1x10)      |  units            |
//! +-------------------+-------------------+-------------------+
//!                                            chart_height ^
//! ```

use std::collections::{BTreeMap, HashMap};

use crate::entity::EntityId;
use crate::snapshot::{Snapshot, SnapshotEntity, Target};
use crate::types::{
    ColorCategory, Grouping, Place, COLUMN_GAP, FLAT_SIZE, LAYOUT_PADDING, OFF_CANVAS, ROD_SIZE,
    UNIT_GAP, UNIT_SIZE,
};

/// Cells per side of a flat.
const FLAT_SIDE: usize = 10;

/// Viewport geometry the layout packs into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutGeometry {
    pub column_width: f32,
    pub chart_height: f32,
    /// Left edge of the ones column.
    pub ones_x_offset: f32,
    pub unit_size: f32,
    /// Gap between packed units, rods and flats.
    pub unit_gap: f32,
    /// Gap between the hundreds and tens columns.
    pub column_gap: f32,
    /// Inset from a column's left, right and bottom edges.
    pub padding: f32,
}

impl LayoutGeometry {
    /// Geometry with the default unit size, gaps and padding.
    pub fn new(column_width: f32, chart_height: f32, ones_x_offset: f32) -> Self {
        Self {
            column_width,
            chart_height,
            ones_x_offset,
            unit_size: UNIT_SIZE,
            unit_gap: UNIT_GAP,
            column_gap: COLUMN_GAP,
            padding: LAYOUT_PADDING,
        }
    }

    /// Three equal columns across `chart_width`, ones in the third slot.
    pub fn for_chart(chart_width: f32, chart_height: f32) -> Self {
        let column_width = ((chart_width - 2.0 * COLUMN_GAP) / 3.0).max(0.0);
        Self::new(
            column_width,
            chart_height,
            2.0 * (column_width + COLUMN_GAP),
        )
    }

    pub fn with_unit(mut self, unit_size: f32, unit_gap: f32) -> Self {
        self.unit_size = unit_size;
        self.unit_gap = unit_gap;
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_column_gap(mut self, column_gap: f32) -> Self {
        self.column_gap = column_gap;
        self
    }

    /// Left edge of a place-value column.
    pub fn column_x(&self, place: Place) -> f32 {
        match place {
            Place::Hundreds => 0.0,
            Place::Tens => self.column_width + self.column_gap,
            Place::Ones => self.ones_x_offset,
        }
    }

    /// Usable width inside a column.
    fn block_width(&self) -> f32 {
        (self.column_width - 2.0 * self.padding).max(0.0)
    }

    /// Bottom edge items are stacked upward from.
    fn baseline(&self) -> f32 {
        self.chart_height - self.padding
    }

    /// Items of horizontal `pitch` that fit one row (at least one).
    fn per_row(&self, pitch: f32) -> usize {
        if pitch <= 0.0 {
            return 1;
        }
        ((self.block_width() / pitch).floor() as usize).max(1)
    }
}

impl Default for LayoutGeometry {
    fn default() -> Self {
        Self::for_chart(crate::types::CHART_WIDTH, crate::types::CHART_HEIGHT)
    }
}

/// Computes targets for a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutEngine {
    geometry: LayoutGeometry,
}

impl LayoutEngine {
    pub fn new(geometry: LayoutGeometry) -> Self {
        Self { geometry }
    }

    pub fn set_geometry(&mut self, geometry: LayoutGeometry) {
        self.geometry = geometry;
    }

    /// Fill `target` and `color` on every snapshot row.
    pub fn apply(&self, snapshot: &mut Snapshot) {
        self.layout(&mut snapshot.entities);
    }

    /// Fill `target` and `color` on every row of `entities`.
    ///
    /// Rows that cannot be placed (e.g. a group member whose leader is
    /// missing) land on the off-canvas sentinel.
    pub fn layout(&self, entities: &mut [SnapshotEntity]) {
        for e in entities.iter_mut() {
            e.target = None;
            e.color = ColorCategory::Base;
        }

        self.place_units(entities);
        let groups = collect_groups(entities);
        self.place_rods(entities, &groups);
        self.place_flats(entities, &groups);

        let mut stray = 0usize;
        for e in entities.iter_mut().filter(|e| e.target.is_none()) {
            e.target = Some(Target::new(OFF_CANVAS, OFF_CANVAS));
            stray += 1;
        }
        if stray > 0 {
            log::warn!("layout: {} entities could not be placed", stray);
        }
    }

    fn place_units(&self, entities: &mut [SnapshotEntity]) {
        let g = &self.geometry;
        let mut units: Vec<usize> = entities
            .iter()
            .enumerate()
            .filter(|(_, e)| e.entity.grouping() == Grouping::Unit)
            .map(|(pos, _)| pos)
            .collect();
        units.sort_by_key(|&pos| (entities[pos].entity.display_order, entities[pos].id()));

        let pitch = g.unit_size + g.unit_gap;
        let per_row = g.per_row(pitch);
        let x0 = g.column_x(Place::Ones) + g.padding;
        let bottom = g.baseline() - g.unit_size;

        for (slot, &pos) in units.iter().enumerate() {
            let col = (slot % per_row) as f32;
            let row = (slot / per_row) as f32;
            let e = &mut entities[pos];
            e.target = Some(Target::new(x0 + col * pitch, bottom - row * pitch));
            e.color = ColorCategory::alternating(slot / ROD_SIZE);
        }
    }

    fn place_rods(&self, entities: &mut [SnapshotEntity], groups: &Groups) {
        let g = &self.geometry;
        let pitch_x = g.unit_size + g.unit_gap;
        let rod_height = ROD_SIZE as f32 * g.unit_size;
        let pitch_y = rod_height + g.unit_gap;
        let per_row = g.per_row(pitch_x);
        let x0 = g.column_x(Place::Tens) + g.padding;

        for (rank, members) in groups.ordered(entities, Grouping::Rod).into_iter().enumerate() {
            let col = (rank % per_row) as f32;
            let row = (rank / per_row) as f32;
            let x = x0 + col * pitch_x;
            let top = g.baseline() - rod_height - row * pitch_y;
            let color = ColorCategory::alternating(rank / ROD_SIZE);

            for &pos in members {
                let index = entities[pos].entity.index_in_group() as usize;
                if index >= ROD_SIZE {
                    continue;
                }
                // Index 0 sits at the bottom of the rod.
                let y = top + (ROD_SIZE - 1 - index) as f32 * g.unit_size;
                let e = &mut entities[pos];
                e.target = Some(Target::new(x, y));
                e.color = color;
            }
        }
    }

    fn place_flats(&self, entities: &mut [SnapshotEntity], groups: &Groups) {
        let g = &self.geometry;
        let side = FLAT_SIDE as f32 * g.unit_size;
        let pitch = side + g.unit_gap;
        let per_row = g.per_row(pitch);
        let x0 = g.column_x(Place::Hundreds) + g.padding;

        for (rank, members) in groups.ordered(entities, Grouping::Flat).into_iter().enumerate() {
            let col = (rank % per_row) as f32;
            let row = (rank / per_row) as f32;
            let left = x0 + col * pitch;
            let top = g.baseline() - side - row * pitch;
            let color = ColorCategory::alternating(rank);

            for &pos in members {
                let index = entities[pos].entity.index_in_group() as usize;
                if index >= FLAT_SIZE {
                    continue;
                }
                let cell_row = (index / FLAT_SIDE) as f32;
                let cell_col = (index % FLAT_SIDE) as f32;
                let e = &mut entities[pos];
                e.target = Some(Target::new(
                    left + cell_col * g.unit_size,
                    top + cell_row * g.unit_size,
                ));
                e.color = color;
            }
        }
    }
}

/// Member positions keyed by (grouping, leader).
struct Groups {
    members: BTreeMap<(Grouping, EntityId), Vec<usize>>,
    leaders: HashMap<EntityId, usize>,
}

fn collect_groups(entities: &[SnapshotEntity]) -> Groups {
    let mut members: BTreeMap<(Grouping, EntityId), Vec<usize>> = BTreeMap::new();
    let mut leaders = HashMap::new();
    for (pos, e) in entities.iter().enumerate() {
        let grouping = e.entity.grouping();
        if grouping == Grouping::Unit {
            continue;
        }
        members
            .entry((grouping, e.entity.group_leader_id()))
            .or_default()
            .push(pos);
        if e.entity.is_leader() {
            leaders.insert(e.id(), pos);
        }
    }
    Groups { members, leaders }
}

impl Groups {
    /// Groups of `grouping` in ascending leader `display_order`.
    ///
    /// Groups whose leader is not itself a member are skipped.
    fn ordered(&self, entities: &[SnapshotEntity], grouping: Grouping) -> Vec<&[usize]> {
        let mut found: Vec<(u64, EntityId, &[usize])> = self
            .members
            .iter()
            .filter(|((kind, _), _)| *kind == grouping)
            .filter_map(|((_, leader), members)| {
                let pos = *self.leaders.get(leader)?;
                let lead = &entities[pos].entity;
                if lead.grouping() != grouping {
                    return None;
                }
                Some((lead.display_order, *leader, members.as_slice()))
            })
            .collect();
        found.sort_by_key(|&(order, id, _)| (order, id));
        found.into_iter().map(|(_, _, members)| members).collect()
    }
}

/// Lay out `entities` with the default unit size, gaps and padding.
pub fn calculate_layout(
    entities: &mut [SnapshotEntity],
    column_width: f32,
    chart_height: f32,
    ones_x_offset: f32,
) {
    let geometry = LayoutGeometry::new(column_width, chart_height, ones_x_offset);
    LayoutEngine::new(geometry).layout(entities);
}
