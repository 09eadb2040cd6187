//! Core block logic - pure, deterministic, and testable
//!
//! This crate contains the grouping state machine, the layout algorithm and
//! the label formatting. It has **no dependencies** on terminals or I/O, making it:
//!
//! - **Deterministic**: the same value and action sequence always produce the
//!   same groupings and the same coordinates
//! - **Testable**: every transition and layout rule is unit tested
//! - **Portable**: can drive the terminal view, a JSON dump, or any other renderer
//!
//! # Module Structure
//!
//! - [`entity`]: unit squares and their tagged group membership
//! - [`store`]: the [`GroupStore`] that owns entities and applies regrouping
//! - [`snapshot`]: independent copies handed to layout and rendering
//! - [`layout`]: column-by-column target positions and color categories
//! - [`format`]: digit words, expanded values and label phrases
//!
//! # Rules
//!
//! - **Canonical grouping**: `initialize(n)` builds `n / 100` flats, then
//!   `(n % 100) / 10` rods, then `n % 10` loose units, over creation order
//! - **Recency**: decompositions split the most recently formed group;
//!   compositions consume the most recently touched material
//! - **All or nothing**: a transition either fully applies and returns `true`,
//!   or changes nothing and returns `false`
//!
//! # Example
//!
//! ```
//! use base_ten_core::{GroupStore, LayoutEngine};
//! use base_ten_types::BlockAction;
//!
//! let mut store = GroupStore::with_value(123);
//! assert!(store.apply(BlockAction::DecomposeFlat));
//! assert!(!store.apply(BlockAction::ComposeRod)); // only 3 loose units
//!
//! let counts = store.counts();
//! assert_eq!((counts.flats, counts.rods, counts.units), (0, 12, 3));
//!
//! let mut snap = store.snapshot();
//! LayoutEngine::default().apply(&mut snap);
//! assert!(snap.is_laid_out());
//! ```

pub mod entity;
pub mod format;
pub mod layout;
pub mod snapshot;
pub mod store;

pub use base_ten_types as types;

// Re-export commonly used types for convenience
pub use entity::{EntityId, Membership, UnitEntity};
pub use format::{
    count_label, digit_phrase, digit_to_word, expanded_value, squares_label, sum_equation,
};
pub use layout::{calculate_layout, LayoutEngine, LayoutGeometry};
pub use snapshot::{GroupCounts, Snapshot, SnapshotEntity, Target};
pub use store::GroupStore;
