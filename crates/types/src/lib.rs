//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no behavior beyond parsing and naming, making
//! them usable in any context (store logic, layout, terminal rendering, JSON dumps).
//!
//! # Value Range
//!
//! The manipulative represents integers in `0..=MAX_VALUE` (999): at most nine
//! flats, nine rods and nine loose units once canonically grouped.
//!
//! # Geometry Defaults
//!
//! Layout values are in abstract pixels (the terminal view scales them down):
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `UNIT_SIZE` | 10 | Edge length of one unit square |
//! | `UNIT_GAP` | 2 | Gap between neighbouring units / rods / flats |
//! | `COLUMN_GAP` | 20 | Gap between the place-value columns |
//! | `LAYOUT_PADDING` | 5 | Inset from a column's edges |
//!
//! # Animation Timing
//!
//! Timing values are in milliseconds:
//!
//! - `ANIMATION_MS`: 500 - duration of a single entity's move
//! - `STAGGER_MS`: 60 - extra delay per stagger step for regrouped entities
//! - `FRAME_MS`: 16 - render loop interval (~60 FPS)
//!
//! # Examples
//!
//! ```
//! use base_ten_types::{BlockAction, Grouping, Place, MAX_VALUE};
//!
//! // Parse a verb (case-insensitive)
//! let action = BlockAction::from_str("decomposeFlat").unwrap();
//! assert_eq!(action, BlockAction::DecomposeFlat);
//!
//! // Every grouping lives in one place-value column
//! assert_eq!(Grouping::Rod.place(), Place::Tens);
//! assert_eq!(Place::Hundreds.multiplier(), 100);
//!
//! assert_eq!(MAX_VALUE, 999);
//! ```

use serde::{Deserialize, Serialize};

/// Largest representable value (9 flats, 9 rods, 9 units)
pub const MAX_VALUE: u32 = 999;

/// Members in a rod
pub const ROD_SIZE: usize = 10;

/// Members in a flat (10 rods of 10)
pub const FLAT_SIZE: usize = 100;

/// Number of groups merged by a compose step
pub const GROUP_FANOUT: usize = 10;

/// Edge length of one unit square (abstract pixels)
pub const UNIT_SIZE: f32 = 10.0;

/// Small gap between packed units, rods and flats
pub const UNIT_GAP: f32 = 2.0;

/// Gap between the hundreds, tens and ones columns
pub const COLUMN_GAP: f32 = 20.0;

/// Inset from a column's edges
pub const LAYOUT_PADDING: f32 = 5.0;

/// Default chart size (drawing area inside the page margins)
pub const CHART_WIDTH: f32 = 1000.0;
pub const CHART_HEIGHT: f32 = 340.0;

/// Sentinel coordinate for entities the layout could not place
pub const OFF_CANVAS: f32 = -10_000.0;

/// Duration of one entity's move in milliseconds
pub const ANIMATION_MS: u32 = 500;

/// Delay per stagger step for recently regrouped entities
pub const STAGGER_MS: u32 = 60;

/// Render loop interval (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Slack added on top of the longest expected transition before it is
/// force-completed.
pub const FALLBACK_SLACK_MS: u32 = 250;


/// The three group kinds a unit square can belong to
///
/// - **Unit**: a lone square, place value 1
/// - **Rod**: one of 10 squares in a column, place value 10
/// - **Flat**: one of 100 squares in a 10x10 grid, place value 100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    Unit,
    Rod,
    Flat,
}

impl Grouping {
    /// Number of unit squares in one group of this kind
    pub fn size(&self) -> usize {
        match self {
            Grouping::Unit => 1,
            Grouping::Rod => ROD_SIZE,
            Grouping::Flat => FLAT_SIZE,
        }
    }

    /// The place-value column this grouping is drawn in
    pub fn place(&self) -> Place {
        match self {
            Grouping::Unit => Place::Ones,
            Grouping::Rod => Place::Tens,
            Grouping::Flat => Place::Hundreds,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grouping::Unit => "unit",
            Grouping::Rod => "rod",
            Grouping::Flat => "flat",
        }
    }
}

/// Place-value columns, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Place {
    Hundreds,
    Tens,
    Ones,
}

impl Place {
    /// All columns in screen order
    pub const ALL: [Place; 3] = [Place::Hundreds, Place::Tens, Place::Ones];

    /// Plural lowercase name ("hundreds", "tens", "ones")
    pub fn name(&self) -> &'static str {
        match self {
            Place::Hundreds => "hundreds",
            Place::Tens => "tens",
            Place::Ones => "ones",
        }
    }

    /// Singular lowercase name ("hundred", "ten", "one")
    pub fn singular(&self) -> &'static str {
        match self {
            Place::Hundreds => "hundred",
            Place::Tens => "ten",
            Place::Ones => "one",
        }
    }

    /// Column heading
    pub fn label(&self) -> &'static str {
        match self {
            Place::Hundreds => "Hundreds",
            Place::Tens => "Tens",
            Place::Ones => "Ones",
        }
    }

    pub fn multiplier(&self) -> u32 {
        match self {
            Place::Hundreds => 100,
            Place::Tens => 10,
            Place::Ones => 1,
        }
    }

    /// Column slot, 0 = leftmost
    pub fn column_index(&self) -> usize {
        match self {
            Place::Hundreds => 0,
            Place::Tens => 1,
            Place::Ones => 2,
        }
    }
}

/// Color category assigned by the layout
///
/// Consecutive runs (ten units, ten rods, single flats) alternate between the
/// two categories so decades stay visually distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorCategory {
    #[default]
    Base,
    HighlightGroup,
}

impl ColorCategory {
    /// Category for the `run`-th run of a column
    pub fn alternating(run: usize) -> Self {
        if run % 2 == 0 {
            ColorCategory::Base
        } else {
            ColorCategory::HighlightGroup
        }
    }
}

/// Actions that can be applied to the block store
///
/// The four regrouping verbs take no argument: the store decides which group
/// is affected. `SetValue` re-initializes the whole population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockAction {
    /// Split the most recent flat into ten rods
    DecomposeFlat,
    /// Split the most recent rod into ten units
    DecomposeRod,
    /// Bundle the ten newest loose units into a rod
    ComposeRod,
    /// Bundle the ten newest rods into a flat
    ComposeFlat,
    /// Replace the population with a fresh canonical grouping
    SetValue(u32),
}

impl BlockAction {
    /// Parse a regrouping verb (case-insensitive)
    ///
    /// `SetValue` has no textual form here; callers parse the number themselves.
    ///
    /// # Examples
    ///
    /// ```
    /// use base_ten_types::BlockAction;
    ///
    /// assert_eq!(BlockAction::from_str("decomposeRod"), Some(BlockAction::DecomposeRod));
    /// assert_eq!(BlockAction::from_str("composeUnitsToRod"), Some(BlockAction::ComposeRod));
    /// assert_eq!(BlockAction::from_str("composerodstoflat"), Some(BlockAction::ComposeFlat));
    /// assert_eq!(BlockAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "decomposeflat" => Some(BlockAction::DecomposeFlat),
            "decomposerod" => Some(BlockAction::DecomposeRod),
            "composeunitstorod" | "composerod" => Some(BlockAction::ComposeRod),
            "composerodstoflat" | "composeflat" => Some(BlockAction::ComposeFlat),
            _ => None,
        }
    }

    /// camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockAction::DecomposeFlat => "decomposeFlat",
            BlockAction::DecomposeRod => "decomposeRod",
            BlockAction::ComposeRod => "composeUnitsToRod",
            BlockAction::ComposeFlat => "composeRodsToFlat",
            BlockAction::SetValue(_) => "setValue",
        }
    }
}
