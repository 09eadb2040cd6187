//! Terminal input module.
//!
//! This crate is intentionally independent of any UI framework beyond the
//! `crossterm` event types. It maps key and mouse events into
//! [`crate::types::BlockAction`] and coerces typed values into the supported range.

pub mod editor;
pub mod map;

pub use base_ten_types as types;

pub use editor::{parse_value, ValueEditor};
pub use map::{handle_key_event, handle_mouse_event, should_quit};
