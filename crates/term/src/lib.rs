//! Terminal front-end for the block manipulative.
//!
//! A small rendering layer that draws into a framebuffer and flushes it to a
//! terminal backend. It intentionally avoids widget libraries.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Turn layout targets into motion without ever touching the store
//! - Coalesce fast input into at most one pending transition

pub mod board_view;
pub mod fb;
pub mod render_queue;
pub mod render_throttle;
pub mod renderer;

pub use base_ten_core as core;
pub use base_ten_types as types;

pub use board_view::{BoardLabels, BoardView, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use render_queue::{RenderQueue, Sprite};
pub use render_throttle::{frame_fingerprint, RenderThrottle};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
