//! Base-ten blocks (workspace facade crate).
//!
//! Re-exports the workspace crates under short names and hosts the
//! interactive session ([`app::App`]), its environment configuration and the
//! headless [`dump`] used by the `dump-layout` binary.

pub use base_ten_core as core;
pub use base_ten_input as input;
pub use base_ten_term as term;
pub use base_ten_types as types;

pub mod app;
pub mod config;
pub mod dump;
