//! Print the laid-out board for a value and a sequence of actions as JSON.
//!
//! ```text
//! dump-layout 123 decomposeFlat composeRod
//! ```
//!
//! A bare number in the action list re-initializes the board to that value.

use anyhow::{bail, Result};

use base_ten_blocks::core::LayoutGeometry;
use base_ten_blocks::dump;
use base_ten_blocks::input::parse_value;
use base_ten_blocks::types::BlockAction;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_micros()
        .init();

    let mut args = std::env::args().skip(1);
    let Some(value) = args.next() else {
        bail!("usage: dump-layout <value> [action...]");
    };
    let value = parse_value(&value);

    let actions = args.map(|arg| parse_action(&arg)).collect::<Result<Vec<_>>>()?;
    log::debug!("dumping {} after {} action(s)", value, actions.len());

    let report = dump::run(value, &actions, LayoutGeometry::default());
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn parse_action(arg: &str) -> Result<BlockAction> {
    if let Some(action) = BlockAction::from_str(arg) {
        return Ok(action);
    }
    if !arg.is_empty() && arg.chars().all(|c| c.is_ascii_digit()) {
        return Ok(BlockAction::SetValue(parse_value(arg)));
    }
    bail!(
        "unknown action {arg:?} \
         (expected decomposeFlat, decomposeRod, composeRod, composeFlat or a number)"
    )
}
