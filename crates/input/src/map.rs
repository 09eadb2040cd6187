//! Key and mouse mapping from terminal events to block actions.

use crate::types::{BlockAction, Place};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Map keyboard input to regrouping verbs.
///
/// Digits are not mapped here; they belong to the [`crate::ValueEditor`].
pub fn handle_key_event(key: KeyEvent) -> Option<BlockAction> {
    match key.code {
        // Decompose
        KeyCode::Char('f') | KeyCode::Char('F') => Some(BlockAction::DecomposeFlat),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(BlockAction::DecomposeRod),

        // Compose
        KeyCode::Char('u') | KeyCode::Char('U') => Some(BlockAction::ComposeRod),
        KeyCode::Char('t') | KeyCode::Char('T') => Some(BlockAction::ComposeFlat),

        _ => None,
    }
}

/// Map a mouse press over a place-value column to a verb.
///
/// Left click breaks a group apart (hundreds: flat, tens: rod); right click
/// bundles (ones: units into a rod, tens: rods into a flat).
pub fn handle_mouse_event(event: MouseEvent, place: Option<Place>) -> Option<BlockAction> {
    let MouseEventKind::Down(button) = event.kind else {
        return None;
    };
    match (button, place?) {
        (MouseButton::Left, Place::Hundreds) => Some(BlockAction::DecomposeFlat),
        (MouseButton::Left, Place::Tens) => Some(BlockAction::DecomposeRod),
        (MouseButton::Right, Place::Tens) => Some(BlockAction::ComposeFlat),
        (MouseButton::Right, Place::Ones) => Some(BlockAction::ComposeRod),
        _ => None,
    }
}

/// Check if key should quit the program.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q')
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
