//! Numeric value entry.
//!
//! The value field accepts free text; committing it coerces to a valid value
//! instead of rejecting input.

use crossterm::event::KeyCode;

use crate::types::{BlockAction, MAX_VALUE};

/// Longest text the field keeps.
const MAX_FIELD_LEN: usize = 6;

/// Coerce free text to a value in `0..=MAX_VALUE`.
///
/// Leading decimal digits are parsed (after trimming whitespace); anything
/// non-numeric or negative becomes 0 and large values clamp to the maximum.
///
/// ```
/// use base_ten_input::parse_value;
///
/// assert_eq!(parse_value("123"), 123);
/// assert_eq!(parse_value(" 42 "), 42);
/// assert_eq!(parse_value("12abc"), 12);
/// assert_eq!(parse_value("abc"), 0);
/// assert_eq!(parse_value("-5"), 0);
/// assert_eq!(parse_value("5000"), 999);
/// ```
pub fn parse_value(text: &str) -> u32 {
    let digits: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return 0;
    }
    // Too many digits to fit a u32 is still "too large".
    digits.parse::<u32>().unwrap_or(MAX_VALUE).min(MAX_VALUE)
}

/// Editable value field.
#[derive(Debug, Clone, Default)]
pub struct ValueEditor {
    text: String,
}

impl ValueEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field pre-filled with `value`.
    pub fn with_value(value: u32) -> Self {
        Self {
            text: value.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Feed a key press.
    ///
    /// Digits and Backspace edit the field; Enter commits it as
    /// [`BlockAction::SetValue`] with the coerced value and normalizes the text.
    pub fn handle_key(&mut self, code: KeyCode) -> Option<BlockAction> {
        match code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.text.len() < MAX_FIELD_LEN {
                    self.text.push(c);
                }
                None
            }
            KeyCode::Backspace => {
                self.text.pop();
                None
            }
            KeyCode::Enter => {
                let value = parse_value(&self.text);
                self.text = value.to_string();
                Some(BlockAction::SetValue(value))
            }
            _ => None,
        }
    }

    /// Overwrite the field after the value changed elsewhere.
    pub fn set_value(&mut self, value: u32) {
        self.text = value.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_empty_and_garbage() {
        assert_eq!(parse_value(""), 0);
        assert_eq!(parse_value("   "), 0);
        assert_eq!(parse_value("x12"), 0);
        assert_eq!(parse_value("99999999999999"), MAX_VALUE);
    }

    #[test]
    fn test_editor_commit() {
        let mut ed = ValueEditor::new();
        assert_eq!(ed.handle_key(KeyCode::Char('4')), None);
        assert_eq!(ed.handle_key(KeyCode::Char('2')), None);
        assert_eq!(ed.text(), "42");
        assert_eq!(
            ed.handle_key(KeyCode::Enter),
            Some(BlockAction::SetValue(42))
        );
    }

    #[test]
    fn test_editor_backspace_and_empty_commit() {
        let mut ed = ValueEditor::with_value(7);
        ed.handle_key(KeyCode::Backspace);
        assert_eq!(ed.text(), "");
        assert_eq!(ed.handle_key(KeyCode::Enter), Some(BlockAction::SetValue(0)));
        assert_eq!(ed.text(), "0");
    }

    #[test]
    fn test_editor_clamps_on_commit() {
        let mut ed = ValueEditor::new();
        for c in "12345".chars() {
            ed.handle_key(KeyCode::Char(c));
        }
        assert_eq!(
            ed.handle_key(KeyCode::Enter),
            Some(BlockAction::SetValue(MAX_VALUE))
        );
        assert_eq!(ed.text(), "999");
    }

    #[test]
    fn test_editor_ignores_letters() {
        let mut ed = ValueEditor::with_value(5);
        assert_eq!(ed.handle_key(KeyCode::Char('f')), None);
        assert_eq!(ed.text(), "5");
    }
}
