//! End-to-end session behavior without a terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use base_ten_blocks::app::App;
use base_ten_blocks::config::AppConfig;
use base_ten_blocks::term::{FrameBuffer, Viewport};
use base_ten_blocks::types::BlockAction;

fn app(value: u32, animate: bool) -> App {
    let config = AppConfig {
        initial_value: value,
        animate,
        ..AppConfig::default()
    };
    App::new(&config, Viewport::new(80, 30))
}

fn counts(app: &App) -> (u32, u32, u32) {
    let c = app.store().counts();
    (c.flats, c.rods, c.units)
}

fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

fn click(button: MouseButton, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(button),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

#[test]
fn starts_settled_on_initial_value() {
    let app = app(123, true);
    assert!(!app.is_animating());
    assert_eq!(counts(&app), (1, 2, 3));
    assert_eq!(app.input_text(), "123");
}

#[test]
fn failed_action_sets_status_and_skips_render() {
    let mut app = app(123, true);
    assert!(!app.apply(BlockAction::ComposeRod, 0));
    assert!(!app.is_animating());
    assert!(app.status().is_some());

    assert!(app.apply(BlockAction::DecomposeFlat, 10));
    assert!(app.is_animating());
    assert_eq!(app.status(), None);
}

#[test]
fn keys_drive_regrouping_and_value_entry() {
    let mut app = app(123, false);
    assert!(app.handle_key(key('f'), 0));
    assert_eq!(counts(&app), (0, 12, 3));
    assert!(app.handle_key(key('r'), 0));
    assert_eq!(counts(&app), (0, 11, 13));
    assert!(app.handle_key(key('u'), 0));
    assert_eq!(counts(&app), (0, 12, 3));

    for code in [KeyCode::Backspace, KeyCode::Backspace, KeyCode::Backspace] {
        assert!(!app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), 0));
    }
    assert!(!app.handle_key(key('4'), 0));
    assert!(!app.handle_key(key('0'), 0));
    assert_eq!(app.input_text(), "40");
    assert!(app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), 0));
    assert_eq!(counts(&app), (0, 4, 0));
    assert_eq!(app.store().value(), 40);
}

#[test]
fn mouse_clicks_map_to_columns() {
    let mut app = app(100, false);
    // Hundreds frame spans x 0..26, tens 27..53, ones 54..80 at 80x30.
    assert!(app.handle_mouse(click(MouseButton::Left, 5, 10), 0));
    assert_eq!(counts(&app), (0, 10, 0));
    assert!(app.handle_mouse(click(MouseButton::Left, 30, 10), 0));
    assert_eq!(counts(&app), (0, 9, 10));
    assert!(app.handle_mouse(click(MouseButton::Right, 60, 10), 0));
    assert_eq!(counts(&app), (0, 10, 0));
    assert!(app.handle_mouse(click(MouseButton::Right, 30, 10), 0));
    assert_eq!(counts(&app), (1, 0, 0));
    // Header row is not a column.
    assert!(!app.handle_mouse(click(MouseButton::Left, 5, 0), 0));
}

#[test]
fn frames_settle_after_notifications() {
    let mut app = app(123, true);
    let mut fb = FrameBuffer::new(80, 30);
    assert!(app.apply(BlockAction::DecomposeFlat, 0));

    let first = app.render_into(0, &mut fb);
    let mut now = 0;
    while app.is_animating() {
        now += 16;
        app.tick(now);
        app.render_into(now, &mut fb);
        app.frame_drawn(now);
        assert!(now < 5_000);
    }
    let settled = app.render_into(now, &mut fb);
    assert_ne!(first, settled);
    assert!(fb.row_text(29).contains("0 + 120 + 3 = 123"));
}

#[test]
fn resize_relays_out_immediately() {
    let mut app = app(123, true);
    assert!(app.apply(BlockAction::DecomposeFlat, 0));
    app.resize(Viewport::new(120, 40));
    assert!(!app.is_animating());

    let mut fb = FrameBuffer::new(0, 0);
    app.render_into(0, &mut fb);
    assert_eq!((fb.width(), fb.height()), (120, 40));
    assert_eq!(fb.cells().iter().filter(|c| c.ch == '▌').count(), 120);
}
