use base_ten_blocks::core::EntityId;
use base_ten_blocks::term::{frame_fingerprint, RenderThrottle, Sprite};
use base_ten_blocks::types::{ColorCategory, Grouping};

fn sprite(x: f32) -> Sprite {
    Sprite {
        id: EntityId(7),
        grouping: Grouping::Unit,
        color: ColorCategory::Base,
        x,
        y: 3.0,
        moving: false,
    }
}

#[test]
fn render_throttle_renders_first_frame() {
    let mut t = RenderThrottle::new(1000);
    assert!(t.should_render(0, 1, true));
}

#[test]
fn render_throttle_static_renders_on_change() {
    let mut t = RenderThrottle::new(1000);
    assert!(t.should_render(0, 1, true));
    assert!(t.should_render(1, 2, true));
}

#[test]
fn render_throttle_static_throttles_when_unchanged() {
    let mut t = RenderThrottle::new(1000);
    assert!(t.should_render(0, 1, true));
    assert!(!t.should_render(10, 1, true));
    assert!(!t.should_render(999, 1, true));
    assert!(t.should_render(1000, 1, true));
}

#[test]
fn render_throttle_animating_always_renders() {
    let mut t = RenderThrottle::new(1000);
    assert!(t.should_render(0, 1, false));
    assert!(t.should_render(16, 1, false));
    assert!(t.should_render(32, 1, false));
}

#[test]
fn fingerprint_tracks_positions_and_text() {
    let base = frame_fingerprint(&[sprite(1.0)], "12");
    assert_eq!(base, frame_fingerprint(&[sprite(1.0)], "12"));
    assert_ne!(base, frame_fingerprint(&[sprite(2.0)], "12"));
    assert_ne!(base, frame_fingerprint(&[sprite(1.0)], "123"));
    assert_ne!(base, frame_fingerprint(&[], "12"));
}
