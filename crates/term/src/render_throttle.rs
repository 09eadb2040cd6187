//! Redraw throttling for the terminal loop.

use crate::render_queue::Sprite;

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_static_interval_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    has_rendered: bool,
}

impl RenderThrottle {
    pub fn new(min_static_interval_ms: u64) -> Self {
        Self {
            min_static_interval_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            has_rendered: false,
        }
    }

    /// Decide whether to draw a new frame.
    ///
    /// - While animating (`is_static=false`): always draw.
    /// - Otherwise: draw on fingerprint change, else at most once per
    ///   `min_static_interval_ms`.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, is_static: bool) -> bool {
        let changed = fingerprint != self.last_fingerprint;
        let due = now_ms.saturating_sub(self.last_render_ms) >= self.min_static_interval_ms;

        if self.has_rendered && is_static && !changed && !due {
            return false;
        }

        self.has_rendered = true;
        self.last_render_ms = now_ms;
        self.last_fingerprint = fingerprint;
        true
    }
}

/// FNV-1a over everything that changes what a frame looks like.
pub fn frame_fingerprint(sprites: &[Sprite], text: &str) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    let mut feed = |bytes: &[u8]| {
        for &b in bytes {
            h ^= b as u64;
            h = h.wrapping_mul(0x00000100000001B3);
        }
    };
    for s in sprites {
        feed(&s.id.0.to_le_bytes());
        feed(&s.x.to_bits().to_le_bytes());
        feed(&s.y.to_bits().to_le_bytes());
        feed(&[s.color as u8, s.grouping as u8]);
    }
    feed(text.as_bytes());
    h
}
