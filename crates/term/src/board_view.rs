//! BoardView: draws place-value columns, blocks and labels into a framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Screen layout, top to bottom:
//!
//! Blocks that do not fit their frame are counted instead of drawn and the
//! frame's top border shows "+N more" (in squares), so the board never
//! silently shows less than its labels claim.
//!
//! ```text
//! Value: 123_                f/r break  u/t bundle  q quit
//! ┌Hundreds─────┐ ┌Tens─────────┐ ┌Ones─────────┐
//! │  blocks     │ │  blocks     │ │  blocks     │
//! └─────────────┘ └─────────────┘ └─────────────┘
//!   one hundred       2 tens          3 ones
//!  = 100 squares   = 20 squares    = 3 squares
//!              100 + 20 + 3 = 123
//! ```

use crate::core::format::{column_count, count_label, squares_label, sum_equation};
use crate::core::{GroupCounts, LayoutGeometry};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::render_queue::Sprite;
use crate::types::{ColorCategory, Grouping, Place};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Everything one frame shows besides the blocks' positions.
#[derive(Debug, Clone, Copy)]
pub struct BoardLabels<'a> {
    pub counts: GroupCounts,
    pub value: u32,
    /// Text of the value field.
    pub input: &'a str,
    /// One-line status (e.g. why the last action did nothing).
    pub status: Option<&'a str>,
}

/// Rows above the column frames.
const HEADER_ROWS: u16 = 1;
/// Rows below the column frames: two label lines and the sum equation.
const FOOTER_ROWS: u16 = 3;
/// Terminal columns between place-value frames.
const FRAME_GAP: u16 = 1;

const HELP: &str = "f/r break  u/t bundle  0-9+Enter value  q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardView {
    /// Gap between packed blocks, in cells.
    unit_gap: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        Self { unit_gap: 1 }
    }
}

/// Outer rectangle of one place-value frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrameRect {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl BoardView {
    pub fn new(unit_gap: u16) -> Self {
        Self { unit_gap }
    }

    /// Layout geometry in terminal cells for `viewport`.
    ///
    /// One unit is one cell; the chart is the area inside the column frames
    /// with the frame gaps counted as column gaps.
    pub fn geometry(&self, viewport: Viewport) -> LayoutGeometry {
        let column_gap = (FRAME_GAP + 2) as f32;
        let column_width = self.frame_width(viewport).saturating_sub(2) as f32;
        let chart_height = self.frame_height(viewport).saturating_sub(2) as f32;
        LayoutGeometry::new(
            column_width,
            chart_height,
            2.0 * (column_width + column_gap),
        )
        .with_unit(1.0, self.unit_gap as f32)
        .with_column_gap(column_gap)
        .with_padding(0.0)
    }

    /// Column under a terminal cell, for mouse hit-testing.
    pub fn place_at(&self, viewport: Viewport, x: u16, y: u16) -> Option<Place> {
        Place::ALL.into_iter().find(|&place| {
            let r = self.frame_rect(viewport, place);
            x >= r.x && x < r.x + r.w && y >= r.y && y < r.y + r.h
        })
    }

    /// Render sprites and labels into an existing framebuffer.
    pub fn render_into(
        &self,
        sprites: &[Sprite],
        labels: &BoardLabels<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        self.draw_header(fb, labels, viewport);

        let border = CellStyle::fg(Rgb::new(150, 150, 160));
        let heading = CellStyle::fg(Rgb::new(230, 230, 230)).bold();
        for place in Place::ALL {
            let r = self.frame_rect(viewport, place);
            draw_border(fb, r, border);
            fb.put_str(r.x + 1, r.y, place.label(), heading);
        }

        // Blocks are laid out relative to the hundreds frame's interior.
        let origin = self.frame_rect(viewport, Place::Hundreds);
        let (ox, oy) = (origin.x + 1, origin.y + 1);
        let mut hidden = [0u32; 3];
        for s in sprites {
            match self.sprite_cell(viewport, ox, oy, s) {
                Some((px, py)) => {
                    let (ch, style) = sprite_glyph(s);
                    fb.put_char(px, py, ch, style);
                }
                // Mid-flight sprites may cross the gaps between frames.
                None if !s.moving => hidden[s.grouping.place().column_index()] += 1,
                None => {}
            }
        }

        let overflow = CellStyle::fg(Rgb::new(255, 200, 90)).bold();
        for place in Place::ALL {
            let n = hidden[place.column_index()];
            if n == 0 {
                continue;
            }
            let r = self.frame_rect(viewport, place);
            let text = format!("+{} more", n);
            let w = text.chars().count() as u16;
            let x = (r.x + r.w).saturating_sub(w + 1);
            if x > r.x + place.label().len() as u16 + 1 {
                fb.put_str(x, r.y, &text, overflow);
            }
        }

        self.draw_footer(fb, labels, viewport);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        sprites: &[Sprite],
        labels: &BoardLabels<'_>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(sprites, labels, viewport, &mut fb);
        fb
    }

    /// Terminal cell of a sprite, if it lands inside a frame's interior.
    fn sprite_cell(
        &self,
        viewport: Viewport,
        ox: u16,
        oy: u16,
        s: &Sprite,
    ) -> Option<(u16, u16)> {
        if s.x < 0.0 || s.y < 0.0 {
            return None;
        }
        let px = ox.saturating_add(s.x.round() as u16);
        let py = oy.saturating_add(s.y.round() as u16);
        let place = self.place_at(viewport, px, py)?;
        let r = self.frame_rect(viewport, place);
        let inside = px > r.x && px + 1 < r.x + r.w && py > r.y && py + 1 < r.y + r.h;
        inside.then_some((px, py))
    }

    fn frame_width(&self, viewport: Viewport) -> u16 {
        viewport.width.saturating_sub(2 * FRAME_GAP) / 3
    }

    fn frame_height(&self, viewport: Viewport) -> u16 {
        viewport.height.saturating_sub(HEADER_ROWS + FOOTER_ROWS)
    }

    fn frame_rect(&self, viewport: Viewport, place: Place) -> FrameRect {
        let w = self.frame_width(viewport);
        FrameRect {
            x: place.column_index() as u16 * (w + FRAME_GAP),
            y: HEADER_ROWS,
            w,
            h: self.frame_height(viewport),
        }
    }

    fn draw_header(&self, fb: &mut FrameBuffer, labels: &BoardLabels<'_>, viewport: Viewport) {
        let label = CellStyle::fg(Rgb::new(220, 220, 220)).bold();
        let value = CellStyle::fg(Rgb::new(255, 230, 120));
        fb.put_str(0, 0, "Value: ", label);
        fb.put_str(7, 0, labels.input, value);
        fb.put_char(7 + labels.input.chars().count() as u16, 0, '_', value.dim());

        let text = labels.status.unwrap_or(HELP);
        let w = text.chars().count() as u16;
        let x = viewport.width.saturating_sub(w);
        if x > 7 + labels.input.len() as u16 + 2 {
            let style = match labels.status {
                Some(_) => CellStyle::fg(Rgb::new(240, 140, 120)),
                None => CellStyle::fg(Rgb::new(140, 140, 150)),
            };
            fb.put_str(x, 0, text, style);
        }
    }

    fn draw_footer(&self, fb: &mut FrameBuffer, labels: &BoardLabels<'_>, viewport: Viewport) {
        let y = HEADER_ROWS + self.frame_height(viewport);
        let first = CellStyle::fg(Rgb::new(235, 235, 235)).bold();
        let second = CellStyle::fg(Rgb::new(200, 200, 200));

        for place in Place::ALL {
            let r = self.frame_rect(viewport, place);
            let count = column_count(labels.counts, place);
            fb.put_str_centered(r.x, y, r.w, &count_label(count, place), first);
            fb.put_str_centered(r.x, y + 1, r.w, &squares_label(count, place), second);
        }

        let sum = sum_equation(labels.counts, labels.value);
        fb.put_str_centered(0, y + 2, viewport.width, &sum, first);
    }
}

fn draw_border(fb: &mut FrameBuffer, r: FrameRect, style: CellStyle) {
    if r.w < 2 || r.h < 2 {
        return;
    }
    let (x, y, w, h) = (r.x, r.y, r.w, r.h);

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// Glyph and color for a sprite.
///
/// Rods use a left half block so neighbouring rods stay visually separate.
fn sprite_glyph(s: &Sprite) -> (char, CellStyle) {
    let (base, highlight, ch) = match s.grouping {
        Grouping::Flat => (Rgb::new(220, 120, 80), Rgb::new(245, 170, 120), '█'),
        Grouping::Rod => (Rgb::new(80, 150, 220), Rgb::new(130, 200, 245), '▌'),
        Grouping::Unit => (Rgb::new(90, 190, 110), Rgb::new(150, 230, 160), '■'),
    };
    let fg = match s.color {
        ColorCategory::Base => base,
        ColorCategory::HighlightGroup => highlight,
    };
    let style = CellStyle::fg(fg);
    (ch, if s.moving { style.bold() } else { style })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EntityId, GroupStore, LayoutEngine};

    fn labels(counts: GroupCounts, value: u32) -> BoardLabels<'static> {
        BoardLabels {
            counts,
            value,
            input: "123",
            status: None,
        }
    }

    #[test]
    fn geometry_matches_frames() {
        let view = BoardView::default();
        let g = view.geometry(Viewport::new(80, 30));
        // frame width = (80 - 2) / 3 = 26, interior 24
        assert_eq!(g.column_width, 24.0);
        assert_eq!(g.chart_height, 24.0);
        assert_eq!(g.column_x(Place::Tens), 27.0);
        assert_eq!(g.column_x(Place::Ones), 54.0);
    }

    #[test]
    fn place_at_hits_each_frame() {
        let view = BoardView::default();
        let vp = Viewport::new(80, 30);
        assert_eq!(view.place_at(vp, 0, 1), Some(Place::Hundreds));
        assert_eq!(view.place_at(vp, 30, 10), Some(Place::Tens));
        assert_eq!(view.place_at(vp, 79, 10), Some(Place::Ones));
        assert_eq!(view.place_at(vp, 26, 10), None); // gap between frames
        assert_eq!(view.place_at(vp, 10, 0), None); // header row
    }

    #[test]
    fn sprite_glyph_marks_grouping() {
        let s = Sprite {
            id: EntityId(0),
            grouping: Grouping::Rod,
            color: ColorCategory::Base,
            x: 0.0,
            y: 0.0,
            moving: false,
        };
        assert_eq!(sprite_glyph(&s).0, '▌');
    }

    #[test]
    fn off_canvas_sprites_are_skipped() {
        let view = BoardView::default();
        let vp = Viewport::new(80, 30);
        let s = Sprite {
            id: EntityId(0),
            grouping: Grouping::Unit,
            color: ColorCategory::Base,
            x: -10_000.0,
            y: -10_000.0,
            moving: false,
        };
        let fb = view.render(&[s], &labels(GroupCounts::default(), 0), vp);
        assert!(fb.cells().iter().all(|c| c.ch != '■'));
    }

    #[test]
    fn renders_flat_in_hundreds_frame() {
        let view = BoardView::default();
        let vp = Viewport::new(80, 30);
        let store = GroupStore::with_value(100);
        let mut snap = store.snapshot();
        LayoutEngine::new(view.geometry(vp)).apply(&mut snap);
        let sprites: Vec<Sprite> = snap
            .entities
            .iter()
            .map(|row| Sprite {
                id: row.id(),
                grouping: row.entity.grouping(),
                color: row.color,
                x: row.target.unwrap().x,
                y: row.target.unwrap().y,
                moving: false,
            })
            .collect();
        let fb = view.render(&sprites, &labels(snap.counts(), 100), vp);

        // Interior bottom row of the hundreds frame is y = 1 + 1 + 23 = 25.
        let bottom = fb.row_text(25);
        let first_ten: String = bottom.chars().skip(1).take(10).collect();
        assert_eq!(first_ten, "██████████");
        let blocks = fb.cells().iter().filter(|c| c.ch == '█').count();
        assert_eq!(blocks, 100);
    }
}
