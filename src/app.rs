//! Interactive session: wires the store, layout, input and render queue.
//!
//! The terminal loop in `main.rs` only feeds events and timestamps in and
//! flushes frames out; everything else lives here so it can be tested
//! without a terminal.

use crossterm::event::{KeyEvent, MouseEvent};

use crate::config::AppConfig;
use crate::core::{GroupStore, LayoutEngine, Snapshot};
use crate::input::{handle_key_event, handle_mouse_event, ValueEditor};
use crate::term::{frame_fingerprint, BoardLabels, BoardView, FrameBuffer, RenderQueue, Viewport};
use crate::types::BlockAction;

pub struct App {
    store: GroupStore,
    engine: LayoutEngine,
    view: BoardView,
    viewport: Viewport,
    queue: RenderQueue,
    editor: ValueEditor,
    status: Option<&'static str>,
}

impl App {
    pub fn new(config: &AppConfig, viewport: Viewport) -> Self {
        let view = BoardView::default();
        let store = GroupStore::with_value(config.initial_value);
        let queue = if config.animate {
            RenderQueue::new(config.animation_ms, config.stagger_ms)
        } else {
            RenderQueue::without_animation()
        };

        let mut app = Self {
            editor: ValueEditor::with_value(store.value()),
            store,
            engine: LayoutEngine::new(view.geometry(viewport)),
            view,
            viewport,
            queue,
            status: None,
        };
        let snap = app.laid_out();
        app.queue.settle_now(snap);
        app
    }

    pub fn store(&self) -> &GroupStore {
        &self.store
    }

    pub fn queue(&self) -> &RenderQueue {
        &self.queue
    }

    pub fn status(&self) -> Option<&'static str> {
        self.status
    }

    pub fn input_text(&self) -> &str {
        self.editor.text()
    }

    /// Apply an action and queue the resulting layout.
    ///
    /// Failed transitions leave the store and the queue untouched and only
    /// set the status line.
    pub fn apply(&mut self, action: BlockAction, now_ms: u64) -> bool {
        if !self.store.apply(action) {
            log::debug!("{} had nothing to regroup", action.as_str());
            self.status = Some(failure_reason(action));
            return false;
        }
        self.status = None;
        if let BlockAction::SetValue(_) = action {
            self.editor.set_value(self.store.value());
        }
        let snap = self.laid_out();
        self.queue.submit(snap, now_ms);
        true
    }

    /// Route a key press to the value field or the regrouping verbs.
    pub fn handle_key(&mut self, key: KeyEvent, now_ms: u64) -> bool {
        let action = self
            .editor
            .handle_key(key.code)
            .or_else(|| handle_key_event(key));
        match action {
            Some(action) => self.apply(action, now_ms),
            None => false,
        }
    }

    pub fn handle_mouse(&mut self, event: MouseEvent, now_ms: u64) -> bool {
        let place = self.view.place_at(self.viewport, event.column, event.row);
        match handle_mouse_event(event, place) {
            Some(action) => self.apply(action, now_ms),
            None => false,
        }
    }

    /// New terminal size: re-lay out and jump straight to the latest state.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.engine.set_geometry(self.view.geometry(viewport));
        let snap = self.laid_out();
        self.queue.settle_now(snap);
    }

    /// Advance time-based state (fallback completion of stalled transitions).
    pub fn tick(&mut self, now_ms: u64) {
        self.queue.advance(now_ms);
    }

    pub fn is_animating(&self) -> bool {
        self.queue.is_animating()
    }

    /// Draw the frame for `now_ms`; returns its fingerprint.
    pub fn render_into(&self, now_ms: u64, fb: &mut FrameBuffer) -> u64 {
        let sprites = self.queue.sprites(now_ms);
        let counts = self
            .queue
            .latest()
            .map(Snapshot::counts)
            .unwrap_or_default();
        let labels = BoardLabels {
            counts,
            value: self.store.value(),
            input: self.editor.text(),
            status: self.status,
        };
        self.view.render_into(&sprites, &labels, self.viewport, fb);

        let text = format!("{}|{}", self.editor.text(), self.status.unwrap_or(""));
        frame_fingerprint(&sprites, &text)
    }

    /// The frame for `now_ms` reached the terminal.
    pub fn frame_drawn(&mut self, now_ms: u64) {
        self.queue.notify_finished(now_ms);
    }

    fn laid_out(&self) -> Snapshot {
        let mut snap = self.store.snapshot();
        self.engine.apply(&mut snap);
        snap
    }
}

fn failure_reason(action: BlockAction) -> &'static str {
    match action {
        BlockAction::DecomposeFlat => "no flat to break apart",
        BlockAction::DecomposeRod => "no rod to break apart",
        BlockAction::ComposeRod => "need 10 loose units to make a rod",
        BlockAction::ComposeFlat => "need 10 rods to make a flat",
        BlockAction::SetValue(_) => "invalid value",
    }
}
