//! RenderQueue: plays layout changes as animated transitions.
//!
//! Snapshots may be submitted faster than transitions finish. The queue keeps
//! at most one pending snapshot (the latest; intermediate ones are dropped)
//! and starts it from the currently displayed positions once the in-flight
//! transition completes.
//!
//! A transition completes when the view reports it has drawn the settled
//! frame ([`RenderQueue::notify_finished`]) or, failing that, when its
//! fallback deadline passes in [`RenderQueue::advance`]. Either way the queue
//! converges on the latest submitted snapshot.

use std::collections::HashMap;

use crate::core::{EntityId, Snapshot, Target};
use crate::types::{ColorCategory, Grouping, FALLBACK_SLACK_MS, OFF_CANVAS};

/// One entity as it should be drawn right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub id: EntityId,
    pub grouping: Grouping,
    pub color: ColorCategory,
    pub x: f32,
    pub y: f32,
    /// Still travelling towards its target.
    pub moving: bool,
}

#[derive(Debug, Clone)]
struct Transition {
    snapshot: Snapshot,
    from: HashMap<EntityId, (f32, f32)>,
    started_ms: u64,
    /// Time until the last staggered entity arrives.
    span_ms: u64,
}

impl Transition {
    fn deadline_ms(&self) -> u64 {
        self.started_ms + self.span_ms + FALLBACK_SLACK_MS as u64
    }
}

#[derive(Debug, Clone)]
pub struct RenderQueue {
    animation_ms: u32,
    stagger_ms: u32,
    /// Settled snapshot (shown when nothing is in flight).
    current: Option<Snapshot>,
    transition: Option<Transition>,
    pending: Option<Snapshot>,
    /// Last settled position of every entity.
    displayed: HashMap<EntityId, (f32, f32)>,
}

impl RenderQueue {
    pub fn new(animation_ms: u32, stagger_ms: u32) -> Self {
        Self {
            animation_ms,
            stagger_ms,
            current: None,
            transition: None,
            pending: None,
            displayed: HashMap::new(),
        }
    }

    /// Queue that settles every snapshot immediately.
    pub fn without_animation() -> Self {
        Self::new(0, 0)
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Most recent snapshot known to the queue.
    pub fn latest(&self) -> Option<&Snapshot> {
        self.pending
            .as_ref()
            .or(self.transition.as_ref().map(|t| &t.snapshot))
            .or(self.current.as_ref())
    }

    /// Submit a laid-out snapshot.
    pub fn submit(&mut self, snapshot: Snapshot, now_ms: u64) {
        if self.transition.is_some() {
            if self.pending.replace(snapshot).is_some() {
                log::trace!("render queue: dropped intermediate snapshot");
            }
            return;
        }
        self.start(snapshot, now_ms);
    }

    /// Show `snapshot` immediately, discarding anything in flight or pending.
    ///
    /// Used when geometry changes make in-flight positions meaningless.
    pub fn settle_now(&mut self, snapshot: Snapshot) {
        self.transition = None;
        self.pending = None;
        self.settle(snapshot);
    }

    /// Force-complete a transition whose deadline has passed.
    pub fn advance(&mut self, now_ms: u64) {
        let overdue = self
            .transition
            .as_ref()
            .is_some_and(|t| now_ms >= t.deadline_ms());
        if overdue {
            log::debug!("render queue: transition passed its deadline, completing");
            self.finish(now_ms);
        }
    }

    /// The view drew a frame; completes the transition if it has settled.
    pub fn notify_finished(&mut self, now_ms: u64) {
        if self.transition.is_some() && self.is_settled(now_ms) {
            self.finish(now_ms);
        }
    }

    /// True when every sprite has reached its target.
    pub fn is_settled(&self, now_ms: u64) -> bool {
        match &self.transition {
            Some(t) => now_ms >= t.started_ms + t.span_ms,
            None => true,
        }
    }

    /// Sprites at their interpolated positions for `now_ms`.
    pub fn sprites(&self, now_ms: u64) -> Vec<Sprite> {
        if let Some(t) = &self.transition {
            return t
                .snapshot
                .entities
                .iter()
                .map(|row| {
                    let (tx, ty) = target_xy(row.target);
                    let (fx, fy) = t.from.get(&row.id()).copied().unwrap_or((tx, ty));
                    let delay = row.stagger.unwrap_or(0) as u64 * self.stagger_ms as u64;
                    let p = self.progress(now_ms.saturating_sub(t.started_ms), delay);
                    Sprite {
                        id: row.id(),
                        grouping: row.entity.grouping(),
                        color: row.color,
                        x: fx + (tx - fx) * p,
                        y: fy + (ty - fy) * p,
                        moving: p < 1.0 && (fx, fy) != (tx, ty),
                    }
                })
                .collect();
        }

        let Some(snap) = &self.current else {
            return Vec::new();
        };
        snap.entities
            .iter()
            .map(|row| {
                let (x, y) = target_xy(row.target);
                Sprite {
                    id: row.id(),
                    grouping: row.entity.grouping(),
                    color: row.color,
                    x,
                    y,
                    moving: false,
                }
            })
            .collect()
    }

    fn progress(&self, elapsed_ms: u64, delay_ms: u64) -> f32 {
        if self.animation_ms == 0 {
            return 1.0;
        }
        let t = elapsed_ms.saturating_sub(delay_ms) as f32 / self.animation_ms as f32;
        t.clamp(0.0, 1.0)
    }

    fn start(&mut self, snapshot: Snapshot, now_ms: u64) {
        if self.animation_ms == 0 {
            self.settle(snapshot);
            return;
        }
        let max_stagger = snapshot.max_stagger().unwrap_or(0) as u64;
        let span_ms = self.animation_ms as u64 + max_stagger * self.stagger_ms as u64;
        self.transition = Some(Transition {
            snapshot,
            from: self.displayed.clone(),
            started_ms: now_ms,
            span_ms,
        });
    }

    fn finish(&mut self, now_ms: u64) {
        if let Some(t) = self.transition.take() {
            self.settle(t.snapshot);
        }
        if let Some(next) = self.pending.take() {
            self.start(next, now_ms);
        }
    }

    fn settle(&mut self, snapshot: Snapshot) {
        self.displayed = snapshot
            .entities
            .iter()
            .map(|row| (row.id(), target_xy(row.target)))
            .collect();
        self.current = Some(snapshot);
    }
}

fn target_xy(target: Option<Target>) -> (f32, f32) {
    target.map_or((OFF_CANVAS, OFF_CANVAS), |t| (t.x, t.y))
}
