use base_ten_blocks::core::{GroupStore, LayoutEngine, Snapshot};
use base_ten_blocks::term::RenderQueue;
use base_ten_blocks::types::{ANIMATION_MS, FALLBACK_SLACK_MS, STAGGER_MS};

fn laid_out(store: &GroupStore) -> Snapshot {
    let mut snap = store.snapshot();
    LayoutEngine::default().apply(&mut snap);
    snap
}

fn assert_at_targets(q: &RenderQueue, snap: &Snapshot, now_ms: u64) {
    let sprites = q.sprites(now_ms);
    assert_eq!(sprites.len(), snap.len());
    for s in &sprites {
        let t = snap.get(s.id).and_then(|row| row.target).unwrap();
        assert_eq!((s.x, s.y), (t.x, t.y));
        assert!(!s.moving);
    }
}

#[test]
fn rapid_submissions_converge_on_latest() {
    let mut store = GroupStore::with_value(123);
    let mut q = RenderQueue::new(ANIMATION_MS, STAGGER_MS);
    q.settle_now(laid_out(&store));

    assert!(store.decompose_flat());
    q.submit(laid_out(&store), 0);
    assert!(store.decompose_rod());
    q.submit(laid_out(&store), 5);
    assert!(store.decompose_rod());
    let latest = laid_out(&store);
    q.submit(latest.clone(), 10);
    assert_eq!(q.latest(), Some(&latest));

    // Keep drawing frames until everything settles.
    let mut now = 0;
    while q.is_animating() {
        now += 16;
        q.advance(now);
        q.notify_finished(now);
        assert!(now < 10_000, "queue never settled");
    }
    assert_at_targets(&q, &latest, now);
}

#[test]
fn stalled_view_is_rescued_by_deadline() {
    let mut store = GroupStore::with_value(50);
    let mut q = RenderQueue::new(ANIMATION_MS, STAGGER_MS);
    q.settle_now(laid_out(&store));
    assert!(store.decompose_rod());
    q.submit(laid_out(&store), 0);
    assert!(store.compose_units_to_rod());
    let latest = laid_out(&store);
    q.submit(latest.clone(), 1);

    // No notify_finished at all: only the deadline moves the queue along.
    let span = (ANIMATION_MS + 9 * STAGGER_MS + FALLBACK_SLACK_MS) as u64;
    q.advance(span);
    assert!(q.is_animating());
    assert!(!q.has_pending());
    q.advance(2 * span);
    assert!(!q.is_animating());
    assert_at_targets(&q, &latest, 2 * span);
}

#[test]
fn settle_now_discards_in_flight_work() {
    let mut store = GroupStore::with_value(20);
    let mut q = RenderQueue::new(ANIMATION_MS, STAGGER_MS);
    q.submit(laid_out(&store), 0);
    assert!(store.decompose_rod());
    q.submit(laid_out(&store), 1);

    let latest = laid_out(&store);
    q.settle_now(latest.clone());
    assert!(!q.is_animating());
    assert!(!q.has_pending());
    assert_at_targets(&q, &latest, 2);
}
