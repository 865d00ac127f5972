mod support;

use std::cell::Cell;
use std::rc::Rc;

use spark_broadcast::{BroadcastConfig, Event, FrameError, NotificationEnhancer};
use tokio::task::LocalSet;
use support::{block_on_local, counter, null_store, settle, Gate};

fn frame_counter(frames: Rc<Cell<u32>>) -> impl Fn() -> Result<(), FrameError> + 'static {
    move || {
        frames.set(frames.get() + 1);
        Ok(())
    }
}

#[test]
fn burst_collapses_into_one_round_per_tick() {
    block_on_local(async {
        let enhancer = NotificationEnhancer::new(BroadcastConfig::throttled()).unwrap();
        let store = enhancer.enhance(null_store()).unwrap();
        let gate = Gate::new();
        store.subscribe_async(gate.clone().listener());

        store.dispatch(Event::new("TEST"));
        store.dispatch(Event::new("TEST"));
        store.dispatch(Event::new("TEST"));
        assert_eq!(gate.calls(), 0);

        settle().await;
        assert_eq!(gate.calls(), 1);

        // The rest of the burst arrived while the first round was pending
        gate.open();
        settle().await;
        assert_eq!(gate.calls(), 2);

        gate.open();
        settle().await;
        assert_eq!(gate.calls(), 2);
        assert!(enhancer.notification().is_settled());
    });
}

#[test]
fn changes_during_a_round_get_exactly_one_more() {
    block_on_local(async {
        let enhancer = NotificationEnhancer::new(BroadcastConfig::throttled()).unwrap();
        let store = enhancer.enhance(null_store()).unwrap();
        let gate = Gate::new();
        store.subscribe_async(gate.clone().listener());

        store.dispatch(Event::new("FIRST"));
        settle().await;
        assert_eq!(gate.calls(), 1);

        for _ in 0..5 {
            store.dispatch(Event::new("DURING"));
        }
        settle().await;
        assert_eq!(gate.calls(), 1, "no overlapping cycle while one is running");

        gate.open();
        settle().await;
        assert_eq!(gate.calls(), 2);

        gate.open();
        settle().await;
        assert_eq!(gate.calls(), 2);
        assert_eq!(enhancer.stats().rounds, 2);
    });
}

#[test]
fn unthrottled_notifies_on_every_dispatch() {
    block_on_local(async {
        let enhancer = NotificationEnhancer::new(BroadcastConfig::default()).unwrap();
        let store = enhancer.enhance(null_store()).unwrap();
        let gate = Gate::new();
        store.subscribe_async(gate.clone().listener());

        // Renders never settle, rounds still start one per dispatch
        store.dispatch(Event::new("TEST"));
        store.dispatch(Event::new("TEST"));
        store.dispatch(Event::new("TEST"));
        assert_eq!(gate.calls(), 3);
        assert_eq!(gate.waiting(), 3);
    });
}

#[test]
fn unthrottled_sync_dispatch_needs_no_executor() {
    // Plain thread, no tokio runtime and no LocalSet
    let enhancer = NotificationEnhancer::default();
    let store = enhancer.enhance(null_store()).unwrap();
    let calls = Rc::new(Cell::new(0));
    store.subscribe(counter(calls.clone()));

    store.dispatch(Event::new("TEST"));
    store.dispatch(Event::new("TEST"));
    assert_eq!(calls.get(), 2);
    assert_eq!(enhancer.notification().result(), Some(Ok(())));

    store.dispatch(Event::new(enhancer.immediate("NOW")));
    assert_eq!(calls.get(), 3);
}

#[test]
fn torn_down_executor_does_not_wedge_the_cycle() {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap();
    let enhancer = NotificationEnhancer::new(BroadcastConfig::throttled()).unwrap();
    let store = enhancer.enhance(null_store()).unwrap();
    let calls = Rc::new(Cell::new(0));
    store.subscribe(counter(calls.clone()));

    {
        let _rt = rt.enter();
        let abandoned = LocalSet::new();
        let _local = abandoned.enter();
        store.dispatch(Event::new("A"));
    }
    assert_eq!(calls.get(), 0);
    assert!(enhancer.notification().is_settled());

    LocalSet::new().block_on(&rt, async {
        store.dispatch(Event::new("B"));
        settle().await;
    });
    assert_eq!(calls.get(), 1);
    assert_eq!(enhancer.stats().coalesced, 0);
}

#[test]
fn animation_frame_requested_per_throttled_round() {
    block_on_local(async {
        let frames = Rc::new(Cell::new(0));
        let enhancer = NotificationEnhancer::builder()
            .throttle(true)
            .frame_requester(frame_counter(frames.clone()))
            .build()
            .unwrap();
        let store = enhancer.enhance(null_store()).unwrap();
        let calls = Rc::new(Cell::new(0));
        store.subscribe(counter(calls.clone()));

        store.dispatch(Event::new("TEST"));
        store.dispatch(Event::new("TEST"));
        settle().await;

        assert_eq!(calls.get(), 2);
        assert_eq!(frames.get(), 2);
        assert_eq!(enhancer.stats().frames_requested, 2);
    });
}

#[test]
fn animation_frame_not_requested_when_disabled() {
    block_on_local(async {
        let frames = Rc::new(Cell::new(0));
        let enhancer = NotificationEnhancer::builder()
            .throttle(true)
            .request_animation(false)
            .frame_requester(frame_counter(frames.clone()))
            .build()
            .unwrap();
        let store = enhancer.enhance(null_store()).unwrap();
        store.subscribe(|| {});

        store.dispatch(Event::new("TEST"));
        store.dispatch(Event::new("TEST"));
        settle().await;

        assert_eq!(frames.get(), 0);
    });
}

#[test]
fn frame_count_ignores_listener_count() {
    block_on_local(async {
        let frames = Rc::new(Cell::new(0));
        let enhancer = NotificationEnhancer::builder()
            .throttle(true)
            .frame_requester(frame_counter(frames.clone()))
            .build()
            .unwrap();
        let store = enhancer.enhance(null_store()).unwrap();
        let calls = Rc::new(Cell::new(0));
        for _ in 0..4 {
            store.subscribe(counter(calls.clone()));
        }

        store.dispatch(Event::new("TEST"));
        settle().await;

        assert_eq!(calls.get(), 4);
        assert_eq!(frames.get(), 1);
    });
}

#[test]
fn missing_or_failing_frame_hook_is_harmless() {
    block_on_local(async {
        let enhancer = NotificationEnhancer::new(BroadcastConfig::throttled()).unwrap();
        let store = enhancer.enhance(null_store()).unwrap();
        store.subscribe(|| {});
        store.dispatch(Event::new("TEST"));
        assert_eq!(enhancer.notification().await, Ok(()));

        let enhancer = NotificationEnhancer::builder()
            .throttle(true)
            .frame_requester(|| -> Result<(), FrameError> { Err(FrameError("no window".into())) })
            .build()
            .unwrap();
        let store = enhancer.enhance(null_store()).unwrap();
        store.subscribe(|| {});
        store.dispatch(Event::new("TEST"));
        assert_eq!(enhancer.notification().await, Ok(()));
        assert_eq!(enhancer.stats().frames_requested, 0);
    });
}

#[test]
fn immediate_fires_alongside_throttled_round() {
    block_on_local(async {
        let enhancer = NotificationEnhancer::new(BroadcastConfig::throttled()).unwrap();
        let store = enhancer.enhance(null_store()).unwrap();
        let gate = Gate::new();
        store.subscribe_async(gate.clone().listener());

        store.dispatch(Event::new("TEST"));
        store.dispatch(Event::new("TEST"));
        store.dispatch(Event::new("TEST"));
        store.dispatch(Event::new(enhancer.immediate("TEST")));
        // Immediate round ran inside dispatch
        assert_eq!(gate.calls(), 1);

        settle().await;
        assert_eq!(gate.calls(), 2);
        assert_eq!(enhancer.stats().immediate_rounds, 1);
    });
}

#[test]
fn immediate_while_cycle_is_busy() {
    block_on_local(async {
        let enhancer = NotificationEnhancer::new(BroadcastConfig::throttled()).unwrap();
        let store = enhancer.enhance(null_store()).unwrap();
        let gate = Gate::new();
        store.subscribe_async(gate.clone().listener());

        store.dispatch(Event::new("TEST"));
        settle().await;
        assert_eq!(gate.calls(), 1);

        // The throttled round is still rendering; the immediate one overlaps it
        store.dispatch(Event::new(enhancer.immediate("PAINT")));
        assert_eq!(gate.calls(), 2);
        assert_eq!(gate.waiting(), 2);

        gate.open();
        settle().await;
        assert_eq!(gate.calls(), 2);
        assert!(enhancer.notification().is_settled());
    });
}
