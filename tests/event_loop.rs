//! End-to-end tests for dispatch, processing and multicast delivery.

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, timeout, Instant};

use evloop::{
    EventLoop, EventMessage, EventProcessor, EventType, MessageBuilder, Subscription,
};

/// Bounded receive; every delivery in this suite must land within a second.
async fn recv_within(sub: &mut Subscription) -> Option<EventMessage> {
    timeout(Duration::from_secs(1), sub.recv())
        .await
        .expect("no delivery within 1s")
}

/// Tags every message with a strictly increasing counter.
#[derive(Default)]
struct Counting {
    count: AtomicI64,
}

impl EventProcessor for Counting {
    fn can_process(&self, _message: &EventMessage) -> bool {
        true
    }

    fn process(&self, message: &EventMessage) -> Vec<EventMessage> {
        let n = self.count.fetch_add(1, Ordering::SeqCst);
        vec![MessageBuilder::from_message(message).header("count", n).build()]
    }
}

#[tokio::test]
async fn single_subscriber_receives_dispatched_message() {
    let event_loop = EventLoop::new();
    let mut sub = event_loop.subscribe();

    event_loop
        .dispatch(EventMessage::with_payload("TEST"))
        .unwrap();

    let msg = recv_within(&mut sub).await.unwrap();
    assert_eq!(msg.payload_ref::<&str>(), Some(&"TEST"));
}

#[tokio::test]
async fn every_subscriber_sees_each_message_exactly_once_in_order() {
    let event_loop = EventLoop::new();
    let mut first = event_loop.subscribe();
    let mut second = event_loop.subscribe();

    for n in 0..3i32 {
        event_loop.dispatch(EventMessage::with_payload(n)).unwrap();
    }

    for sub in [&mut first, &mut second] {
        for expected in 0..3i32 {
            let msg = recv_within(sub).await.unwrap();
            assert_eq!(msg.payload_ref::<i32>(), Some(&expected));
        }
        assert!(sub.try_recv().is_none());
    }
}

#[tokio::test]
async fn dispatch_all_flattens_sequence_in_order() {
    let event_loop = EventLoop::new();
    let mut sub = event_loop.subscribe();

    event_loop
        .dispatch_all((0..5i32).map(EventMessage::with_payload))
        .unwrap();

    for expected in 0..5i32 {
        let msg = recv_within(&mut sub).await.unwrap();
        assert_eq!(msg.payload_ref::<i32>(), Some(&expected));
    }
}

#[tokio::test]
async fn dispatch_stream_forwards_each_item() {
    let event_loop = EventLoop::new();
    let mut sub = event_loop.subscribe();

    event_loop.dispatch_stream(futures::stream::iter(
        (0..3i32).map(EventMessage::with_payload),
    ));

    for expected in 0..3i32 {
        let msg = recv_within(&mut sub).await.unwrap();
        assert_eq!(msg.payload_ref::<i32>(), Some(&expected));
    }
}

#[tokio::test]
async fn dispatch_pending_delivers_exactly_one_event() {
    let event_loop = EventLoop::new();
    let mut sub = event_loop.subscribe();

    event_loop.dispatch_pending(async {
        sleep(Duration::from_millis(10)).await;
        EventMessage::with_payload("resolved")
    });

    let msg = recv_within(&mut sub).await.unwrap();
    assert_eq!(msg.payload_ref::<&str>(), Some(&"resolved"));
    assert!(sub.try_recv().is_none());
}

#[tokio::test]
async fn counting_processor_produces_identical_value_for_all_subscribers() {
    let event_loop = EventLoop::with_processors(vec![Arc::new(Counting::default())]);
    let mut first = event_loop.subscribe();
    let mut second = event_loop.subscribe();

    event_loop
        .dispatch(EventMessage::with_payload("TEST"))
        .unwrap();

    let a = recv_within(&mut first).await.unwrap();
    let b = recv_within(&mut second).await.unwrap();
    assert_eq!(a.header("count").and_then(|v| v.as_i64()), Some(0));
    assert_eq!(b.header("count").and_then(|v| v.as_i64()), Some(0));

    // Second message advances the shared counter exactly once.
    event_loop.dispatch(EventMessage::with_payload("TEST")).unwrap();
    let a = recv_within(&mut first).await.unwrap();
    let b = recv_within(&mut second).await.unwrap();
    assert_eq!(a.header("count").and_then(|v| v.as_i64()), Some(1));
    assert_eq!(b.header("count").and_then(|v| v.as_i64()), Some(1));
}

#[tokio::test]
async fn task_work_executes_exactly_once_and_event_still_flows() {
    let event_loop = EventLoop::new();
    let mut first = event_loop.subscribe();
    let mut second = event_loop.subscribe();

    let hits = Arc::new(AtomicUsize::new(0));
    let h = Arc::clone(&hits);
    event_loop
        .dispatch(EventMessage::task(move || {
            h.fetch_add(1, Ordering::SeqCst);
        }))
        .unwrap();

    let a = recv_within(&mut first).await.unwrap();
    let b = recv_within(&mut second).await.unwrap();
    assert_eq!(a.event_type(), &EventType::Task);
    assert_eq!(b.event_type(), &EventType::Task);
    // Once total, not once per subscriber.
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn task_work_runs_with_zero_subscribers() {
    let event_loop = EventLoop::new();

    let hits = Arc::new(AtomicUsize::new(0));
    let h = Arc::clone(&hits);
    event_loop
        .dispatch(EventMessage::task(move || {
            h.fetch_add(1, Ordering::SeqCst);
        }))
        .unwrap();

    let deadline = Instant::now() + Duration::from_secs(1);
    while hits.load(Ordering::SeqCst) == 0 {
        assert!(Instant::now() < deadline, "task did not run within 1s");
        sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn panicking_task_does_not_stop_subsequent_messages() {
    let event_loop = EventLoop::new();
    let mut sub = event_loop.subscribe();

    event_loop
        .dispatch(EventMessage::task(|| panic!("task boom")))
        .unwrap();
    event_loop
        .dispatch(EventMessage::with_payload("after"))
        .unwrap();

    // The failed task's message is still forwarded, then the next one.
    let first = recv_within(&mut sub).await.unwrap();
    assert_eq!(first.event_type(), &EventType::Task);
    let second = recv_within(&mut sub).await.unwrap();
    assert_eq!(second.payload_ref::<&str>(), Some(&"after"));
}

#[tokio::test]
async fn late_subscriber_sees_no_history() {
    let event_loop = EventLoop::new();
    let mut early = event_loop.subscribe();

    event_loop.dispatch(EventMessage::with_payload(1i32)).unwrap();
    // Receiving on the early subscription proves the first message has been
    // fanned out before the late subscription attaches.
    assert_eq!(
        recv_within(&mut early).await.unwrap().payload_ref::<i32>(),
        Some(&1)
    );

    let mut late = event_loop.subscribe();
    event_loop.dispatch(EventMessage::with_payload(2i32)).unwrap();

    assert_eq!(
        recv_within(&mut late).await.unwrap().payload_ref::<i32>(),
        Some(&2)
    );
    assert!(late.try_recv().is_none());
}

#[tokio::test]
async fn cancelling_one_subscriber_leaves_others_running() {
    let event_loop = EventLoop::new();
    let cancelled = event_loop.subscribe();
    let mut kept = event_loop.subscribe();

    drop(cancelled);
    event_loop
        .dispatch(EventMessage::with_payload("still here"))
        .unwrap();

    let msg = recv_within(&mut kept).await.unwrap();
    assert_eq!(msg.payload_ref::<&str>(), Some(&"still here"));
}

#[tokio::test]
async fn filtered_subscription_skips_other_types() {
    let event_loop = EventLoop::new();
    let mut keys = event_loop.subscribe_to(EventType::Key);

    event_loop
        .dispatch(EventMessage::with_payload("system noise"))
        .unwrap();
    event_loop
        .dispatch(
            MessageBuilder::with_payload("ctrl-c")
                .event_type(EventType::Key)
                .build(),
        )
        .unwrap();

    let msg = recv_within(&mut keys).await.unwrap();
    assert_eq!(msg.event_type(), &EventType::Key);
    assert_eq!(msg.payload_ref::<&str>(), Some(&"ctrl-c"));
}

#[tokio::test]
async fn filtered_subscription_capacity_is_not_consumed_by_other_types() {
    let cfg = evloop::LoopConfig {
        subscription_capacity: 1,
    };
    let event_loop = EventLoop::with_config(cfg, Vec::new());
    let mut keys = event_loop.subscribe_to(EventType::Key);

    // With capacity 1, the key event below would be lost if the preceding
    // noise reached the filtered queue.
    event_loop
        .dispatch_all((0..3i32).map(EventMessage::with_payload))
        .unwrap();
    event_loop
        .dispatch(
            MessageBuilder::with_payload("ctrl-c")
                .event_type(EventType::Key)
                .build(),
        )
        .unwrap();

    let msg = recv_within(&mut keys).await.unwrap();
    assert_eq!(msg.event_type(), &EventType::Key);
    assert_eq!(msg.payload_ref::<&str>(), Some(&"ctrl-c"));
}

#[tokio::test]
async fn destroy_completes_active_subscription() {
    let event_loop = EventLoop::new();
    let mut sub = event_loop.subscribe();

    event_loop.destroy();

    let completion = timeout(Duration::from_secs(1), sub.recv()).await;
    assert!(matches!(completion, Ok(None)));
}

#[tokio::test]
async fn dispatch_after_destroy_is_rejected_without_delivery() {
    let event_loop = EventLoop::new();
    let mut sub = event_loop.subscribe();

    event_loop.destroy();
    assert!(event_loop.is_destroyed());

    let err = event_loop
        .dispatch(EventMessage::with_payload("too late"))
        .unwrap_err();
    assert_eq!(err.as_label(), "loop_closed");
    assert!(event_loop
        .dispatch_all([EventMessage::with_payload(())])
        .is_err());

    // Completion, never a late payload.
    let completion = timeout(Duration::from_secs(1), sub.recv()).await;
    assert!(matches!(completion, Ok(None)));
}

#[tokio::test]
async fn destroy_is_idempotent() {
    let event_loop = EventLoop::new();
    let mut sub = event_loop.subscribe();

    event_loop.destroy();
    event_loop.destroy();

    assert!(timeout(Duration::from_secs(1), sub.recv())
        .await
        .unwrap()
        .is_none());
    // A subscription taken after destruction completes immediately too.
    let mut late = event_loop.subscribe();
    assert!(timeout(Duration::from_secs(1), late.recv())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn closed_token_fires_on_destroy() {
    let event_loop = EventLoop::new();
    let closed = event_loop.closed();
    assert!(!closed.is_cancelled());

    event_loop.destroy();
    timeout(Duration::from_secs(1), closed.cancelled())
        .await
        .expect("closed token did not fire within 1s");
}

#[tokio::test]
async fn pending_value_resolving_after_destroy_is_dropped() {
    let event_loop = EventLoop::new();
    let mut sub = event_loop.subscribe();

    event_loop.dispatch_pending(async {
        sleep(Duration::from_millis(50)).await;
        EventMessage::with_payload("ghost")
    });
    event_loop.destroy();

    let completion = timeout(Duration::from_secs(1), sub.recv()).await;
    assert!(matches!(completion, Ok(None)));
}

#[tokio::test]
async fn concurrent_dispatchers_preserve_their_own_order() {
    let event_loop = Arc::new(EventLoop::new());
    let mut sub = event_loop.subscribe();

    let mut producers = Vec::new();
    for source in 0..4i64 {
        let el = Arc::clone(&event_loop);
        producers.push(tokio::spawn(async move {
            for n in 0..25i64 {
                el.dispatch(
                    MessageBuilder::with_payload(())
                        .header("source", source)
                        .header("n", n)
                        .build(),
                )
                .unwrap();
                tokio::task::yield_now().await;
            }
        }));
    }
    for p in producers {
        p.await.unwrap();
    }

    let mut last_per_source = [-1i64; 4];
    for _ in 0..100 {
        let msg = recv_within(&mut sub).await.unwrap();
        let source = msg.header("source").and_then(|v| v.as_i64()).unwrap() as usize;
        let n = msg.header("n").and_then(|v| v.as_i64()).unwrap();
        assert!(n > last_per_source[source], "per-source order violated");
        last_per_source[source] = n;
    }
    assert_eq!(last_per_source, [24, 24, 24, 24]);
}
