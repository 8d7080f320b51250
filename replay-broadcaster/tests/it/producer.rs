use std::time::Duration;

use futures::StreamExt;
use geoutils::Location;
use seawatch_core::{Mmsi, SessionEnd, TraceId, TrajectorySummary};

use crate::helper::{collect_session, setup};

#[tokio::test(flavor = "multi_thread")]
async fn test_emits_configured_points_then_a_single_done_tick() {
    let (producer, mut stream) = setup(10, 5).await;
    let trajectory = TrajectorySummary::test_default(Mmsi::test_new(257111222));

    let handle = producer.start(TraceId::new("session-1"), &[trajectory.clone()]);
    let ticks = collect_session(&mut stream).await;

    assert_eq!(handle.wait().await.unwrap(), SessionEnd::Completed);
    assert_eq!(ticks.len(), 6);

    let done = ticks.last().unwrap();
    assert!(done.done);
    assert!(done.vessels.is_empty());

    for tick in &ticks {
        assert_eq!(tick.trace_id, TraceId::new("session-1"));
    }

    let start = trajectory.start.unwrap();
    let end = trajectory.end.unwrap();

    assert_eq!(ticks[0].vessels[0].lat, start.lat);
    assert_eq!(ticks[0].vessels[0].lon, start.lon);

    let last = Location::new(ticks[4].vessels[0].lat, ticks[4].vessels[0].lon);
    let distance = last.haversine_distance_to(&Location::new(end.lat, end.lon));
    assert!(distance.meters() < 0.5);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_trajectory_without_endpoints_never_appears_in_any_tick() {
    let (producer, mut stream) = setup(2, 5).await;

    let a = TrajectorySummary::test_default(Mmsi::test_new(257111222));
    let mut b = TrajectorySummary::test_default(Mmsi::test_new(257333444));
    b.end = None;

    let handle = producer.start(TraceId::random(), &[a, b]);
    let ticks = collect_session(&mut stream).await;

    assert_eq!(handle.wait().await.unwrap(), SessionEnd::Completed);
    assert_eq!(ticks.len(), 6);

    for tick in &ticks[..5] {
        assert_eq!(tick.vessels.len(), 1);
        assert_eq!(tick.vessels[0].mmsi, Mmsi::test_new(257111222));
    }

    assert!(ticks[5].done);
    assert!(ticks[5].vessels.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_idx_is_strictly_increasing_from_zero() {
    let (producer, mut stream) = setup(10, 5).await;
    let trajectory = TrajectorySummary::test_default(Mmsi::test_new(257111222));

    let handle = producer.start(TraceId::random(), &[trajectory]);
    let ticks = collect_session(&mut stream).await;
    handle.wait().await.unwrap();

    let indices: Vec<u32> = ticks[..5]
        .iter()
        .map(|t| t.vessels[0].idx.unwrap())
        .collect();

    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_no_ticks_follow_the_done_tick() {
    let (producer, mut stream) = setup(10, 3).await;
    let trajectory = TrajectorySummary::test_default(Mmsi::test_new(257111222));

    let handle = producer.start(TraceId::random(), &[trajectory]);
    collect_session(&mut stream).await;
    handle.wait().await.unwrap();

    assert!(
        tokio::time::timeout(Duration::from_millis(300), stream.next())
            .await
            .is_err()
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stopping_before_completion_emits_no_done_tick() {
    let (producer, mut stream) = setup(2, 20).await;
    let trajectory = TrajectorySummary::test_default(Mmsi::test_new(257111222));

    let handle = producer.start(TraceId::random(), &[trajectory]);

    // The first tick goes out as soon as the session starts.
    let first = tokio::time::timeout(Duration::from_secs(5), stream.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert!(!first.done);

    assert_eq!(handle.stop().await.unwrap(), SessionEnd::Stopped);

    // Drain anything published before the stop, nothing may be terminal.
    while let Ok(Some(Ok(tick))) =
        tokio::time::timeout(Duration::from_millis(700), stream.next()).await
    {
        assert!(!tick.done);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_progress_reaches_one_on_completion() {
    let (producer, mut stream) = setup(10, 5).await;
    let trajectory = TrajectorySummary::test_default(Mmsi::test_new(257111222));

    let handle = producer.start(TraceId::random(), &[trajectory]);
    let progress = handle.progress();

    collect_session(&mut stream).await;
    assert_eq!(handle.wait().await.unwrap(), SessionEnd::Completed);

    assert_eq!(*progress.borrow(), 1.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_session_without_eligible_trajectories_completes_immediately() {
    let (producer, mut stream) = setup(2, 5).await;

    let mut trajectory = TrajectorySummary::test_default(Mmsi::test_new(257111222));
    trajectory.start = None;

    let handle = producer.start(TraceId::random(), &[trajectory]);
    let ticks = collect_session(&mut stream).await;

    assert_eq!(handle.wait().await.unwrap(), SessionEnd::Completed);
    assert_eq!(ticks.len(), 1);
    assert!(ticks[0].done);
    assert!(ticks[0].vessels.is_empty());
}
