use std::{sync::Arc, time::Duration};

use marker_animator::{AnimatorDriver, Error, MarkerAnimator};
use seawatch_core::{
    Coordinate, LocalTickChannel, Mmsi, ReplayStatus, SessionEnd, TELEMETRY_TOPIC, Tick,
    TickChannel,
};
use tokio::time;

use crate::helper::{self, RecordingSurface, observation, trace};

const MMSI: i32 = 211002340;

#[tokio::test(flavor = "multi_thread")]
async fn test_completed_session_ends_at_the_last_coordinate() {
    helper::setup();

    let channel = Arc::new(LocalTickChannel::new(16));
    let stream = channel.subscribe(TELEMETRY_TOPIC).await.unwrap();

    let surface = RecordingSurface::default();
    let mut animator = MarkerAnimator::with_steps(surface.clone(), 4);
    let driver = AnimatorDriver::with_frame_period(Duration::from_millis(5));
    let status = driver.status();

    let publisher = {
        let channel = channel.clone();
        tokio::spawn(async move {
            let ticks = [
                Tick::new(trace(), vec![observation(MMSI, 78.1, 15.5)]),
                Tick::new(trace(), vec![observation(MMSI, 78.2, 15.6)]),
            ];
            for tick in ticks {
                channel.publish(TELEMETRY_TOPIC, tick).await.unwrap();
                time::sleep(Duration::from_millis(50)).await;
            }
            channel
                .publish(TELEMETRY_TOPIC, Tick::completed(trace()))
                .await
                .unwrap();
        })
    };

    let end = driver.run(stream, &mut animator).await.unwrap();
    publisher.await.unwrap();

    assert_eq!(end, SessionEnd::Completed);
    assert_eq!(*status.borrow(), ReplayStatus::Complete);
    assert_eq!(
        surface.last_position(Mmsi::test_new(MMSI)).unwrap(),
        Coordinate::new(78.2, 15.6)
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ticks_in_quick_succession_end_at_the_second_coordinate() {
    helper::setup();

    let channel = Arc::new(LocalTickChannel::new(16));
    let stream = channel.subscribe(TELEMETRY_TOPIC).await.unwrap();

    let surface = RecordingSurface::default();
    let mut animator = MarkerAnimator::with_steps(surface.clone(), 4);
    let driver = AnimatorDriver::with_frame_period(Duration::from_millis(5));

    let publisher = {
        let channel = channel.clone();
        tokio::spawn(async move {
            channel
                .publish(
                    TELEMETRY_TOPIC,
                    Tick::new(trace(), vec![observation(MMSI, 78.0, 15.0)]),
                )
                .await
                .unwrap();
            time::sleep(Duration::from_millis(40)).await;

            // The second interpolation target arrives before the first
            // animation can complete.
            channel
                .publish(
                    TELEMETRY_TOPIC,
                    Tick::new(trace(), vec![observation(MMSI, 78.4, 15.4)]),
                )
                .await
                .unwrap();
            time::sleep(Duration::from_millis(8)).await;
            channel
                .publish(
                    TELEMETRY_TOPIC,
                    Tick::new(trace(), vec![observation(MMSI, 78.1, 15.1)]),
                )
                .await
                .unwrap();

            time::sleep(Duration::from_millis(60)).await;
            channel
                .publish(TELEMETRY_TOPIC, Tick::completed(trace()))
                .await
                .unwrap();
        })
    };

    let end = driver.run(stream, &mut animator).await.unwrap();
    publisher.await.unwrap();

    assert_eq!(end, SessionEnd::Completed);
    assert_eq!(
        surface.last_position(Mmsi::test_new(MMSI)).unwrap(),
        Coordinate::new(78.1, 15.1)
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cancellation_disposes_markers_and_reports_stopped() {
    helper::setup();

    let channel = Arc::new(LocalTickChannel::new(16));
    let stream = channel.subscribe(TELEMETRY_TOPIC).await.unwrap();

    let surface = RecordingSurface::default();
    let mut animator = MarkerAnimator::with_steps(surface.clone(), 4);
    let driver = AnimatorDriver::with_frame_period(Duration::from_millis(5));
    let status = driver.status();
    let token = driver.cancellation_token();

    let publisher = {
        let channel = channel.clone();
        tokio::spawn(async move {
            channel
                .publish(
                    TELEMETRY_TOPIC,
                    Tick::new(trace(), vec![observation(MMSI, 78.1, 15.5)]),
                )
                .await
                .unwrap();
            time::sleep(Duration::from_millis(30)).await;
            token.cancel();
        })
    };

    let end = driver.run(stream, &mut animator).await.unwrap();
    publisher.await.unwrap();

    assert_eq!(end, SessionEnd::Stopped);
    assert_eq!(*status.borrow(), ReplayStatus::Stopped);
    assert!(surface.removed(Mmsi::test_new(MMSI)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_closed_transport_reports_disconnected_and_keeps_markers() {
    helper::setup();

    let channel = Arc::new(LocalTickChannel::new(16));
    let stream = channel.subscribe(TELEMETRY_TOPIC).await.unwrap();

    let surface = RecordingSurface::default();
    let mut animator = MarkerAnimator::with_steps(surface.clone(), 4);
    let driver = AnimatorDriver::with_frame_period(Duration::from_millis(5));
    let status = driver.status();

    channel
        .publish(
            TELEMETRY_TOPIC,
            Tick::new(trace(), vec![observation(MMSI, 78.1, 15.5)]),
        )
        .await
        .unwrap();
    drop(channel);

    let error = driver.run(stream, &mut animator).await.unwrap_err();

    assert!(matches!(error, Error::StreamClosed { .. }));
    assert_eq!(*status.borrow(), ReplayStatus::Disconnected);
    assert!(!surface.removed(Mmsi::test_new(MMSI)));
    assert_eq!(
        surface.last_position(Mmsi::test_new(MMSI)).unwrap(),
        Coordinate::new(78.1, 15.5)
    );
}
