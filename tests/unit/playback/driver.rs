use super::*;
use crate::playback::clock::ManualClock;

const TICK: Duration = Duration::from_millis(200);

fn frame_set(tag: u8) -> Arc<[FrameRGBA]> {
    (0..3u8)
        .map(|i| FrameRGBA::filled(2, 2, [tag, i, 0, 255]))
        .collect::<Vec<_>>()
        .into()
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn index_advances_by_one_per_tick_and_wraps() {
    let mut driver = PlaybackDriver::new(frame_set(0), TICK);
    driver.arm(ms(0));

    let mut seen = vec![driver.current_index()];
    for step in 1..=7u64 {
        assert_eq!(driver.poll(ms(step * 200 - 1)), 0);
        assert_eq!(driver.poll(ms(step * 200)), 1);
        seen.push(driver.current_index());
    }
    assert_eq!(seen, vec![0, 1, 2, 0, 1, 2, 0, 1]);
}

#[test]
fn unarmed_driver_never_advances() {
    let mut driver = PlaybackDriver::new(frame_set(0), TICK);
    assert_eq!(driver.poll(ms(10_000)), 0);
    assert_eq!(driver.current_index(), 0);
}

#[test]
fn late_poll_fires_each_missed_tick_in_order() {
    let mut driver = PlaybackDriver::new(frame_set(0), TICK);
    driver.arm(ms(0));
    assert_eq!(driver.poll(ms(1000)), 5);
    assert_eq!(driver.current_index(), 5 % 3);
    assert_eq!(driver.active_timer().unwrap().due(), ms(1200));
}

#[test]
fn rearming_cancels_previous_timer() {
    let mut driver = PlaybackDriver::new(frame_set(0), TICK);
    let first = driver.arm(ms(0));
    let second = driver.arm(ms(100));
    assert_ne!(first, second);

    // The first timer's deadline must not fire anything any more.
    assert!(!driver.tick(first));
    assert_eq!(driver.poll(ms(200)), 0);
    assert_eq!(driver.current_index(), 0);

    assert_eq!(driver.poll(ms(300)), 1);
    assert_eq!(driver.current_index(), 1);
}

#[test]
fn cancel_stops_playback() {
    let mut driver = PlaybackDriver::new(frame_set(0), TICK);
    let handle = driver.arm(ms(0));
    assert_eq!(driver.cancel(), Some(handle));
    assert!(!driver.is_armed());
    assert!(!driver.tick(handle));
    assert_eq!(driver.poll(ms(5_000)), 0);
}

#[test]
fn rebind_mid_playback_resets_to_new_first_frame() {
    let mut driver = PlaybackDriver::new(frame_set(1), TICK);
    let old = driver.arm(ms(0));
    driver.poll(ms(200));
    assert_eq!(driver.current_index(), 1);

    let new = driver.rebind(frame_set(2), ms(250));
    assert_eq!(driver.current_index(), 0);
    assert_eq!(driver.current_frame().unwrap().pixel(0, 0), Some([2, 0, 0, 255]));

    assert!(!driver.tick(old));
    assert_eq!(driver.current_index(), 0);

    // Old cadence (400ms) is gone; new cadence runs from 250ms.
    assert_eq!(driver.poll(ms(400)), 0);
    assert_eq!(driver.poll(ms(450)), 1);
    assert_eq!(driver.current_frame().unwrap().pixel(0, 0), Some([2, 1, 0, 255]));
    assert_eq!(driver.active_timer().unwrap().due(), new.due() + TICK);
}

#[test]
fn play_reports_every_step_exactly_once() {
    let clock = ManualClock::new();
    let mut driver = PlaybackDriver::new(frame_set(0), TICK);

    let mut shown = Vec::new();
    driver.play(&clock, 6, |i, frame| shown.push((i, frame.pixel(0, 0).unwrap()[1])));

    assert_eq!(
        shown,
        vec![(0, 0), (1, 1), (2, 2), (0, 0), (1, 1), (2, 2), (0, 0)]
    );
    assert_eq!(clock.now(), ms(1200));
}

#[test]
fn empty_frame_set_is_harmless() {
    let mut driver = PlaybackDriver::new(Vec::<FrameRGBA>::new().into(), TICK);
    driver.arm(ms(0));
    assert_eq!(driver.poll(ms(600)), 3);
    assert_eq!(driver.current_index(), 0);
    assert!(driver.current_frame().is_none());
}
