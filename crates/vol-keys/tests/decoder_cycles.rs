use std::sync::mpsc::Receiver;
use std::time::Duration;

use vol_keys::mock::{ManualClock, MockAdc, MockPin, MockPower};
use vol_keys::{
    taps, Builder, Button, ChannelSink, Config, CycleOutcome, CycleReport, Decoder, DelayReason,
    Interface, Key, SinkEvent,
};

const IDLE_MV: u32 = 0;
const MEDIA_MV: u32 = 165;
const VOLUME_UP_MV: u32 = 198;
const VOLUME_DOWN_MV: u32 = 240;

const AWAKE: u32 = 1;
const SUSPENDED: u32 = 0;

type TestInterface = Interface<MockAdc, MockPin, MockPin, MockPower>;

struct Rig<const N: usize = 3> {
    adc: MockAdc,
    headset: MockPin,
    balance: MockPin,
    power: MockPower,
    clock: ManualClock,
    events: Receiver<SinkEvent>,
    decoder: Decoder<TestInterface, ChannelSink, ManualClock, N>,
}

impl<const N: usize> Rig<N> {
    fn new(config: Config) -> Self {
        let adc = MockAdc::new(IDLE_MV);
        let headset = MockPin::new(true);
        let balance = MockPin::new(false);
        let power = MockPower::new(AWAKE);
        let clock = ManualClock::new();
        let interface = Interface::new(
            adc.clone(),
            Some(headset.clone()),
            Some(balance.clone()),
            power.clone(),
        );
        let (sink, events) = ChannelSink::new();
        let decoder = Decoder::new(interface, sink, clock.clone(), config);

        Self {
            adc,
            headset,
            balance,
            power,
            clock,
            events,
            decoder,
        }
    }

    /// Advance the clock by the last scheduled delay, then run a cycle
    fn cycle(&mut self) -> CycleReport {
        self.clock.advance(self.decoder.run_state().delay);
        self.decoder.run_cycle()
    }

    fn drain(&self) -> Vec<SinkEvent> {
        self.events.try_iter().collect()
    }
}

fn default_rig() -> Rig {
    Rig::new(Builder::new().build().unwrap())
}

fn sampled(report: &CycleReport) -> vol_keys::CycleState {
    match report.outcome {
        CycleOutcome::Sampled(state) => state,
        other => panic!("expected a sampled cycle, got {other:?}"),
    }
}

#[test]
fn held_volume_up_taps_every_stable_cycle() {
    let mut rig = default_rig();
    rig.adc.push_repeated(VOLUME_UP_MV, 5);

    let first = rig.cycle();
    assert!(!sampled(&first).stable);
    assert_eq!(sampled(&first).tap, None);
    assert_eq!(first.reason, DelayReason::Poll);

    let entering = rig.cycle();
    assert_eq!(sampled(&entering).tap, Some(Key::VolumeUp));
    assert!(sampled(&entering).first_press);
    assert_eq!(entering.reason, DelayReason::FirstPress);
    assert_eq!(entering.delay, Duration::from_millis(500));

    for _ in 0..3 {
        let held = rig.cycle();
        assert_eq!(sampled(&held).tap, Some(Key::VolumeUp));
        assert!(!sampled(&held).first_press);
        assert_eq!(held.delay, Duration::from_millis(100));
    }

    assert_eq!(taps(&rig.drain()), vec![Key::VolumeUp; 4]);
}

#[test]
fn volume_tap_is_press_then_release_then_sync() {
    let mut rig = default_rig();
    rig.adc.push_repeated(VOLUME_DOWN_MV, 2);
    rig.cycle();
    rig.drain();

    rig.cycle();
    assert_eq!(
        rig.drain(),
        vec![
            SinkEvent::Key {
                key: Key::VolumeDown,
                pressed: true
            },
            SinkEvent::Key {
                key: Key::VolumeDown,
                pressed: false
            },
            SinkEvent::Sync,
        ]
    );
}

#[test]
fn media_hold_while_awake_is_silent() {
    let mut rig = default_rig();
    rig.adc.push_repeated(MEDIA_MV, 6);

    for _ in 0..6 {
        let report = rig.cycle();
        assert_eq!(sampled(&report).tap, None);
        assert_eq!(report.reason, DelayReason::Poll);
    }
    assert!(taps(&rig.drain()).is_empty());
}

#[test]
fn media_pressed_while_suspended_taps_play_pause_once() {
    let mut rig = default_rig();
    rig.power.set(SUSPENDED);
    rig.adc.push_repeated(MEDIA_MV, 5);

    for _ in 0..5 {
        rig.cycle();
    }

    assert_eq!(taps(&rig.drain()), vec![Key::PlayPause]);
    assert!(rig.decoder.run_state().suspended);
}

#[test]
fn media_after_long_cycle_gap_taps_play_pause() {
    let mut rig = default_rig();
    rig.adc.push(MEDIA_MV);
    rig.cycle();

    // Scheduler stalled across a sleep: next cycle starts long after the last
    rig.clock.advance(Duration::from_secs(2));
    rig.adc.push(MEDIA_MV);
    let report = rig.cycle();

    assert_eq!(sampled(&report).tap, Some(Key::PlayPause));
    assert_eq!(taps(&rig.drain()), vec![Key::PlayPause]);
}

#[test]
fn media_held_across_a_read_retry_is_silent_while_awake() {
    let mut rig = default_rig();
    rig.adc.push(MEDIA_MV);
    rig.cycle();

    rig.adc.push_failure();
    let retry = rig.cycle();
    assert_eq!(retry.delay, Duration::from_secs(1));

    rig.adc.push_repeated(MEDIA_MV, 2);
    let resumed = rig.cycle();
    assert!(sampled(&resumed).stable);
    assert_eq!(sampled(&resumed).tap, None);
    rig.cycle();

    assert!(taps(&rig.drain()).is_empty());
}

#[test]
fn unplugged_headset_backs_off_without_sampling() {
    let mut rig = default_rig();
    rig.headset.set_high(false);
    rig.adc.push_repeated(VOLUME_UP_MV, 3);

    for _ in 0..3 {
        let report = rig.cycle();
        assert_eq!(report.outcome, CycleOutcome::Halted);
        assert_eq!(report.delay, Duration::from_secs(10));
    }

    assert_eq!(rig.adc.reads(), 0);
    assert_eq!(rig.adc.pending(), 3);
    assert!(rig.drain().is_empty());
}

#[test]
fn shorted_line_halts_regardless_of_window() {
    let mut rig = default_rig();
    rig.adc.push_repeated(VOLUME_UP_MV, 3);
    for _ in 0..3 {
        rig.cycle();
    }
    let window = *rig.decoder.window();
    assert!(window.is_stable());

    rig.balance.set_high(true);
    let report = rig.cycle();

    assert_eq!(report.reason, DelayReason::Disconnected);
    assert_eq!(report.delay, Duration::from_secs(10));
    assert_eq!(*rig.decoder.window(), window);
}

#[test]
fn failed_read_retries_soon_and_keeps_window() {
    let mut rig = default_rig();
    rig.adc.push(MEDIA_MV);
    rig.cycle();
    rig.drain();
    let window = *rig.decoder.window();

    rig.adc.push_failure();
    let report = rig.cycle();

    assert_eq!(report.outcome, CycleOutcome::ReadFailed);
    assert_eq!(report.delay, Duration::from_secs(1));
    assert_eq!(*rig.decoder.window(), window);
    assert!(rig.drain().is_empty(), "no sync on a failed read");
}

#[test]
fn halted_cycles_do_not_restart_the_cycle_timer() {
    let mut rig = default_rig();
    rig.adc.push(MEDIA_MV);
    rig.cycle();
    let last_start = rig.decoder.run_state().last_cycle_start;

    rig.headset.set_high(false);
    rig.cycle();
    rig.cycle();
    assert_eq!(rig.decoder.run_state().last_cycle_start, last_start);

    // Media still held when the plug comes back: the gap counts as a wake
    rig.headset.set_high(true);
    rig.adc.push(MEDIA_MV);
    let report = rig.cycle();
    assert_eq!(sampled(&report).tap, Some(Key::PlayPause));
}

#[test]
fn every_sampled_cycle_syncs_once() {
    let mut rig = default_rig();
    for mv in [IDLE_MV, VOLUME_UP_MV, MEDIA_MV, 180, VOLUME_DOWN_MV] {
        rig.adc.push(mv);
        rig.cycle();
    }
    let syncs = rig
        .drain()
        .into_iter()
        .filter(|event| *event == SinkEvent::Sync)
        .count();
    assert_eq!(syncs, 5);
}

#[test]
fn classification_follows_band_table() {
    let mut rig = default_rig();
    for (mv, expected) in [
        (IDLE_MV, Button::None),
        (160, Button::Media),
        (170, Button::Media),
        (171, Button::None),
        (190, Button::VolumeUp),
        (205, Button::VolumeUp),
        (225, Button::VolumeDown),
        (250, Button::VolumeDown),
        (251, Button::None),
    ] {
        rig.adc.push(mv);
        let report = rig.cycle();
        assert_eq!(sampled(&report).button, expected, "reading {mv}");
        assert_eq!(sampled(&report).millivolts, mv);
    }
}

#[test]
fn single_noisy_sample_is_filtered() {
    let mut rig = default_rig();
    for mv in [IDLE_MV, IDLE_MV, VOLUME_UP_MV, IDLE_MV, IDLE_MV] {
        rig.adc.push(mv);
        rig.cycle();
    }
    assert!(taps(&rig.drain()).is_empty());
}

#[test]
fn debug_logging_does_not_change_behavior() {
    let script = [
        MEDIA_MV,
        MEDIA_MV,
        VOLUME_UP_MV,
        VOLUME_UP_MV,
        VOLUME_UP_MV,
        IDLE_MV,
    ];

    let run = |debug: bool| {
        let mut rig: Rig = Rig::new(Builder::new().debug(debug).build().unwrap());
        rig.power.set(SUSPENDED);
        let reports: Vec<_> = script
            .iter()
            .map(|mv| {
                rig.adc.push(*mv);
                rig.cycle()
            })
            .collect();
        (reports, rig.drain())
    };

    assert_eq!(run(false), run(true));
}

#[test]
fn wider_window_needs_more_agreeing_samples() {
    let mut rig: Rig<4> = Rig::new(Builder::new().build().unwrap());
    rig.adc.push_repeated(VOLUME_UP_MV, 3);

    assert_eq!(sampled(&rig.cycle()).tap, None);
    assert_eq!(sampled(&rig.cycle()).tap, None);
    let third = rig.cycle();
    assert_eq!(sampled(&third).tap, Some(Key::VolumeUp));
    assert!(sampled(&third).first_press);
}

#[test]
fn release_hands_back_every_collaborator() {
    let rig = default_rig();
    let events = rig.events;
    let (interface, sink, _clock) = rig.decoder.release();
    assert!(interface.is_gate_monitored());

    drop(sink);
    assert!(events.recv().is_err());
}
