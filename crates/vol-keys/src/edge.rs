//! Edge detection over a stable window
//!
//! Volume buttons tap on every stable cycle while held. The media button
//! taps once, and only as a wake gesture: when its band is entered while
//! the device is suspended or after an unusually long gap between cycles.

use core::time::Duration;

use crate::button::Button;
use crate::keycode::Key;
use crate::window::SampleWindow;

/// Conditions around the current cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WakeContext {
    /// Power state is below the awake threshold
    pub suspended: bool,
    /// Time since the previous cycle started
    pub elapsed: Duration,
    /// Gap above which `elapsed` counts as a sleep/wake boundary
    ///
    /// Compared in whole seconds, so a one-second read retry plus a poll
    /// period stays below the default 1 s gap.
    pub wake_gap: Duration,
}

impl WakeContext {
    fn is_wake(&self) -> bool {
        self.suspended || self.elapsed.as_secs() > self.wake_gap.as_secs()
    }
}

/// Result of edge detection for one cycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Edge {
    /// Key to tap this cycle
    pub tap: Option<Key>,
    /// A volume button was entered this cycle
    pub first_press: bool,
}

pub fn detect<const N: usize>(window: &SampleWindow<N>, wake: WakeContext) -> Edge {
    if !window.is_stable() {
        return Edge::default();
    }

    let current = window.current();
    let previous = window.previous();

    match current {
        Button::VolumeUp | Button::VolumeDown => Edge {
            tap: Some(if current == Button::VolumeUp {
                Key::VolumeUp
            } else {
                Key::VolumeDown
            }),
            first_press: previous != current,
        },
        Button::Media if previous != Button::Media && wake.is_wake() => Edge {
            tap: Some(Key::PlayPause),
            first_press: false,
        },
        Button::Media | Button::None => Edge::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AWAKE: WakeContext = WakeContext {
        suspended: false,
        elapsed: Duration::from_millis(100),
        wake_gap: Duration::from_secs(1),
    };

    const SUSPENDED: WakeContext = WakeContext {
        suspended: true,
        ..AWAKE
    };

    const LONG_GAP: WakeContext = WakeContext {
        elapsed: Duration::from_millis(2100),
        ..AWAKE
    };

    fn window(slots: [Button; 3]) -> SampleWindow<3> {
        SampleWindow::from_slots(slots)
    }

    #[test]
    fn held_media_while_awake_is_silent() {
        for head in [Button::None, Button::Media, Button::VolumeUp] {
            let edge = detect(&window([head, Button::Media, Button::Media]), AWAKE);
            assert_eq!(edge, Edge::default(), "head {head:?}");
        }
    }

    #[test]
    fn media_entered_while_suspended_taps_play_pause() {
        let edge = detect(&window([Button::None, Button::Media, Button::Media]), SUSPENDED);
        assert_eq!(edge.tap, Some(Key::PlayPause));
        assert!(!edge.first_press);
    }

    #[test]
    fn media_entered_after_long_gap_taps_play_pause() {
        let edge = detect(&window([Button::None, Button::Media, Button::Media]), LONG_GAP);
        assert_eq!(edge.tap, Some(Key::PlayPause));
    }

    #[test]
    fn elapsed_equal_to_gap_is_not_a_wake() {
        let at_gap = WakeContext {
            elapsed: Duration::from_secs(1),
            ..AWAKE
        };
        let edge = detect(&window([Button::None, Button::Media, Button::Media]), at_gap);
        assert_eq!(edge.tap, None);
    }

    #[test]
    fn gap_under_the_next_whole_second_is_not_a_wake() {
        let retry_gap = WakeContext {
            elapsed: Duration::from_millis(1999),
            ..AWAKE
        };
        let edge = detect(&window([Button::None, Button::Media, Button::Media]), retry_gap);
        assert_eq!(edge.tap, None);
    }

    #[test]
    fn media_already_held_does_not_repeat() {
        let edge = detect(&window([Button::Media, Button::Media, Button::Media]), SUSPENDED);
        assert_eq!(edge.tap, None);
    }

    #[test]
    fn volume_taps_every_stable_cycle() {
        let entering = detect(
            &window([Button::None, Button::VolumeUp, Button::VolumeUp]),
            AWAKE,
        );
        assert_eq!(entering.tap, Some(Key::VolumeUp));
        assert!(entering.first_press);

        let held = detect(
            &window([Button::VolumeUp, Button::VolumeUp, Button::VolumeUp]),
            AWAKE,
        );
        assert_eq!(held.tap, Some(Key::VolumeUp));
        assert!(!held.first_press);
    }

    #[test]
    fn volume_down_maps_to_volume_down_key() {
        let edge = detect(
            &window([Button::Media, Button::VolumeDown, Button::VolumeDown]),
            AWAKE,
        );
        assert_eq!(edge.tap, Some(Key::VolumeDown));
        assert!(edge.first_press);
    }

    #[test]
    fn unstable_window_emits_nothing() {
        let edge = detect(&window([Button::None, Button::None, Button::VolumeUp]), AWAKE);
        assert_eq!(edge, Edge::default());

        let edge = detect(&window([Button::None, Button::None, Button::Media]), SUSPENDED);
        assert_eq!(edge, Edge::default());
    }

    #[test]
    fn mixed_volume_tail_taps_the_newest() {
        let edge = detect(
            &window([Button::VolumeUp, Button::VolumeUp, Button::VolumeDown]),
            AWAKE,
        );
        assert_eq!(edge.tap, Some(Key::VolumeDown));
        assert!(edge.first_press);
    }

    #[test]
    fn idle_line_emits_nothing() {
        let edge = detect(&window([Button::Media, Button::None, Button::None]), SUSPENDED);
        assert_eq!(edge, Edge::default());
    }
}
