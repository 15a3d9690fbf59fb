//! Stateful disambiguation of raw volume-button transitions.

use crate::{Button, Disposition, Gesture, KeyEvent, Phase};

/// Window within which a second press of the same button counts as a
/// double-press rather than an independent click.
pub const DOUBLE_PRESS_WINDOW_MS: i64 = 300;

/// Result of classifying a single raw event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Gesture resolved by this event, if any.
    pub gesture: Option<Gesture>,
    /// What the host must do with the raw event itself.
    pub disposition: Disposition,
}

impl Classification {
    fn gesture(gesture: Gesture) -> Self {
        Self {
            gesture: Some(gesture),
            disposition: Disposition::Consumed,
        }
    }

    fn pass_through() -> Self {
        Self {
            gesture: None,
            disposition: Disposition::PassThrough,
        }
    }

    fn consumed() -> Self {
        Self {
            gesture: None,
            disposition: Disposition::Consumed,
        }
    }
}

/// Tracks press state and debounce timing for the two volume buttons.
///
/// One instance per listening session. The classifier performs no
/// internal synchronization; callers in multi-threaded hosts must
/// serialize `on_event` calls (e.g. behind a `Mutex`).
pub struct GestureClassifier {
    window_ms: i64,
    /// Time of the most recent unconsumed down-press, per button.
    last_down_ms: [Option<i64>; 2],
    /// Whether the button is currently physically held, per button.
    held: [bool; 2],
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::with_window(DOUBLE_PRESS_WINDOW_MS)
    }
}

impl GestureClassifier {
    /// Create a classifier with the default double-press window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with a custom double-press window.
    pub fn with_window(window_ms: i64) -> Self {
        Self {
            window_ms,
            last_down_ms: [None; 2],
            held: [false; 2],
        }
    }

    /// The configured double-press window in milliseconds.
    pub fn window_ms(&self) -> i64 {
        self.window_ms
    }

    /// Whether `button` is currently physically held.
    pub fn is_held(&self, button: Button) -> bool {
        self.held[button as usize]
    }

    /// Feed one raw transition and resolve it against stored state.
    ///
    /// Down events resolve, in priority order: simultaneous dual-press
    /// (other button still held), double-press (second down within the
    /// window), or an unresolved first click that passes through to the
    /// host's default handling. Up events never resolve a gesture and
    /// are always consumed; a duplicate release is a no-op.
    pub fn on_event(&mut self, event: KeyEvent) -> Classification {
        tracing::trace!(
            button = %event.button,
            phase = ?event.phase,
            ts_ms = event.ts_ms,
            "key transition"
        );

        match event.phase {
            Phase::Down => self.on_down(event.button, event.ts_ms),
            Phase::Up => {
                self.held[event.button as usize] = false;
                Classification::consumed()
            }
        }
    }

    fn on_down(&mut self, button: Button, ts_ms: i64) -> Classification {
        let idx = button as usize;
        self.held[idx] = true;

        // Simultaneous dual-press wins over double-press detection, even
        // when this press would also land inside its own button's window.
        if self.held[button.other() as usize] {
            tracing::debug!(ts_ms, "both volume buttons pressed");
            self.held = [false; 2];
            self.last_down_ms = [None; 2];
            return Classification::gesture(Gesture::Both);
        }

        if let Some(last_ms) = self.last_down_ms[idx] {
            if ts_ms - last_ms < self.window_ms {
                tracing::debug!(button = %button, delta_ms = ts_ms - last_ms, "double press");
                // Consume the stored press so a third rapid press starts
                // a fresh window instead of chaining doubles.
                self.last_down_ms[idx] = None;
                return Classification::gesture(Gesture::Double(button));
            }
        }

        self.last_down_ms[idx] = Some(ts_ms);
        Classification::pass_through()
    }

    /// Clear all press and debounce state.
    pub fn reset(&mut self) {
        self.last_down_ms = [None; 2];
        self.held = [false; 2];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Button::{Decrease, Increase};

    fn feed(classifier: &mut GestureClassifier, events: &[KeyEvent]) -> Vec<Gesture> {
        events
            .iter()
            .filter_map(|e| classifier.on_event(*e).gesture)
            .collect()
    }

    #[test]
    fn test_lone_press_emits_nothing() {
        let mut c = GestureClassifier::new();

        let down = c.on_event(KeyEvent::down(Increase, 0));
        assert_eq!(down.gesture, None);
        assert_eq!(down.disposition, Disposition::PassThrough);

        let up = c.on_event(KeyEvent::up(Increase, 80));
        assert_eq!(up.gesture, None);
        assert_eq!(up.disposition, Disposition::Consumed);
    }

    #[test]
    fn test_double_press_within_window() {
        let mut c = GestureClassifier::new();
        c.on_event(KeyEvent::down(Increase, 0));
        c.on_event(KeyEvent::up(Increase, 40));

        let second = c.on_event(KeyEvent::down(Increase, 100));
        assert_eq!(second.gesture, Some(Gesture::Double(Increase)));
        assert_eq!(second.disposition, Disposition::Consumed);
    }

    #[test]
    fn test_slow_second_press_is_fresh_click() {
        let mut c = GestureClassifier::new();
        let gestures = feed(
            &mut c,
            &[
                KeyEvent::down(Increase, 0),
                KeyEvent::up(Increase, 50),
                KeyEvent::down(Increase, 500),
            ],
        );
        assert!(gestures.is_empty());
    }

    #[test]
    fn test_third_rapid_press_starts_fresh_window() {
        let mut c = GestureClassifier::new();
        c.on_event(KeyEvent::down(Increase, 0));
        let second = c.on_event(KeyEvent::down(Increase, 100));
        assert_eq!(second.gesture, Some(Gesture::Double(Increase)));

        // Window state was cleared by the double; this press must not
        // pair with the one at t=100.
        let third = c.on_event(KeyEvent::down(Increase, 200));
        assert_eq!(third.gesture, None);
        assert_eq!(third.disposition, Disposition::PassThrough);

        // But a fourth press can pair with the third.
        let fourth = c.on_event(KeyEvent::down(Increase, 290));
        assert_eq!(fourth.gesture, Some(Gesture::Double(Increase)));
    }

    #[test]
    fn test_both_while_first_still_held() {
        let mut c = GestureClassifier::new();
        c.on_event(KeyEvent::down(Increase, 0));

        let second = c.on_event(KeyEvent::down(Decrease, 50));
        assert_eq!(second.gesture, Some(Gesture::Both));
        assert_eq!(second.disposition, Disposition::Consumed);
        assert!(!c.is_held(Increase));
        assert!(!c.is_held(Decrease));
    }

    #[test]
    fn test_press_after_both_is_fresh_click() {
        let mut c = GestureClassifier::new();
        c.on_event(KeyEvent::down(Increase, 0));
        c.on_event(KeyEvent::down(Decrease, 50));

        // Debounce state was fully reset by the dual-press; this must
        // not read as a double of the press at t=0.
        let next = c.on_event(KeyEvent::down(Increase, 120));
        assert_eq!(next.gesture, None);
        assert_eq!(next.disposition, Disposition::PassThrough);
    }

    #[test]
    fn test_both_wins_over_double_window() {
        let mut c = GestureClassifier::new();
        c.on_event(KeyEvent::down(Decrease, 0));
        c.on_event(KeyEvent::up(Decrease, 30));
        // Decrease is inside its own double window, but increase is held.
        c.on_event(KeyEvent::down(Increase, 60));
        let second = c.on_event(KeyEvent::down(Decrease, 100));
        assert_eq!(second.gesture, Some(Gesture::Both));
    }

    #[test]
    fn test_per_button_windows_are_independent() {
        let mut c = GestureClassifier::new();
        c.on_event(KeyEvent::down(Increase, 0));
        c.on_event(KeyEvent::up(Increase, 30));
        c.on_event(KeyEvent::down(Decrease, 100));
        c.on_event(KeyEvent::up(Decrease, 130));

        // The decrease presses in between must not disturb increase's
        // pending window from t=0.
        let inc = c.on_event(KeyEvent::down(Increase, 200));
        assert_eq!(inc.gesture, Some(Gesture::Double(Increase)));
    }

    #[test]
    fn test_duplicate_release_is_idempotent() {
        let mut c = GestureClassifier::new();
        c.on_event(KeyEvent::down(Increase, 0));
        c.on_event(KeyEvent::up(Increase, 40));

        let dup = c.on_event(KeyEvent::up(Increase, 41));
        assert_eq!(dup.gesture, None);
        assert_eq!(dup.disposition, Disposition::Consumed);
        assert!(!c.is_held(Increase));
    }

    #[test]
    fn test_up_events_always_consumed() {
        let mut c = GestureClassifier::new();
        c.on_event(KeyEvent::down(Decrease, 0));
        assert_eq!(
            c.on_event(KeyEvent::up(Decrease, 20)).disposition,
            Disposition::Consumed
        );
    }

    #[test]
    fn test_tied_timestamps_count_as_double() {
        let mut c = GestureClassifier::new();
        c.on_event(KeyEvent::down(Increase, 100));
        c.on_event(KeyEvent::up(Increase, 100));
        let second = c.on_event(KeyEvent::down(Increase, 100));
        assert_eq!(second.gesture, Some(Gesture::Double(Increase)));
    }

    #[test]
    fn test_custom_window() {
        let mut c = GestureClassifier::with_window(50);
        c.on_event(KeyEvent::down(Increase, 0));
        c.on_event(KeyEvent::up(Increase, 10));
        let second = c.on_event(KeyEvent::down(Increase, 100));
        assert_eq!(second.gesture, None);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut c = GestureClassifier::new();
        c.on_event(KeyEvent::down(Increase, 0));
        c.reset();

        assert!(!c.is_held(Increase));
        // No double: the press before reset no longer counts.
        let next = c.on_event(KeyEvent::down(Increase, 100));
        assert_eq!(next.gesture, None);
    }

    #[test]
    fn test_worked_examples() {
        let mut c = GestureClassifier::new();
        assert_eq!(
            feed(
                &mut c,
                &[KeyEvent::down(Increase, 0), KeyEvent::down(Increase, 100)]
            ),
            vec![Gesture::Double(Increase)]
        );

        let mut c = GestureClassifier::new();
        assert_eq!(
            feed(
                &mut c,
                &[KeyEvent::down(Increase, 0), KeyEvent::down(Increase, 500)]
            ),
            vec![]
        );

        let mut c = GestureClassifier::new();
        assert_eq!(
            feed(
                &mut c,
                &[KeyEvent::down(Increase, 0), KeyEvent::down(Decrease, 50)]
            ),
            vec![Gesture::Both]
        );
    }
}
