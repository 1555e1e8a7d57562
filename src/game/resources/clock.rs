//! Chess clock resource
//!
//! Two-sided countdown clock driven by an explicit `tick(now)` so systems and
//! tests control time the same way. Exactly one side counts down at a time;
//! switching sides never touches the remaining durations.

use bevy::prelude::*;
use shakmaty::Color;
use std::fmt;
use std::time::Duration;

/// Fallback time control applied when the user's input cannot be parsed.
pub const DEFAULT_TIME_CONTROL: TimeControl = TimeControl {
    minutes: 5,
    seconds: 0,
};

/// A per-side time budget.
///
/// Construct via [`TimeControl::parse`], which accepts `MM:SS`, `M:SS`, a bare
/// minute count, or a bare second count (values >= 60 are interpreted as
/// seconds). Anything malformed or out of range falls back to
/// [`DEFAULT_TIME_CONTROL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeControl {
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeControl {
    pub fn parse(raw: &str) -> TimeControl {
        let value: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if value.is_empty() {
            return DEFAULT_TIME_CONTROL;
        }

        if let Some((m, s)) = value.split_once(':') {
            let (Ok(minutes), Ok(seconds)) = (m.parse::<u64>(), s.parse::<u64>()) else {
                return DEFAULT_TIME_CONTROL;
            };
            if seconds > 59 {
                return DEFAULT_TIME_CONTROL;
            }
            return TimeControl { minutes, seconds };
        }

        let Ok(n) = value.parse::<u64>() else {
            return DEFAULT_TIME_CONTROL;
        };
        if n >= 60 {
            // Bare second count
            TimeControl {
                minutes: n / 60,
                seconds: n % 60,
            }
        } else {
            TimeControl {
                minutes: n,
                seconds: 0,
            }
        }
    }

    /// Budget each side starts with under this control.
    pub fn per_side(&self) -> Duration {
        Duration::from_secs(self.minutes * 60 + self.seconds)
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        DEFAULT_TIME_CONTROL
    }
}

impl fmt::Display for TimeControl {
    /// Canonical zero-padded `MM:SS` form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}

/// The time control new games are configured with. Updated when the user
/// applies a new value in the clock panel; read back by game reset.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct TimeControlSetting(pub TimeControl);

/// Resource for the two-sided game clock.
///
/// Timestamps are durations since app start (`Time::elapsed()`), so the clock
/// never reads wall time itself. While paused, remaining times are frozen at
/// the value committed by the last tick.
#[derive(Resource, Debug)]
pub struct ChessClock {
    white_remaining: Duration,
    black_remaining: Duration,
    active: Color,
    running: bool,
    last_tick: Duration,
}

impl Default for ChessClock {
    fn default() -> Self {
        let mut clock = ChessClock {
            white_remaining: Duration::ZERO,
            black_remaining: Duration::ZERO,
            active: Color::White,
            running: false,
            last_tick: Duration::ZERO,
        };
        clock.configure(DEFAULT_TIME_CONTROL);
        clock
    }
}

impl ChessClock {
    /// Set both sides to the control's budget, make White active, force pause.
    pub fn configure(&mut self, control: TimeControl) {
        self.white_remaining = control.per_side();
        self.black_remaining = control.per_side();
        self.active = Color::White;
        self.running = false;
    }

    /// Begin counting down from `now`. No-op if already running.
    pub fn start(&mut self, now: Duration) {
        if self.running {
            return;
        }
        self.running = true;
        self.last_tick = now;
    }

    /// Freeze the clock. No-op if already paused.
    pub fn pause(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
    }

    /// Commit elapsed time against the active side.
    ///
    /// Stale ticks (clock not running) are no-ops, and `now` earlier than the
    /// last committed tick counts as zero elapsed, so remaining time never
    /// increases. When a side reaches zero the clock auto-pauses (flag fall);
    /// play resumes only after a reconfigure or reset.
    pub fn tick(&mut self, now: Duration) {
        if !self.running {
            return;
        }
        let elapsed = now.saturating_sub(self.last_tick);
        self.last_tick = now;
        match self.active {
            Color::White => self.white_remaining = self.white_remaining.saturating_sub(elapsed),
            Color::Black => self.black_remaining = self.black_remaining.saturating_sub(elapsed),
        }
        if self.white_remaining.is_zero() || self.black_remaining.is_zero() {
            self.running = false;
        }
    }

    /// Flip which side is counting down. Remaining times and the
    /// running/paused state are untouched.
    pub fn switch_active(&mut self) {
        self.active = !self.active;
    }

    pub fn remaining(&self, side: Color) -> Duration {
        match side {
            Color::White => self.white_remaining,
            Color::Black => self.black_remaining,
        }
    }

    pub fn active(&self) -> Color {
        self.active
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The side whose flag has fallen, if any.
    pub fn flag_fallen(&self) -> Option<Color> {
        if self.white_remaining.is_zero() {
            Some(Color::White)
        } else if self.black_remaining.is_zero() {
            Some(Color::Black)
        } else {
            None
        }
    }
}

/// Format a remaining duration as zero-padded `MM:SS`, floored to whole
/// seconds.
pub fn format_clock(remaining: Duration) -> String {
    let total_seconds = remaining.as_secs();
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_default_clock_configuration() {
        //! A fresh clock holds 5:00 per side, White active, paused
        let clock = ChessClock::default();
        assert_eq!(clock.remaining(Color::White), ms(300_000));
        assert_eq!(clock.remaining(Color::Black), ms(300_000));
        assert_eq!(clock.active(), Color::White);
        assert!(!clock.is_running());
    }

    #[test]
    fn test_parse_minutes_seconds() {
        assert_eq!(TimeControl::parse("1:30").per_side(), ms(90_000));
        assert_eq!(TimeControl::parse("05:00").per_side(), ms(300_000));
        assert_eq!(TimeControl::parse("2:5").per_side(), ms(125_000));
        assert_eq!(TimeControl::parse(" 1 : 30 ").per_side(), ms(90_000));
    }

    #[test]
    fn test_parse_bare_counts() {
        //! Bare values >= 60 are seconds, below 60 are minutes
        assert_eq!(TimeControl::parse("90").per_side(), ms(90_000));
        assert_eq!(TimeControl::parse("10").per_side(), ms(600_000));
        assert_eq!(TimeControl::parse("0").per_side(), ms(0));
    }

    #[test]
    fn test_parse_malformed_falls_back_to_default() {
        assert_eq!(TimeControl::parse("").per_side(), ms(300_000));
        assert_eq!(TimeControl::parse("abc").per_side(), ms(300_000));
        assert_eq!(TimeControl::parse("1:xx").per_side(), ms(300_000));
        assert_eq!(TimeControl::parse("5:75").per_side(), ms(300_000));
        assert_eq!(TimeControl::parse("-3").per_side(), ms(300_000));
    }

    #[test]
    fn test_display_is_zero_padded() {
        assert_eq!(TimeControl::parse("5").to_string(), "05:00");
        assert_eq!(TimeControl::parse("90").to_string(), "01:30");
        assert_eq!(format_clock(ms(90_500)), "01:30");
        assert_eq!(format_clock(ms(0)), "00:00");
    }

    #[test]
    fn test_tick_decrements_only_active_side() {
        let mut clock = ChessClock::default();
        clock.start(ms(0));
        clock.tick(ms(1_000));
        assert_eq!(clock.remaining(Color::White), ms(299_000));
        assert_eq!(clock.remaining(Color::Black), ms(300_000));

        clock.switch_active();
        clock.tick(ms(3_500));
        assert_eq!(clock.remaining(Color::White), ms(299_000));
        assert_eq!(clock.remaining(Color::Black), ms(297_500));
    }

    #[test]
    fn test_tick_clamps_clock_skew() {
        //! A tick that jumps backwards must never grow the remaining time
        let mut clock = ChessClock::default();
        clock.start(ms(5_000));
        clock.tick(ms(4_000));
        assert_eq!(clock.remaining(Color::White), ms(300_000));
        // Time resumes from the committed tick, not the original start
        clock.tick(ms(4_500));
        assert_eq!(clock.remaining(Color::White), ms(299_500));
    }

    #[test]
    fn test_start_is_idempotent() {
        //! A second start must not move the tick reference
        let mut clock = ChessClock::default();
        clock.start(ms(0));
        clock.start(ms(5_000));
        clock.tick(ms(10_000));
        assert_eq!(clock.remaining(Color::White), ms(290_000));
    }

    #[test]
    fn test_pause_is_idempotent_and_freezes_time() {
        let mut clock = ChessClock::default();
        clock.start(ms(0));
        clock.tick(ms(2_000));
        clock.pause();
        clock.pause();
        // Ticks while paused are stale and must not commit
        clock.tick(ms(60_000));
        assert_eq!(clock.remaining(Color::White), ms(298_000));
        assert!(!clock.is_running());
    }

    #[test]
    fn test_flag_fall_auto_pauses() {
        //! 0:01 per side, 1100ms elapsed: White flags and the clock stops
        let mut clock = ChessClock::default();
        clock.configure(TimeControl::parse("0:01"));
        clock.start(ms(0));
        clock.tick(ms(1_100));
        assert_eq!(clock.remaining(Color::White), ms(0));
        assert!(!clock.is_running());
        assert_eq!(clock.flag_fallen(), Some(Color::White));

        // Further ticks are no-ops
        clock.tick(ms(2_000));
        assert_eq!(clock.remaining(Color::Black), ms(1_000));
    }

    #[test]
    fn test_switch_preserves_running_state_and_times() {
        let mut clock = ChessClock::default();
        clock.start(ms(0));
        clock.switch_active();
        assert_eq!(clock.active(), Color::Black);
        assert!(clock.is_running());
        assert_eq!(clock.remaining(Color::White), ms(300_000));

        clock.pause();
        clock.switch_active();
        assert_eq!(clock.active(), Color::White);
        assert!(!clock.is_running());
    }

    #[test]
    fn test_monotonic_ticks_never_go_negative() {
        let mut clock = ChessClock::default();
        clock.configure(TimeControl::parse("0:02"));
        clock.start(ms(0));
        let mut previous = clock.remaining(Color::White);
        for now in [100, 400, 900, 1_600, 2_500, 3_600] {
            clock.tick(ms(now));
            let current = clock.remaining(Color::White);
            assert!(current <= previous);
            previous = current;
        }
        assert_eq!(previous, ms(0));
    }

    #[test]
    fn test_configure_resets_active_side_and_pauses() {
        let mut clock = ChessClock::default();
        clock.start(ms(0));
        clock.switch_active();
        clock.configure(TimeControl::parse("3:00"));
        assert_eq!(clock.active(), Color::White);
        assert!(!clock.is_running());
        assert_eq!(clock.remaining(Color::Black), ms(180_000));
    }
}
