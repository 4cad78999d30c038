//! Timer / stopwatch / alarm. One state machine, three mutually exclusive
//! modes; switching modes resets the transient state.

use chrono::NaiveTime;

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    Timer,
    Stopwatch,
    Alarm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing happened.
    Idle,
    /// One second accounted for.
    Ticked,
    /// The countdown just hit zero. Fires exactly once.
    Finished,
}

#[derive(Debug)]
pub struct TimerTool {
    mode: TimerMode,
    seconds: u32,
    running: bool,
}

impl TimerTool {
    pub fn new() -> Self {
        Self {
            mode: TimerMode::Timer,
            seconds: 0,
            running: false,
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Switching modes stops the clock and clears the display.
    pub fn switch_mode(&mut self, mode: TimerMode) {
        self.mode = mode;
        self.seconds = 0;
        self.running = false;
    }

    /// Set and start a countdown (timer mode only).
    pub fn start_countdown(&mut self, hours: u32, minutes: u32, seconds: u32) -> CoreResult<()> {
        if self.mode != TimerMode::Timer {
            return Err(CoreError::InvalidInput(
                "countdown requires timer mode".to_string(),
            ));
        }
        if minutes > 59 || seconds > 59 || hours > 23 {
            return Err(CoreError::InvalidInput(
                "time fields out of range".to_string(),
            ));
        }
        let total = hours * 3600 + minutes * 60 + seconds;
        if total == 0 {
            return Err(CoreError::InvalidInput("countdown is zero".to_string()));
        }
        self.seconds = total;
        self.running = true;
        Ok(())
    }

    /// Start counting up (stopwatch mode only).
    pub fn start_stopwatch(&mut self) -> CoreResult<()> {
        if self.mode != TimerMode::Stopwatch {
            return Err(CoreError::InvalidInput(
                "stopwatch mode is not active".to_string(),
            ));
        }
        self.running = true;
        Ok(())
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.seconds = 0;
    }

    /// Advance one second.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        match self.mode {
            TimerMode::Timer => {
                self.seconds = self.seconds.saturating_sub(1);
                if self.seconds == 0 {
                    self.running = false;
                    TickOutcome::Finished
                } else {
                    TickOutcome::Ticked
                }
            }
            TimerMode::Stopwatch => {
                self.seconds += 1;
                TickOutcome::Ticked
            }
            TimerMode::Alarm => TickOutcome::Idle,
        }
    }

    pub fn display(&self) -> String {
        format_hms(self.seconds)
    }
}

impl Default for TimerTool {
    fn default() -> Self {
        Self::new()
    }
}

pub fn format_hms(total_seconds: u32) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Seconds until the alarm should fire: the next occurrence of `target`,
/// wrapping past midnight when that time has already passed today.
pub fn alarm_delay_secs(now: NaiveTime, target: NaiveTime) -> u32 {
    let diff = (target - now).num_seconds();
    if diff < 0 {
        (diff + 24 * 3600) as u32
    } else {
        diff as u32
    }
}

/// Parse an alarm time in `HH:MM` form.
pub fn parse_alarm_time(input: &str) -> CoreResult<NaiveTime> {
    NaiveTime::parse_from_str(input, "%H:%M")
        .map_err(|_| CoreError::InvalidInput(format!("invalid alarm time: {input}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn countdown_ticks_to_finish_once() {
        let mut timer = TimerTool::new();
        timer.start_countdown(0, 0, 2).unwrap();
        assert_eq!(timer.tick(), TickOutcome::Ticked);
        assert_eq!(timer.tick(), TickOutcome::Finished);
        // Finished stops the clock; further ticks are idle.
        assert_eq!(timer.tick(), TickOutcome::Idle);
        assert!(!timer.is_running());
    }

    #[test]
    fn countdown_validates_fields() {
        let mut timer = TimerTool::new();
        assert!(timer.start_countdown(0, 0, 0).is_err());
        assert!(timer.start_countdown(0, 60, 0).is_err());
        assert!(timer.start_countdown(24, 0, 0).is_err());
    }

    #[test]
    fn stopwatch_counts_up() {
        let mut timer = TimerTool::new();
        timer.switch_mode(TimerMode::Stopwatch);
        timer.start_stopwatch().unwrap();
        timer.tick();
        timer.tick();
        assert_eq!(timer.seconds(), 2);
        assert_eq!(timer.display(), "00:00:02");
    }

    #[test]
    fn modes_are_mutually_exclusive() {
        let mut timer = TimerTool::new();
        timer.start_countdown(0, 1, 0).unwrap();
        assert!(timer.is_running());

        // Switching kills the running countdown.
        timer.switch_mode(TimerMode::Stopwatch);
        assert!(!timer.is_running());
        assert_eq!(timer.seconds(), 0);

        // And countdown cannot start outside timer mode.
        assert!(timer.start_countdown(0, 1, 0).is_err());
        assert!(timer.start_stopwatch().is_ok());

        timer.switch_mode(TimerMode::Alarm);
        assert!(timer.start_stopwatch().is_err());
    }

    #[test]
    fn reset_clears_but_keeps_mode() {
        let mut timer = TimerTool::new();
        timer.switch_mode(TimerMode::Stopwatch);
        timer.start_stopwatch().unwrap();
        timer.tick();
        timer.reset();
        assert_eq!(timer.seconds(), 0);
        assert_eq!(timer.mode(), TimerMode::Stopwatch);
    }

    #[test]
    fn display_formats_hms() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(3661), "01:01:01");
        assert_eq!(format_hms(86399), "23:59:59");
    }

    #[test]
    fn alarm_later_today() {
        let delay = alarm_delay_secs(time(8, 0, 0), time(8, 30, 0));
        assert_eq!(delay, 30 * 60);
    }

    #[test]
    fn alarm_wraps_past_midnight() {
        let delay = alarm_delay_secs(time(23, 30, 0), time(7, 0, 0));
        assert_eq!(delay, 7 * 3600 + 30 * 60);
    }

    #[test]
    fn alarm_at_current_time_fires_now() {
        assert_eq!(alarm_delay_secs(time(12, 0, 0), time(12, 0, 0)), 0);
    }

    #[test]
    fn alarm_time_parses_hh_mm() {
        assert_eq!(parse_alarm_time("07:45").unwrap(), time(7, 45, 0));
        assert!(parse_alarm_time("7:45pm").is_err());
        assert!(parse_alarm_time("25:00").is_err());
    }
}
