//! Pomodoro: a two-phase work/break cycle.

use crate::error::{CoreError, CoreResult};

pub const DEFAULT_WORK_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;
pub const MAX_WORK_MINUTES: u32 = 60;
pub const MAX_BREAK_MINUTES: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Work => "work",
            Phase::Break => "break",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub phase: Phase,
    pub session: u32,
}

#[derive(Debug)]
pub struct Pomodoro {
    work_secs: u32,
    break_secs: u32,
    remaining: u32,
    phase: Phase,
    session: u32,
    running: bool,
}

impl Pomodoro {
    pub fn new(work_minutes: u32, break_minutes: u32) -> CoreResult<Self> {
        if work_minutes == 0 || work_minutes > MAX_WORK_MINUTES {
            return Err(CoreError::InvalidInput(format!(
                "work minutes must be 1..={MAX_WORK_MINUTES}"
            )));
        }
        if break_minutes == 0 || break_minutes > MAX_BREAK_MINUTES {
            return Err(CoreError::InvalidInput(format!(
                "break minutes must be 1..={MAX_BREAK_MINUTES}"
            )));
        }
        Ok(Self {
            work_secs: work_minutes * 60,
            break_secs: break_minutes * 60,
            remaining: work_minutes * 60,
            phase: Phase::Work,
            session: 0,
            running: false,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> u32 {
        self.session
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Back to a fresh work phase with the session counter cleared.
    pub fn reset(&mut self) {
        self.running = false;
        self.phase = Phase::Work;
        self.remaining = self.work_secs;
        self.session = 0;
    }

    /// Advance one second. Completing a phase flips the mode, resets the
    /// countdown, and counts a finished work session.
    pub fn tick(&mut self) -> Option<PhaseChange> {
        if !self.running {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return None;
        }
        match self.phase {
            Phase::Work => {
                self.phase = Phase::Break;
                self.remaining = self.break_secs;
                self.session += 1;
            }
            Phase::Break => {
                self.phase = Phase::Work;
                self.remaining = self.work_secs;
            }
        }
        Some(PhaseChange {
            phase: self.phase,
            session: self.session,
        })
    }

    /// `MM:SS` countdown display.
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}
