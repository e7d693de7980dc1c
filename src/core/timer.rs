//! Countdown timer engine
//!
//! Deadline-based: the running phase stores an absolute deadline and every
//! snapshot derives the remaining time from the clock, so no background
//! tick task is needed. The frontend polls `tick`; completion is reported
//! exactly once.

use std::time::{Duration, Instant};

use crate::shared::types::{TimerPhase, TimerSnapshot};

#[derive(Debug, Clone, Copy)]
enum Phase {
    Idle,
    Running { deadline: Instant },
    Paused { remaining: Duration },
    Finished,
}

#[derive(Debug)]
pub struct CountdownTimer {
    duration: Duration,
    phase: Phase,
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self {
            duration: Duration::ZERO,
            phase: Phase::Idle,
        }
    }

    /// Start a fresh countdown, replacing any previous state
    pub fn start(&mut self, duration_secs: u64) {
        self.start_at(duration_secs, Instant::now())
    }

    pub fn pause(&mut self) {
        self.pause_at(Instant::now())
    }

    pub fn resume(&mut self) {
        self.resume_at(Instant::now())
    }

    /// Back to idle; the configured duration is kept for display
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Advance the engine: reports the completion transition exactly once
    pub fn tick(&mut self) -> Option<TimerSnapshot> {
        self.tick_at(Instant::now())
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.snapshot_at(Instant::now())
    }

    fn start_at(&mut self, duration_secs: u64, now: Instant) {
        self.duration = Duration::from_secs(duration_secs);
        self.phase = Phase::Running {
            deadline: now + self.duration,
        };
    }

    fn pause_at(&mut self, now: Instant) {
        if let Phase::Running { deadline } = self.phase {
            self.phase = Phase::Paused {
                remaining: deadline.saturating_duration_since(now),
            };
        }
    }

    fn resume_at(&mut self, now: Instant) {
        if let Phase::Paused { remaining } = self.phase {
            self.phase = Phase::Running {
                deadline: now + remaining,
            };
        }
    }

    fn tick_at(&mut self, now: Instant) -> Option<TimerSnapshot> {
        if let Phase::Running { deadline } = self.phase {
            if now >= deadline {
                self.phase = Phase::Finished;
                return Some(self.snapshot_at(now));
            }
        }
        None
    }

    fn snapshot_at(&self, now: Instant) -> TimerSnapshot {
        let (phase, remaining) = match self.phase {
            Phase::Idle => (TimerPhase::Idle, Duration::ZERO),
            Phase::Running { deadline } => {
                let remaining = deadline.saturating_duration_since(now);
                if remaining.is_zero() {
                    (TimerPhase::Finished, Duration::ZERO)
                } else {
                    (TimerPhase::Running, remaining)
                }
            }
            Phase::Paused { remaining } => (TimerPhase::Paused, remaining),
            Phase::Finished => (TimerPhase::Finished, Duration::ZERO),
        };

        TimerSnapshot {
            phase,
            remaining_secs: remaining.as_secs(),
            duration_secs: self.duration.as_secs(),
        }
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_snapshot() {
        let timer = CountdownTimer::new();
        let snap = timer.snapshot();
        assert_eq!(snap.phase, TimerPhase::Idle);
        assert_eq!(snap.remaining_secs, 0);
    }

    #[test]
    fn test_start_counts_down_from_duration() {
        let mut timer = CountdownTimer::new();
        let now = Instant::now();
        timer.start_at(300, now);

        let snap = timer.snapshot_at(now);
        assert_eq!(snap.phase, TimerPhase::Running);
        assert_eq!(snap.remaining_secs, 300);
        assert_eq!(snap.duration_secs, 300);

        let later = now + Duration::from_secs(120);
        assert_eq!(timer.snapshot_at(later).remaining_secs, 180);
    }

    #[test]
    fn test_pause_freezes_remaining() {
        let mut timer = CountdownTimer::new();
        let now = Instant::now();
        timer.start_at(60, now);
        timer.pause_at(now + Duration::from_secs(20));

        let much_later = now + Duration::from_secs(500);
        let snap = timer.snapshot_at(much_later);
        assert_eq!(snap.phase, TimerPhase::Paused);
        assert_eq!(snap.remaining_secs, 40);
    }

    #[test]
    fn test_resume_continues_from_pause() {
        let mut timer = CountdownTimer::new();
        let now = Instant::now();
        timer.start_at(60, now);
        timer.pause_at(now + Duration::from_secs(20));
        timer.resume_at(now + Duration::from_secs(100));

        let snap = timer.snapshot_at(now + Duration::from_secs(110));
        assert_eq!(snap.phase, TimerPhase::Running);
        assert_eq!(snap.remaining_secs, 30);
    }

    #[test]
    fn test_tick_reports_completion_once() {
        let mut timer = CountdownTimer::new();
        let now = Instant::now();
        timer.start_at(10, now);

        assert!(timer.tick_at(now + Duration::from_secs(5)).is_none());

        let done = timer.tick_at(now + Duration::from_secs(10));
        assert_eq!(done.map(|s| s.phase), Some(TimerPhase::Finished));

        // Already reported; later ticks stay quiet
        assert!(timer.tick_at(now + Duration::from_secs(11)).is_none());
        assert_eq!(timer.snapshot_at(now + Duration::from_secs(11)).phase, TimerPhase::Finished);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut timer = CountdownTimer::new();
        let now = Instant::now();
        timer.start_at(60, now);
        timer.reset();

        let snap = timer.snapshot_at(now + Duration::from_secs(1));
        assert_eq!(snap.phase, TimerPhase::Idle);
        assert_eq!(snap.duration_secs, 60);
    }

    #[test]
    fn test_pause_on_idle_is_ignored() {
        let mut timer = CountdownTimer::new();
        timer.pause();
        timer.resume();
        assert_eq!(timer.snapshot().phase, TimerPhase::Idle);
    }
}
