//! Timer service.
//!
//! Stages arm and disarm timers through [`TimerService`]; the controller owns
//! a [`TimerQueue`], advances it by the elapsed frame time and feeds the due
//! ticks back as ordinary `InputEvent::TimerTick` events.

use arrayvec::ArrayVec;

use crate::types::TimerId;

/// Upper bound on ticks reported by a single [`TimerQueue::advance`].
pub const MAX_TICKS_PER_ADVANCE: usize = 16;

pub trait TimerService {
    /// Arm (or re-arm) `id` to fire after `interval_ms`, repeatedly if asked.
    fn arm(&mut self, id: TimerId, interval_ms: u32, repeating: bool);
    /// Cancel `id`; no further ticks are produced for it.
    fn disarm(&mut self, id: TimerId);
    fn disarm_all(&mut self);
    fn is_armed(&self, id: TimerId) -> bool;
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    id: TimerId,
    interval_ms: u32,
    remaining_ms: u32,
    repeating: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    timers: ArrayVec<Timer, 4>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Advance all timers by `elapsed_ms` and return the ids that came due,
    /// ordered by due time.
    pub fn advance(&mut self, elapsed_ms: u32) -> ArrayVec<TimerId, MAX_TICKS_PER_ADVANCE> {
        let mut due = ArrayVec::<(u32, TimerId), MAX_TICKS_PER_ADVANCE>::new();

        self.timers.retain(|timer| {
            let mut budget = elapsed_ms;
            let mut at = 0u32;
            while timer.remaining_ms <= budget {
                budget -= timer.remaining_ms;
                at += timer.remaining_ms;
                if due.try_push((at, timer.id)).is_err() {
                    log::warn!("timer {} dropped ticks in a long frame", timer.id.as_str());
                    timer.remaining_ms = timer.interval_ms;
                    return timer.repeating;
                }
                if !timer.repeating {
                    return false;
                }
                timer.remaining_ms = timer.interval_ms;
            }
            timer.remaining_ms -= budget;
            true
        });

        due.sort_by_key(|&(at, _)| at);
        due.into_iter().map(|(_, id)| id).collect()
    }
}

impl TimerService for TimerQueue {
    fn arm(&mut self, id: TimerId, interval_ms: u32, repeating: bool) {
        let interval_ms = interval_ms.max(1);
        self.disarm(id);
        log::debug!("arm timer {} every {}ms", id.as_str(), interval_ms);
        self.timers.push(Timer {
            id,
            interval_ms,
            remaining_ms: interval_ms,
            repeating,
        });
    }

    fn disarm(&mut self, id: TimerId) {
        self.timers.retain(|t| t.id != id);
    }

    fn disarm_all(&mut self) {
        self.timers.clear();
    }

    fn is_armed(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeating_timer_fires_each_interval() {
        let mut q = TimerQueue::new();
        q.arm(TimerId::Countdown, 1000, true);

        let mut fired = 0;
        for _ in 0..60 {
            fired += q.advance(50).len();
        }
        assert_eq!(fired, 3);
        assert!(q.is_armed(TimerId::Countdown));
    }

    #[test]
    fn test_one_shot_timer_fires_once() {
        let mut q = TimerQueue::new();
        q.arm(TimerId::Spawn, 100, false);
        assert!(q.advance(99).is_empty());
        assert_eq!(q.advance(1).as_slice(), &[TimerId::Spawn]);
        assert!(!q.is_armed(TimerId::Spawn));
        assert!(q.advance(1000).is_empty());
    }

    #[test]
    fn test_disarm_stops_ticks_immediately() {
        let mut q = TimerQueue::new();
        q.arm(TimerId::Spawn, 100, true);
        q.advance(90);
        q.disarm(TimerId::Spawn);
        assert!(q.advance(500).is_empty());
        assert!(q.is_empty());
    }

    #[test]
    fn test_rearm_restarts_interval() {
        let mut q = TimerQueue::new();
        q.arm(TimerId::Spawn, 100, true);
        q.advance(90);
        q.arm(TimerId::Spawn, 100, true);
        assert!(q.advance(90).is_empty());
        assert_eq!(q.advance(10).len(), 1);
    }

    #[test]
    fn test_long_frame_orders_ticks_by_due_time() {
        let mut q = TimerQueue::new();
        q.arm(TimerId::Countdown, 300, true);
        q.arm(TimerId::Spawn, 200, true);
        let due = q.advance(600);
        assert_eq!(
            due.as_slice(),
            &[
                TimerId::Spawn,
                TimerId::Countdown,
                TimerId::Spawn,
                TimerId::Countdown,
                TimerId::Spawn,
            ]
        );
    }

    #[test]
    fn test_disarm_all() {
        let mut q = TimerQueue::new();
        q.arm(TimerId::Countdown, 10, true);
        q.arm(TimerId::Spawn, 10, true);
        q.disarm_all();
        assert!(q.advance(100).is_empty());
    }
}
