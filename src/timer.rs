// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Cancelable one-shot and periodic timers on a logical millisecond clock.
// Author: Lukas Bower

//! Cancelable one-shot and periodic timers on a logical millisecond clock.
//!
//! The scheduler never sleeps. Its owner asks for the next deadline, waits
//! however it likes, then calls [`Scheduler::poll_due`] with the current time.

use std::collections::BTreeMap;

/// Handle returned when scheduling, used to cancel.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Timer<T> {
    due_ms: u64,
    period_ms: Option<u64>,
    action: T,
}

/// Timer table keyed by id.
#[derive(Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    timers: BTreeMap<TimerId, Timer<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            timers: BTreeMap::new(),
        }
    }
}

impl<T: Clone> Scheduler<T> {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `action` once at `now_ms + delay_ms`.
    pub fn schedule_once(&mut self, now_ms: u64, delay_ms: u64, action: T) -> TimerId {
        self.insert(now_ms.saturating_add(delay_ms), None, action)
    }

    /// Fire `action` every `period_ms`, starting one period from now.
    pub fn schedule_every(&mut self, now_ms: u64, period_ms: u64, action: T) -> TimerId {
        let period_ms = period_ms.max(1);
        self.insert(now_ms.saturating_add(period_ms), Some(period_ms), action)
    }

    /// Cancel a timer. Returns false when it already fired or was canceled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    /// Cancel every pending timer.
    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    /// Number of pending timers.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.values().map(|timer| timer.due_ms).min()
    }

    /// Collect actions due at `now_ms` in deadline order.
    ///
    /// One-shot timers are removed. A periodic timer fires at most once per
    /// poll and is re-armed one period after `now_ms`, so a stalled owner does
    /// not get a burst of catch-up ticks.
    pub fn poll_due(&mut self, now_ms: u64) -> Vec<(TimerId, T)> {
        let mut due: Vec<(u64, TimerId)> = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.due_ms <= now_ms)
            .map(|(id, timer)| (timer.due_ms, *id))
            .collect();
        due.sort_unstable();

        let mut fired = Vec::with_capacity(due.len());
        for (_, id) in due {
            let rearm = match self.timers.get_mut(&id) {
                Some(timer) => match timer.period_ms {
                    Some(period) => {
                        timer.due_ms = now_ms.saturating_add(period);
                        fired.push((id, timer.action.clone()));
                        true
                    }
                    None => false,
                },
                None => continue,
            };
            if !rearm {
                if let Some(timer) = self.timers.remove(&id) {
                    fired.push((id, timer.action));
                }
            }
        }
        fired
    }

    fn insert(&mut self, due_ms: u64, period_ms: Option<u64>, action: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(
            id,
            Timer {
                due_ms,
                period_ms,
                action,
            },
        );
        id
    }
}
