//! Timer Registry - virtual timers driven by the host clock
//!
//! Every delayed callback in the engine is an entry here instead of a loose
//! `setTimeout` handle. Entries carry a scope so a whole group can be
//! dropped atomically:
//! - `State`    - cleared whenever the pet leaves its current state
//! - `Activity` - cleared when an activity sequence finishes or is aborted
//! - `Pet`      - lives until explicitly cancelled (logout/unmount)
//!
//! Due entries are popped one at a time so a handler may cancel or schedule
//! other entries, including ones that were due in the same tick.

pub type TimerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerScope {
    State,
    Activity,
    Pet,
}

#[derive(Clone, Debug)]
struct TimerEntry<E> {
    id: TimerId,
    scope: TimerScope,
    due_ms: f64,
    repeat_ms: Option<f64>,
    event: E,
}

#[derive(Clone, Debug)]
pub struct TimerRegistry<E> {
    entries: Vec<TimerEntry<E>>,
    next_id: TimerId,
}

impl<E: Clone + PartialEq> Default for TimerRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone + PartialEq> TimerRegistry<E> {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(16),
            next_id: 1,
        }
    }

    /// One-shot timer firing `delay_ms` after `now_ms`
    pub fn schedule(&mut self, scope: TimerScope, now_ms: f64, delay_ms: f64, event: E) -> TimerId {
        self.push(scope, now_ms + delay_ms.max(0.0), None, event)
    }

    /// Repeating timer; the first firing is one interval away
    pub fn schedule_repeating(
        &mut self,
        scope: TimerScope,
        now_ms: f64,
        interval_ms: f64,
        event: E,
    ) -> TimerId {
        let interval = interval_ms.max(1.0);
        self.push(scope, now_ms + interval, Some(interval), event)
    }

    /// Cancel every pending entry with an equal event, then schedule a fresh one
    pub fn replace(&mut self, scope: TimerScope, now_ms: f64, delay_ms: f64, event: E) -> TimerId {
        self.cancel_event(&event);
        self.schedule(scope, now_ms, delay_ms, event)
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        before != self.entries.len()
    }

    pub fn cancel_event(&mut self, event: &E) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| &e.event != event);
        before - self.entries.len()
    }

    pub fn cancel_scope(&mut self, scope: TimerScope) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.scope != scope);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_pending(&self, event: &E) -> bool {
        self.entries.iter().any(|e| &e.event == event)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Earliest deadline, if any
    pub fn next_due(&self) -> Option<f64> {
        self.entries
            .iter()
            .map(|e| e.due_ms)
            .fold(None, |acc: Option<f64>, d| Some(acc.map_or(d, |a| a.min(d))))
    }

    /// Pop the earliest entry due at `now_ms` (ties broken by scheduling order).
    /// Repeating entries are re-armed one interval after `now_ms` rather than
    /// replaying every missed firing.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<(TimerId, E)> {
        let mut best: Option<usize> = None;
        for (i, e) in self.entries.iter().enumerate() {
            if e.due_ms > now_ms {
                continue;
            }
            best = match best {
                Some(b) => {
                    let cur = &self.entries[b];
                    if e.due_ms < cur.due_ms || (e.due_ms == cur.due_ms && e.id < cur.id) {
                        Some(i)
                    } else {
                        Some(b)
                    }
                }
                None => Some(i),
            };
        }

        let idx = best?;
        match self.entries[idx].repeat_ms {
            Some(interval) => {
                let entry = &mut self.entries[idx];
                entry.due_ms = (entry.due_ms + interval).max(now_ms + interval);
                Some((entry.id, entry.event.clone()))
            }
            None => {
                let entry = self.entries.swap_remove(idx);
                Some((entry.id, entry.event))
            }
        }
    }

    fn push(&mut self, scope: TimerScope, due_ms: f64, repeat_ms: Option<f64>, event: E) -> TimerId {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        self.entries.push(TimerEntry {
            id,
            scope,
            due_ms,
            repeat_ms,
            event,
        });
        id
    }
}
