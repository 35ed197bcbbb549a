//! Debounced persistence of in-progress edits.
//!
//! The caller owns the clock: every transition takes the current [`Instant`]
//! so the state machine stays deterministic and testable.

use std::time::{Duration, Instant};

/// Delay between the last edit and the save attempt.
pub const DEFAULT_SAVE_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveState {
    /// Nothing pending.
    #[default]
    Clean,
    /// An edit is waiting for its deadline.
    Dirty,
    /// A value was handed out and its save has not completed yet.
    Saving,
    /// The last save failed; the value is kept until the next edit or flush.
    ErrorDirty,
}

#[derive(Debug, Clone)]
pub struct DebouncedSave<T> {
    delay: Duration,
    state: SaveState,
    pending: Option<T>,
    deadline: Option<Instant>,
    /// Copy of the value currently being saved, restored on failure.
    in_flight: Option<T>,
}

impl<T: Clone> Default for DebouncedSave<T> {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_DELAY)
    }
}

impl<T: Clone> DebouncedSave<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: SaveState::Clean,
            pending: None,
            deadline: None,
            in_flight: None,
        }
    }

    pub fn state(&self) -> SaveState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Record the latest value and re-arm the timer.
    ///
    /// An edit made while a save is in flight stays pending and is picked up
    /// once that save completes.
    pub fn edit(&mut self, value: T, now: Instant) {
        self.pending = Some(value);
        self.deadline = Some(now + self.delay);
        if self.state != SaveState::Saving {
            self.state = SaveState::Dirty;
        }
    }

    /// Hand out the pending value when its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.state == SaveState::Saving {
            return None;
        }
        match self.deadline {
            Some(deadline) if now >= deadline => self.take(),
            _ => None,
        }
    }

    /// Cancel the timer and hand out the pending value right away.
    ///
    /// Used on teardown and to retry after a failed save.
    pub fn flush(&mut self) -> Option<T> {
        if self.state == SaveState::Saving {
            return None;
        }
        self.take()
    }

    /// Report the outcome of the save started by [`poll`](Self::poll) or
    /// [`flush`](Self::flush).
    pub fn complete<E>(&mut self, result: Result<(), E>, now: Instant) {
        if self.state != SaveState::Saving {
            return;
        }
        let saved = self.in_flight.take();

        match result {
            Ok(()) => {
                if self.pending.is_some() {
                    self.state = SaveState::Dirty;
                    self.deadline = Some(now + self.delay);
                } else {
                    self.state = SaveState::Clean;
                }
            }
            Err(_) => {
                // A newer edit supersedes the failed value.
                if self.pending.is_none() {
                    self.pending = saved;
                }
                self.state = SaveState::ErrorDirty;
                self.deadline = None;
            }
        }
    }

    fn take(&mut self) -> Option<T> {
        let value = self.pending.take()?;
        self.deadline = None;
        self.state = SaveState::Saving;
        self.in_flight = Some(value.clone());
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saver() -> (DebouncedSave<&'static str>, Instant) {
        (DebouncedSave::new(Duration::from_millis(100)), Instant::now())
    }

    #[test]
    fn saves_latest_value_once_after_delay() {
        let (mut save, start) = saver();
        save.edit("a", start);
        save.edit("b", start + Duration::from_millis(50));

        assert_eq!(save.poll(start + Duration::from_millis(120)), None);
        assert_eq!(save.poll(start + Duration::from_millis(150)), Some("b"));
        assert_eq!(save.state(), SaveState::Saving);
        assert_eq!(save.poll(start + Duration::from_millis(500)), None);

        save.complete::<()>(Ok(()), start + Duration::from_millis(160));
        assert_eq!(save.state(), SaveState::Clean);
        assert!(!save.is_dirty());
    }

    #[test]
    fn failure_keeps_value_without_rescheduling() {
        let (mut save, start) = saver();
        save.edit("a", start);
        let value = save.poll(start + Duration::from_millis(100));
        assert_eq!(value, Some("a"));

        save.complete(Err("offline"), start + Duration::from_millis(110));
        assert_eq!(save.state(), SaveState::ErrorDirty);
        assert!(save.is_dirty());
        assert_eq!(save.deadline(), None);
        assert_eq!(save.poll(start + Duration::from_secs(60)), None);

        assert_eq!(save.flush(), Some("a"));
    }

    #[test]
    fn edit_during_save_is_kept_for_next_round() {
        let (mut save, start) = saver();
        save.edit("a", start);
        assert_eq!(save.poll(start + Duration::from_millis(100)), Some("a"));

        save.edit("b", start + Duration::from_millis(110));
        assert_eq!(save.state(), SaveState::Saving);

        save.complete::<()>(Ok(()), start + Duration::from_millis(120));
        assert_eq!(save.state(), SaveState::Dirty);
        assert_eq!(save.poll(start + Duration::from_millis(220)), Some("b"));
    }

    #[test]
    fn newer_edit_wins_over_failed_value() {
        let (mut save, start) = saver();
        save.edit("a", start);
        save.poll(start + Duration::from_millis(100));
        save.edit("b", start + Duration::from_millis(110));

        save.complete(Err(()), start + Duration::from_millis(120));
        assert_eq!(save.flush(), Some("b"));
    }

    #[test]
    fn flush_cancels_timer() {
        let (mut save, start) = saver();
        save.edit("a", start);

        assert_eq!(save.flush(), Some("a"));
        assert_eq!(save.deadline(), None);
        assert_eq!(save.flush(), None);
    }
}
