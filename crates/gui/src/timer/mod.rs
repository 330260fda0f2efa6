//! Per-job stopwatch persisted through a key-value store.
//!
//! The persisted snapshot is the source of truth: every read re-derives
//! elapsed time from it, so two timers on the same job (or a timer
//! re-created after a restart) agree. When the store fails the timer keeps
//! going on its in-memory copy, and that copy stays authoritative until a
//! later write succeeds.

mod clock;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{FileStore, KeyValueStore, MemoryStore};

use shared::{format_hms, JobId, TimerState};

/// Storage key for a job's timer
pub fn storage_key(job_id: &str) -> String {
    format!("job-timer:{job_id}")
}

pub struct JobTimer<S: KeyValueStore, C: Clock> {
    job_id: JobId,
    state: TimerState,
    /// Last write to the store failed; `state` is ahead of it
    unsaved: bool,
    store: S,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> JobTimer<S, C> {
    pub fn new(job_id: impl Into<JobId>, store: S, clock: C) -> Self {
        let job_id = job_id.into();
        let state = read_state(&store, &job_id).unwrap_or_default().unwrap_or_default();
        tracing::debug!("Timer for job {job_id} restored: {state:?}");
        Self {
            job_id,
            state,
            unsaved: false,
            store,
            clock,
        }
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    /// Point the timer at another job, loading that job's own state
    pub fn switch_job(&mut self, job_id: impl Into<JobId>) {
        let job_id = job_id.into();
        if job_id == self.job_id {
            return;
        }
        if self.unsaved {
            tracing::warn!("Dropping unsaved timer state for job {}", self.job_id);
        }
        self.state = read_state(&self.store, &job_id)
            .unwrap_or_default()
            .unwrap_or_default();
        self.unsaved = false;
        self.job_id = job_id;
    }

    /// Start counting. No-op while already running.
    pub fn start(&mut self) {
        self.state = self.snapshot();
        if self.state.start(self.clock.now_ms()) {
            tracing::info!("Timer started for job {}", self.job_id);
            self.persist();
        }
    }

    /// Fold the running interval into the total. No-op while stopped.
    pub fn pause(&mut self) {
        self.state = self.snapshot();
        if self.state.pause(self.clock.now_ms()) {
            tracing::info!(
                "Timer paused for job {} at {}s",
                self.job_id,
                self.state.elapsed
            );
            self.persist();
        }
    }

    /// Zero the timer and drop its persisted entry
    pub fn reset(&mut self) {
        self.state = TimerState::default();
        self.unsaved = match self.store.remove(&storage_key(&self.job_id)) {
            Ok(()) => false,
            Err(e) => {
                tracing::warn!("Failed to clear timer for job {}: {e}", self.job_id);
                true
            }
        };
        tracing::info!("Timer reset for job {}", self.job_id);
    }

    /// Refresh from the persisted snapshot and return elapsed seconds.
    /// Called once per second by the UI while running.
    pub fn tick(&mut self) -> u64 {
        self.state = self.snapshot();
        self.state.elapsed_at(self.clock.now_ms())
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.snapshot().elapsed_at(self.clock.now_ms())
    }

    pub fn formatted_time(&self) -> String {
        format_hms(self.elapsed_secs())
    }

    pub fn is_running(&self) -> bool {
        self.snapshot().running
    }

    /// Last state seen by this timer (no store access)
    pub fn state(&self) -> TimerState {
        self.state
    }

    fn snapshot(&self) -> TimerState {
        if self.unsaved {
            return self.state;
        }
        match read_state(&self.store, &self.job_id) {
            Ok(Some(state)) => state,
            Ok(None) => TimerState::default(),
            Err(()) => self.state,
        }
    }

    fn persist(&mut self) {
        let key = storage_key(&self.job_id);
        let result = serde_json::to_string(&self.state)
            .map_err(Into::into)
            .and_then(|json| self.store.set(&key, &json));
        self.unsaved = match result {
            Ok(()) => false,
            Err(e) => {
                tracing::warn!("Failed to persist timer for job {}: {e}", self.job_id);
                true
            }
        };
    }
}

/// `Err` when the store itself failed; a corrupt entry reads as absent.
fn read_state<S: KeyValueStore>(store: &S, job_id: &str) -> Result<Option<TimerState>, ()> {
    let json = match store.get(&storage_key(job_id)) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!("Timer storage unavailable for job {job_id}: {e}");
            return Err(());
        }
    };
    Ok(json.and_then(|json| match serde_json::from_str(&json) {
        Ok(state) => Some(state),
        Err(e) => {
            tracing::warn!("Discarding corrupt timer state for job {job_id}: {e}");
            None
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer<'a>(
        job: &str,
        store: &'a MemoryStore,
        clock: &'a ManualClock,
    ) -> JobTimer<&'a MemoryStore, &'a ManualClock> {
        JobTimer::new(job, store, clock)
    }

    #[test]
    fn test_start_wait_pause() {
        let store = MemoryStore::new();
        let clock = ManualClock::new(1_000_000);
        let mut t = timer("A", &store, &clock);

        t.start();
        assert!(t.is_running());
        clock.advance_secs(5);
        t.pause();
        assert!(!t.is_running());
        assert_eq!(t.elapsed_secs(), 5);
        assert_eq!(t.formatted_time(), "00:00:05");
    }

    #[test]
    fn test_reset_removes_persisted_entry() {
        let store = MemoryStore::new();
        let clock = ManualClock::new(0);
        let mut t = timer("A", &store, &clock);
        t.start();
        clock.advance_secs(5);
        t.pause();
        assert!(store.get("job-timer:A").unwrap().is_some());

        t.reset();
        assert_eq!(t.elapsed_secs(), 0);
        assert_eq!(store.get("job-timer:A").unwrap(), None);
    }

    #[test]
    fn test_double_start_does_not_restamp() {
        let store = MemoryStore::new();
        let clock = ManualClock::new(0);
        let mut t = timer("A", &store, &clock);
        t.start();
        clock.advance_secs(3);
        t.start();
        clock.advance_secs(2);
        assert_eq!(t.tick(), 5);
    }

    #[test]
    fn test_pause_when_stopped_is_noop() {
        let store = MemoryStore::new();
        let clock = ManualClock::new(0);
        let mut t = timer("A", &store, &clock);
        t.pause();
        assert!(store.is_empty());
        assert_eq!(t.elapsed_secs(), 0);
    }

    #[test]
    fn test_switch_job_keeps_counters_apart() {
        let store = MemoryStore::new();
        let clock = ManualClock::new(0);
        let mut t = timer("A", &store, &clock);
        t.start();
        clock.advance_secs(10);
        t.pause();

        t.switch_job("B");
        assert_eq!(t.job_id(), "B");
        assert_eq!(t.elapsed_secs(), 0);
        assert!(!t.is_running());

        t.switch_job("A");
        assert_eq!(t.elapsed_secs(), 10);
    }

    #[test]
    fn test_unavailable_store_runs_in_memory() {
        let store = MemoryStore::unavailable();
        let clock = ManualClock::new(0);
        let mut t = timer("A", &store, &clock);
        t.start();
        clock.advance_secs(4);
        assert_eq!(t.tick(), 4);
        t.pause();
        assert_eq!(t.elapsed_secs(), 4);
        t.reset();
        assert_eq!(t.elapsed_secs(), 0);
    }

    #[test]
    fn test_corrupt_entry_reads_as_zero() {
        let store = MemoryStore::new();
        store.set("job-timer:A", "{oops").unwrap();
        let clock = ManualClock::new(0);
        let t = timer("A", &store, &clock);
        assert_eq!(t.elapsed_secs(), 0);
        assert!(!t.is_running());
    }

    #[test]
    fn test_second_timer_sees_first_timers_start() {
        let store = MemoryStore::new();
        let clock = ManualClock::new(0);
        let mut first = timer("A", &store, &clock);
        let mut second = timer("A", &store, &clock);
        first.start();
        clock.advance_secs(2);
        assert_eq!(second.tick(), 2);
        assert!(second.is_running());
    }

    #[test]
    fn test_unwritable_store_keeps_running_in_memory() {
        let store = MemoryStore::read_only();
        let clock = ManualClock::new(0);
        let mut t = timer("A", &store, &clock);
        t.start();
        clock.advance_secs(5);
        assert_eq!(t.tick(), 5);
        assert!(t.is_running());
        t.pause();
        clock.advance_secs(5);
        assert_eq!(t.elapsed_secs(), 5);
        assert!(store.is_empty());
    }

    #[test]
    fn test_reset_sticks_when_entry_cannot_be_removed() {
        let store = MemoryStore::read_only()
            .with_entry("job-timer:A", r#"{"elapsed":42,"running":false}"#);
        let clock = ManualClock::new(0);
        let mut t = timer("A", &store, &clock);
        assert_eq!(t.elapsed_secs(), 42);

        t.reset();
        assert_eq!(t.tick(), 0);
        assert_eq!(t.formatted_time(), "00:00:00");
        assert!(store.get("job-timer:A").unwrap().is_some());
    }

    #[test]
    fn test_is_running_follows_other_timers_pause() {
        let store = MemoryStore::new();
        let clock = ManualClock::new(0);
        let mut first = timer("A", &store, &clock);
        let second = timer("A", &store, &clock);
        first.start();
        assert!(second.is_running());
        clock.advance_secs(3);
        first.pause();
        assert!(!second.is_running());
        assert_eq!(second.elapsed_secs(), 3);
    }
}
