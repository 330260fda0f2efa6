//! Integration tests for the job timer over a shared store.
//!
//! Tests end-to-end: JobTimer -> KeyValueStore -> JobTimer, with a manual
//! clock standing in for wall time.

use std::sync::Arc;

use detail_studio_lib::timer::{storage_key, FileStore, JobTimer, KeyValueStore, ManualClock, MemoryStore};

const T0: i64 = 1_700_000_000_000;

#[test]
fn test_five_seconds_then_pause() {
    let clock = Arc::new(ManualClock::new(T0));
    let mut timer = JobTimer::new("job-1", MemoryStore::new(), clock.clone());

    timer.start();
    clock.advance_secs(5);
    timer.pause();

    assert_eq!(timer.tick(), 5);
    assert_eq!(timer.formatted_time(), "00:00:05");

    // Paused timers don't move
    clock.advance_secs(60);
    assert_eq!(timer.tick(), 5);
    assert!(!timer.is_running());
}

#[test]
fn test_reset_removes_persisted_state() {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(T0));
    let mut timer = JobTimer::new("job-2", store.clone(), clock.clone());

    timer.start();
    clock.advance_secs(3);
    assert!(store.get(&storage_key("job-2")).unwrap().is_some());

    timer.reset();
    assert_eq!(timer.tick(), 0);
    assert!(!timer.is_running());
    assert!(store.get(&storage_key("job-2")).unwrap().is_none());
}

#[test]
fn test_jobs_keep_separate_time() {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(T0));
    let mut timer = JobTimer::new("A", store.clone(), clock.clone());

    timer.start();
    clock.advance_secs(10);
    timer.pause();

    timer.switch_job("B");
    assert_eq!(timer.job_id(), "B");
    assert_eq!(timer.tick(), 0);

    timer.switch_job("A");
    assert_eq!(timer.tick(), 10);
}

#[test]
fn test_running_timer_resumes_after_restart() {
    let store = Arc::new(MemoryStore::new());
    store
        .set(
            &storage_key("job-3"),
            &format!(r#"{{"elapsed":20,"running":true,"startTime":{T0}}}"#),
        )
        .unwrap();

    let clock = Arc::new(ManualClock::new(T0 + 7_000));
    let mut timer = JobTimer::new("job-3", store, clock);
    assert!(timer.is_running());
    assert_eq!(timer.tick(), 27);
    assert_eq!(timer.formatted_time(), "00:00:27");
}

#[test]
fn test_file_store_survives_new_timer() {
    let dir = std::env::temp_dir().join(format!("detail-studio-{}", uuid::Uuid::new_v4()));
    let path = dir.join("timers.json");
    let clock = Arc::new(ManualClock::new(T0));

    {
        let mut timer = JobTimer::new("job-4", FileStore::new(&path), clock.clone());
        timer.start();
        clock.advance_secs(90);
        timer.pause();
    }

    let timer = JobTimer::new("job-4", FileStore::new(&path), clock.clone());
    assert_eq!(timer.elapsed_secs(), 90);
    assert_eq!(timer.formatted_time(), "00:01:30");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_two_timers_on_one_job_agree() {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(T0));
    let mut first = JobTimer::new("job-5", store.clone(), clock.clone());
    let mut second = JobTimer::new("job-5", store.clone(), clock.clone());

    first.start();
    clock.advance_secs(4);
    assert_eq!(second.tick(), 4);
    assert!(second.is_running());

    second.pause();
    clock.advance_secs(4);
    assert_eq!(first.tick(), 4);
}

#[test]
fn test_read_only_store_does_not_stop_the_clock() {
    let clock = Arc::new(ManualClock::new(T0));
    let mut timer = JobTimer::new("job-6", MemoryStore::read_only(), clock.clone());

    timer.start();
    clock.advance_secs(5);
    assert_eq!(timer.tick(), 5);
    assert!(timer.is_running());

    timer.pause();
    clock.advance_secs(30);
    assert_eq!(timer.tick(), 5);
    assert!(!timer.is_running());
}

#[test]
fn test_reset_on_read_only_store_stays_zero() {
    let store = Arc::new(
        MemoryStore::read_only().with_entry(storage_key("job-7"), r#"{"elapsed":42,"running":false}"#),
    );
    let clock = Arc::new(ManualClock::new(T0));
    let mut timer = JobTimer::new("job-7", store.clone(), clock.clone());
    assert_eq!(timer.tick(), 42);

    timer.reset();
    clock.advance_secs(1);
    assert_eq!(timer.tick(), 0);
    assert!(store.get(&storage_key("job-7")).unwrap().is_some());
}

#[test]
fn test_pause_elsewhere_shows_without_tick() {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(T0));
    let mut first = JobTimer::new("job-8", store.clone(), clock.clone());
    let second = JobTimer::new("job-8", store.clone(), clock.clone());

    first.start();
    assert!(second.is_running());
    first.pause();
    assert!(!second.is_running());
}
