//! Состояние таймера работы по заказу

use serde::{Deserialize, Serialize};

/// Сохраняемое состояние таймера.
///
/// `elapsed`: накопленные секунды до последнего старта, `start_time`:
/// момент старта в миллисекундах Unix-времени (только пока таймер идёт).
/// `carry_ms`: неполная секунда, оставшаяся после прошлых пауз.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub elapsed: u64,
    pub running: bool,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default, skip_serializing_if = "is_zero_ms")]
    pub carry_ms: u64,
}

fn is_zero_ms(ms: &u64) -> bool {
    *ms == 0
}

impl TimerState {
    /// Запустить таймер. Повторный вызов во время работы ничего не меняет.
    pub fn start(&mut self, now_ms: i64) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.start_time = Some(now_ms);
        true
    }

    /// Остановить таймер, добавив прошедшее время к `elapsed`.
    /// Для остановленного таймера ничего не делает.
    pub fn pause(&mut self, now_ms: i64) -> bool {
        if !self.running {
            return false;
        }
        let total_ms = self.carry_ms + self.running_ms(now_ms);
        self.elapsed += total_ms / 1000;
        self.carry_ms = total_ms % 1000;
        self.running = false;
        self.start_time = None;
        true
    }

    /// Прошедшее время на момент `now_ms` в целых секундах
    pub fn elapsed_at(&self, now_ms: i64) -> u64 {
        if self.running {
            self.elapsed + (self.carry_ms + self.running_ms(now_ms)) / 1000
        } else {
            self.elapsed
        }
    }

    /// Миллисекунды с последнего старта
    fn running_ms(&self, now_ms: i64) -> u64 {
        match (self.running, self.start_time) {
            // Часы могли уйти назад, не уменьшаем накопленное
            (true, Some(start)) => now_ms.saturating_sub(start).max(0) as u64,
            _ => 0,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.elapsed == 0 && !self.running
    }
}

/// Формат `ЧЧ:ММ:СС`
pub fn format_hms(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_pause_accumulates() {
        let mut s = TimerState::default();
        assert!(s.start(1_000));
        assert!(s.pause(6_000));
        assert_eq!(s.elapsed, 5);
        assert!(!s.running);
        assert_eq!(s.start_time, None);

        assert!(s.start(10_000));
        assert_eq!(s.elapsed_at(13_500), 8);
        s.pause(13_500);
        assert_eq!(s.elapsed, 8);
    }

    #[test]
    fn test_start_while_running_keeps_start_time() {
        let mut s = TimerState::default();
        s.start(0);
        assert!(!s.start(4_000));
        assert_eq!(s.start_time, Some(0));
        assert_eq!(s.elapsed_at(9_000), 9);
    }

    #[test]
    fn test_pause_while_stopped_is_noop() {
        let mut s = TimerState { elapsed: 12, running: false, start_time: None, carry_ms: 0 };
        assert!(!s.pause(100_000));
        assert_eq!(s.elapsed, 12);
    }

    #[test]
    fn test_clock_going_backwards() {
        let s = TimerState { elapsed: 3, running: true, start_time: Some(10_000), carry_ms: 0 };
        assert_eq!(s.elapsed_at(5_000), 3);
    }

    #[test]
    fn test_serde_camel_case() {
        let s = TimerState { elapsed: 20, running: true, start_time: Some(1_700_000_000_000), carry_ms: 0 };
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"{"elapsed":20,"running":true,"startTime":1700000000000}"#);
        let back: TimerState = serde_json::from_str(r#"{"elapsed":4,"running":false}"#).unwrap();
        assert_eq!(back.start_time, None);
        assert_eq!(back.carry_ms, 0);
    }

    #[test]
    fn test_short_sessions_keep_partial_seconds() {
        let mut s = TimerState::default();
        let mut now = 0;
        for _ in 0..10 {
            s.start(now);
            now += 1_500;
            s.pause(now);
            now += 10_000;
        }
        assert_eq!(s.elapsed, 15);
        assert_eq!(s.carry_ms, 0);

        s.start(now);
        s.pause(now + 700);
        assert_eq!(s.elapsed, 15);
        assert_eq!(s.carry_ms, 700);
        s.start(now + 1_000);
        assert_eq!(s.elapsed_at(now + 1_300), 16);

        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains(r#""carryMs":700"#));
    }

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(59), "00:00:59");
        assert_eq!(format_hms(3_661), "01:01:01");
        assert_eq!(format_hms(100 * 3600), "100:00:00");
    }
}
