pub mod jobs;
pub mod settings;
pub mod zones;

use std::sync::Arc;

pub use jobs::{demo_jobs, Job, ZoneMode};
pub use settings::{AppSettings, ZoneColors};
pub use zones::ZoneSet;

use crate::timer::{FileStore, JobTimer, KeyValueStore, MemoryStore, SystemClock};

pub type StudioTimer = JobTimer<Arc<dyn KeyValueStore>, SystemClock>;

/// Panel visibility flags
pub struct PanelVisibility {
    pub jobs: bool,
    pub work: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self {
            jobs: true,
            work: true,
        }
    }
}

/// Combined application state
pub struct AppState {
    pub jobs: Vec<Job>,
    active: usize,
    pub zone_mode: ZoneMode,
    pub timer: StudioTimer,
    pub settings: AppSettings,
    pub panels: PanelVisibility,
    /// Show settings window
    pub show_settings_window: bool,
    /// Model opened from the command line or the file menu, shown instead
    /// of the job's built-in vehicle
    pub asset_override: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppSettings::load(), default_store())
    }
}

impl AppState {
    pub fn new(settings: AppSettings, store: Arc<dyn KeyValueStore>) -> Self {
        let jobs = demo_jobs();
        let first_job = jobs.first().map(|j| j.id.clone()).unwrap_or_default();
        Self {
            jobs,
            active: 0,
            zone_mode: ZoneMode::default(),
            timer: JobTimer::new(first_job, store, SystemClock),
            settings,
            panels: PanelVisibility::default(),
            show_settings_window: false,
            asset_override: None,
        }
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_job(&self) -> Option<&Job> {
        self.jobs.get(self.active)
    }

    pub fn active_job_mut(&mut self) -> Option<&mut Job> {
        self.jobs.get_mut(self.active)
    }

    /// Make `index` the active job; the timer follows
    pub fn select_job(&mut self, index: usize) -> bool {
        if index == self.active {
            return false;
        }
        let Some(job) = self.jobs.get(index) else {
            return false;
        };
        tracing::info!("Switched to job {} ({})", job.id, job.vehicle);
        self.timer.switch_job(job.id.clone());
        self.active = index;
        true
    }

    /// Asset the viewer should show
    pub fn asset_url(&self) -> String {
        if let Some(url) = &self.asset_override {
            return url.clone();
        }
        self.active_job()
            .map(Job::asset_url)
            .unwrap_or_else(|| crate::assets::builtin::url_for(Default::default()))
    }

    /// Paint the viewer should apply
    pub fn paint_color(&self) -> String {
        self.active_job()
            .map(|j| j.color.clone())
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| self.settings.viewer.default_color.clone())
    }

    pub fn click_zone(&mut self, zone_id: &str) {
        let mode = self.zone_mode;
        if let Some(job) = self.active_job_mut() {
            job.click_zone(mode, zone_id);
        }
    }
}

/// Timer store in the data directory, or memory when there is none
pub fn default_store() -> Arc<dyn KeyValueStore> {
    match FileStore::open_default() {
        Ok(store) => {
            tracing::debug!("Timer store at {}", store.path().display());
            Arc::new(store)
        }
        Err(e) => {
            tracing::warn!("Timers will not survive a restart: {e}");
            Arc::new(MemoryStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(AppSettings::default(), Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_select_job_switches_timer() {
        let mut state = state();
        let second = state.jobs[1].id.clone();
        assert!(state.select_job(1));
        assert_eq!(state.timer.job_id(), second);
        assert!(!state.select_job(1));
        assert!(!state.select_job(99));
    }

    #[test]
    fn test_asset_override_wins() {
        let mut state = state();
        assert_eq!(state.asset_url(), "builtin://sedan");
        state.asset_override = Some("/tmp/car.json".into());
        assert_eq!(state.asset_url(), "/tmp/car.json");
    }

    #[test]
    fn test_empty_job_color_uses_default() {
        let mut state = state();
        state.active_job_mut().unwrap().color = "  ".into();
        assert_eq!(state.paint_color(), state.settings.viewer.default_color);
    }

    #[test]
    fn test_click_zone_respects_mode() {
        let mut state = state();
        state.zone_mode = ZoneMode::Intake;
        state.click_zone("trunk");
        assert!(state.active_job().unwrap().intake.contains("trunk"));
        state.zone_mode = ZoneMode::Work;
        state.click_zone("trunk");
        assert!(state.active_job().unwrap().selected.contains("trunk"));
    }
}
