//! Demo jobs shown by the studio shell

use shared::{JobId, VehicleCategory, ZoneMap};

use super::zones::ZoneSet;
use crate::assets::builtin;

/// Which zone set a click on the overlay edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoneMode {
    /// Damage noted when the vehicle arrives
    Intake,
    /// Zones being worked on
    #[default]
    Work,
}

#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub customer: String,
    pub vehicle: String,
    pub category: VehicleCategory,
    /// CSS color of the paint preview
    pub color: String,
    pub intake: ZoneSet,
    pub selected: ZoneSet,
    pub completed: ZoneSet,
}

impl Job {
    pub fn new(
        id: &str,
        customer: &str,
        vehicle: &str,
        category: VehicleCategory,
        color: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            customer: customer.to_string(),
            vehicle: vehicle.to_string(),
            category,
            color: color.to_string(),
            intake: ZoneSet::new(),
            selected: ZoneSet::new(),
            completed: ZoneSet::new(),
        }
    }

    pub fn asset_url(&self) -> String {
        builtin::url_for(self.category)
    }

    /// Handle a click on zone `zone_id` in the given mode
    pub fn click_zone(&mut self, mode: ZoneMode, zone_id: &str) {
        match mode {
            ZoneMode::Intake => {
                self.intake.toggle(zone_id);
            }
            ZoneMode::Work => {
                // A finished zone goes back to work when clicked again
                if self.completed.remove(zone_id) {
                    self.selected.insert(zone_id.to_string());
                } else {
                    self.selected.toggle(zone_id);
                }
            }
        }
    }

    /// Move every selected zone into the completed set
    pub fn complete_selected(&mut self) -> usize {
        let count = self.selected.len();
        self.selected.drain_into(&mut self.completed);
        count
    }

    /// (completed, total) for the job's vehicle
    pub fn progress(&self) -> (usize, usize) {
        let total = ZoneMap::for_category(self.category).len();
        (self.completed.len(), total)
    }

    /// Change vehicle type, dropping zones the new category does not have
    pub fn set_category(&mut self, category: VehicleCategory) {
        if self.category == category {
            return;
        }
        self.category = category;
        let zones = ZoneMap::for_category(category);
        self.intake.retain_known(&zones);
        self.selected.retain_known(&zones);
        self.completed.retain_known(&zones);
    }
}

pub fn demo_jobs() -> Vec<Job> {
    let mut sedan = Job::new("1042", "A. Petrova", "Toyota Camry", VehicleCategory::Sedan, "#b01c2e");
    sedan.intake = ZoneSet::from_ids(["front_bumper", "hood"]);
    sedan.completed = ZoneSet::from_ids(["roof"]);

    let suv = Job::new("1043", "Northwind Fleet", "Land Cruiser", VehicleCategory::Suv, "#2b2b2b");

    let mut bike = Job::new("1044", "M. Ortega", "Ducati Monster", VehicleCategory::Bike, "orange");
    bike.selected = ZoneSet::from_ids(["fuel_tank"]);

    vec![sedan, suv, bike]
}
