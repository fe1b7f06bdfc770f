//! Mileage-interval maintenance schedule.
//!
//! Every task recurs on a fixed mileage interval. A projection places the
//! odometer inside the current interval and reports how far along it is.

use serde::{Deserialize, Serialize};

pub mod urgency;

pub use urgency::Urgency;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceTask {
    pub id: u32,
    pub name: String,
    pub interval_miles: u32,
    #[serde(default)]
    pub tip: String,
}

impl MaintenanceTask {
    pub fn new(id: u32, name: &str, interval_miles: u32, tip: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            interval_miles,
            tip: tip.to_string(),
        }
    }
}

pub fn default_tasks() -> Vec<MaintenanceTask> {
    vec![
        MaintenanceTask::new(1, "Oil Change", 5_000, "Use manufacturer-recommended oil."),
        MaintenanceTask::new(2, "Brake Inspection", 15_000, "Check pads and fluid."),
        MaintenanceTask::new(3, "Tire Pressure Check", 3_000, "Check all four tires."),
        MaintenanceTask::new(4, "Air Filter Replacement", 12_000, "Replace if dirty."),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskProjection {
    pub task: MaintenanceTask,
    pub due_mileage: u64,
    pub miles_left: u32,
    pub progress_percent: f64,
    pub urgency: Urgency,
}

/// Projects `task` at `mileage`.
///
/// The due mileage is the mileage rounded up to the next multiple of the
/// interval, so an odometer sitting exactly on a multiple is due now.
/// Returns `None` for a zero interval.
pub fn project(task: &MaintenanceTask, mileage: u32) -> Option<TaskProjection> {
    if task.interval_miles == 0 {
        return None;
    }
    let interval = task.interval_miles;
    let into_interval = mileage % interval;
    let miles_left = interval - into_interval;
    let progress_percent = f64::from(into_interval) / f64::from(interval) * 100.0;
    let due_mileage = u64::from(mileage).div_ceil(u64::from(interval)) * u64::from(interval);

    Some(TaskProjection {
        task: task.clone(),
        due_mileage,
        miles_left,
        progress_percent,
        urgency: Urgency::from_progress(progress_percent),
    })
}

/// Projects every task in list order, skipping tasks without an interval.
pub fn project_tasks(tasks: &[MaintenanceTask], mileage: u32) -> Vec<TaskProjection> {
    tasks
        .iter()
        .filter_map(|task| project(task, mileage))
        .collect()
}
