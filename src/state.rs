use crate::error::AppError;
use crate::estimation::{BatteryReport, DEFAULT_MAX_RANGE_MILES};
use crate::maintenance::{MaintenanceTask, default_tasks};
use crate::records::VehicleRecord;
use std::time::SystemTime;

/// Vehicle defaults applied when a request leaves them out.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSettings {
    pub max_range_miles: f64,
    pub maintenance_tasks: Vec<MaintenanceTask>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            max_range_miles: DEFAULT_MAX_RANGE_MILES,
            maintenance_tasks: default_tasks(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredReport {
    pub report: BatteryReport,
    pub timestamp: SystemTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub id: u64,
    pub record: VehicleRecord,
    pub saved_at: SystemTime,
}

/// In-memory dashboard state. Nothing here outlives the process.
#[derive(Debug)]
pub struct AppState {
    settings: DashboardSettings,
    latest_report: Option<StoredReport>,
    records: Vec<StoredRecord>,
    next_record_id: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(DashboardSettings::default())
    }

    pub fn with_settings(settings: DashboardSettings) -> Self {
        Self {
            settings,
            latest_report: None,
            records: Vec::new(),
            next_record_id: 1,
        }
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn latest_report(&self) -> Option<&StoredReport> {
        self.latest_report.as_ref()
    }

    pub fn set_latest_report(&mut self, report: BatteryReport, timestamp: SystemTime) {
        self.latest_report = Some(StoredReport { report, timestamp });
    }

    pub fn records(&self) -> &[StoredRecord] {
        &self.records
    }

    /// Validates and appends a record, assigning the next sequential id.
    pub fn add_record(
        &mut self,
        record: VehicleRecord,
        saved_at: SystemTime,
    ) -> Result<StoredRecord, AppError> {
        let record = record.validate()?;
        let stored = StoredRecord {
            id: self.next_record_id,
            record,
            saved_at,
        };
        self.next_record_id += 1;
        self.records.push(stored.clone());
        Ok(stored)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
