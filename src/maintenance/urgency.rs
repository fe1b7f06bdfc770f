use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    OnTrack,
    Upcoming,
    DueSoon,
    Urgent,
}

impl Urgency {
    /// Maps progress through the current service interval (0-100) to urgency.
    pub fn from_progress(progress_percent: f64) -> Self {
        if progress_percent >= 90.0 {
            Urgency::Urgent
        } else if progress_percent >= 75.0 {
            Urgency::DueSoon
        } else if progress_percent >= 50.0 {
            Urgency::Upcoming
        } else {
            Urgency::OnTrack
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Urgency::OnTrack => "On Track",
            Urgency::Upcoming => "Upcoming",
            Urgency::DueSoon => "Due Soon",
            Urgency::Urgent => "Urgent",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(Urgency::from_progress(0.0), Urgency::OnTrack);
        assert_eq!(Urgency::from_progress(49.9), Urgency::OnTrack);
        assert_eq!(Urgency::from_progress(50.0), Urgency::Upcoming);
        assert_eq!(Urgency::from_progress(75.0), Urgency::DueSoon);
        assert_eq!(Urgency::from_progress(90.0), Urgency::Urgent);
        assert_eq!(Urgency::from_progress(99.9), Urgency::Urgent);
    }

    #[test]
    fn urgency_orders_by_severity() {
        assert!(Urgency::OnTrack < Urgency::Upcoming);
        assert!(Urgency::DueSoon < Urgency::Urgent);
    }

    #[test]
    fn serializes_snake_case() -> Result<(), serde_json::Error> {
        assert_eq!(
            serde_json::to_value(Urgency::DueSoon)?,
            serde_json::json!("due_soon")
        );
        assert_eq!(Urgency::DueSoon.label(), "Due Soon");
        Ok(())
    }
}
