//! Appointment lifecycle states.

use serde::{Deserialize, Serialize};

/// Status of an appointment.
///
/// New appointments always start as `Pending`. Approve and reject only apply
/// to pending appointments; cancellation applies from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Canceled,
    Completed,
}

impl AppointmentStatus {
    /// Convert from database string representation.
    pub fn from_str(s: &str) -> Self {
        match s {
            "Approved" => Self::Approved,
            "Rejected" => Self::Rejected,
            "Canceled" => Self::Canceled,
            "Completed" => Self::Completed,
            _ => Self::Pending,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Canceled => "Canceled",
            Self::Completed => "Completed",
        }
    }

    /// Whether a member may still approve or reject.
    pub fn awaits_decision(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
