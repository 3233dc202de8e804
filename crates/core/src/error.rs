use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeskError {
    #[error("Student not found: {0}")]
    StudentNotFound(String),

    #[error("Debt not found: {0}")]
    DebtNotFound(String),

    #[error("Collector not found: {0}")]
    CollectorNotFound(String),

    #[error("Appointment not found: {0}")]
    AppointmentNotFound(String),

    #[error("No available collectors for the appointment on {date}")]
    NoEligibleCollector { date: NaiveDate },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl DeskError {
    /// True for the lookup failures the HTTP layer reports as 404.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DeskError::StudentNotFound(_)
                | DeskError::DebtNotFound(_)
                | DeskError::CollectorNotFound(_)
                | DeskError::AppointmentNotFound(_)
        )
    }
}

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, DeskError>;
