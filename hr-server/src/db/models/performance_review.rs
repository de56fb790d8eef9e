//! Performance Review Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Performance review record.
///
/// Reviews feed the reporting layer (rankings, raise guidance) only; nothing
/// on the salary write path reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceReview {
    pub id: String,
    pub employee_id: String,
    /// Must differ from `employee_id`
    pub reviewer_id: String,
    pub review_date: NaiveDate,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    // Five ratings, each 1..=5
    pub technical: u8,
    pub communication: u8,
    pub teamwork: u8,
    pub initiative: u8,
    pub punctuality: u8,
    pub created_at: i64,
}

impl PerformanceReview {
    pub fn ratings(&self) -> [u8; 5] {
        [
            self.technical,
            self.communication,
            self.teamwork,
            self.initiative,
            self.punctuality,
        ]
    }

    /// Mean of the five ratings.
    pub fn average(&self) -> f64 {
        let sum: u32 = self.ratings().iter().map(|r| u32::from(*r)).sum();
        f64::from(sum) / 5.0
    }
}

/// Create review payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewCreate {
    pub employee_id: String,
    pub reviewer_id: String,
    pub review_date: NaiveDate,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub technical: u8,
    pub communication: u8,
    pub teamwork: u8,
    pub initiative: u8,
    pub punctuality: u8,
    pub acting_user: String,
}
