//! HR records: staff, onboarding checklists, exits and reference checks.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Record;

categorical! {
    pub enum EmployeeStatus {
        Active => "Active",
        Onboarding => "Onboarding",
        OnLeave => "On Leave",
        Exiting => "Exiting",
    }
}

categorical! {
    pub enum TaskStatus {
        NotStarted => "Not Started",
        InProgress => "In Progress",
        Complete => "Complete",
    }
}

categorical! {
    pub enum ExitType {
        Resignation => "Resignation",
        Termination => "Termination",
        EndOfContract => "End of Contract",
        Retirement => "Retirement",
    }
}

categorical! {
    pub enum ClearanceStatus {
        Pending => "Pending",
        Cleared => "Cleared",
    }
}

categorical! {
    pub enum ReferenceStatus {
        Requested => "Requested",
        Received => "Received",
        Flagged => "Flagged",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub role: String,
    pub region: String,
    pub status: EmployeeStatus,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// "Last, First" for sorted tables
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }

    /// Whole years of service as of `today`, if a start date is known.
    pub fn tenure_years(&self, today: NaiveDate) -> Option<i64> {
        self.start_date
            .filter(|start| *start <= today)
            .map(|start| (today - start).num_days() / 365)
    }
}

impl Record for Employee {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[serde(rename_all = "camelCase")]
pub struct OnboardingTask {
    pub id: String,
    pub employee: String,
    pub task: String,
    pub owner: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl OnboardingTask {
    pub fn is_open(&self) -> bool {
        self.status != TaskStatus::Complete
    }
}

impl Record for OnboardingTask {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[serde(rename_all = "camelCase")]
pub struct ExitRecord {
    pub id: String,
    pub employee: String,
    pub department: String,
    pub exit_type: ExitType,
    pub exit_date: NaiveDate,
    pub clearance: ClearanceStatus,
    #[serde(default)]
    pub interview_done: bool,
}

impl ExitRecord {
    /// An exit is complete once clearance is signed off and the interview held.
    pub fn is_complete(&self) -> bool {
        self.clearance == ClearanceStatus::Cleared && self.interview_done
    }
}

impl Record for ExitRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[serde(rename_all = "camelCase")]
pub struct ReferenceCheck {
    pub id: String,
    pub candidate: String,
    pub position: String,
    pub referee: String,
    pub status: ReferenceStatus,
    pub requested_on: NaiveDate,
}

impl ReferenceCheck {
    /// Days a request has been outstanding; None once a response arrived.
    pub fn days_outstanding(&self, today: NaiveDate) -> Option<i64> {
        match self.status {
            ReferenceStatus::Requested => Some((today - self.requested_on).num_days().max(0)),
            ReferenceStatus::Received | ReferenceStatus::Flagged => None,
        }
    }
}

impl Record for ReferenceCheck {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_names_and_tenure() {
        let e = Employee {
            id: "e-1".to_string(),
            first_name: "Amina".to_string(),
            last_name: "Otieno".to_string(),
            email: "amina@example.org".to_string(),
            department: "Programs".to_string(),
            role: "Program Officer".to_string(),
            region: "East Africa".to_string(),
            status: EmployeeStatus::Active,
            start_date: NaiveDate::from_ymd_opt(2020, 3, 1),
        };
        assert_eq!(e.full_name(), "Amina Otieno");
        assert_eq!(e.display_name(), "Otieno, Amina");
        let today = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        assert_eq!(e.tenure_years(today), Some(5));
        let before_start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        assert_eq!(e.tenure_years(before_start), None);
    }

    #[test]
    fn test_exit_completion() {
        let mut exit = ExitRecord {
            id: "x-1".to_string(),
            employee: "Jon Mbeki".to_string(),
            department: "Finance".to_string(),
            exit_type: ExitType::Resignation,
            exit_date: NaiveDate::from_ymd_opt(2025, 5, 31).unwrap(),
            clearance: ClearanceStatus::Cleared,
            interview_done: false,
        };
        assert!(!exit.is_complete());
        exit.interview_done = true;
        assert!(exit.is_complete());
    }

    #[test]
    fn test_reference_days_outstanding() {
        let mut check = ReferenceCheck {
            id: "r-1".to_string(),
            candidate: "Lena Park".to_string(),
            position: "Grants Manager".to_string(),
            referee: "Dr. Osei".to_string(),
            status: ReferenceStatus::Requested,
            requested_on: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        };
        let today = NaiveDate::from_ymd_opt(2025, 6, 11).unwrap();
        assert_eq!(check.days_outstanding(today), Some(10));
        check.status = ReferenceStatus::Received;
        assert_eq!(check.days_outstanding(today), None);
    }
}
