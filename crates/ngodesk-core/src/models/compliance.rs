use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Record;

categorical! {
    /// Filing status of a compliance document.
    pub enum ComplianceStatus {
        Compliant => "Compliant",
        Pending => "Pending",
        Expired => "Expired",
        Missing => "Missing",
    }
}

categorical! {
    pub enum DocumentCategory {
        Registration => "Registration",
        Audit => "Audit",
        Tax => "Tax",
        Policy => "Policy",
        GrantReport => "Grant Report",
        Insurance => "Insurance",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[serde(rename_all = "camelCase")]
pub struct ComplianceDocument {
    pub id: String,
    pub name: String,
    pub organization: String,
    pub region: String,
    pub category: DocumentCategory,
    pub status: ComplianceStatus,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub grant_id: Option<String>,
    #[serde(default)]
    pub last_reminded: Option<NaiveDate>,
}

impl ComplianceDocument {
    /// Only pending and expired documents can be chased with a reminder.
    pub fn is_reminder_eligible(&self) -> bool {
        matches!(
            self.status,
            ComplianceStatus::Pending | ComplianceStatus::Expired
        )
    }

    pub fn days_until_due(&self, today: NaiveDate) -> Option<i64> {
        self.due_date.map(|due| (due - today).num_days())
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != ComplianceStatus::Compliant
            && self.days_until_due(today).map(|d| d < 0).unwrap_or(false)
    }

    /// Short due-date description relative to `today`.
    pub fn due_display(&self, today: NaiveDate) -> String {
        match self.days_until_due(today) {
            None => "-".to_string(),
            Some(0) => "due today".to_string(),
            Some(d) if d < 0 => format!("{}d overdue", -d),
            Some(d) => format!("in {}d", d),
        }
    }
}

impl Record for ComplianceDocument {
    fn id(&self) -> &str {
        &self.id
    }
}
