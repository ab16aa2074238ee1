use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Record;

categorical! {
    pub enum UserRole {
        SuperAdmin => "Super Admin",
        Admin => "Admin",
        Manager => "Manager",
        Staff => "Staff",
        Viewer => "Viewer",
    }
}

categorical! {
    pub enum UserStatus {
        Active => "Active",
        Invited => "Invited",
        Suspended => "Suspended",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[serde(rename_all = "camelCase")]
pub struct SuperAdminUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub organization: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub region: String,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

impl SuperAdminUser {
    /// Super admins cannot be suspended in bulk; suspended users already are.
    pub fn is_suspendable(&self) -> bool {
        self.role != UserRole::SuperAdmin && self.status != UserStatus::Suspended
    }

    pub fn last_login_display(&self) -> String {
        self.last_login
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string())
    }
}

impl Record for SuperAdminUser {
    fn id(&self) -> &str {
        &self.id
    }
}
