//! Data models for the nonprofit operations entities.
//!
//! This module contains the record types shown by the dashboard screens:
//!
//! - `Grant`: funded and pending grants (portfolio and archive)
//! - `ComplianceDocument`: registration, audit and grant-report filings
//! - `Employee`, `OnboardingTask`, `ExitRecord`, `ReferenceCheck`: HR records
//! - `Opportunity`: fundraising pipeline entries
//! - `SuperAdminUser`: platform user accounts
//!
//! Every categorical field is a closed enum serialized by its display label,
//! so unknown values are rejected when data crosses the API boundary.

/// Declare a categorical enum whose wire form and facet value is its label.
macro_rules! categorical {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[cfg_attr(feature = "ts", derive(ts_rs::TS))]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

pub mod admin;
pub mod compliance;
pub mod fundraising;
pub mod grant;
pub mod hr;

pub use admin::{SuperAdminUser, UserRole, UserStatus};
pub use compliance::{ComplianceDocument, ComplianceStatus, DocumentCategory};
pub use fundraising::{Opportunity, OpportunityStage};
pub use grant::{Grant, GrantStatus};
pub use hr::{
    ClearanceStatus, Employee, EmployeeStatus, ExitRecord, ExitType, OnboardingTask,
    ReferenceCheck, ReferenceStatus, TaskStatus,
};

/// A record that can be listed, searched and selected by id.
pub trait Record {
    fn id(&self) -> &str;
}

/// The remote collections the dashboard reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Grants,
    ComplianceDocuments,
    Employees,
    OnboardingTasks,
    Exits,
    ReferenceChecks,
    Opportunities,
    Users,
}

impl Dataset {
    pub const ALL: [Dataset; 8] = [
        Dataset::Grants,
        Dataset::ComplianceDocuments,
        Dataset::Employees,
        Dataset::OnboardingTasks,
        Dataset::Exits,
        Dataset::ReferenceChecks,
        Dataset::Opportunities,
        Dataset::Users,
    ];

    /// Stable name used for cache file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::Grants => "grants",
            Dataset::ComplianceDocuments => "compliance_documents",
            Dataset::Employees => "employees",
            Dataset::OnboardingTasks => "onboarding_tasks",
            Dataset::Exits => "exits",
            Dataset::ReferenceChecks => "reference_checks",
            Dataset::Opportunities => "opportunities",
            Dataset::Users => "users",
        }
    }

    /// URL path segment on the backend.
    pub fn path(&self) -> &'static str {
        match self {
            Dataset::Grants => "grants",
            Dataset::ComplianceDocuments => "compliance/documents",
            Dataset::Employees => "hr/employees",
            Dataset::OnboardingTasks => "hr/onboarding",
            Dataset::Exits => "hr/exits",
            Dataset::ReferenceChecks => "hr/reference-checks",
            Dataset::Opportunities => "fundraising/opportunities",
            Dataset::Users => "admin/users",
        }
    }

    /// Plural noun used in loading and empty-state messages.
    pub fn noun(&self) -> &'static str {
        match self {
            Dataset::Grants => "grants",
            Dataset::ComplianceDocuments => "compliance documents",
            Dataset::Employees => "employees",
            Dataset::OnboardingTasks => "onboarding tasks",
            Dataset::Exits => "exit records",
            Dataset::ReferenceChecks => "reference checks",
            Dataset::Opportunities => "opportunities",
            Dataset::Users => "users",
        }
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
