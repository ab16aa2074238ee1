//! A fetched collection tagged with the dataset it belongs to.
//!
//! Screens hold differently typed records, so fetches, cache loads and
//! demo fixtures travel through channels and joins as one `Payload` enum.

use crate::fixtures;
use crate::models::{
    ComplianceDocument, Dataset, Employee, ExitRecord, Grant, OnboardingTask, Opportunity,
    ReferenceCheck, SuperAdminUser,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Grants(Vec<Grant>),
    ComplianceDocuments(Vec<ComplianceDocument>),
    Employees(Vec<Employee>),
    OnboardingTasks(Vec<OnboardingTask>),
    Exits(Vec<ExitRecord>),
    ReferenceChecks(Vec<ReferenceCheck>),
    Opportunities(Vec<Opportunity>),
    Users(Vec<SuperAdminUser>),
}

impl Payload {
    pub fn dataset(&self) -> Dataset {
        match self {
            Payload::Grants(_) => Dataset::Grants,
            Payload::ComplianceDocuments(_) => Dataset::ComplianceDocuments,
            Payload::Employees(_) => Dataset::Employees,
            Payload::OnboardingTasks(_) => Dataset::OnboardingTasks,
            Payload::Exits(_) => Dataset::Exits,
            Payload::ReferenceChecks(_) => Dataset::ReferenceChecks,
            Payload::Opportunities(_) => Dataset::Opportunities,
            Payload::Users(_) => Dataset::Users,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Payload::Grants(v) => v.len(),
            Payload::ComplianceDocuments(v) => v.len(),
            Payload::Employees(v) => v.len(),
            Payload::OnboardingTasks(v) => v.len(),
            Payload::Exits(v) => v.len(),
            Payload::ReferenceChecks(v) => v.len(),
            Payload::Opportunities(v) => v.len(),
            Payload::Users(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Demo data standing in for the backend.
    pub fn demo(dataset: Dataset) -> Self {
        match dataset {
            Dataset::Grants => Payload::Grants(fixtures::grants()),
            Dataset::ComplianceDocuments => {
                Payload::ComplianceDocuments(fixtures::compliance_documents())
            }
            Dataset::Employees => Payload::Employees(fixtures::employees()),
            Dataset::OnboardingTasks => Payload::OnboardingTasks(fixtures::onboarding_tasks()),
            Dataset::Exits => Payload::Exits(fixtures::exits()),
            Dataset::ReferenceChecks => Payload::ReferenceChecks(fixtures::reference_checks()),
            Dataset::Opportunities => Payload::Opportunities(fixtures::opportunities()),
            Dataset::Users => Payload::Users(fixtures::users()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_payloads_match_their_dataset() {
        for dataset in Dataset::ALL {
            let payload = Payload::demo(dataset);
            assert_eq!(payload.dataset(), dataset);
            assert!(!payload.is_empty(), "{} fixtures are empty", dataset);
        }
        assert_eq!(Payload::demo(Dataset::ComplianceDocuments).len(), 12);
    }
}
