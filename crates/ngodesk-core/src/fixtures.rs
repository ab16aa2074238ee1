//! Demo records used when no backend is configured.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::models::{
    ClearanceStatus, ComplianceDocument, ComplianceStatus, DocumentCategory, Employee,
    EmployeeStatus, ExitRecord, ExitType, Grant, GrantStatus, OnboardingTask, Opportunity,
    OpportunityStage, ReferenceCheck, ReferenceStatus, SuperAdminUser, TaskStatus, UserRole,
    UserStatus,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn login(y: i32, m: u32, d: u32, h: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(y, m, d, h, 15, 0).single()
}

pub fn grants() -> Vec<Grant> {
    use GrantStatus::*;
    let rows = [
        ("g-101", "Rural Literacy Program", "Gates Foundation", "East Africa", Active, 1_250_000.0, (2024, 1, 1), (2026, 12, 31), Some("Amina Odhiambo")),
        ("g-102", "Clean Water Wells Phase II", "USAID", "East Africa", Active, 840_000.0, (2024, 4, 1), (2026, 3, 31), Some("Daniel Mwangi")),
        ("g-103", "Maternal Health Outreach", "WHO", "West Africa", Active, 560_000.0, (2025, 1, 1), (2026, 12, 31), Some("Fatou Diallo")),
        ("g-104", "Girls in STEM Scholarships", "Ford Foundation", "South Asia", Pending, 300_000.0, (2026, 7, 1), (2028, 6, 30), None),
        ("g-105", "Flood Resilience Training", "European Union", "South Asia", Active, 415_500.0, (2025, 3, 1), (2027, 2, 28), Some("Ravi Menon")),
        ("g-106", "Microfinance for Women", "Kiva", "Latin America", Closed, 120_000.0, (2021, 6, 1), (2023, 5, 31), Some("Lucia Torres")),
        ("g-107", "School Meals Initiative", "World Food Programme", "West Africa", Active, 980_000.0, (2024, 9, 1), (2027, 8, 31), Some("Fatou Diallo")),
        ("g-108", "Solar Clinics Pilot", "Rockefeller Foundation", "East Africa", Archived, 275_000.0, (2020, 1, 1), (2022, 12, 31), Some("Daniel Mwangi")),
        ("g-109", "Youth Employment Bootcamps", "Mastercard Foundation", "Latin America", Pending, 650_000.0, (2026, 9, 1), (2028, 8, 31), None),
        ("g-110", "Community Health Workers", "Global Fund", "South Asia", Closed, 730_000.0, (2021, 1, 1), (2024, 12, 31), Some("Ravi Menon")),
        ("g-111", "Refugee Education Access", "UNHCR", "Middle East", Active, 505_000.0, (2025, 6, 1), (2027, 5, 31), Some("Omar Haddad")),
        ("g-112", "Climate Smart Agriculture", "IFAD", "East Africa", Archived, 390_000.0, (2019, 4, 1), (2022, 3, 31), Some("Amina Odhiambo")),
        ("g-113", "Digital Skills for Teachers", "Google.org", "Latin America", Active, 210_000.0, (2025, 2, 1), (2026, 1, 31), Some("Lucia Torres")),
        ("g-114", "Emergency Shelter Kits", "ECHO", "Middle East", Closed, 95_000.0, (2023, 2, 1), (2023, 11, 30), Some("Omar Haddad")),
    ];

    rows.into_iter()
        .map(|(id, title, funder, region, status, amount, s, e, officer)| Grant {
            id: id.to_string(),
            title: title.to_string(),
            funder: funder.to_string(),
            region: region.to_string(),
            status,
            amount,
            start_date: date(s.0, s.1, s.2),
            end_date: date(e.0, e.1, e.2),
            program_officer: officer.map(str::to_string),
        })
        .collect()
}

pub fn compliance_documents() -> Vec<ComplianceDocument> {
    use ComplianceStatus::*;
    use DocumentCategory::*;
    let rows = [
        ("c-01", "Certificate of Registration", "Hope Foundation", "East Africa", Registration, Compliant, Some((2027, 3, 31)), None),
        ("c-02", "2024 Audited Financial Statements", "Hope Foundation", "East Africa", Audit, Pending, Some((2026, 6, 30)), None),
        ("c-03", "Annual Tax Exemption Filing", "Green Valley Trust", "South Asia", Tax, Expired, Some((2025, 12, 31)), None),
        ("c-04", "Safeguarding Policy", "Green Valley Trust", "South Asia", Policy, Compliant, Some((2027, 1, 15)), None),
        ("c-05", "Interim Report: Literacy Program", "Hope Foundation", "East Africa", GrantReport, Pending, Some((2026, 11, 15)), Some("g-101")),
        ("c-06", "Public Liability Insurance", "Sunrise Education Fund", "West Africa", Insurance, Missing, None, None),
        ("c-07", "Final Report: Microfinance for Women", "Clean Water Alliance", "Latin America", GrantReport, Compliant, Some((2023, 8, 31)), Some("g-106")),
        ("c-08", "Board Resolution on Signatories", "Sunrise Education Fund", "West Africa", Registration, Pending, Some((2026, 10, 31)), None),
        ("c-09", "Anti-Fraud Policy", "Clean Water Alliance", "Latin America", Policy, Expired, Some((2026, 2, 28)), None),
        ("c-10", "Quarterly Report: Water Wells", "Clean Water Alliance", "East Africa", GrantReport, Pending, Some((2026, 10, 20)), Some("g-102")),
        ("c-11", "2025 Audit Engagement Letter", "Sunrise Education Fund", "West Africa", Audit, Missing, Some((2026, 9, 30)), None),
        ("c-12", "Payroll Tax Clearance", "Hope Foundation", "East Africa", Tax, Pending, Some((2026, 12, 31)), None),
    ];

    rows.into_iter()
        .map(|(id, name, org, region, category, status, due, grant)| ComplianceDocument {
            id: id.to_string(),
            name: name.to_string(),
            organization: org.to_string(),
            region: region.to_string(),
            category,
            status,
            due_date: due.map(|(y, m, d)| date(y, m, d)),
            grant_id: grant.map(str::to_string),
            last_reminded: None,
        })
        .collect()
}

pub fn employees() -> Vec<Employee> {
    use EmployeeStatus::*;
    let rows = [
        ("e-01", "Amina", "Odhiambo", "Programs", "Program Officer", "East Africa", Active, Some((2019, 3, 4))),
        ("e-02", "Daniel", "Mwangi", "Programs", "Program Officer", "East Africa", Active, Some((2020, 8, 17))),
        ("e-03", "Fatou", "Diallo", "Programs", "Regional Director", "West Africa", Active, Some((2016, 1, 11))),
        ("e-04", "Ravi", "Menon", "Programs", "Program Officer", "South Asia", OnLeave, Some((2021, 5, 3))),
        ("e-05", "Lucia", "Torres", "Finance", "Grants Accountant", "Latin America", Active, Some((2018, 10, 1))),
        ("e-06", "Omar", "Haddad", "Programs", "Field Coordinator", "Middle East", Active, Some((2022, 2, 14))),
        ("e-07", "Grace", "Achieng", "Finance", "Finance Manager", "East Africa", Active, Some((2015, 6, 22))),
        ("e-08", "Priya", "Sharma", "Human Resources", "HR Officer", "South Asia", Active, Some((2023, 4, 10))),
        ("e-09", "Kwame", "Mensah", "Operations", "Logistics Officer", "West Africa", Exiting, Some((2019, 9, 2))),
        ("e-10", "Sofia", "Alvarez", "Fundraising", "Grant Writer", "Latin America", Active, Some((2024, 1, 8))),
        ("e-11", "Youssef", "Nasser", "Operations", "IT Support", "Middle East", Onboarding, Some((2026, 10, 5))),
        ("e-12", "Hannah", "Okafor", "Fundraising", "Partnerships Lead", "West Africa", Onboarding, Some((2026, 10, 12))),
        ("e-13", "Mei", "Lin", "Monitoring & Evaluation", "M&E Specialist", "South Asia", Active, Some((2022, 11, 28))),
        ("e-14", "Tomas", "Herrera", "Operations", "Driver", "Latin America", Exiting, None),
    ];

    rows.into_iter()
        .map(|(id, first, last, dept, role, region, status, start)| Employee {
            id: id.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}.{}@ngodesk.org", first.to_lowercase(), last.to_lowercase()),
            department: dept.to_string(),
            role: role.to_string(),
            region: region.to_string(),
            status,
            start_date: start.map(|(y, m, d)| date(y, m, d)),
        })
        .collect()
}

pub fn onboarding_tasks() -> Vec<OnboardingTask> {
    use TaskStatus::*;
    let rows = [
        ("t-01", "Youssef Nasser", "Issue laptop and accounts", "IT", Complete, Some((2026, 10, 5))),
        ("t-02", "Youssef Nasser", "Security awareness training", "Human Resources", InProgress, Some((2026, 10, 19))),
        ("t-03", "Youssef Nasser", "Sign code of conduct", "Human Resources", NotStarted, Some((2026, 10, 12))),
        ("t-04", "Hannah Okafor", "Issue laptop and accounts", "IT", InProgress, Some((2026, 10, 12))),
        ("t-05", "Hannah Okafor", "Donor database walkthrough", "Fundraising", NotStarted, Some((2026, 10, 26))),
        ("t-06", "Hannah Okafor", "Safeguarding induction", "Programs", NotStarted, Some((2026, 10, 30))),
        ("t-07", "Hannah Okafor", "Bank signatory forms", "Finance", NotStarted, None),
        ("t-08", "Sofia Alvarez", "Probation review", "Human Resources", Complete, Some((2024, 7, 8))),
    ];

    rows.into_iter()
        .map(|(id, employee, task, owner, status, due)| OnboardingTask {
            id: id.to_string(),
            employee: employee.to_string(),
            task: task.to_string(),
            owner: owner.to_string(),
            status,
            due_date: due.map(|(y, m, d)| date(y, m, d)),
        })
        .collect()
}

pub fn exits() -> Vec<ExitRecord> {
    use ClearanceStatus::*;
    use ExitType::*;
    let rows = [
        ("x-01", "Kwame Mensah", "Operations", Resignation, (2026, 11, 30), Pending, false),
        ("x-02", "Tomas Herrera", "Operations", EndOfContract, (2026, 10, 31), Pending, true),
        ("x-03", "Nadia Rahman", "Programs", Resignation, (2026, 3, 15), Cleared, true),
        ("x-04", "Peter Kamau", "Finance", Retirement, (2025, 12, 31), Cleared, true),
        ("x-05", "Julio Ramos", "Operations", Termination, (2025, 8, 8), Cleared, false),
    ];

    rows.into_iter()
        .map(|(id, employee, dept, exit_type, d, clearance, interview)| ExitRecord {
            id: id.to_string(),
            employee: employee.to_string(),
            department: dept.to_string(),
            exit_type,
            exit_date: date(d.0, d.1, d.2),
            clearance,
            interview_done: interview,
        })
        .collect()
}

pub fn reference_checks() -> Vec<ReferenceCheck> {
    use ReferenceStatus::*;
    let rows = [
        ("r-01", "Hannah Okafor", "Partnerships Lead", "Dr. Chidi Eze", Received, (2026, 8, 20)),
        ("r-02", "Hannah Okafor", "Partnerships Lead", "Ms. Ada Nwosu", Received, (2026, 8, 20)),
        ("r-03", "Youssef Nasser", "IT Support", "Mr. Karim Saleh", Flagged, (2026, 8, 28)),
        ("r-04", "Youssef Nasser", "IT Support", "Ms. Layla Aziz", Received, (2026, 8, 28)),
        ("r-05", "Ines Duarte", "Field Coordinator", "Mr. Paulo Reis", Requested, (2026, 10, 2)),
        ("r-06", "Ines Duarte", "Field Coordinator", "Dr. Ana Costa", Requested, (2026, 10, 2)),
    ];

    rows.into_iter()
        .map(|(id, candidate, position, referee, status, d)| ReferenceCheck {
            id: id.to_string(),
            candidate: candidate.to_string(),
            position: position.to_string(),
            referee: referee.to_string(),
            status,
            requested_on: date(d.0, d.1, d.2),
        })
        .collect()
}

pub fn opportunities() -> Vec<Opportunity> {
    use OpportunityStage::*;
    let rows = [
        ("o-01", "Girls in STEM Scholarships", "Ford Foundation", Submitted, 300_000.0, Some((2026, 11, 15)), "South Asia", "Sofia Alvarez"),
        ("o-02", "Youth Employment Bootcamps", "Mastercard Foundation", Submitted, 650_000.0, Some((2026, 12, 1)), "Latin America", "Sofia Alvarez"),
        ("o-03", "Rural Literacy Expansion", "Gates Foundation", Drafting, 900_000.0, Some((2027, 1, 31)), "East Africa", "Hannah Okafor"),
        ("o-04", "Mobile Health Vans", "Wellcome Trust", Prospect, 450_000.0, None, "West Africa", "Hannah Okafor"),
        ("o-05", "Refugee Education Access", "UNHCR", Awarded, 505_000.0, Some((2025, 3, 1)), "Middle East", "Sofia Alvarez"),
        ("o-06", "Coastal Mangrove Restoration", "Bezos Earth Fund", Declined, 1_200_000.0, Some((2025, 9, 30)), "South Asia", "Sofia Alvarez"),
        ("o-07", "School Meals Initiative", "World Food Programme", Awarded, 980_000.0, Some((2024, 6, 30)), "West Africa", "Hannah Okafor"),
        ("o-08", "Teacher Mentoring Network", "Hewlett Foundation", Drafting, 275_000.0, Some((2026, 10, 28)), "Latin America", "Sofia Alvarez"),
        ("o-09", "Emergency Cash Transfers", "ECHO", Prospect, 150_000.0, None, "Middle East", "Hannah Okafor"),
        ("o-10", "Digital Health Records", "Google.org", Declined, 320_000.0, Some((2025, 5, 15)), "East Africa", "Sofia Alvarez"),
    ];

    rows.into_iter()
        .map(|(id, name, funder, stage, amount, deadline, region, owner)| Opportunity {
            id: id.to_string(),
            name: name.to_string(),
            funder: funder.to_string(),
            stage,
            amount,
            deadline: deadline.map(|(y, m, d)| date(y, m, d)),
            region: region.to_string(),
            owner: owner.to_string(),
        })
        .collect()
}

pub fn users() -> Vec<SuperAdminUser> {
    use UserRole::*;
    use UserStatus::*;
    let rows = [
        ("u-01", "Platform Owner", "owner@ngodesk.org", "ngodesk", SuperAdmin, Active, "Global", login(2026, 10, 17, 9)),
        ("u-02", "Grace Achieng", "grace@hopefoundation.org", "Hope Foundation", Admin, Active, "East Africa", login(2026, 10, 16, 14)),
        ("u-03", "Amina Odhiambo", "amina@hopefoundation.org", "Hope Foundation", Manager, Active, "East Africa", login(2026, 10, 15, 8)),
        ("u-04", "Ravi Menon", "ravi@greenvalley.org", "Green Valley Trust", Manager, Suspended, "South Asia", login(2026, 6, 2, 11)),
        ("u-05", "Priya Sharma", "priya@greenvalley.org", "Green Valley Trust", Staff, Active, "South Asia", login(2026, 10, 14, 10)),
        ("u-06", "Fatou Diallo", "fatou@sunrise-edu.org", "Sunrise Education Fund", Admin, Active, "West Africa", login(2026, 10, 17, 7)),
        ("u-07", "Kwame Mensah", "kwame@sunrise-edu.org", "Sunrise Education Fund", Staff, Active, "West Africa", login(2026, 9, 30, 16)),
        ("u-08", "Hannah Okafor", "hannah@sunrise-edu.org", "Sunrise Education Fund", Staff, Invited, "West Africa", None),
        ("u-09", "Lucia Torres", "lucia@cleanwater.org", "Clean Water Alliance", Admin, Active, "Latin America", login(2026, 10, 12, 13)),
        ("u-10", "Tomas Herrera", "tomas@cleanwater.org", "Clean Water Alliance", Viewer, Suspended, "Latin America", login(2026, 4, 20, 9)),
        ("u-11", "Omar Haddad", "omar@hopefoundation.org", "Hope Foundation", Staff, Active, "Middle East", login(2026, 10, 10, 12)),
        ("u-12", "External Auditor", "audit@kpmg.example", "Hope Foundation", Viewer, Invited, "East Africa", None),
    ];

    rows.into_iter()
        .map(|(id, name, email, org, role, status, region, last_login)| SuperAdminUser {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            organization: org.to_string(),
            role,
            status,
            region: region.to_string(),
            last_login,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;
    use std::collections::HashSet;

    fn assert_unique_ids<T: Record>(records: &[T]) {
        let ids: HashSet<&str> = records.iter().map(|r| r.id()).collect();
        assert_eq!(ids.len(), records.len());
    }

    #[test]
    fn test_fixture_ids_are_unique() {
        assert_unique_ids(&grants());
        assert_unique_ids(&compliance_documents());
        assert_unique_ids(&employees());
        assert_unique_ids(&onboarding_tasks());
        assert_unique_ids(&exits());
        assert_unique_ids(&reference_checks());
        assert_unique_ids(&opportunities());
        assert_unique_ids(&users());
    }

    #[test]
    fn test_twelve_compliance_documents_cover_every_status() {
        let docs = compliance_documents();
        assert_eq!(docs.len(), 12);
        for status in ComplianceStatus::ALL {
            assert!(docs.iter().any(|d| d.status == *status), "no {} document", status);
        }
    }

    #[test]
    fn test_fixtures_survive_json() {
        let users = users();
        let json = serde_json::to_string(&users).unwrap();
        let back: Vec<SuperAdminUser> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, users);
    }
}
