//! List configurations for each dashboard screen.

use crate::models::{
    ComplianceDocument, Employee, ExitRecord, Grant, OnboardingTask, Opportunity,
    ReferenceCheck, SuperAdminUser,
};
use crate::utils::cmp_ignore_case;

use super::controller::ListSpec;

/// Observed screens use 10 rows; compliance tables use 8.
pub const COMPLIANCE_PAGE_SIZE: usize = 8;

fn grants_base() -> ListSpec<Grant> {
    ListSpec::new("grants")
        .search("title", |g: &Grant| Some(g.title.as_str()))
        .search("funder", |g: &Grant| Some(g.funder.as_str()))
        .search("region", |g: &Grant| Some(g.region.as_str()))
        .search("officer", |g: &Grant| g.program_officer.as_deref())
        .facet("status", "Status", |g: &Grant| g.status.label())
        .facet("region", "Region", |g: &Grant| g.region.as_str())
        .sort("title", "Title", |a: &Grant, b: &Grant| cmp_ignore_case(&a.title, &b.title))
        .sort("funder", "Funder", |a: &Grant, b: &Grant| cmp_ignore_case(&a.funder, &b.funder))
        .sort("amount", "Amount", |a: &Grant, b: &Grant| a.amount.total_cmp(&b.amount))
        .sort("end", "End date", |a: &Grant, b: &Grant| a.end_date.cmp(&b.end_date))
}

pub fn grant_portfolio() -> ListSpec<Grant> {
    grants_base()
        .scoped(|g: &Grant| !g.is_archived())
        .sorted_by("end", true)
}

pub fn grant_archive() -> ListSpec<Grant> {
    grants_base()
        .scoped(|g: &Grant| g.is_archived())
        .sorted_by("end", false)
}

pub fn compliance_documents() -> ListSpec<ComplianceDocument> {
    ListSpec::new("compliance documents")
        .search("name", |d: &ComplianceDocument| Some(d.name.as_str()))
        .search("organization", |d: &ComplianceDocument| Some(d.organization.as_str()))
        .search("region", |d: &ComplianceDocument| Some(d.region.as_str()))
        .facet("status", "Status", |d: &ComplianceDocument| d.status.label())
        .facet("region", "Region", |d: &ComplianceDocument| d.region.as_str())
        .facet("category", "Category", |d: &ComplianceDocument| d.category.label())
        .sort("name", "Document", |a: &ComplianceDocument, b: &ComplianceDocument| {
            cmp_ignore_case(&a.name, &b.name)
        })
        .sort("organization", "Organization", |a: &ComplianceDocument, b: &ComplianceDocument| {
            cmp_ignore_case(&a.organization, &b.organization)
        })
        .sort("due", "Due", |a: &ComplianceDocument, b: &ComplianceDocument| {
            // Undated documents sort last
            match (a.due_date, b.due_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
        })
        .eligible(|d: &ComplianceDocument| d.is_reminder_eligible())
        .page_size(COMPLIANCE_PAGE_SIZE)
}

pub fn employees() -> ListSpec<Employee> {
    ListSpec::new("employees")
        .search("first name", |e: &Employee| Some(e.first_name.as_str()))
        .search("last name", |e: &Employee| Some(e.last_name.as_str()))
        .search("email", |e: &Employee| Some(e.email.as_str()))
        .search("department", |e: &Employee| Some(e.department.as_str()))
        .search("role", |e: &Employee| Some(e.role.as_str()))
        .facet("department", "Department", |e: &Employee| e.department.as_str())
        .facet("status", "Status", |e: &Employee| e.status.label())
        .facet("region", "Region", |e: &Employee| e.region.as_str())
        .sort("name", "Name", |a: &Employee, b: &Employee| {
            cmp_ignore_case(&a.last_name, &b.last_name)
                .then_with(|| cmp_ignore_case(&a.first_name, &b.first_name))
        })
        .sort("department", "Department", |a: &Employee, b: &Employee| {
            cmp_ignore_case(&a.department, &b.department)
        })
        .sort("start", "Start date", |a: &Employee, b: &Employee| a.start_date.cmp(&b.start_date))
        .sorted_by("name", true)
}

pub fn onboarding_tasks() -> ListSpec<OnboardingTask> {
    ListSpec::new("onboarding tasks")
        .search("employee", |t: &OnboardingTask| Some(t.employee.as_str()))
        .search("task", |t: &OnboardingTask| Some(t.task.as_str()))
        .search("owner", |t: &OnboardingTask| Some(t.owner.as_str()))
        .facet("status", "Status", |t: &OnboardingTask| t.status.label())
        .facet("owner", "Owner", |t: &OnboardingTask| t.owner.as_str())
        .sort("employee", "Employee", |a: &OnboardingTask, b: &OnboardingTask| {
            cmp_ignore_case(&a.employee, &b.employee)
        })
        .sort("due", "Due", |a: &OnboardingTask, b: &OnboardingTask| a.due_date.cmp(&b.due_date))
        .eligible(|t: &OnboardingTask| t.is_open())
}

pub fn exits() -> ListSpec<ExitRecord> {
    ListSpec::new("exit records")
        .search("employee", |x: &ExitRecord| Some(x.employee.as_str()))
        .search("department", |x: &ExitRecord| Some(x.department.as_str()))
        .facet("type", "Exit type", |x: &ExitRecord| x.exit_type.label())
        .facet("clearance", "Clearance", |x: &ExitRecord| x.clearance.label())
        .sort("employee", "Employee", |a: &ExitRecord, b: &ExitRecord| {
            cmp_ignore_case(&a.employee, &b.employee)
        })
        .sort("date", "Exit date", |a: &ExitRecord, b: &ExitRecord| a.exit_date.cmp(&b.exit_date))
        .sorted_by("date", false)
}

pub fn reference_checks() -> ListSpec<ReferenceCheck> {
    ListSpec::new("reference checks")
        .search("candidate", |r: &ReferenceCheck| Some(r.candidate.as_str()))
        .search("position", |r: &ReferenceCheck| Some(r.position.as_str()))
        .search("referee", |r: &ReferenceCheck| Some(r.referee.as_str()))
        .facet("status", "Status", |r: &ReferenceCheck| r.status.label())
        .sort("candidate", "Candidate", |a: &ReferenceCheck, b: &ReferenceCheck| {
            cmp_ignore_case(&a.candidate, &b.candidate)
        })
        .sort("requested", "Requested", |a: &ReferenceCheck, b: &ReferenceCheck| {
            a.requested_on.cmp(&b.requested_on)
        })
}

pub fn opportunities() -> ListSpec<Opportunity> {
    ListSpec::new("opportunities")
        .search("name", |o: &Opportunity| Some(o.name.as_str()))
        .search("funder", |o: &Opportunity| Some(o.funder.as_str()))
        .search("owner", |o: &Opportunity| Some(o.owner.as_str()))
        .facet("stage", "Stage", |o: &Opportunity| o.stage.label())
        .facet("region", "Region", |o: &Opportunity| o.region.as_str())
        .sort("name", "Name", |a: &Opportunity, b: &Opportunity| cmp_ignore_case(&a.name, &b.name))
        .sort("amount", "Amount", |a: &Opportunity, b: &Opportunity| a.amount.total_cmp(&b.amount))
        .sort("deadline", "Deadline", |a: &Opportunity, b: &Opportunity| a.deadline.cmp(&b.deadline))
        .sort("stage", "Stage", |a: &Opportunity, b: &Opportunity| a.stage.cmp(&b.stage))
}

pub fn users() -> ListSpec<SuperAdminUser> {
    ListSpec::new("users")
        .search("name", |u: &SuperAdminUser| Some(u.name.as_str()))
        .search("email", |u: &SuperAdminUser| Some(u.email.as_str()))
        .search("organization", |u: &SuperAdminUser| Some(u.organization.as_str()))
        .facet("role", "Role", |u: &SuperAdminUser| u.role.label())
        .facet("status", "Status", |u: &SuperAdminUser| u.status.label())
        .facet("region", "Region", |u: &SuperAdminUser| u.region.as_str())
        .sort("name", "Name", |a: &SuperAdminUser, b: &SuperAdminUser| cmp_ignore_case(&a.name, &b.name))
        .sort("role", "Role", |a: &SuperAdminUser, b: &SuperAdminUser| a.role.cmp(&b.role))
        .sort("login", "Last login", |a: &SuperAdminUser, b: &SuperAdminUser| {
            a.last_login.cmp(&b.last_login)
        })
        .eligible(|u: &SuperAdminUser| u.is_suspendable())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::listing::{FacetSelection, SelectScope, TabularListController, ViewMode};
    use crate::models::{ComplianceStatus, GrantStatus};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_every_spec_builds() {
        assert!(TabularListController::new(grant_portfolio()).is_ok());
        assert!(TabularListController::new(grant_archive()).is_ok());
        assert!(TabularListController::new(compliance_documents()).is_ok());
        assert!(TabularListController::new(employees()).is_ok());
        assert!(TabularListController::new(onboarding_tasks()).is_ok());
        assert!(TabularListController::new(exits()).is_ok());
        assert!(TabularListController::new(reference_checks()).is_ok());
        assert!(TabularListController::new(opportunities()).is_ok());
        assert!(TabularListController::new(users()).is_ok());
    }

    #[test]
    fn test_pending_compliance_scenario() {
        let docs = fixtures::compliance_documents();
        assert_eq!(docs.len(), 12);

        let mut c = TabularListController::new(compliance_documents()).unwrap();
        c.set_records(docs.clone());
        assert_eq!(c.page_size(), 8);
        assert_eq!(c.total_pages(), 2);

        c.set_facet("status", FacetSelection::Only("Pending".to_string()))
            .unwrap();

        let expected: Vec<&str> = docs
            .iter()
            .filter(|d| d.status == ComplianceStatus::Pending)
            .map(|d| d.id.as_str())
            .collect();
        let filtered: Vec<&str> = c.filtered().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(filtered, expected);

        let first = c.current_page();
        assert!(first.items.len() <= 8);
        if expected.len() > 8 {
            assert!(first.has_next());
            c.next_page();
            assert_eq!(c.current_page().items.len(), expected.len() - 8);
        } else {
            assert_eq!(first.total_pages, 1);
            assert_eq!(first.items.len(), expected.len());
        }
    }

    #[test]
    fn test_text_search_matches_status_filter_scenario() {
        let mut c = TabularListController::new(compliance_documents()).unwrap();
        c.set_records(fixtures::compliance_documents());
        c.set_query("hope");
        assert!(c
            .filtered()
            .iter()
            .all(|d| d.organization.to_lowercase().contains("hope")
                || d.name.to_lowercase().contains("hope")
                || d.region.to_lowercase().contains("hope")));
    }

    #[test]
    fn test_reminder_eligible_select_all() {
        let mut c = TabularListController::new(compliance_documents()).unwrap();
        c.set_records(fixtures::compliance_documents());
        c.select_all(SelectScope::Eligible, true);
        assert!(c
            .selected_records()
            .iter()
            .all(|d| matches!(d.status, ComplianceStatus::Pending | ComplianceStatus::Expired)));
        assert_eq!(c.eligible_selected().len(), c.selection().len());
    }

    #[test]
    fn test_portfolio_and_archive_partition_grants() {
        let grants = fixtures::grants();
        let mut portfolio = TabularListController::new(grant_portfolio()).unwrap();
        let mut archive = TabularListController::new(grant_archive()).unwrap();
        portfolio.set_records(grants.clone());
        archive.set_records(grants.clone());

        assert_eq!(portfolio.filtered_count() + archive.filtered_count(), grants.len());
        assert!(archive
            .filtered()
            .iter()
            .all(|g| matches!(g.status, GrantStatus::Closed | GrantStatus::Archived)));
    }

    #[test]
    fn test_archive_facet_cycles_archived_statuses_only() {
        let mut archive = TabularListController::new(grant_archive()).unwrap();
        archive.set_records(fixtures::grants());
        assert_eq!(archive.filtered_count(), 5);
        assert_eq!(archive.facet_values("status").unwrap(), vec!["Archived", "Closed"]);

        let first = archive.cycle_facet("status").unwrap();
        assert_eq!(first, FacetSelection::Only("Archived".to_string()));
        assert_eq!(archive.filtered_count(), 2);

        let second = archive.cycle_facet("status").unwrap();
        assert_eq!(second, FacetSelection::Only("Closed".to_string()));
        assert_eq!(archive.filtered_count(), 3);

        assert_eq!(archive.cycle_facet("status").unwrap(), FacetSelection::All);
        assert_eq!(archive.placeholder(), None);
    }

    #[test]
    fn test_grid_and_list_render_same_records() {
        let mut c = TabularListController::new(users()).unwrap();
        c.set_records(fixtures::users());
        c.toggle_sort("name").unwrap();
        let list: Vec<String> = c.current_page().items.iter().map(|u| u.id.clone()).collect();
        c.set_view_mode(ViewMode::Grid);
        let grid: Vec<String> = c.current_page().items.iter().map(|u| u.id.clone()).collect();
        assert_eq!(list, grid);
    }
}
