//! Per-record table cells and grid cards.

use chrono::NaiveDate;
use ratatui::{
    layout::Constraint,
    text::{Line, Span},
    widgets::Cell,
};

use ngodesk_core::models::{
    ComplianceDocument, Employee, ExitRecord, Grant, OnboardingTask, Opportunity,
    ReferenceCheck, SuperAdminUser,
};
use ngodesk_core::utils::format::format_optional_date;
use ngodesk_core::utils::{format_currency, format_date, truncate};

use super::styles;

/// A table column; `sort_key` names the list's sort key when sortable.
pub struct Column {
    pub title: &'static str,
    pub sort_key: Option<&'static str>,
    pub width: Constraint,
}

const fn col(title: &'static str, sort_key: Option<&'static str>, width: Constraint) -> Column {
    Column { title, sort_key, width }
}

/// How one record type renders in list and grid views.
pub trait RowView {
    fn columns() -> Vec<Column>;
    fn cells(&self, today: NaiveDate) -> Vec<Cell<'static>>;
    fn card_title(&self) -> String;
    fn card_lines(&self, today: NaiveDate) -> Vec<Line<'static>>;
}

fn status_cell(label: &'static str) -> Cell<'static> {
    Cell::from(Span::styled(label, styles::status_style(label)))
}

fn field(name: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<9}", name), styles::muted_style()),
        Span::raw(value),
    ])
}

fn status_line(label: &'static str) -> Line<'static> {
    Line::from(Span::styled(label, styles::status_style(label)))
}

impl RowView for Grant {
    fn columns() -> Vec<Column> {
        vec![
            col("Title", Some("title"), Constraint::Fill(3)),
            col("Funder", Some("funder"), Constraint::Fill(2)),
            col("Region", None, Constraint::Length(14)),
            col("Status", None, Constraint::Length(9)),
            col("Amount", Some("amount"), Constraint::Length(13)),
            col("Ends", Some("end"), Constraint::Length(13)),
        ]
    }

    fn cells(&self, _today: NaiveDate) -> Vec<Cell<'static>> {
        vec![
            Cell::from(self.title.clone()),
            Cell::from(self.funder.clone()),
            Cell::from(self.region.clone()),
            status_cell(self.status.label()),
            Cell::from(format!("{:>12}", format_currency(self.amount))),
            Cell::from(format_date(&self.end_date)),
        ]
    }

    fn card_title(&self) -> String {
        truncate(&self.title, 30)
    }

    fn card_lines(&self, _today: NaiveDate) -> Vec<Line<'static>> {
        vec![
            status_line(self.status.label()),
            field("Funder", self.funder.clone()),
            field("Amount", format_currency(self.amount)),
            field("Period", self.period_display()),
            field("Officer", self.officer().to_string()),
        ]
    }
}

impl RowView for ComplianceDocument {
    fn columns() -> Vec<Column> {
        vec![
            col("Document", Some("name"), Constraint::Fill(3)),
            col("Organization", Some("organization"), Constraint::Fill(2)),
            col("Category", None, Constraint::Length(13)),
            col("Status", None, Constraint::Length(10)),
            col("Due", Some("due"), Constraint::Length(12)),
        ]
    }

    fn cells(&self, today: NaiveDate) -> Vec<Cell<'static>> {
        let due = self.due_display(today);
        let due_style = if self.is_overdue(today) {
            styles::error_style()
        } else {
            styles::list_item_style()
        };
        vec![
            Cell::from(self.name.clone()),
            Cell::from(self.organization.clone()),
            Cell::from(self.category.label()),
            status_cell(self.status.label()),
            Cell::from(Span::styled(due, due_style)),
        ]
    }

    fn card_title(&self) -> String {
        truncate(&self.name, 30)
    }

    fn card_lines(&self, today: NaiveDate) -> Vec<Line<'static>> {
        let reminded = self
            .last_reminded
            .map(|d| format_date(&d))
            .unwrap_or_else(|| "never".to_string());
        vec![
            status_line(self.status.label()),
            field("Org", self.organization.clone()),
            field("Category", self.category.label().to_string()),
            field("Due", format!("{} ({})", format_optional_date(self.due_date.as_ref()), self.due_display(today))),
            field("Reminded", reminded),
        ]
    }
}

impl RowView for Employee {
    fn columns() -> Vec<Column> {
        vec![
            col("Name", Some("name"), Constraint::Fill(2)),
            col("Role", None, Constraint::Fill(2)),
            col("Department", Some("department"), Constraint::Fill(2)),
            col("Region", None, Constraint::Length(14)),
            col("Status", None, Constraint::Length(11)),
            col("Started", Some("start"), Constraint::Length(13)),
        ]
    }

    fn cells(&self, _today: NaiveDate) -> Vec<Cell<'static>> {
        vec![
            Cell::from(self.display_name()),
            Cell::from(self.role.clone()),
            Cell::from(self.department.clone()),
            Cell::from(self.region.clone()),
            status_cell(self.status.label()),
            Cell::from(format_optional_date(self.start_date.as_ref())),
        ]
    }

    fn card_title(&self) -> String {
        self.full_name()
    }

    fn card_lines(&self, today: NaiveDate) -> Vec<Line<'static>> {
        let tenure = self
            .tenure_years(today)
            .map(|y| format!("{} yr", y))
            .unwrap_or_else(|| "-".to_string());
        vec![
            status_line(self.status.label()),
            field("Role", self.role.clone()),
            field("Dept", self.department.clone()),
            field("Email", self.email.clone()),
            field("Tenure", tenure),
        ]
    }
}

impl RowView for OnboardingTask {
    fn columns() -> Vec<Column> {
        vec![
            col("Employee", Some("employee"), Constraint::Fill(2)),
            col("Task", None, Constraint::Fill(3)),
            col("Owner", None, Constraint::Length(16)),
            col("Status", None, Constraint::Length(12)),
            col("Due", Some("due"), Constraint::Length(13)),
        ]
    }

    fn cells(&self, _today: NaiveDate) -> Vec<Cell<'static>> {
        vec![
            Cell::from(self.employee.clone()),
            Cell::from(self.task.clone()),
            Cell::from(self.owner.clone()),
            status_cell(self.status.label()),
            Cell::from(format_optional_date(self.due_date.as_ref())),
        ]
    }

    fn card_title(&self) -> String {
        truncate(&self.task, 30)
    }

    fn card_lines(&self, _today: NaiveDate) -> Vec<Line<'static>> {
        vec![
            status_line(self.status.label()),
            field("For", self.employee.clone()),
            field("Owner", self.owner.clone()),
            field("Due", format_optional_date(self.due_date.as_ref())),
        ]
    }
}

impl RowView for ExitRecord {
    fn columns() -> Vec<Column> {
        vec![
            col("Employee", Some("employee"), Constraint::Fill(2)),
            col("Department", None, Constraint::Fill(2)),
            col("Type", None, Constraint::Length(16)),
            col("Exit date", Some("date"), Constraint::Length(13)),
            col("Clearance", None, Constraint::Length(10)),
            col("Interview", None, Constraint::Length(9)),
        ]
    }

    fn cells(&self, _today: NaiveDate) -> Vec<Cell<'static>> {
        vec![
            Cell::from(self.employee.clone()),
            Cell::from(self.department.clone()),
            Cell::from(self.exit_type.label()),
            Cell::from(format_date(&self.exit_date)),
            status_cell(self.clearance.label()),
            Cell::from(if self.interview_done { "done" } else { "-" }),
        ]
    }

    fn card_title(&self) -> String {
        self.employee.clone()
    }

    fn card_lines(&self, _today: NaiveDate) -> Vec<Line<'static>> {
        vec![
            status_line(self.clearance.label()),
            field("Type", self.exit_type.label().to_string()),
            field("Dept", self.department.clone()),
            field("Date", format_date(&self.exit_date)),
        ]
    }
}

impl RowView for ReferenceCheck {
    fn columns() -> Vec<Column> {
        vec![
            col("Candidate", Some("candidate"), Constraint::Fill(2)),
            col("Position", None, Constraint::Fill(2)),
            col("Referee", None, Constraint::Fill(2)),
            col("Status", None, Constraint::Length(10)),
            col("Requested", Some("requested"), Constraint::Length(13)),
        ]
    }

    fn cells(&self, _today: NaiveDate) -> Vec<Cell<'static>> {
        vec![
            Cell::from(self.candidate.clone()),
            Cell::from(self.position.clone()),
            Cell::from(self.referee.clone()),
            status_cell(self.status.label()),
            Cell::from(format_date(&self.requested_on)),
        ]
    }

    fn card_title(&self) -> String {
        self.candidate.clone()
    }

    fn card_lines(&self, today: NaiveDate) -> Vec<Line<'static>> {
        let mut lines = vec![
            status_line(self.status.label()),
            field("Position", self.position.clone()),
            field("Referee", self.referee.clone()),
        ];
        if let Some(days) = self.days_outstanding(today) {
            lines.push(field("Waiting", format!("{} days", days)));
        }
        lines
    }
}

impl RowView for Opportunity {
    fn columns() -> Vec<Column> {
        vec![
            col("Opportunity", Some("name"), Constraint::Fill(3)),
            col("Funder", None, Constraint::Fill(2)),
            col("Stage", Some("stage"), Constraint::Length(10)),
            col("Amount", Some("amount"), Constraint::Length(13)),
            col("Deadline", Some("deadline"), Constraint::Length(13)),
            col("Owner", None, Constraint::Length(15)),
        ]
    }

    fn cells(&self, today: NaiveDate) -> Vec<Cell<'static>> {
        let deadline = format_optional_date(self.deadline.as_ref());
        let deadline_cell = if self.deadline_within(today, 14) {
            Cell::from(Span::styled(deadline, styles::highlight_style()))
        } else {
            Cell::from(deadline)
        };
        vec![
            Cell::from(self.name.clone()),
            Cell::from(self.funder.clone()),
            status_cell(self.stage.label()),
            Cell::from(format!("{:>12}", format_currency(self.amount))),
            deadline_cell,
            Cell::from(self.owner.clone()),
        ]
    }

    fn card_title(&self) -> String {
        truncate(&self.name, 30)
    }

    fn card_lines(&self, _today: NaiveDate) -> Vec<Line<'static>> {
        vec![
            status_line(self.stage.label()),
            field("Funder", self.funder.clone()),
            field("Amount", format_currency(self.amount)),
            field("Deadline", format_optional_date(self.deadline.as_ref())),
            field("Owner", self.owner.clone()),
        ]
    }
}

impl RowView for SuperAdminUser {
    fn columns() -> Vec<Column> {
        vec![
            col("Name", Some("name"), Constraint::Fill(2)),
            col("Email", None, Constraint::Fill(3)),
            col("Organization", None, Constraint::Fill(2)),
            col("Role", Some("role"), Constraint::Length(12)),
            col("Status", None, Constraint::Length(10)),
            col("Last login", Some("login"), Constraint::Length(17)),
        ]
    }

    fn cells(&self, _today: NaiveDate) -> Vec<Cell<'static>> {
        vec![
            Cell::from(self.name.clone()),
            Cell::from(self.email.clone()),
            Cell::from(self.organization.clone()),
            Cell::from(self.role.label()),
            status_cell(self.status.label()),
            Cell::from(self.last_login_display()),
        ]
    }

    fn card_title(&self) -> String {
        self.name.clone()
    }

    fn card_lines(&self, _today: NaiveDate) -> Vec<Line<'static>> {
        vec![
            status_line(self.status.label()),
            field("Role", self.role.label().to_string()),
            field("Org", self.organization.clone()),
            field("Email", self.email.clone()),
            field("Login", self.last_login_display()),
        ]
    }
}
