//! Bulk actions and document links, against the backend or in demo mode.

use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;
use tracing::info;

use crate::api::{ApiClient, DocumentAction, DocumentLink};
use crate::models::{ComplianceDocument, SuperAdminUser, UserStatus};

/// Demo mode waits this long so progress feedback is visible.
pub const DEMO_ACTION_DELAY_MS: u64 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    /// Remind owners of pending or expired compliance documents
    SendReminders,
    SuspendUsers,
}

impl BulkAction {
    pub fn label(&self) -> &'static str {
        match self {
            BulkAction::SendReminders => "Send reminders",
            BulkAction::SuspendUsers => "Suspend users",
        }
    }

    /// e.g. "Sent 3 reminders"
    pub fn summary(&self, count: usize) -> String {
        let plural = if count == 1 { "" } else { "s" };
        match self {
            BulkAction::SendReminders => format!("Sent {} reminder{}", count, plural),
            BulkAction::SuspendUsers => format!("Suspended {} user{}", count, plural),
        }
    }
}

/// Run a bulk action. `client` is `None` in demo mode. Returns how many
/// records the backend reports as updated.
pub async fn execute(client: Option<&ApiClient>, action: BulkAction, ids: &[String]) -> Result<usize> {
    info!(action = action.label(), count = ids.len(), demo = client.is_none(), "Running bulk action");
    match client {
        None => {
            tokio::time::sleep(Duration::from_millis(DEMO_ACTION_DELAY_MS)).await;
            Ok(ids.len())
        }
        Some(client) => {
            let result = match action {
                BulkAction::SendReminders => client.send_reminders(ids).await?,
                BulkAction::SuspendUsers => {
                    client.update_user_status(ids, UserStatus::Suspended).await?
                }
            };
            Ok(result.updated)
        }
    }
}

/// Local effect of a completed reminder.
pub fn mark_reminded(doc: &mut ComplianceDocument, today: NaiveDate) {
    doc.last_reminded = Some(today);
}

/// Local effect of a completed suspension.
pub fn mark_suspended(user: &mut SuperAdminUser) {
    user.status = UserStatus::Suspended;
}

/// Resolve a download or preview link. Demo mode returns a placeholder.
pub async fn document_link(
    client: Option<&ApiClient>,
    id: &str,
    action: DocumentAction,
) -> Result<DocumentLink> {
    match client {
        None => Ok(DocumentLink {
            url: format!("demo://documents/{}/{}", id, action.as_str()),
        }),
        Some(client) => client.document_link(id, action).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_summary_pluralizes() {
        assert_eq!(BulkAction::SendReminders.summary(1), "Sent 1 reminder");
        assert_eq!(BulkAction::SuspendUsers.summary(3), "Suspended 3 users");
    }

    #[tokio::test]
    async fn test_demo_execute_reports_every_id() {
        let ids = vec!["c-02".to_string(), "c-03".to_string()];
        let updated = execute(None, BulkAction::SendReminders, &ids).await.unwrap();
        assert_eq!(updated, 2);
    }

    #[tokio::test]
    async fn test_demo_document_link() {
        let link = document_link(None, "c-01", DocumentAction::Preview).await.unwrap();
        assert_eq!(link.url, "demo://documents/c-01/preview");
    }

    #[test]
    fn test_local_effects() {
        let mut docs = fixtures::compliance_documents();
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        mark_reminded(&mut docs[1], today);
        assert_eq!(docs[1].last_reminded, Some(today));

        let mut users = fixtures::users();
        mark_suspended(&mut users[1]);
        assert_eq!(users[1].status, UserStatus::Suspended);
        assert!(!users[1].is_suspendable());
    }
}
