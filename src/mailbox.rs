//! Mailbox ingestion seam.
//!
//! The actual mailbox (OAuth, Graph/IMAP transport, token refresh) lives in
//! the host application. The core only sees [`MailboxSession`], injected per
//! call — there is deliberately no process-wide session singleton, so tests
//! and hosts can swap implementations freely.
//!
//! [`process_inbox`] walks unread report emails: the business hour comes
//! from the subject line, and an email whose subject yields no valid hour is
//! skipped wholesale (left unread for a human to look at), never clamped.

use thiserror::Error;

use crate::error::ImportError;
use crate::importer::{import_email_attachment, ImportReport};
use crate::roster::Roster;
use crate::store::CallRecordStore;
use crate::subject::extract_hour;

/// Transport-level mailbox failure. Message comes from the host's client.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct MailboxError(pub String);

/// An unread report email, as listed by the session.
#[derive(Debug, Clone)]
pub struct ReportEmail {
    pub id: String,
    pub subject: String,
    /// ISO date the email was received; records from its attachment are
    /// filed under this date.
    pub received_date: String,
}

/// Host-provided mailbox connection, injected into [`process_inbox`].
pub trait MailboxSession {
    /// Unread messages that carry a CSV attachment.
    fn unread_report_emails(&mut self) -> Result<Vec<ReportEmail>, MailboxError>;

    /// The text of the first CSV attachment, `None` if it can't be decoded.
    fn fetch_csv_attachment(&mut self, email_id: &str) -> Result<Option<String>, MailboxError>;

    /// Mark an email as handled so the next poll skips it.
    fn mark_processed(&mut self, email_id: &str) -> Result<(), MailboxError>;
}

/// Outcome of one inbox pass.
#[derive(Debug, Clone, Default)]
pub struct InboxReport {
    /// Emails whose attachment was imported.
    pub processed_emails: usize,
    /// Emails skipped: subject had no usable hour, or no attachment.
    pub skipped_emails: usize,
    /// Records written across all processed emails.
    pub imported: usize,
    /// Accumulated row-level errors from every processed attachment.
    pub row_errors: Vec<String>,
}

/// Process every unread report email: extract the hour, parse the
/// attachment in fixed-position mode, and issue one upsert batch per email.
///
/// Transport errors and store write errors are fatal to the pass; per-email
/// content problems (no hour, no attachment, unknown agents) are logged and
/// accumulated.
pub fn process_inbox(
    session: &mut dyn MailboxSession,
    roster: &Roster,
    store: &mut dyn CallRecordStore,
) -> Result<InboxReport, ImportError> {
    let emails = session
        .unread_report_emails()
        .map_err(|e| ImportError::Write(e.to_string()))?;

    let mut report = InboxReport::default();

    for email in emails {
        let Some(hour) = extract_hour(&email.subject) else {
            log::warn!("Skipping email \"{}\": no business hour in subject", email.subject);
            report.skipped_emails += 1;
            continue;
        };

        let attachment = session
            .fetch_csv_attachment(&email.id)
            .map_err(|e| ImportError::Write(e.to_string()))?;
        let Some(content) = attachment else {
            log::warn!("Skipping email \"{}\": no CSV attachment", email.subject);
            report.skipped_emails += 1;
            continue;
        };

        let outcome: ImportReport =
            import_email_attachment(&content, roster, store, &email.received_date, hour)?;

        log::info!(
            "Processed email \"{}\": {} records at hour {}",
            email.subject,
            outcome.imported,
            hour
        );
        report.processed_emails += 1;
        report.imported += outcome.imported;
        report.row_errors.extend(outcome.row_errors);

        session
            .mark_processed(&email.id)
            .map_err(|e| ImportError::Write(e.to_string()))?;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{CallRecordStore, MemoryStore};
    use crate::types::Agent;

    struct FakeSession {
        emails: Vec<ReportEmail>,
        attachments: Vec<(String, Option<String>)>,
        processed: Vec<String>,
    }

    impl FakeSession {
        fn new(emails: Vec<(&str, &str)>, attachments: Vec<(&str, Option<&str>)>) -> Self {
            Self {
                emails: emails
                    .into_iter()
                    .map(|(id, subject)| ReportEmail {
                        id: id.to_string(),
                        subject: subject.to_string(),
                        received_date: "2024-01-01".to_string(),
                    })
                    .collect(),
                attachments: attachments
                    .into_iter()
                    .map(|(id, body)| (id.to_string(), body.map(|b| b.to_string())))
                    .collect(),
                processed: Vec::new(),
            }
        }
    }

    impl MailboxSession for FakeSession {
        fn unread_report_emails(&mut self) -> Result<Vec<ReportEmail>, MailboxError> {
            Ok(self.emails.clone())
        }

        fn fetch_csv_attachment(&mut self, email_id: &str) -> Result<Option<String>, MailboxError> {
            Ok(self
                .attachments
                .iter()
                .find(|(id, _)| id == email_id)
                .and_then(|(_, body)| body.clone()))
        }

        fn mark_processed(&mut self, email_id: &str) -> Result<(), MailboxError> {
            self.processed.push(email_id.to_string());
            Ok(())
        }
    }

    fn roster() -> Roster {
        Roster::new(
            vec![Agent {
                id: "a1".to_string(),
                name: "John Smith".to_string(),
                email: "john@x.com".to_string(),
                team_id: None,
                is_active: true,
            }],
            Vec::new(),
            Vec::new(),
        )
    }

    const CSV: &str = "ID,Agent Name,Ext,Queue,Calls,Seconds\n1,John Smith,101,main,12,310";

    #[test]
    fn test_process_inbox_imports_at_subject_hour() {
        let mut session = FakeSession::new(
            vec![("e1", "Hourly Report - Hour 9")],
            vec![("e1", Some(CSV))],
        );
        let mut store = MemoryStore::new();
        let report = process_inbox(&mut session, &roster(), &mut store).unwrap();

        assert_eq!(report.processed_emails, 1);
        assert_eq!(report.imported, 1);
        let snap = store.snapshot().unwrap();
        assert_eq!(snap[0].hour, 9);
        assert_eq!(snap[0].date, "2024-01-01");
        assert_eq!(session.processed, vec!["e1"]);
    }

    #[test]
    fn test_process_inbox_skips_email_without_hour() {
        // Out-of-range hour rejects the whole email; the attachment is
        // never even fetched and the email stays unread.
        let mut session = FakeSession::new(
            vec![("e1", "Hour 20"), ("e2", "Weekly newsletter")],
            vec![("e1", Some(CSV)), ("e2", Some(CSV))],
        );
        let mut store = MemoryStore::new();
        let report = process_inbox(&mut session, &roster(), &mut store).unwrap();

        assert_eq!(report.processed_emails, 0);
        assert_eq!(report.skipped_emails, 2);
        assert!(store.is_empty());
        assert!(session.processed.is_empty());
    }

    #[test]
    fn test_process_inbox_skips_missing_attachment() {
        let mut session = FakeSession::new(vec![("e1", "Hour 9")], vec![("e1", None)]);
        let mut store = MemoryStore::new();
        let report = process_inbox(&mut session, &roster(), &mut store).unwrap();

        assert_eq!(report.skipped_emails, 1);
        assert!(session.processed.is_empty());
    }

    #[test]
    fn test_process_inbox_accumulates_row_errors_across_emails() {
        let csv_with_ghost =
            "ID,Agent Name,Ext,Queue,Calls,Seconds\n1,Ghost,101,main,2,60";
        let mut session = FakeSession::new(
            vec![("e1", "Hour 9"), ("e2", "Hour 10")],
            vec![("e1", Some(CSV)), ("e2", Some(csv_with_ghost))],
        );
        let mut store = MemoryStore::new();
        let report = process_inbox(&mut session, &roster(), &mut store).unwrap();

        assert_eq!(report.processed_emails, 2);
        assert_eq!(report.imported, 1);
        assert_eq!(report.row_errors, vec!["Agent \"Ghost\" not found"]);
    }
}
