//! Callboard — call-center reporting core.
//!
//! The interesting surface of the dashboard lives here: turning loosely
//! structured CSV input (manual uploads and email attachments) into
//! validated hourly call records, and rolling those records up into
//! agent/team/campaign/hourly summaries with performance tiers for display.
//!
//! Everything outside that pipeline — auth, UI, mailbox transport, polling
//! schedulers — belongs to the host application and talks to this crate
//! through plain function calls plus two injected traits:
//! [`store::CallRecordStore`] (the only side-effecting seam) and
//! [`mailbox::MailboxSession`].

pub mod aggregate;
pub mod classify;
pub mod db;
pub mod error;
pub mod export;
pub mod importer;
pub mod mailbox;
pub mod roster;
pub mod store;
pub mod subject;
pub mod types;

pub use error::ImportError;
pub use importer::{import_agent_csv, import_call_csv, import_call_csv_today, ImportReport};
pub use mailbox::{process_inbox, InboxReport, MailboxSession};
pub use roster::Roster;
pub use store::{CallRecordStore, MemoryStore, StoreError};
pub use types::{Agent, CallRecord, Campaign, DateFilter, Team};
