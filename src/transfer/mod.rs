//! Import/export pipelines between the history store and text files.
//!
//! - Export: store query -> record formatting -> output lines
//! - Import: input lines -> record parsing (plus group resolution for SMS)
//!   -> one awaited store write per record

pub mod export;
pub mod groups;
pub mod import;

pub use export::{ExportStats, export_calls, export_sms};
pub use groups::GroupResolver;
pub use import::{ImportStats, import_calls, import_sms};
