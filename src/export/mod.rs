//! Getting data out of (and back into) the ledger: the JSON document and
//! the paginated report.

pub mod json;
pub mod report;

pub use json::{export_json, ledger_from_value, parse_import};
pub use report::{format_amount, render_report, summary_lines, Report, DEFAULT_PAGE_LINES};
