//! Terminal presentation
//!
//! Status lines for each installed item, the run summary and the top-level
//! error message. Everything goes through `console` styles, which degrade to
//! plain text when stdout is not a terminal.

mod display;

pub use display::{print_banner, print_error, print_report, print_summary};
