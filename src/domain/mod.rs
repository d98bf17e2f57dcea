//! Domain types shared by the installer components

pub mod item;
pub mod report;

pub use item::{InstallItem, ItemCategory, ItemKind};
pub use report::{InstallReport, ItemOutcome, Outcome};
