//! Installation engine
//!
//! This module handles:
//! - Copying framework-owned and user-owned tree items ([`tree`])
//! - Reconciling JSON configuration files with the merge policy ([`merge`])
//! - Atomic low-level file operations ([`file_ops`])

pub mod file_ops;
pub mod merge;
pub mod tree;


pub use tree::TreeInstaller;
