//! Command implementations for the vibe-flow CLI

pub mod install;
