//! Configuration handling for vibe-flow
//!
//! This module contains:
//! - [`profile`]: install profiles describing what one framework release installs
//! - [`manifest`]: the framework manifest shipped inside a content source

pub mod manifest;
pub mod profile;

pub use manifest::FrameworkManifest;
pub use profile::InstallProfile;
