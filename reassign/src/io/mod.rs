//! I/O helpers: config directory, member lists, page CLI, artifacts.

pub mod artifacts;
pub mod config;
pub mod membership;
pub mod page_client;
pub mod paths;
pub mod process;
