//! Domain logic - pure release rules independent of git operations

pub mod branch;
pub mod module;
pub mod version;

pub use branch::BranchContext;
pub use module::{locate_makefile, ModuleRef};
pub use version::{Version, VersionBump};
