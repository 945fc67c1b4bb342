//! Core traits, settings, and the module registry shared by every bookshelf
//! service process.

pub mod module;
pub mod registry;
pub mod service;
pub mod settings;

pub use module::{InitCtx, Module};
pub use registry::ModuleRegistry;
pub use service::ServiceKind;
