//! Book catalogue gateways.
//!
//! Each service process registers one of the modules below against a shared
//! [`bookshelf_db::BookStore`] handle.

pub mod modules;
pub mod utils;

/// Re-export commonly used types
pub use modules::*;
