use serde::Serialize;

/// The public record shape; also the create request body.
pub use bookshelf_db::Book;

/// Acknowledgement returned by create and delete.
#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    pub message: &'static str,
    pub id: String,
}

impl Receipt {
    pub fn created(id: impl Into<String>) -> Self {
        Self {
            message: "book created",
            id: id.into(),
        }
    }

    pub fn deleted(id: impl Into<String>) -> Self {
        Self {
            message: "book deleted",
            id: id.into(),
        }
    }
}
