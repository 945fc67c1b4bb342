use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A catalogue entry as exposed over HTTP.
///
/// Every field is textual to match the legacy data set; `id` is the business
/// key, distinct from the store's internal primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub pages: String,
    pub edition: String,
    pub year: String,
}

/// Stored representation using the collection's legacy field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub mongo_id: Option<ObjectId>,
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "BookName")]
    pub name: String,
    #[serde(rename = "BookAuthor")]
    pub author: String,
    #[serde(rename = "BookEdition")]
    pub edition: String,
    #[serde(rename = "BookPages")]
    pub pages: String,
    #[serde(rename = "BookYear")]
    pub year: String,
}

/// Field holding the business key inside stored documents.
pub const ID_FIELD: &str = "ID";

impl From<BookDocument> for Book {
    fn from(doc: BookDocument) -> Self {
        Self {
            id: doc.id,
            title: doc.name,
            author: doc.author,
            pages: doc.pages,
            edition: doc.edition,
            year: doc.year,
        }
    }
}

impl From<&Book> for BookDocument {
    fn from(book: &Book) -> Self {
        Self {
            mongo_id: None,
            id: book.id.clone(),
            name: book.title.clone(),
            author: book.author.clone(),
            edition: book.edition.clone(),
            pages: book.pages.clone(),
            year: book.year.clone(),
        }
    }
}
