//! Book records as they travel over HTTP and into the store.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A stored book. `id` is assigned by the gateway on creation and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(rename = "publishedYear")]
    pub published_year: String,
    pub genre: String,
}

/// Editable fields of a book, decoded from create and update bodies.
///
/// Absent and `null` fields both decode to the empty string. An `id` in the
/// body is not part of the schema and is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BookFields {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub author: String,
    #[serde(
        rename = "publishedYear",
        alias = "published_year",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub published_year: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub genre: String,
}

impl BookFields {
    pub fn into_book(self, id: String) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            published_year: self.published_year,
            genre: self.genre,
        }
    }

    /// Decodes a request body. Repeated keys keep their last value, and
    /// `publishedYear` takes precedence over `published_year`.
    pub fn decode(body: &[u8]) -> serde_json::Result<Self> {
        let mut object: Map<String, Value> = serde_json::from_slice(body)?;

        if object.contains_key("publishedYear") {
            object.remove("published_year");
        }

        serde_json::from_value(Value::Object(object))
    }
}

impl Book {
    pub fn apply(&mut self, fields: &BookFields) {
        self.title = fields.title.clone();
        self.author = fields.author.clone();
        self.published_year = fields.published_year.clone();
        self.genre = fields.genre.clone();
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
