//! The post resource model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One item of the remote posts collection.
///
/// Equality is structural over all four fields, and the type hashes so it
/// can key a multiset count. The wire format uses camelCase field names
/// (`userId`, `id`, `title`, `body`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Id of the user the post belongs to.
    pub user_id: u64,
    /// Id of the post itself.
    pub id: u64,
    /// Post title.
    pub title: String,
    /// Post body text.
    pub body: String,
}

impl Post {
    /// Creates a post from its four fields.
    pub fn new(user_id: u64, id: u64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            user_id,
            id,
            title: title.into(),
            body: body.into(),
        }
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{userId: {}, id: {}, title: {:?}, body: {:?}}}",
            self.user_id, self.id, self.title, self.body
        )
    }
}
