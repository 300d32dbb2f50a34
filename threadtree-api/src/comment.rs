use std::fmt;

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
#[serde(transparent)]
pub struct CommentId(pub u64);

impl CommentId {
    /// `None` once the id space is used up
    pub fn next(self) -> Option<CommentId> {
        self.0.checked_add(1).map(CommentId)
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Comment {
    pub id: CommentId,

    /// Currently displayed text
    pub text: String,

    /// Replies, most recent first
    #[serde(default)]
    pub children: Vec<Comment>,
}

impl Comment {
    pub fn leaf(id: CommentId, text: String) -> Comment {
        Comment {
            id,
            text,
            children: Vec::new(),
        }
    }

    pub fn with_children(id: CommentId, text: &str, children: Vec<Comment>) -> Comment {
        Comment {
            id,
            text: String::from(text),
            children,
        }
    }
}

/// Whether `text` is acceptable as comment contents
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
