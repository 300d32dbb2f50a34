use crate::CommentId;

/// One submission coming from the presentation layer
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Action {
    NewComment {
        text: String,
    },
    Reply {
        parent_id: CommentId,
        text: String,
    },
    Edit {
        comment_id: CommentId,
        text: String,
    },
    Delete {
        comment_id: CommentId,
    },
}
