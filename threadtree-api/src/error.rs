use crate::CommentId;

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Comment text must not be blank")]
    EmptyText,

    #[error("No comment with id {0}")]
    NotFound(CommentId),

    #[error("Comment id {0} is used more than once")]
    DuplicateId(CommentId),

    #[error("No comment ids left to hand out")]
    IdSpaceExhausted,
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}
