mod action;
pub use action::Action;

mod comment;
pub use comment::{is_blank, Comment, CommentId};

mod error;
pub use error::Error;
