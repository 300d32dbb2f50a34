mod comment;
pub use comment::{find_in, find_in_mut, remove_in, CommentExt, Iter};

mod forest;
pub use forest::Forest;

pub mod render;
pub use render::Style;

mod session;
pub use session::{Key, NodeUi, Session};

mod fuzz;

pub mod api {
    pub use threadtree_api::*;
}
