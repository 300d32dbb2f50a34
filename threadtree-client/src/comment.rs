use crate::api::{Comment, CommentId};

pub trait CommentExt {
    /// Number of comments in this subtree, including this one
    fn subtree_len(&self) -> usize;

    /// Ids of this subtree, in pre-order
    fn ids(&self) -> Vec<CommentId>;

    fn iter(&self) -> Iter<'_>;
}

impl CommentExt for Comment {
    fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(|c| c.subtree_len()).sum::<usize>()
    }

    fn ids(&self) -> Vec<CommentId> {
        self.iter().map(|(_, c)| c.id).collect()
    }

    fn iter(&self) -> Iter<'_> {
        Iter::new(std::slice::from_ref(self))
    }
}

/// Pre-order search, first match wins
pub fn find_in<'a>(comments: &'a [Comment], id: &CommentId) -> Option<&'a Comment> {
    for c in comments {
        if c.id == *id {
            return Some(c);
        }
        if let Some(res) = find_in(&c.children, id) {
            return Some(res);
        }
    }
    None
}

pub fn find_in_mut<'a>(comments: &'a mut [Comment], id: &CommentId) -> Option<&'a mut Comment> {
    for c in comments.iter_mut() {
        if c.id == *id {
            return Some(c);
        }
        if let Some(res) = find_in_mut(&mut c.children, id) {
            return Some(res);
        }
    }
    None
}

/// Detach the first comment (in pre-order) with this id, along with all its replies
pub fn remove_in(comments: &mut Vec<Comment>, id: &CommentId) -> Option<Comment> {
    for i in 0..comments.len() {
        if comments[i].id == *id {
            return Some(comments.remove(i));
        }
        if let Some(res) = remove_in(&mut comments[i].children, id) {
            return Some(res);
        }
    }
    None
}

/// Pre-order traversal yielding each comment with its depth (roots are at depth 0)
pub struct Iter<'a> {
    stack: Vec<(usize, &'a Comment)>,
}

impl<'a> Iter<'a> {
    pub fn new(roots: &'a [Comment]) -> Iter<'a> {
        Iter {
            stack: roots.iter().rev().map(|c| (0, c)).collect(),
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (usize, &'a Comment);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, c) = self.stack.pop()?;
        self.stack
            .extend(c.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, c))
    }
}
