use std::collections::HashSet;

use crate::{
    api::{is_blank, Action, Comment, CommentId, Error},
    comment, CommentExt, Iter,
};

/// The ordered list of top-level comments, and everything below them
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Forest {
    /// Top-level comments, oldest first
    roots: Vec<Comment>,

    /// Strictly greater than every id ever issued by or given to this forest,
    /// `None` once `u64::MAX` has been issued
    next_id: Option<CommentId>,
}

impl Default for Forest {
    fn default() -> Forest {
        Forest::new()
    }
}

impl Forest {
    pub fn new() -> Forest {
        Forest {
            roots: Vec::new(),
            next_id: Some(CommentId(1)),
        }
    }

    /// Adopt an already-built forest, refusing it if any id appears twice or if
    /// it leaves no room for new ids
    pub fn from_roots(roots: Vec<Comment>) -> Result<Forest, Error> {
        let mut seen = HashSet::new();
        let mut max = CommentId(0);
        for (_, c) in Iter::new(&roots) {
            if !seen.insert(c.id) {
                return Err(Error::DuplicateId(c.id));
            }
            max = max.max(c.id);
        }
        let next_id = max.next().ok_or(Error::IdSpaceExhausted)?;
        Ok(Forest {
            roots,
            next_id: Some(next_id),
        })
    }

    /// The comments a freshly opened widget starts with
    pub fn demo() -> Forest {
        Forest {
            roots: vec![
                Comment::with_children(
                    CommentId(1),
                    "First comment",
                    vec![Comment::with_children(CommentId(2), "New comment", Vec::new())],
                ),
                Comment::with_children(CommentId(3), "Second comment", Vec::new()),
            ],
            next_id: Some(CommentId(4)),
        }
    }

    pub fn roots(&self) -> &[Comment] {
        &self.roots
    }

    /// Total number of comments, replies included
    pub fn len(&self) -> usize {
        self.roots.iter().map(|c| c.subtree_len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.roots)
    }

    pub fn get(&self, id: &CommentId) -> Option<&Comment> {
        comment::find_in(&self.roots, id)
    }

    pub fn get_mut(&mut self, id: &CommentId) -> Option<&mut Comment> {
        comment::find_in_mut(&mut self.roots, id)
    }

    pub fn contains(&self, id: &CommentId) -> bool {
        self.get(id).is_some()
    }

    fn fresh_id(&mut self) -> Result<CommentId, Error> {
        let id = self.next_id.ok_or(Error::IdSpaceExhausted)?;
        self.next_id = id.next();
        Ok(id)
    }

    /// Append a new top-level comment after all the existing ones
    pub fn create_root(&mut self, text: impl Into<String>) -> Result<CommentId, Error> {
        let text = text.into();
        if is_blank(&text) {
            return Err(Error::EmptyText);
        }
        let id = self.fresh_id()?;
        self.roots.push(Comment::leaf(id, text));
        tracing::debug!(?id, "created top-level comment");
        Ok(id)
    }

    /// Insert a reply in front of `parent_id`'s existing replies
    pub fn add_reply(
        &mut self,
        parent_id: CommentId,
        text: impl Into<String>,
    ) -> Result<CommentId, Error> {
        let text = text.into();
        if is_blank(&text) {
            return Err(Error::EmptyText);
        }
        if !self.contains(&parent_id) {
            return Err(Error::NotFound(parent_id));
        }
        let id = self.fresh_id()?;
        let parent = comment::find_in_mut(&mut self.roots, &parent_id)
            .ok_or(Error::NotFound(parent_id))?;
        parent.children.insert(0, Comment::leaf(id, text));
        tracing::debug!(?id, ?parent_id, "added reply");
        Ok(id)
    }

    pub fn edit_text(&mut self, comment_id: CommentId, text: impl Into<String>) -> Result<(), Error> {
        let text = text.into();
        if is_blank(&text) {
            return Err(Error::EmptyText);
        }
        let comment = self
            .get_mut(&comment_id)
            .ok_or(Error::NotFound(comment_id))?;
        comment.text = text;
        tracing::debug!(?comment_id, "edited comment");
        Ok(())
    }

    /// Remove a comment with all its replies, returning the removed subtree
    pub fn delete_subtree(&mut self, comment_id: CommentId) -> Result<Comment, Error> {
        let removed =
            comment::remove_in(&mut self.roots, &comment_id).ok_or(Error::NotFound(comment_id))?;
        tracing::debug!(
            ?comment_id,
            num_removed = removed.subtree_len(),
            "deleted comment subtree"
        );
        Ok(removed)
    }

    /// Returns the id of the created comment, if any
    pub fn apply(&mut self, a: Action) -> Result<Option<CommentId>, Error> {
        match a {
            Action::NewComment { text } => self.create_root(text).map(Some),
            Action::Reply { parent_id, text } => self.add_reply(parent_id, text).map(Some),
            Action::Edit { comment_id, text } => self.edit_text(comment_id, text).map(|()| None),
            Action::Delete { comment_id } => self.delete_subtree(comment_id).map(|_| None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(id: u64, text: &str, children: Vec<Comment>) -> Comment {
        Comment::with_children(CommentId(id), text, children)
    }

    fn leaf(id: CommentId, text: &str) -> Comment {
        Comment::leaf(id, String::from(text))
    }

    #[test]
    fn walkthrough_from_demo() {
        let mut f = Forest::demo();

        let r = f
            .add_reply(CommentId(2), "Reply to New comment")
            .expect("comment 2 exists");
        assert_eq!(
            f.get(&CommentId(2)).unwrap().children,
            vec![leaf(r, "Reply to New comment")],
        );

        let removed = f.delete_subtree(CommentId(1)).expect("comment 1 exists");
        assert_eq!(removed.ids(), vec![CommentId(1), CommentId(2), r]);
        assert_eq!(f.roots(), &[c(3, "Second comment", vec![])]);

        let third = f.create_root("Third comment").unwrap();
        assert_eq!(
            f.roots(),
            &[c(3, "Second comment", vec![]), leaf(third, "Third comment")],
        );
        assert!(third != r && third != CommentId(3));
    }

    #[test]
    fn roots_are_appended() {
        let mut f = Forest::new();
        let a = f.create_root("a").unwrap();
        let b = f.create_root("b").unwrap();
        let c = f.create_root("c").unwrap();
        assert_eq!(
            f.roots().iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![a, b, c]
        );
    }

    #[test]
    fn replies_are_prepended() {
        let mut f = Forest::demo();
        let first = f.add_reply(CommentId(1), "first").unwrap();
        let second = f.add_reply(CommentId(1), "second").unwrap();
        assert_eq!(
            f.get(&CommentId(1))
                .unwrap()
                .children
                .iter()
                .map(|c| c.id)
                .collect::<Vec<_>>(),
            vec![second, first, CommentId(2)],
        );
    }

    #[test]
    fn blank_text_is_rejected() {
        let mut f = Forest::demo();
        let before = f.clone();
        assert_eq!(f.create_root(""), Err(Error::EmptyText));
        assert_eq!(f.create_root("   "), Err(Error::EmptyText));
        assert_eq!(f.add_reply(CommentId(1), "\n"), Err(Error::EmptyText));
        assert_eq!(f.edit_text(CommentId(1), ""), Err(Error::EmptyText));
        assert_eq!(f, before);
    }

    #[test]
    fn missing_ids_change_nothing() {
        let mut f = Forest::demo();
        let before = f.clone();
        assert_eq!(
            f.add_reply(CommentId(99), "hi"),
            Err(Error::NotFound(CommentId(99)))
        );
        assert_eq!(
            f.edit_text(CommentId(99), "hi"),
            Err(Error::NotFound(CommentId(99)))
        );
        assert_eq!(
            f.delete_subtree(CommentId(99)),
            Err(Error::NotFound(CommentId(99)))
        );
        assert_eq!(f, before);
    }

    #[test]
    fn edit_only_touches_its_target() {
        let mut f = Forest::demo();
        f.edit_text(CommentId(2), "Edited").unwrap();
        assert_eq!(
            f.roots(),
            &[
                c(1, "First comment", vec![c(2, "Edited", vec![])]),
                c(3, "Second comment", vec![]),
            ],
        );
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut f = Forest::new();
        let a = f.create_root("a").unwrap();
        f.delete_subtree(a).unwrap();
        let b = f.create_root("b").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn from_roots_checks_ids() {
        assert_eq!(
            Forest::from_roots(vec![c(1, "a", vec![c(1, "b", vec![])])]),
            Err(Error::DuplicateId(CommentId(1))),
        );
        let mut f = Forest::from_roots(vec![c(7, "a", vec![c(3, "b", vec![])])]).unwrap();
        assert_eq!(f.len(), 2);
        assert_eq!(f.create_root("c").unwrap(), CommentId(8));
        assert_eq!(Forest::from_roots(Vec::new()).unwrap(), Forest::new());
    }

    #[test]
    fn largest_id_is_handed_out_once() {
        assert_eq!(
            Forest::from_roots(vec![leaf(CommentId(1), "a"), leaf(CommentId(u64::MAX), "b")]),
            Err(Error::IdSpaceExhausted),
        );

        let mut f = Forest::from_roots(vec![leaf(CommentId(u64::MAX - 1), "a")]).unwrap();
        assert_eq!(f.create_root("b"), Ok(CommentId(u64::MAX)));
        let before = f.clone();
        assert_eq!(f.create_root("c"), Err(Error::IdSpaceExhausted));
        assert_eq!(
            f.add_reply(CommentId(u64::MAX), "d"),
            Err(Error::IdSpaceExhausted)
        );
        assert_eq!(f, before);

        // Deleting does not give ids back
        f.delete_subtree(CommentId(u64::MAX - 1)).unwrap();
        assert_eq!(f.create_root("e"), Err(Error::IdSpaceExhausted));
        assert_eq!(f.edit_text(CommentId(u64::MAX), "still editable"), Ok(()));
    }

    #[test]
    fn apply_dispatches() {
        let mut f = Forest::demo();
        let id = f
            .apply(Action::Reply {
                parent_id: CommentId(3),
                text: String::from("r"),
            })
            .unwrap()
            .expect("replies create a comment");
        assert!(f.contains(&id));
        assert_eq!(f.len(), 4);
        assert_eq!(
            f.apply(Action::Delete {
                comment_id: CommentId(3)
            }),
            Ok(None)
        );
        assert_eq!(f.len(), 2);
        assert!(!f.contains(&id));
    }
}
