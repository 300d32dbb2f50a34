use std::collections::HashMap;

use crate::{
    api::{CommentId, Error},
    CommentExt, Forest,
};

/// Per-comment state that only matters while the widget is on screen
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NodeUi {
    /// Contents of the reply composer, if it is open
    pub reply_draft: Option<String>,

    /// Text being edited, if the comment is in edit mode
    pub edit_draft: Option<String>,
}

impl NodeUi {
    fn is_idle(&self) -> bool {
        self.reply_draft.is_none() && self.edit_draft.is_none()
    }
}

/// Keys with a meaning inside a reply composer
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Key {
    /// Enter
    Confirm,

    /// Escape
    Cancel,
}

/// A forest being interacted with
///
/// All the `submit_*` operations are fail-soft: a rejected submission is
/// logged and leaves everything untouched. They return whether the forest
/// changed.
#[derive(Debug, Default)]
pub struct Session {
    forest: Forest,
    ui: HashMap<CommentId, NodeUi>,

    /// Contents of the top-level comment input
    pub root_draft: String,

    /// Reply composer that currently has keyboard focus
    focus: Option<CommentId>,
}

fn log_rejected(what: &'static str, err: Error) {
    tracing::info!(%err, "ignoring {what}");
}

impl Session {
    pub fn new(forest: Forest) -> Session {
        Session {
            forest,
            ui: HashMap::new(),
            root_draft: String::new(),
            focus: None,
        }
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn ui(&self, id: &CommentId) -> Option<&NodeUi> {
        self.ui.get(id)
    }

    pub fn focus(&self) -> Option<CommentId> {
        self.focus
    }

    fn update_ui(&mut self, id: CommentId, f: impl FnOnce(&mut NodeUi)) {
        let ui = self.ui.entry(id).or_default();
        f(ui);
        if ui.is_idle() {
            self.ui.remove(&id);
        }
    }

    pub fn submit_root(&mut self, text: impl Into<String>) -> bool {
        match self.forest.create_root(text) {
            Ok(_) => true,
            Err(e) => {
                log_rejected("top-level comment", e);
                false
            }
        }
    }

    /// Submit the top-level input, clearing it if it was accepted
    pub fn submit_root_draft(&mut self) -> bool {
        let text = std::mem::take(&mut self.root_draft);
        match self.forest.create_root(text.clone()) {
            Ok(_) => true,
            Err(e) => {
                log_rejected("top-level comment", e);
                self.root_draft = text;
                false
            }
        }
    }

    pub fn submit_reply(&mut self, parent_id: CommentId, text: impl Into<String>) -> bool {
        match self.forest.add_reply(parent_id, text) {
            Ok(_) => true,
            Err(e) => {
                log_rejected("reply", e);
                false
            }
        }
    }

    pub fn submit_edit(&mut self, comment_id: CommentId, text: impl Into<String>) -> bool {
        match self.forest.edit_text(comment_id, text) {
            Ok(()) => true,
            Err(e) => {
                log_rejected("edit", e);
                false
            }
        }
    }

    /// Delete a comment and its replies, forgetting their on-screen state
    pub fn submit_delete(&mut self, comment_id: CommentId) -> bool {
        match self.forest.delete_subtree(comment_id) {
            Ok(removed) => {
                for id in removed.ids() {
                    self.ui.remove(&id);
                    if self.focus == Some(id) {
                        self.focus = None;
                    }
                }
                true
            }
            Err(e) => {
                log_rejected("deletion", e);
                false
            }
        }
    }

    /// Open the reply composer below `id` and give it focus
    pub fn open_reply(&mut self, id: CommentId) {
        if !self.forest.contains(&id) {
            tracing::info!(?id, "not opening reply composer for unknown comment");
            return;
        }
        self.update_ui(id, |ui| {
            ui.reply_draft.get_or_insert_with(String::new);
        });
        self.focus = Some(id);
    }

    /// Replace the contents of an open reply composer
    pub fn type_reply(&mut self, id: CommentId, text: impl Into<String>) {
        match self.ui.get_mut(&id).and_then(|ui| ui.reply_draft.as_mut()) {
            Some(draft) => *draft = text.into(),
            None => tracing::info!(?id, "typing into a closed reply composer"),
        }
    }

    /// Close the reply composer, dropping what was typed
    pub fn cancel_reply(&mut self, id: CommentId) {
        self.update_ui(id, |ui| ui.reply_draft = None);
        if self.focus == Some(id) {
            self.focus = None;
        }
    }

    /// Submit the reply composer's contents and close it
    ///
    /// The composer is closed even if the reply is rejected.
    pub fn save_reply(&mut self, id: CommentId) -> bool {
        let mut draft = None;
        self.update_ui(id, |ui| draft = ui.reply_draft.take());
        if self.focus == Some(id) {
            self.focus = None;
        }
        match draft {
            Some(text) => self.submit_reply(id, text),
            None => false,
        }
    }

    /// Keyboard handling inside `id`'s reply composer
    pub fn handle_key(&mut self, id: CommentId, key: Key) -> bool {
        let composer_open = self
            .ui
            .get(&id)
            .map(|ui| ui.reply_draft.is_some())
            .unwrap_or(false);
        if !composer_open {
            return false;
        }
        match key {
            Key::Confirm => self.save_reply(id),
            Key::Cancel => {
                self.cancel_reply(id);
                false
            }
        }
    }

    /// Switch `id` to edit mode, starting from its current text
    pub fn start_edit(&mut self, id: CommentId) {
        let current = match self.forest.get(&id) {
            Some(c) => c.text.clone(),
            None => {
                tracing::info!(?id, "not editing unknown comment");
                return;
            }
        };
        self.update_ui(id, |ui| ui.edit_draft = Some(current));
    }

    pub fn type_edit(&mut self, id: CommentId, text: impl Into<String>) {
        match self.ui.get_mut(&id).and_then(|ui| ui.edit_draft.as_mut()) {
            Some(draft) => *draft = text.into(),
            None => tracing::info!(?id, "typing into a comment that is not being edited"),
        }
    }

    pub fn cancel_edit(&mut self, id: CommentId) {
        self.update_ui(id, |ui| ui.edit_draft = None);
    }

    /// Leave edit mode, applying the draft if it is acceptable
    pub fn save_edit(&mut self, id: CommentId) -> bool {
        let mut draft = None;
        self.update_ui(id, |ui| draft = ui.edit_draft.take());
        match draft {
            Some(text) => self.submit_edit(id, text),
            None => false,
        }
    }
}
