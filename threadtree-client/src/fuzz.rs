#![cfg(test)]

use std::collections::{HashMap, HashSet};

use bolero::generator::TypeGenerator;

use crate::{
    api::{CommentId, Error},
    CommentExt, Forest, Key, Session,
};

const TEXTS: &[&str] = &["", "  ", "hello", "nested reply", "\tedited\n", "x"];

/// Never issued by a forest, whose ids start at 1
const MISSING: CommentId = CommentId(0);

#[derive(Clone, Debug, bolero::generator::TypeGenerator)]
enum FuzzOp {
    NewComment { text: u8 },
    Reply { target: u8, text: u8 },
    Edit { target: u8, text: u8 },
    Delete { target: u8 },
}

fn text(idx: u8) -> &'static str {
    TEXTS[idx as usize % TEXTS.len()]
}

/// Pick an existing comment, or `MISSING` once in a while
fn pick(ids: &[CommentId], target: u8) -> CommentId {
    let idx = target as usize % (ids.len() + 1);
    ids.get(idx).copied().unwrap_or(MISSING)
}

/// Flat reference model of a forest
#[derive(Debug, Default)]
struct Model {
    roots: Vec<CommentId>,
    children: HashMap<CommentId, Vec<CommentId>>,
    texts: HashMap<CommentId, String>,
}

impl Model {
    fn from_forest(f: &Forest) -> Model {
        let mut m = Model::default();
        for c in f.roots() {
            m.roots.push(c.id);
        }
        for (_, c) in f.iter() {
            m.texts.insert(c.id, c.text.clone());
            m.children
                .insert(c.id, c.children.iter().map(|c| c.id).collect());
        }
        m
    }

    fn preorder(&self) -> Vec<(usize, CommentId, String)> {
        let mut res = Vec::new();
        let mut stack = self.roots.iter().rev().map(|id| (0, *id)).collect::<Vec<_>>();
        while let Some((depth, id)) = stack.pop() {
            res.push((depth, id, self.texts[&id].clone()));
            stack.extend(self.children[&id].iter().rev().map(|c| (depth + 1, *c)));
        }
        res
    }

    fn remove(&mut self, id: CommentId) -> usize {
        self.texts.remove(&id);
        let children = self.children.remove(&id).unwrap_or_default();
        1 + children.into_iter().map(|c| self.remove(c)).sum::<usize>()
    }

    fn delete(&mut self, id: CommentId) -> usize {
        self.roots.retain(|r| *r != id);
        for children in self.children.values_mut() {
            children.retain(|c| *c != id);
        }
        self.remove(id)
    }
}

fn snapshot(f: &Forest) -> Vec<(usize, CommentId, String)> {
    f.iter().map(|(d, c)| (d, c.id, c.text.clone())).collect()
}

fn assert_unique_ids(f: &Forest) {
    let mut seen = HashSet::new();
    for (_, c) in f.iter() {
        assert!(seen.insert(c.id), "id {:?} appears twice in {f:?}", c.id);
    }
}

fn execute(f: &mut Forest, m: &mut Model, op: FuzzOp) {
    let ids = f.iter().map(|(_, c)| c.id).collect::<Vec<_>>();
    let before = snapshot(f);
    match op {
        FuzzOp::NewComment { text: t } => match f.create_root(text(t)) {
            Ok(id) => {
                assert!(!ids.contains(&id), "reused id {id:?}");
                assert_eq!(f.roots().last().map(|c| c.id), Some(id));
                m.roots.push(id);
                m.children.insert(id, Vec::new());
                m.texts.insert(id, String::from(text(t)));
            }
            Err(e) => {
                assert_eq!(e, Error::EmptyText);
                assert_eq!(snapshot(f), before);
            }
        },
        FuzzOp::Reply { target, text: t } => {
            let parent = pick(&ids, target);
            match f.add_reply(parent, text(t)) {
                Ok(id) => {
                    assert!(!ids.contains(&id), "reused id {id:?}");
                    assert_eq!(
                        f.get(&parent).and_then(|p| p.children.first()).map(|c| c.id),
                        Some(id)
                    );
                    m.children
                        .get_mut(&parent)
                        .expect("reply succeeded on a parent unknown to the model")
                        .insert(0, id);
                    m.children.insert(id, Vec::new());
                    m.texts.insert(id, String::from(text(t)));
                }
                Err(e) => {
                    assert!(e == Error::EmptyText || (parent == MISSING && e.is_not_found()));
                    assert_eq!(snapshot(f), before);
                }
            }
        }
        FuzzOp::Edit { target, text: t } => {
            let id = pick(&ids, target);
            match f.edit_text(id, text(t)) {
                Ok(()) => {
                    m.texts.insert(id, String::from(text(t)));
                }
                Err(e) => {
                    assert!(e == Error::EmptyText || (id == MISSING && e.is_not_found()));
                    assert_eq!(snapshot(f), before);
                }
            }
        }
        FuzzOp::Delete { target } => {
            let id = pick(&ids, target);
            match f.delete_subtree(id) {
                Ok(removed) => {
                    let expected = m.delete(id);
                    assert_eq!(removed.id, id);
                    assert_eq!(removed.subtree_len(), expected);
                    assert_eq!(f.len(), before.len() - expected);
                }
                Err(e) => {
                    assert_eq!(e, Error::NotFound(id));
                    assert_eq!(id, MISSING);
                    assert_eq!(snapshot(f), before);
                }
            }
        }
    }
    assert_unique_ids(f);
    assert_eq!(snapshot(f), m.preorder());
}

#[test]
fn compare_with_model() {
    bolero::check!()
        .with_type::<Vec<FuzzOp>>()
        .cloned()
        .for_each(|ops| {
            let mut f = Forest::demo();
            let mut m = Model::from_forest(&f);
            for op in ops {
                execute(&mut f, &mut m, op);
            }
        })
}

#[derive(Clone, Debug, bolero::generator::TypeGenerator)]
enum UiOp {
    OpenReply { target: u8 },
    TypeReply { target: u8, text: u8 },
    Key { target: u8, confirm: bool },
    StartEdit { target: u8 },
    SaveEdit { target: u8 },
    Delete { target: u8 },
}

#[test]
fn session_ui_stays_consistent() {
    bolero::check!()
        .with_type::<Vec<UiOp>>()
        .cloned()
        .for_each(|ops| {
            let mut s = Session::new(Forest::demo());
            for op in ops {
                let ids = s.forest().iter().map(|(_, c)| c.id).collect::<Vec<_>>();
                let before = s.forest().clone();
                match op {
                    UiOp::OpenReply { target } => s.open_reply(pick(&ids, target)),
                    UiOp::TypeReply { target, text: t } => s.type_reply(pick(&ids, target), text(t)),
                    UiOp::Key { target, confirm } => {
                        let key = match confirm {
                            true => Key::Confirm,
                            false => Key::Cancel,
                        };
                        s.handle_key(pick(&ids, target), key);
                        if key == Key::Cancel {
                            assert_eq!(s.forest(), &before);
                        }
                    }
                    UiOp::StartEdit { target } => s.start_edit(pick(&ids, target)),
                    UiOp::SaveEdit { target } => {
                        s.save_edit(pick(&ids, target));
                    }
                    UiOp::Delete { target } => {
                        s.submit_delete(pick(&ids, target));
                    }
                }
                for (_, c) in s.forest().iter() {
                    if let Some(ui) = s.ui(&c.id) {
                        assert!(ui.reply_draft.is_some() || ui.edit_draft.is_some());
                    }
                }
                if let Some(focus) = s.focus() {
                    assert!(s.forest().contains(&focus));
                    assert!(s.ui(&focus).and_then(|ui| ui.reply_draft.as_ref()).is_some());
                }
                assert_unique_ids(s.forest());
            }
        })
}
