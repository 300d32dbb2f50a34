//! Plain-text rendering of a [`Session`]
//!
//! One line per comment, indented by depth, followed by the comment's open
//! edit box or reply composer if any. The [`Style`] only picks the labels.

use std::{fmt, str::FromStr};

use crate::{api::Comment, Session};

const INDENT: &str = "    ";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Style {
    #[default]
    Plain,
    Icons,
}

struct Labels {
    editing: &'static str,
    replying: &'static str,
    cursor: &'static str,
    empty: &'static str,
}

impl Style {
    fn labels(&self) -> Labels {
        match self {
            Style::Plain => Labels {
                editing: "[editing]",
                replying: "reply:",
                cursor: "_",
                empty: "(no comments yet)",
            },
            Style::Icons => Labels {
                editing: "✎",
                replying: "↳",
                cursor: "▏",
                empty: "💬 no comments yet",
            },
        }
    }
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Style, String> {
        match s {
            "plain" => Ok(Style::Plain),
            "icons" => Ok(Style::Icons),
            _ => Err(format!("unknown style {s:?}, expected \"plain\" or \"icons\"")),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Style::Plain => "plain",
            Style::Icons => "icons",
        })
    }
}

pub fn render(s: &Session, style: Style) -> String {
    let labels = style.labels();
    if s.forest().is_empty() {
        return format!("{}\n", labels.empty);
    }
    let mut res = String::new();
    for (depth, c) in s.forest().iter() {
        render_comment(&mut res, s, &labels, depth, c);
    }
    res
}

/// Keeps each comment on its own line
fn one_line(text: &str) -> String {
    text.replace('\r', "\\r").replace('\n', "\\n")
}

fn render_comment(res: &mut String, s: &Session, labels: &Labels, depth: usize, c: &Comment) {
    let indent = INDENT.repeat(depth);
    let ui = s.ui(&c.id);
    match ui.and_then(|ui| ui.edit_draft.as_ref()) {
        Some(draft) => res.push_str(&format!(
            "{indent}#{} {} {}\n",
            c.id,
            labels.editing,
            one_line(draft)
        )),
        None => res.push_str(&format!("{indent}#{} {}\n", c.id, one_line(&c.text))),
    }
    if let Some(draft) = ui.and_then(|ui| ui.reply_draft.as_ref()) {
        let cursor = match s.focus() == Some(c.id) {
            true => labels.cursor,
            false => "",
        };
        res.push_str(&format!(
            "{indent}{INDENT}{} {}{cursor}\n",
            labels.replying,
            one_line(draft)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{api::CommentId, Forest};

    #[test]
    fn demo_forest() {
        let s = Session::new(Forest::demo());
        assert_eq!(
            render(&s, Style::Plain),
            "#1 First comment\n    #2 New comment\n#3 Second comment\n",
        );
    }

    #[test]
    fn composers_and_edits() {
        let mut s = Session::new(Forest::demo());
        s.open_reply(CommentId(2));
        s.type_reply(CommentId(2), "hey");
        s.start_edit(CommentId(3));
        assert_eq!(
            render(&s, Style::Plain),
            "#1 First comment\n    #2 New comment\n        reply: hey_\n#3 [editing] Second comment\n",
        );
        assert_eq!(
            render(&s, Style::Icons),
            "#1 First comment\n    #2 New comment\n        ↳ hey▏\n#3 ✎ Second comment\n",
        );
    }

    #[test]
    fn line_breaks_are_escaped() {
        let mut s = Session::new(Forest::demo());
        assert!(s.submit_reply(CommentId(3), "\tedited\n"));
        s.start_edit(CommentId(1));
        s.type_edit(CommentId(1), "two\r\nlines");
        s.open_reply(CommentId(2));
        s.type_reply(CommentId(2), "a\nb");
        let out = render(&s, Style::Plain);
        assert_eq!(
            out,
            "#1 [editing] two\\r\\nlines\n    #2 New comment\n        reply: a\\nb_\n#3 Second comment\n    #4 \tedited\\n\n",
        );
        assert_eq!(out.lines().count(), s.forest().len() + 1);
    }

    #[test]
    fn empty_forest() {
        let s = Session::new(Forest::new());
        assert_eq!(render(&s, Style::Plain), "(no comments yet)\n");
    }

    #[test]
    fn style_parsing() {
        assert_eq!("icons".parse::<Style>(), Ok(Style::Icons));
        assert_eq!(Style::Plain.to_string().parse::<Style>(), Ok(Style::Plain));
        assert!("fancy".parse::<Style>().is_err());
    }
}
