use anyhow::{anyhow, Context};
use threadtree_client::api::CommentId;

pub const HELP: &str = "\
comment <text>      post a top-level comment
reply <id> [text]   open a reply box under a comment, and send <text> if given
edit <id> <text>    change a comment's text
delete <id>         delete a comment along with all its replies
cancel              close the reply box that has focus
show                print the comments
json                print the comments as JSON
help                print this message
quit                exit

While a reply box has focus, every line other than `cancel` and `quit` is
sent as the reply.
";

#[derive(Debug, Eq, PartialEq)]
pub enum Command {
    Comment(String),
    Reply { id: CommentId, text: Option<String> },
    Edit { id: CommentId, text: String },
    Delete(CommentId),
    Cancel,
    Show,
    Json,
    Help,
    Quit,
}

fn parse_id(s: &str) -> anyhow::Result<CommentId> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    let id = digits
        .parse::<u64>()
        .with_context(|| format!("parsing comment id {s:?}"))?;
    Ok(CommentId(id))
}

/// Split `s` at its first whitespace, trimming what precedes the second part
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (s, ""),
    }
}

impl Command {
    /// Returns `None` if `line` does not start with a known command
    pub fn parse(line: &str) -> anyhow::Result<Option<Command>> {
        let (cmd, rest) = split_word(line);
        let no_args = |c: Command| match rest.is_empty() {
            true => Ok(Some(c)),
            false => Err(anyhow!("{cmd} takes no arguments")),
        };
        match cmd {
            "comment" => Ok(Some(Command::Comment(String::from(rest)))),
            "reply" => {
                let (id, text) = split_word(rest);
                if id.is_empty() {
                    return Err(anyhow!("usage: reply <id> [text]"));
                }
                Ok(Some(Command::Reply {
                    id: parse_id(id)?,
                    text: (!text.is_empty()).then(|| String::from(text)),
                }))
            }
            "edit" => {
                let (id, text) = split_word(rest);
                if id.is_empty() {
                    return Err(anyhow!("usage: edit <id> <text>"));
                }
                Ok(Some(Command::Edit {
                    id: parse_id(id)?,
                    text: String::from(text),
                }))
            }
            "delete" => match split_word(rest) {
                (id, "") if !id.is_empty() => Ok(Some(Command::Delete(parse_id(id)?))),
                _ => Err(anyhow!("usage: delete <id>")),
            },
            "cancel" => no_args(Command::Cancel),
            "show" => no_args(Command::Show),
            "json" => no_args(Command::Json),
            "help" => no_args(Command::Help),
            "quit" | "exit" => no_args(Command::Quit),
            _ => Ok(None),
        }
    }
}
