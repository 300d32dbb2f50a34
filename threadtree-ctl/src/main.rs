use threadtree_client::{Forest, Session, Style};
use tracing_subscriber::EnvFilter;

mod command;
mod repl;

#[derive(structopt::StructOpt)]
struct Opt {
    /// Start with no comments instead of the example thread
    #[structopt(long)]
    empty: bool,

    /// How to draw the comments: plain or icons
    #[structopt(long, default_value = "plain")]
    style: Style,

    /// Only print the comments when asked to with `show`
    #[structopt(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opt = <Opt as structopt::StructOpt>::from_args();

    let forest = match opt.empty {
        true => Forest::new(),
        false => Forest::demo(),
    };
    let mut session = Session::new(forest);
    let settings = repl::Settings {
        style: opt.style,
        quiet: opt.quiet,
    };
    tracing::debug!(style = %settings.style, num_comments = session.forest().len(), "starting");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    repl::run(&mut session, &settings, stdin.lock(), &mut stdout.lock())
}
