use clap::{ArgAction, Parser, ValueEnum};
use colored::Colorize;
use entrybook::command::{self, Reply, ReplLine};
use entrybook::{FormEntry, Question, Record, Run, Session};
use eyre::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{Level, debug, info};

#[derive(Parser)]
#[command(name = "entrybook")]
#[command(about = "entrybook - Record, search and edit entries in an in-memory indexed store")]
#[command(version)]
struct Cli {
    /// Kind of entries to record
    #[arg(short, long, value_enum, default_value_t = Kind::Question)]
    kind: Kind,

    /// Print records as JSON lines
    #[arg(long)]
    json: bool,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,

    /// Log verbosity on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    /// Quiz questions indexed by topic and difficulty
    Question,
    /// Running log indexed by terrain and duration
    Run,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing; stdout is reserved for the REPL
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli.kind {
        Kind::Question => repl::<Question>(&cli),
        Kind::Run => repl::<Run>(&cli),
    }
}

fn repl<T: FormEntry>(cli: &Cli) -> Result<()> {
    let mut session: Session<T> = Session::new();
    let mut rl = DefaultEditor::new().context("Failed to initialise line editor")?;

    info!(collection = T::collection_name(), json = cli.json, "Starting session");
    println!(
        "{}",
        format!("{} book - fields: {}", T::display_name(), T::field_names().join(", ")).cyan()
    );
    println!("{}", "Type 'help' for commands, 'quit' to leave.".dimmed());

    loop {
        let prompt = format!("{} [next {}]> ", T::collection_name(), session.next_id());
        match rl.readline(&prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());
                if !handle_line(&mut session, &line, cli.json) {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "Use quit or exit to leave".dimmed());
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err).context("Failed to read input"),
        }
    }

    println!("{}", "Goodbye!".cyan());
    Ok(())
}

/// Returns false once the user asks to quit
fn handle_line<T: FormEntry>(session: &mut Session<T>, line: &str, json: bool) -> bool {
    let tokens = match command::split_line(line) {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("{}", format!("✗ {}", e).red());
            return true;
        }
    };

    let parsed = match ReplLine::try_parse_from(tokens) {
        Ok(parsed) => parsed,
        Err(e) => {
            // Usage errors and `help` output both land here
            let _ = e.print();
            return true;
        }
    };

    debug!(command = ?parsed.command, "handle_line");
    match command::execute(session, parsed.command, json) {
        Ok(Reply::Done(msg)) => println!("{}", msg.green()),
        Ok(Reply::Lines(lines)) => {
            for line in lines {
                println!("{}", line);
            }
        }
        Ok(Reply::Empty(msg)) => println!("{}", msg.yellow()),
        Ok(Reply::Quit) => return false,
        Err(e) => eprintln!("{}", format!("✗ {}", e).red()),
    }

    true
}
