// cscan: recovering C tokenizer and declaration scanner

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cscan::errors::{CliError, Diagnostic};
use cscan::listing::{write_listing, ListingOptions};
use cscan::parser::{analyze, Analysis};
use cscan::ui::App;

/// Tokenize a C source file and print its tokens and symbol table.
#[derive(Debug, Parser)]
#[command(name = "cscan", version, about)]
struct Args {
    /// C source file to scan
    path: PathBuf,

    /// Include comment tokens in the listing
    #[arg(long)]
    show_comments: bool,

    /// Omit the symbol table summary
    #[arg(long)]
    no_symbols: bool,

    /// Exit with status 1 when the source contains lexical errors
    #[arg(long, conflicts_with = "tui")]
    deny_errors: bool,

    /// Browse tokens and symbols interactively instead of printing them
    #[arg(long)]
    tui: bool,
}

/// Install a stderr subscriber when `CSCAN_LOG` or `RUST_LOG` is set.
fn init_tracing() {
    let filter = match std::env::var("CSCAN_LOG") {
        Ok(val) => EnvFilter::builder().parse_lossy(val),
        Err(_) if std::env::var("RUST_LOG").is_ok() => EnvFilter::from_default_env(),
        Err(_) => return,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let args = Args::parse();

    if let Err(err) = run(&args) {
        eprintln!("Error: {}", err);
        std::process::exit(err.exit_code());
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let source = fs::read_to_string(&args.path).map_err(|source| CliError::Read {
        path: args.path.clone(),
        source,
    })?;

    let analysis = analyze(&source);
    info!(
        path = %args.path.display(),
        tokens = analysis.tokens.len(),
        symbols = analysis.symbols.len(),
        errors = analysis.errors().count(),
        "scanned source"
    );

    if args.tui {
        return run_tui(analysis, source);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_listing(
        &mut out,
        &analysis.tokens,
        &analysis.symbols,
        ListingOptions {
            show_comments: args.show_comments,
            show_symbols: !args.no_symbols,
        },
    )?;
    out.flush()?;

    let diagnostics: Vec<Diagnostic> = analysis
        .errors()
        .filter_map(Diagnostic::from_token)
        .collect();
    for diagnostic in &diagnostics {
        eprintln!("{}: warning: {}", args.path.display(), diagnostic);
    }

    if args.deny_errors && !diagnostics.is_empty() {
        return Err(CliError::LexicalErrors {
            count: diagnostics.len(),
        });
    }
    Ok(())
}

fn run_tui(analysis: Analysis, source: String) -> Result<(), CliError> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(analysis, source);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.map_err(CliError::from)
}
