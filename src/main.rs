use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, warn, LevelFilter};
use ratatui::{backend::CrosstermBackend, Terminal};
use simple_logger::SimpleLogger;

use connect_four_cli::ai::{Difficulty, OracleConfig};
use connect_four_cli::config::AppConfig;
use connect_four_cli::game::GameSession;
use connect_four_cli::scores::ScoreStore;
use connect_four_cli::ui::{App, Console};

/// Play Connect Four against the computer.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four in the terminal")]
struct Cli {
    /// Opponent strength: easy, medium, or hard
    #[arg(long)]
    difficulty: Option<String>,

    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Override the score file location
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Use the line-based console instead of the full-screen UI
    #[arg(long)]
    plain: bool,

    /// Override the log level (off, error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(path) = cli.scores {
        config.scores.path = path;
    }
    let difficulty = match cli.difficulty.as_deref() {
        Some(name) => name
            .parse::<Difficulty>()
            .context("invalid --difficulty")?,
        None => config.game.difficulty,
    };
    config.validate().context("invalid configuration")?;

    init_logging(&config, cli.plain)?;
    if !cli.config.exists() {
        info!("no config at {}, using defaults", cli.config.display());
    }
    let scores = ScoreStore::load(&config.scores.path);
    info!(
        "difficulty {difficulty}, oracle backend {:?}, scores at {}",
        config.oracle.backend,
        scores.path().display()
    );
    if cli.plain {
        run_console(difficulty, &config.oracle, scores)?;
    } else {
        run_tui(difficulty, config.oracle, scores)?;
    }
    Ok(())
}

/// Log to stderr. The full-screen UI owns the terminal, so logging is off
/// there unless stderr is redirected.
fn init_logging(config: &AppConfig, plain: bool) -> Result<()> {
    let level = if !plain && io::stderr().is_terminal() {
        LevelFilter::Off
    } else {
        config.logging.level_filter()?
    };
    SimpleLogger::new()
        .with_level(level)
        .init()
        .context("initializing logger")?;
    Ok(())
}

fn run_console(difficulty: Difficulty, oracle: &OracleConfig, mut scores: ScoreStore) -> Result<()> {
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    console.print_instructions()?;

    loop {
        let mut session = GameSession::new(difficulty, oracle);
        let Some(result) = console.play(&mut session)? else {
            break;
        };
        if let Err(e) = scores.record(result) {
            warn!("could not save scores: {e}");
        }
        console.print_scores(scores.scores())?;
        if !console.ask_play_again()? {
            break;
        }
    }

    console.print_scores(scores.scores())?;
    Ok(())
}

fn run_tui(difficulty: Difficulty, oracle: OracleConfig, scores: ScoreStore) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(difficulty, oracle, scores);
    let res = app.run(&mut terminal);

    // Restore terminal even if the app failed
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res?;
    let totals = app.scores().scores();
    println!(
        "Score: {} wins, {} losses, {} ties",
        totals.wins, totals.losses, totals.ties
    );
    Ok(())
}
