use std::{
    io::{self, stdin},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use typerush::{
    app::{App, Flow},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{CrosstermEventSource, FixedTicker, Runner},
    sentences::Sentence,
};

/// a thirty second typing sprint in your terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type randomly chosen sentences against the clock. Every character is checked as you type, live wpm and accuracy are shown, and a final score is reported when time runs out."
)]
pub struct Cli {
    /// number of seconds per round
    #[clap(short = 's', long)]
    seconds: Option<i64>,

    /// sentence to practice; repeat to build your own pool
    #[clap(short = 'p', long = "prompt")]
    prompts: Vec<String>,

    /// path to the config file
    #[clap(long)]
    config: Option<PathBuf>,

    /// write the effective settings back to the config file
    #[clap(long)]
    save_config: bool,

    /// log at debug level
    #[clap(long)]
    debug: bool,
}

impl Cli {
    /// Apply command line overrides on top of the stored config
    fn apply(&self, mut config: Config) -> Config {
        if let Some(secs) = self.seconds {
            config.time_limit_secs = secs;
        }
        if !self.prompts.is_empty() {
            config.sentences = self.prompts.iter().cloned().map(Sentence::from).collect();
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let _log_guard = logging::setup_logging(&AppDirs::log_dir(), cli.debug)?;

    let store = match &cli.config {
        Some(path) => FileConfigStore::with_path(path),
        None => FileConfigStore::new(),
    };
    let config = cli.apply(store.load());
    let (game_config, bank) = match config.validate() {
        Ok(parts) => parts,
        Err(err) => {
            tracing::error!("invalid configuration: {err}");
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::ValueValidation, err).exit();
        }
    };
    if cli.save_config {
        store
            .save(&config)
            .with_context(|| format!("failed to save config to {}", store.path().display()))?;
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(game_config, bank);
    let outcome = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    outcome
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    loop {
        terminal.draw(|f| f.render_widget(app.view(), f.area()))?;

        if app.handle(runner.step()) == Flow::Quit {
            tracing::info!("quitting");
            return Ok(());
        }
    }
}
