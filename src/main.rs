use std::io::{self, stdin};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Terminal};

use wordle::{
    app::{build_session, App},
    config::{Config, ConfigStore, FileConfigStore},
    dictionary::SecretChoice,
    runtime::{CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
    snapshot::Renderer,
    ui::TerminalRenderer,
    word::Word,
};

/// guess the five-letter word in six attempts
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Guess the five-letter word in six attempts. Green means right letter, right spot; yellow means the letter is elsewhere in the word; gray means it is not in the word. Progress is saved between runs."
)]
pub struct Cli {
    /// play against this word instead of the first word of the list
    #[clap(long, value_parser = parse_word, conflicts_with = "random")]
    secret: Option<Word>,

    /// pick the secret at random from the word list
    #[clap(short = 'r', long)]
    random: bool,

    /// word list file, one five-letter word per line
    #[clap(short = 'w', long)]
    words: Option<PathBuf>,

    /// milliseconds input stays locked after each guess
    #[clap(long)]
    lock_ms: Option<u64>,

    /// directory for saved progress
    #[clap(long)]
    state_dir: Option<PathBuf>,

    /// do not read or write saved progress
    #[clap(long)]
    no_save: bool,
}

fn parse_word(s: &str) -> Result<Word, String> {
    Word::new(s).map_err(|e| e.to_string())
}

impl Cli {
    /// Overlays the persistent command line flags on the stored
    /// configuration. Returns `true` when anything changed.
    fn apply_to(&self, config: &mut Config) -> bool {
        let before = config.clone();
        if self.random {
            config.random_secret = true;
        }
        if let Some(words) = &self.words {
            config.word_list = Some(words.clone());
        }
        if let Some(lock_ms) = self.lock_ms {
            config.lock_ms = lock_ms;
        }
        *config != before
    }

    /// Flags that only apply to this run.
    fn apply_one_off(&self, config: &mut Config) {
        if let Some(dir) = &self.state_dir {
            config.state_dir = Some(dir.clone());
        }
        if self.no_save {
            config.save_progress = false;
        }
    }

    fn secret_choice(&self, config: &Config) -> SecretChoice {
        match self.secret {
            Some(word) => SecretChoice::Fixed(word),
            None if config.random_secret => SecretChoice::Random,
            None => SecretChoice::First,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let config_store = FileConfigStore::new();
    let mut config = config_store.load();
    if cli.apply_to(&mut config) {
        let _ = config_store.save(&config);
    }
    cli.apply_one_off(&mut config);

    let session = build_session(&config, &cli.secret_choice(&config), &mut rand::thread_rng())
        .context("could not start a game")?;
    let mut app = App::new(session);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    let size = terminal.size()?;
    app.resize(size.width, size.height);
    let mut renderer = TerminalRenderer::new(terminal);

    let res = run(
        &mut renderer,
        &mut app,
        Runner::new(CrosstermEventSource::new(), FixedTicker::default()),
    );

    disable_raw_mode()?;
    let terminal = renderer.terminal_mut();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res?;
    if let Some(share) = app.session.share_text() {
        println!("{share}");
    }
    Ok(())
}

fn run<R, E, T>(renderer: &mut R, app: &mut App, runner: Runner<E, T>) -> Result<()>
where
    R: Renderer<Error = io::Error>,
    E: EventSource,
    T: Ticker,
{
    renderer.render(&app.snapshot())?;

    while !app.should_quit {
        if app.handle_event(runner.step()) {
            renderer.render(&app.snapshot())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_config() {
        let cli = Cli::parse_from(["wordle", "--random", "--lock-ms", "500", "--no-save"]);
        let mut config = Config::default();
        assert!(cli.apply_to(&mut config));
        assert!(config.random_secret);
        assert_eq!(config.lock_ms, 500);
        assert!(config.save_progress);
        assert_eq!(cli.secret_choice(&config), SecretChoice::Random);

        cli.apply_one_off(&mut config);
        assert!(!config.save_progress);
    }

    #[test]
    fn state_dir_is_not_persisted() {
        let cli = Cli::parse_from(["wordle", "--state-dir", "/tmp/wordle-state"]);
        let mut config = Config::default();
        assert!(!cli.apply_to(&mut config));
        cli.apply_one_off(&mut config);
        assert_eq!(config.state_dir, Some(PathBuf::from("/tmp/wordle-state")));
    }

    #[test]
    fn no_flags_leave_config_untouched() {
        let cli = Cli::parse_from(["wordle"]);
        let mut config = Config::default();
        assert!(!cli.apply_to(&mut config));
        assert_eq!(cli.secret_choice(&config), SecretChoice::First);
    }

    #[test]
    fn secret_flag_is_validated() {
        let cli = Cli::parse_from(["wordle", "--secret", "HORSE"]);
        assert_eq!(
            cli.secret_choice(&Config::default()),
            SecretChoice::Fixed(Word::new("horse").unwrap())
        );
        assert!(Cli::try_parse_from(["wordle", "--secret", "hor"]).is_err());
        assert!(Cli::try_parse_from(["wordle", "--secret", "horse", "--random"]).is_err());
    }
}
