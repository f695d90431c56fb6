//! Host-side glue: builds a session from configuration and feeds it events.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use rand::Rng;
use ratatui::layout::Rect;

use crate::config::Config;
use crate::dictionary::{Dictionary, DictionaryError, SecretChoice};
use crate::game::{GameSession, Notice, SessionConfig};
use crate::input::{self, GameInput};
use crate::runtime::GameEvent;
use crate::snapshot::Snapshot;
use crate::store::FileStore;
use crate::ui;

/// Builds the session described by `config`, restoring saved progress when
/// saving is enabled.
pub fn build_session<R: Rng + ?Sized>(
    config: &Config,
    choice: &SecretChoice,
    rng: &mut R,
) -> Result<GameSession, DictionaryError> {
    let dictionary = match &config.word_list {
        Some(path) => Dictionary::from_path(path)?,
        None => Dictionary::embedded(),
    };
    let secret = dictionary.choose_secret(choice, rng)?;

    let mut session_config = SessionConfig::new(dictionary, secret);
    session_config.lock_duration = config.lock_duration();
    let session = GameSession::new(session_config);

    if !config.save_progress {
        return Ok(session);
    }
    let store = match &config.state_dir {
        Some(dir) => FileStore::with_dir(dir),
        None => FileStore::new(),
    };
    let mut session = session.with_store(store);
    session.restore();
    Ok(session)
}

#[derive(Debug)]
pub struct App {
    pub session: GameSession,
    /// Notice on screen; it swallows the next key press.
    pub notice: Option<Notice>,
    pub should_quit: bool,
    /// Terminal area the game is drawn into, for mapping clicks to keys.
    pub screen: Rect,
}

impl App {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            notice: None,
            should_quit: false,
            screen: Rect::default(),
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.screen = Rect::new(0, 0, width, height);
    }

    /// Applies one runtime event. Returns `true` when the screen needs a
    /// redraw.
    pub fn handle_event(&mut self, event: GameEvent) -> bool {
        match event {
            GameEvent::Tick => self.session.tick(),
            GameEvent::Resize(width, height) => {
                self.resize(width, height);
                true
            }
            GameEvent::Key(key) => {
                self.handle_key(key);
                true
            }
            GameEvent::Mouse(mouse) => self.handle_mouse(mouse),
        }
    }

    /// A left click on an on-screen key acts like pressing it. Any click
    /// dismisses a visible notice.
    fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return false;
        }
        if self.notice.take().is_some() {
            return true;
        }

        let game_input = ui::key_at(self.screen, mouse.column, mouse.row)
            .and_then(|name| GameInput::from_key_name(&name));
        match game_input {
            Some(game_input) => {
                self.notice = self.session.handle(game_input);
                true
            }
            None => false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let ctrl_c =
            key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl_c || key.code == KeyCode::Esc {
            self.should_quit = true;
            return;
        }

        if self.notice.take().is_some() {
            return;
        }

        if let Some(game_input) = input::from_key_event(&key) {
            self.notice = self.session.handle(game_input);
        }
    }

    pub fn snapshot(&mut self) -> Snapshot {
        let mut snapshot = self.session.snapshot();
        snapshot.notice = self.notice.clone();
        snapshot
    }
}
