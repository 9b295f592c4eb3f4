use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::presenter::Screen;
use crate::runtime::{GameEvent, IntervalTimer};
use crate::sentences::SentenceBank;
use crate::session::{GameConfig, GameSession};
use crate::ui::view::TerminalView;

pub type TerminalSession = GameSession<TerminalView, IntervalTimer>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Glue between terminal events and the game session
pub struct App {
    pub session: TerminalSession,
}

impl App {
    pub fn new(config: GameConfig, bank: SentenceBank) -> Self {
        let view = TerminalView::new(config.time_limit_secs());
        Self {
            session: GameSession::new(config, bank, view, IntervalTimer::new()),
        }
    }

    pub fn view(&self) -> &TerminalView {
        self.session.presenter()
    }

    pub fn handle(&mut self, event: GameEvent) -> Flow {
        self.handle_at(event, Instant::now())
    }

    /// Route one event, first delivering the countdown seconds due by `now`
    /// so a key arriving after the deadline meets a finished round.
    pub fn handle_at(&mut self, event: GameEvent, now: Instant) -> Flow {
        self.on_tick(now);
        match event {
            GameEvent::Key(key) => self.on_key(key),
            GameEvent::Tick | GameEvent::Resize => Flow::Continue,
        }
    }

    /// Deliver every countdown second that elapsed up to `now`.
    pub fn on_tick(&mut self, now: Instant) {
        let due = self.session.timer_mut().due_ticks(now);
        for _ in 0..due {
            self.session.tick();
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Flow {
        if key.kind == KeyEventKind::Release {
            return Flow::Continue;
        }
        // ctrl+c to quit
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        let screen = self.view().screen;
        match screen {
            Screen::Start => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.session.start(),
                KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
                _ => {}
            },
            Screen::Game => match key.code {
                KeyCode::Esc => self.session.cancel(),
                KeyCode::Backspace => {
                    if self.session.presenter_mut().pop_char() {
                        self.forward_input();
                    }
                }
                KeyCode::Char(_)
                    if key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {}
                KeyCode::Char(c) => {
                    if self.session.presenter_mut().push_char(c) {
                        self.forward_input();
                    }
                }
                _ => {}
            },
            Screen::Result => match key.code {
                KeyCode::Char('r') | KeyCode::Enter => self.session.play_again(),
                KeyCode::Char('h') => self.session.go_home(),
                KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
                _ => {}
            },
        }
        Flow::Continue
    }

    fn forward_input(&mut self) {
        let typed = self.view().input().to_owned();
        self.session.on_input(&typed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentences::Sentence;
    use crate::session::Status;
    use std::time::Duration;

    fn app(secs: i64) -> App {
        let bank = SentenceBank::new(vec![Sentence::from("hi")]).unwrap();
        App::new(GameConfig::new(secs).unwrap(), bank)
    }

    fn press(app: &mut App, code: KeyCode) -> Flow {
        app.on_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_enter_starts_game() {
        let mut app = app(30);
        assert_eq!(press(&mut app, KeyCode::Enter), Flow::Continue);
        assert_eq!(app.session.status(), Status::Running);
        assert_eq!(app.view().screen, Screen::Game);
    }

    #[test]
    fn test_typing_completes_sentence_and_clears_input() {
        let mut app = app(30);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.view().input(), "h");
        press(&mut app, KeyCode::Char('i'));

        assert_eq!(app.view().input(), "");
        assert_eq!(app.session.state().total_chars_typed, 2);
        assert_eq!(app.view().status, "Great! New sentence loaded.");
    }

    #[test]
    fn test_backspace_reruns_comparison() {
        let mut app = app(30);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.session.state().mistakes_in_current_sentence, 1);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.session.state().mistakes_in_current_sentence, 0);
        assert_eq!(app.view().input(), "");
    }

    #[test]
    fn test_esc_cancels_then_quits() {
        let mut app = app(30);
        press(&mut app, KeyCode::Enter);
        assert_eq!(press(&mut app, KeyCode::Esc), Flow::Continue);
        assert_eq!(app.session.status(), Status::Idle);
        assert_eq!(app.view().screen, Screen::Start);
        assert_eq!(press(&mut app, KeyCode::Esc), Flow::Quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_game() {
        let mut app = app(30);
        press(&mut app, KeyCode::Enter);
        let flow = app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(flow, Flow::Quit);
    }

    #[test]
    fn test_countdown_reaches_result_screen() {
        let mut app = app(2);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('h'));

        app.on_tick(Instant::now() + Duration::from_secs(5));

        assert_eq!(app.session.status(), Status::Finished);
        assert_eq!(app.view().screen, Screen::Result);
        let result = app.view().final_results.unwrap();
        assert_eq!(result.total_chars_typed, 1);
        assert_eq!(result.accuracy, 100);
        assert!(!app.view().input_enabled());
    }

    #[test]
    fn test_key_after_deadline_meets_finished_round() {
        let mut app = app(1);
        let started = Instant::now();
        press(&mut app, KeyCode::Enter);
        app.handle_at(
            GameEvent::Key(KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE)),
            started + Duration::from_millis(500),
        );
        assert_eq!(app.session.state().total_chars_typed, 1);

        // no Tick in between; the key itself must deliver the countdown
        app.handle_at(
            GameEvent::Key(KeyEvent::new(KeyCode::Char('i'), KeyModifiers::NONE)),
            started + Duration::from_secs(3),
        );
        assert_eq!(app.session.status(), Status::Finished);
        assert_eq!(app.session.state().time_remaining_secs, 0);
        assert_eq!(app.session.state().total_chars_typed, 1);
        assert_eq!(app.view().input(), "h");
    }

    #[test]
    fn test_modified_chars_are_not_typed() {
        let mut app = app(30);
        press(&mut app, KeyCode::Enter);
        app.on_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
        app.on_key(KeyEvent::new(KeyCode::Char('h'), KeyModifiers::ALT));
        assert_eq!(app.view().input(), "");

        app.on_key(KeyEvent::new(KeyCode::Char('H'), KeyModifiers::SHIFT));
        assert_eq!(app.view().input(), "H");
        assert_eq!(app.session.state().mistakes_in_current_sentence, 1);
    }

    #[test]
    fn test_result_keys() {
        let mut app = app(1);
        press(&mut app, KeyCode::Enter);
        app.on_tick(Instant::now() + Duration::from_secs(2));
        assert_eq!(app.view().screen, Screen::Result);

        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.view().screen, Screen::Start);

        press(&mut app, KeyCode::Enter);
        app.on_tick(Instant::now() + Duration::from_secs(2));
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.session.status(), Status::Running);
        assert_eq!(app.view().time_remaining_secs, 1);
    }

    #[test]
    fn test_keys_on_result_screen_are_not_typed() {
        let mut app = app(1);
        press(&mut app, KeyCode::Enter);
        app.on_tick(Instant::now() + Duration::from_secs(2));
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.view().input(), "");
        assert_eq!(app.view().screen, Screen::Result);
    }
}
