use tracing::{debug, info, trace};

use crate::compare::{self, ComparisonResult};
use crate::error::ConfigError;
use crate::presenter::{Presenter, Screen, Tone};
use crate::runtime::{Timer, TimerId, COUNTDOWN_PERIOD};
use crate::score::{self, ResultSummary};
use crate::sentences::{Sentence, SentenceBank};

pub const DEFAULT_TIME_LIMIT_SECS: u32 = 30;

const STARTED_MESSAGE: &str = "Timer started. Type the sentence below!";
const ADVANCED_MESSAGE: &str = "Great! New sentence loaded.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    time_limit_secs: u32,
}

impl GameConfig {
    pub fn new(time_limit_secs: i64) -> Result<Self, ConfigError> {
        if time_limit_secs <= 0 {
            return Err(ConfigError::NonPositiveTimeLimit(time_limit_secs));
        }
        let secs = u32::try_from(time_limit_secs)
            .map_err(|_| ConfigError::TimeLimitTooLarge(time_limit_secs))?;
        Ok(Self {
            time_limit_secs: secs,
        })
    }

    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Status {
    Idle,
    Running,
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub status: Status,
    pub time_remaining_secs: u32,
    pub current_sentence: Sentence,
    pub total_chars_typed: usize,
    pub mistakes_in_current_sentence: usize,
}

/// One game instance: countdown, current sentence and running totals.
///
/// All input arrives through the methods below and every visible change goes
/// out through the presenter. Ticks and input outside a running game are
/// ignored.
pub struct GameSession<P: Presenter, T: Timer> {
    config: GameConfig,
    bank: SentenceBank,
    presenter: P,
    timer: T,
    timer_id: Option<TimerId>,
    state: GameState,
    // chars of sentences already completed this session
    committed_chars: usize,
    // longest typed prefix seen for the current sentence
    current_chars: usize,
    comparison: ComparisonResult,
    live: ResultSummary,
    last_result: Option<ResultSummary>,
}

impl<P: Presenter, T: Timer> GameSession<P, T> {
    pub fn new(config: GameConfig, bank: SentenceBank, presenter: P, timer: T) -> Self {
        let state = GameState {
            status: Status::Idle,
            time_remaining_secs: config.time_limit_secs,
            current_sentence: Sentence::new(""),
            total_chars_typed: 0,
            mistakes_in_current_sentence: 0,
        };
        Self {
            config,
            bank,
            presenter,
            timer,
            timer_id: None,
            state,
            committed_chars: 0,
            current_chars: 0,
            comparison: ComparisonResult::default(),
            live: ResultSummary::default(),
            last_result: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn comparison(&self) -> &ComparisonResult {
        &self.comparison
    }

    /// Stats shown while typing; recomputed on every input and tick
    pub fn live_summary(&self) -> ResultSummary {
        self.live
    }

    pub fn last_result(&self) -> Option<ResultSummary> {
        self.last_result
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    pub fn is_running(&self) -> bool {
        self.state.status == Status::Running
    }

    /// Begin a fresh round, discarding whatever the previous one left behind.
    pub fn start(&mut self) {
        self.stop_timer();

        let sentence = self.bank.pick_random();
        self.state = GameState {
            status: Status::Running,
            time_remaining_secs: self.config.time_limit_secs,
            current_sentence: sentence,
            total_chars_typed: 0,
            mistakes_in_current_sentence: 0,
        };
        self.committed_chars = 0;
        self.current_chars = 0;
        self.live = ResultSummary::default();
        self.last_result = None;

        info!(
            time_limit_secs = self.config.time_limit_secs,
            sentence = %self.state.current_sentence,
            "game started"
        );

        self.presenter
            .update_live_stats(0, 0, self.state.time_remaining_secs);
        self.presenter
            .update_status_message(STARTED_MESSAGE, Tone::Neutral);
        self.load_sentence();
        self.presenter.set_input_enabled(true);
        self.presenter.show_screen(Screen::Game);

        self.timer_id = Some(self.timer.start(COUNTDOWN_PERIOD));
    }

    pub fn play_again(&mut self) {
        self.start();
    }

    /// Abandon a running game without a result.
    pub fn cancel(&mut self) {
        if !self.is_running() {
            trace!(status = %self.state.status, "cancel ignored");
            return;
        }
        self.stop_timer();
        self.state.status = Status::Idle;
        self.state.total_chars_typed = 0;
        self.state.mistakes_in_current_sentence = 0;
        self.state.time_remaining_secs = self.config.time_limit_secs;
        self.committed_chars = 0;
        self.current_chars = 0;
        self.live = ResultSummary::default();

        info!("game cancelled");
        self.presenter.set_input_enabled(false);
        self.presenter.show_screen(Screen::Start);
    }

    /// Back to the start screen from anywhere.
    pub fn go_home(&mut self) {
        match self.state.status {
            Status::Running => self.cancel(),
            Status::Finished => {
                self.state.status = Status::Idle;
                self.presenter.show_screen(Screen::Start);
            }
            Status::Idle => self.presenter.show_screen(Screen::Start),
        }
    }

    /// One countdown step.
    pub fn tick(&mut self) {
        if !self.is_running() {
            trace!(status = %self.state.status, "tick ignored");
            return;
        }
        self.state.time_remaining_secs = self.state.time_remaining_secs.saturating_sub(1);
        self.refresh_live_stats();

        if self.state.time_remaining_secs == 0 {
            self.finish();
        }
    }

    /// Compare the whole current input against the reference sentence.
    pub fn on_input(&mut self, typed: &str) {
        if !self.is_running() {
            trace!(status = %self.state.status, "input ignored");
            return;
        }

        let result = compare::compare(typed, &self.state.current_sentence);
        for (idx, verdict) in result.changes_from(&self.comparison) {
            self.presenter.mark_char(idx, verdict);
        }
        self.current_chars = self.current_chars.max(result.typed_len());
        self.state.mistakes_in_current_sentence = result.mistakes;
        self.state.total_chars_typed = self.committed_chars + self.current_chars;
        self.comparison = result;
        self.refresh_live_stats();

        if compare::is_complete(typed, &self.state.current_sentence) {
            self.advance();
        }
    }

    fn advance(&mut self) {
        debug!(
            sentence = %self.state.current_sentence,
            total_chars_typed = self.state.total_chars_typed,
            "sentence completed"
        );
        self.committed_chars += self.state.current_sentence.char_len();
        self.current_chars = 0;
        self.state.total_chars_typed = self.committed_chars;
        self.state.mistakes_in_current_sentence = 0;
        self.state.current_sentence = self.bank.pick_random();

        self.presenter
            .update_status_message(ADVANCED_MESSAGE, Tone::Success);
        self.load_sentence();
    }

    fn finish(&mut self) {
        self.stop_timer();
        self.state.status = Status::Finished;

        let summary = score::compute(
            f64::from(self.config.time_limit_secs),
            self.state.total_chars_typed,
            self.state.mistakes_in_current_sentence,
        );
        self.last_result = Some(summary);

        info!(
            wpm = summary.wpm,
            accuracy = summary.accuracy,
            total_chars_typed = summary.total_chars_typed,
            "game finished"
        );
        self.presenter.set_input_enabled(false);
        self.presenter.show_final_results(&summary);
        self.presenter.show_screen(Screen::Result);
    }

    fn load_sentence(&mut self) {
        self.comparison = ComparisonResult::pending(&self.state.current_sentence);
        self.presenter.render_sentence(&self.state.current_sentence);
        self.presenter.reset_input();
    }

    fn refresh_live_stats(&mut self) {
        let elapsed = self.config.time_limit_secs - self.state.time_remaining_secs;
        self.live = score::compute(
            f64::from(elapsed),
            self.state.total_chars_typed,
            self.state.mistakes_in_current_sentence,
        );
        self.presenter.update_live_stats(
            self.live.wpm,
            self.live.accuracy,
            self.state.time_remaining_secs,
        );
    }

    fn stop_timer(&mut self) {
        if let Some(id) = self.timer_id.take() {
            self.timer.cancel(id);
        }
    }
}
