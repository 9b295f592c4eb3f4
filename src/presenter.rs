use crate::compare::Verdict;
use crate::score::ResultSummary;
use crate::sentences::Sentence;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Screen {
    Start,
    Game,
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Tone {
    Neutral,
    Success,
}

/// The presentation boundary a `GameSession` renders through.
///
/// Implementations own everything visible, including the text the player is
/// typing; the session only tells them when to clear or lock it.
pub trait Presenter {
    fn show_screen(&mut self, screen: Screen);

    /// Replace the reference sentence; every character starts out pending.
    fn render_sentence(&mut self, sentence: &Sentence);

    /// Retag one character of the current sentence.
    fn mark_char(&mut self, index: usize, verdict: Verdict);

    fn update_live_stats(&mut self, wpm: u32, accuracy: u32, time_remaining_secs: u32);

    fn update_status_message(&mut self, text: &str, tone: Tone);

    fn show_final_results(&mut self, summary: &ResultSummary);

    fn reset_input(&mut self);

    fn set_input_enabled(&mut self, enabled: bool);
}

/// Everything a presenter was told, in order. Used by headless runs and tests.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    ShowScreen(Screen),
    RenderSentence(Sentence),
    MarkChar(usize, Verdict),
    LiveStats {
        wpm: u32,
        accuracy: u32,
        time_remaining_secs: u32,
    },
    Status(String, Tone),
    FinalResults(ResultSummary),
    ResetInput,
    InputEnabled(bool),
}

#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub commands: Vec<RenderCommand>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn last_screen(&self) -> Option<Screen> {
        self.commands.iter().rev().find_map(|c| match c {
            RenderCommand::ShowScreen(s) => Some(*s),
            _ => None,
        })
    }

    pub fn last_live_stats(&self) -> Option<(u32, u32, u32)> {
        self.commands.iter().rev().find_map(|c| match c {
            RenderCommand::LiveStats {
                wpm,
                accuracy,
                time_remaining_secs,
            } => Some((*wpm, *accuracy, *time_remaining_secs)),
            _ => None,
        })
    }

    pub fn final_results(&self) -> Vec<ResultSummary> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::FinalResults(r) => Some(*r),
                _ => None,
            })
            .collect()
    }
}

impl Presenter for RecordingPresenter {
    fn show_screen(&mut self, screen: Screen) {
        self.commands.push(RenderCommand::ShowScreen(screen));
    }

    fn render_sentence(&mut self, sentence: &Sentence) {
        self.commands
            .push(RenderCommand::RenderSentence(sentence.clone()));
    }

    fn mark_char(&mut self, index: usize, verdict: Verdict) {
        self.commands.push(RenderCommand::MarkChar(index, verdict));
    }

    fn update_live_stats(&mut self, wpm: u32, accuracy: u32, time_remaining_secs: u32) {
        self.commands.push(RenderCommand::LiveStats {
            wpm,
            accuracy,
            time_remaining_secs,
        });
    }

    fn update_status_message(&mut self, text: &str, tone: Tone) {
        self.commands
            .push(RenderCommand::Status(text.to_string(), tone));
    }

    fn show_final_results(&mut self, summary: &ResultSummary) {
        self.commands.push(RenderCommand::FinalResults(*summary));
    }

    fn reset_input(&mut self) {
        self.commands.push(RenderCommand::ResetInput);
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.commands.push(RenderCommand::InputEnabled(enabled));
    }
}
