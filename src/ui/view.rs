use crate::compare::Verdict;
use crate::presenter::{Presenter, Screen, Tone};
use crate::score::ResultSummary;
use crate::sentences::Sentence;

/// Everything the terminal shows, kept up to date by the game session.
///
/// The input buffer lives here as well: keys edit it, the session reads it.
#[derive(Debug, Clone)]
pub struct TerminalView {
    pub screen: Screen,
    pub sentence: Vec<char>,
    pub verdicts: Vec<Verdict>,
    pub wpm: u32,
    pub accuracy: u32,
    pub time_remaining_secs: u32,
    pub time_limit_secs: u32,
    pub status: String,
    pub tone: Tone,
    pub final_results: Option<ResultSummary>,
    input: String,
    input_enabled: bool,
}

impl TerminalView {
    pub fn new(time_limit_secs: u32) -> Self {
        Self {
            screen: Screen::Start,
            sentence: Vec::new(),
            verdicts: Vec::new(),
            wpm: 0,
            accuracy: 0,
            time_remaining_secs: time_limit_secs,
            time_limit_secs,
            status: String::new(),
            tone: Tone::Neutral,
            final_results: None,
            input: String::new(),
            input_enabled: false,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Append a typed character. Returns false when input is locked.
    pub fn push_char(&mut self, c: char) -> bool {
        if !self.input_enabled {
            return false;
        }
        self.input.push(c);
        true
    }

    /// Remove the last typed character. Returns false if nothing changed.
    pub fn pop_char(&mut self) -> bool {
        self.input_enabled && self.input.pop().is_some()
    }

    /// Position of the next character to type, if still inside the sentence
    pub fn cursor(&self) -> Option<usize> {
        let typed = self.input.chars().count();
        (typed < self.sentence.len()).then_some(typed)
    }
}

impl Presenter for TerminalView {
    fn show_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    fn render_sentence(&mut self, sentence: &Sentence) {
        self.sentence = sentence.as_str().chars().collect();
        self.verdicts = vec![Verdict::Pending; self.sentence.len()];
    }

    fn mark_char(&mut self, index: usize, verdict: Verdict) {
        if let Some(slot) = self.verdicts.get_mut(index) {
            *slot = verdict;
        }
    }

    fn update_live_stats(&mut self, wpm: u32, accuracy: u32, time_remaining_secs: u32) {
        self.wpm = wpm;
        self.accuracy = accuracy;
        self.time_remaining_secs = time_remaining_secs;
    }

    fn update_status_message(&mut self, text: &str, tone: Tone) {
        self.status = text.to_string();
        self.tone = tone;
    }

    fn show_final_results(&mut self, summary: &ResultSummary) {
        self.final_results = Some(*summary);
    }

    fn reset_input(&mut self) {
        self.input.clear();
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_locked_until_enabled() {
        let mut view = TerminalView::new(30);
        assert!(!view.push_char('a'));
        assert_eq!(view.input(), "");

        view.set_input_enabled(true);
        assert!(view.push_char('a'));
        assert!(view.push_char('b'));
        assert_eq!(view.input(), "ab");
        assert!(view.pop_char());
        assert_eq!(view.input(), "a");
    }

    #[test]
    fn test_pop_on_empty_input() {
        let mut view = TerminalView::new(30);
        view.set_input_enabled(true);
        assert!(!view.pop_char());
    }

    #[test]
    fn test_render_sentence_resets_verdicts() {
        let mut view = TerminalView::new(30);
        view.render_sentence(&"cat".into());
        view.mark_char(1, Verdict::Incorrect);
        assert_eq!(view.verdicts[1], Verdict::Incorrect);

        view.render_sentence(&"dog".into());
        assert!(view.verdicts.iter().all(|v| *v == Verdict::Pending));
    }

    #[test]
    fn test_mark_char_out_of_range_is_ignored() {
        let mut view = TerminalView::new(30);
        view.render_sentence(&"ab".into());
        view.mark_char(5, Verdict::Correct);
        assert_eq!(view.verdicts.len(), 2);
    }

    #[test]
    fn test_cursor_tracks_input() {
        let mut view = TerminalView::new(30);
        view.render_sentence(&"ab".into());
        view.set_input_enabled(true);
        assert_eq!(view.cursor(), Some(0));
        view.push_char('a');
        assert_eq!(view.cursor(), Some(1));
        view.push_char('b');
        assert_eq!(view.cursor(), None);
    }
}
