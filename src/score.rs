/// Standard word length used for words-per-minute
pub const CHARS_PER_WORD: f64 = 5.0;

/// Snapshot of a player's speed and accuracy, recomputed on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResultSummary {
    pub wpm: u32,
    pub accuracy: u32,
    pub total_chars_typed: usize,
}

/// Words per minute and accuracy for `total_chars_typed` characters typed over
/// `elapsed_secs`, of which `total_mistakes` were wrong.
///
/// No time elapsed means no speed yet, so `wpm` is 0 rather than a division by
/// zero. Mistakes above the character count saturate, keeping accuracy in 0..=100.
pub fn compute(elapsed_secs: f64, total_chars_typed: usize, total_mistakes: usize) -> ResultSummary {
    ResultSummary {
        wpm: wpm(elapsed_secs, total_chars_typed),
        accuracy: accuracy(total_chars_typed, total_mistakes),
        total_chars_typed,
    }
}

fn wpm(elapsed_secs: f64, chars: usize) -> u32 {
    if !elapsed_secs.is_finite() || elapsed_secs <= 0.0 {
        return 0;
    }
    let minutes = elapsed_secs / 60.0;
    let words = chars as f64 / CHARS_PER_WORD;
    (words / minutes).round().max(0.0) as u32
}

fn accuracy(chars: usize, mistakes: usize) -> u32 {
    if chars == 0 {
        return 0;
    }
    let correct = chars - mistakes.min(chars);
    ((correct as f64 / chars as f64) * 100.0).round() as u32
}
