use crate::sentences::Sentence;

/// Per-character verdict against the reference sentence
#[derive(Clone, Debug, Copy, PartialEq, Eq, Default)]
pub enum Verdict {
    Correct,
    Incorrect,
    #[default]
    Pending,
}

/// Verdicts aligned 1:1 with the reference characters
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ComparisonResult {
    pub verdicts: Vec<Verdict>,
    pub mistakes: usize,
}

impl ComparisonResult {
    /// Every character pending, as shown before anything is typed
    pub fn pending(reference: &Sentence) -> Self {
        Self {
            verdicts: vec![Verdict::Pending; reference.char_len()],
            mistakes: 0,
        }
    }

    /// Length of the typed prefix inside the comparison window
    pub fn typed_len(&self) -> usize {
        self.verdicts
            .iter()
            .filter(|v| **v != Verdict::Pending)
            .count()
    }

    /// Indices whose verdict differs from `previous`. When the two results
    /// cover different sentences every index is reported.
    pub fn changes_from<'a>(
        &'a self,
        previous: &'a ComparisonResult,
    ) -> impl Iterator<Item = (usize, Verdict)> + 'a {
        let same_window = previous.verdicts.len() == self.verdicts.len();
        self.verdicts
            .iter()
            .enumerate()
            .filter(move |(idx, v)| !same_window || previous.verdicts[*idx] != **v)
            .map(|(idx, v)| (idx, *v))
    }
}

/// Compare `typed` against `reference` character by character.
///
/// Characters past the end of the reference are not looked at.
pub fn compare(typed: &str, reference: &Sentence) -> ComparisonResult {
    let mut typed_chars = typed.chars();
    let verdicts: Vec<Verdict> = reference
        .as_str()
        .chars()
        .map(|expected| match typed_chars.next() {
            None => Verdict::Pending,
            Some(c) if c == expected => Verdict::Correct,
            Some(_) => Verdict::Incorrect,
        })
        .collect();
    let mistakes = verdicts.iter().filter(|v| **v == Verdict::Incorrect).count();

    ComparisonResult { verdicts, mistakes }
}

/// Whether `typed` completes the sentence: an exact match, nothing extra.
pub fn is_complete(typed: &str, reference: &Sentence) -> bool {
    typed == reference.as_str()
}
