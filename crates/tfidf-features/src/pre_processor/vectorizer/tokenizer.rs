use std::{borrow::Cow, sync::LazyLock};

use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};
use regex::Regex;
use tracing::debug;

/// Words of two or more word characters.
static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\w\w+\b").expect("word pattern is a valid regex")
});

/// Below this many texts a progress bar is only noise.
const MIN_TEXTS_FOR_PROGRESS: usize = 1_000;

fn progress_bar_setup(len: usize, message: impl Into<Cow<'static, str>>) -> ProgressBar {
    if len < MIN_TEXTS_FOR_PROGRESS {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len as u64);
    let style = ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        .map_or_else(|_| ProgressStyle::default_bar(), |style| style.progress_chars("#>-"));
    pb.set_style(style);
    pb.set_message(message);
    pb
}

/// Lowercases `text` and splits it into word tokens.
///
/// Punctuation and whitespace delimit tokens; single-character words are dropped.
pub fn tokenize_text(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_owned())
        .collect()
}

pub fn tokenize<T: AsRef<str>>(texts: &[T]) -> Vec<Vec<String>> {
    debug!(num_texts = texts.len(), "Tokenizing texts");
    let pb = progress_bar_setup(texts.len(), "Tokenizing texts");

    let result = texts
        .iter()
        .progress_with(pb.clone())
        .map(|text| tokenize_text(text.as_ref()))
        .collect();
    pb.finish_with_message("Tokenization complete");
    result
}
