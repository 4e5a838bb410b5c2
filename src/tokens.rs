/// Rough token estimate for a piece of text, no tokenizer needed.
///
/// Averages a characters-per-token guess (4 chars) with a words-per-token
/// guess (3/4 of a word), rounded, and never reports fewer than one token for
/// non-empty text.
pub fn rough_token_count(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }

    let by_chars = text.chars().count() as f64 / 4.0;
    let by_words = text.split_whitespace().count() as f64 * 4.0 / 3.0;
    let estimate = ((by_chars + by_words) / 2.0).round() as usize;

    estimate.max(1)
}
