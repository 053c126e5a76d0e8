use wordlist_types::Language;

/// Shortest word the game accepts, in characters.
pub const MIN_WORD_LEN: usize = 3;

/// Canonicalize a raw token, or reject it.
///
/// Trims surrounding whitespace, lowercases with Unicode case rules, then
/// rejects anything shorter than [`MIN_WORD_LEN`] characters or containing a
/// character outside `language`'s alphabet (digits, punctuation, other
/// scripts). Applying it to its own output returns the same word.
pub fn normalize_word(raw: &str, language: Language) -> Option<String> {
    let normalized = raw.trim().to_lowercase();
    let mut len = 0usize;
    for c in normalized.chars() {
        if !language.is_letter(c) {
            return None;
        }
        len += 1;
    }
    if len < MIN_WORD_LEN {
        return None;
    }
    Some(normalized)
}
