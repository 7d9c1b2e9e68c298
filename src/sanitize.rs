//! Emoji removal for tweet text.
//!
//! This module contains the text sanitizer that strips emoji, pictographs,
//! and related symbol characters from tweet text before it is written to
//! the CSV export. Filtering is a plain code-point range membership test
//! applied per character; no pattern matching engine is involved.

/// Inclusive Unicode code-point ranges removed by [`remove_emojis`].
///
/// The ranges cover emoticons, symbols and pictographs, transport and map
/// symbols, regional indicator (flag) pairs, dingbats, enclosed characters,
/// the supplementary planes, and a handful of standalone characters that
/// appear in emoji sequences (zero-width joiner, variation selector-16,
/// wavy dash, and a few Miscellaneous Technical code points).
///
/// Several ranges overlap; membership is checked against each in turn and
/// the first hit wins, so overlap is harmless.
const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x1F600, 0x1F64F), // emoticons
    (0x1F300, 0x1F5FF), // symbols & pictographs
    (0x1F680, 0x1F6FF), // transport & map symbols
    (0x1F1E0, 0x1F1FF), // flags (regional indicators)
    (0x2702, 0x27B0),   // dingbats
    (0x24C2, 0x1F251),  // enclosed characters
    (0x1F926, 0x1F937), // supplemental people gestures
    (0x10000, 0x10FFFF), // supplementary planes
    (0x2640, 0x2642),   // gender signs
    (0x2600, 0x2B55),   // miscellaneous symbols
    (0x200D, 0x200D),   // zero-width joiner
    (0x23CF, 0x23CF),   // eject symbol
    (0x23E9, 0x23E9),   // fast-forward symbol
    (0x231A, 0x231A),   // watch
    (0xFE0F, 0xFE0F),   // variation selector-16
    (0x3030, 0x3030),   // wavy dash
];

/// Returns true if the character falls inside any of the filtered ranges.
fn is_filtered(c: char) -> bool {
    let cp = c as u32;
    EMOJI_RANGES.iter().any(|&(lo, hi)| cp >= lo && cp <= hi)
}

/// Removes emoji and related symbol characters from a string.
///
/// Every code point inside one of the [`EMOJI_RANGES`] is dropped; all
/// other characters, including whitespace and punctuation, are preserved
/// verbatim and in their original order. The function is pure and never
/// fails; an empty input yields an empty output.
///
/// # Parameters
///
/// - `text`: The text to sanitize
///
/// # Returns
///
/// The input with all filtered code points removed.
///
/// # Example
///
/// ```rust
/// use tweetsheet::sanitize::remove_emojis;
///
/// assert_eq!(remove_emojis("Hello 😀 World 🌍!"), "Hello  World !");
/// assert_eq!(remove_emojis("no emoji here"), "no emoji here");
/// ```
pub fn remove_emojis(text: &str) -> String {
    text.chars().filter(|&c| !is_filtered(c)).collect()
}
