use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Clean up extracted PDF text.
///
/// Applies unicode normalization, ligature replacement, hyphenation repair,
/// and replacement-character removal. Line structure is preserved except
/// where a hyphenated word is rejoined across a line break.
pub fn cleanup_text(text: &str) -> String {
    let mut result: String = text.nfc().collect();

    let ligatures = [
        ("\u{FB00}", "ff"),
        ("\u{FB01}", "fi"),
        ("\u{FB02}", "fl"),
        ("\u{FB03}", "ffi"),
        ("\u{FB04}", "ffl"),
    ];
    for (lig, replacement) in &ligatures {
        result = result.replace(lig, replacement);
    }

    // Rejoin words hyphenated at line breaks.
    static RE_HYPHEN: OnceLock<Regex> = OnceLock::new();
    let re_hyphen = RE_HYPHEN.get_or_init(|| Regex::new(r"([a-zA-Z])-[ \t]*\n[ \t]*([a-z])").unwrap());
    result = re_hyphen.replace_all(&result, "$1$2").to_string();

    result = result.replace('\u{FFFD}', "");

    result.trim().to_string()
}
