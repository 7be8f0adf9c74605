//! Script detection and whitespace helpers shared by the pipeline stages.

/// Whether a code point falls in one of the Arabic Unicode blocks
/// (base block, supplement, extended-A, and both presentation-form blocks).
/// U+FEFF is the byte-order mark, not a presentation form.
pub fn is_arabic_char(c: char) -> bool {
    matches!(c,
        '\u{0600}'..='\u{06FF}'
        | '\u{0750}'..='\u{077F}'
        | '\u{08A0}'..='\u{08FF}'
        | '\u{FB50}'..='\u{FDFF}'
        | '\u{FE70}'..='\u{FEFC}')
}

/// Arabic-script letter (excludes Arabic digits and punctuation).
pub fn is_arabic_letter(c: char) -> bool {
    is_arabic_char(c) && c.is_alphabetic()
}

/// Latin-script letter, including the accented Latin-1 and Latin Extended ranges.
pub fn is_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || (matches!(c, '\u{00C0}'..='\u{024F}') && c.is_alphabetic())
}

/// Whether the text contains any Arabic code point.
pub fn contains_arabic(text: &str) -> bool {
    text.chars().any(is_arabic_char)
}

/// Count Arabic and Latin letters in one pass.
pub fn script_counts(text: &str) -> (usize, usize) {
    text.chars().fold((0, 0), |(arabic, latin), c| {
        if is_arabic_letter(c) {
            (arabic + 1, latin)
        } else if is_latin_letter(c) {
            (arabic, latin + 1)
        } else {
            (arabic, latin)
        }
    })
}

/// Collapse every whitespace run (including newlines) into a single space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Length in Unicode scalar values, which is what every length threshold uses.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
