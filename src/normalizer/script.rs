// WHY: script unification is a pure lookup over disjoint single-character
// replacements, so a plain char scan beats a regex rule table here

/// Zero-width non-joiner, used to fuse Persian prefixes/suffixes to stems.
pub const ZWNJ: char = '\u{200C}';

/// Arabic tatweel (kashida) elongation character, semantically empty.
pub const TATWEEL: char = '\u{0640}';

/// True when the character falls inside the Arabic/Persian Unicode block.
pub fn is_persian_block(ch: char) -> bool {
    matches!(ch, '\u{0600}'..='\u{06FF}')
}

/// Replace Arabic-script letterforms with their Persian canonical counterparts.
///
/// The mapping is one-to-one and the replacements are disjoint, so a single
/// left-to-right pass is order-independent. Persian alef-with-madda (آ) is
/// deliberately left unchanged.
pub fn unify_script(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '\u{064A}' => '\u{06CC}', // Arabic yeh ي -> Persian yeh ی
            '\u{0643}' => '\u{06A9}', // Arabic kaf ك -> Persian kaf ک
            '\u{0629}' => '\u{0647}', // teh marbuta ة -> heh ه
            '\u{0624}' => '\u{0648}', // waw with hamza ؤ -> waw و
            '\u{0625}' => '\u{0627}', // alef with hamza below إ -> alef ا
            '\u{0623}' => '\u{0627}', // alef with hamza above أ -> alef ا
            '\u{0626}' => '\u{06CC}', // yeh with hamza ئ -> Persian yeh ی
            other => other,
        })
        .collect()
}

/// Delete every tatweel/kashida occurrence.
pub fn remove_tatweel(text: &str) -> String {
    text.chars().filter(|&ch| ch != TATWEEL).collect()
}

/// Replace Arabic-Indic digits (U+0660..U+0669) with ASCII digits 0-9.
pub fn convert_digits(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '\u{0660}'..='\u{0669}' => {
                // Same ordinal position in both digit blocks
                char::from(b'0' + (ch as u32 - 0x0660) as u8)
            }
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unify_script_letter_by_letter() {
        assert_eq!(unify_script("ي ك ة إ أ آ ئ"), "ی ک ه ا ا آ ی");
    }

    #[test]
    fn test_unify_script_preserves_persian_text() {
        let already_persian = "می‌خواهم کتاب بخوانم";
        assert_eq!(unify_script(already_persian), already_persian);
    }

    #[test]
    fn test_unify_script_inside_words() {
        assert_eq!(unify_script("كتاب"), "کتاب");
        assert_eq!(unify_script("علي"), "علی");
    }

    #[test]
    fn test_remove_tatweel() {
        assert_eq!(remove_tatweel("سلـــام"), "سلام");
        assert_eq!(remove_tatweel("بدون کشیده"), "بدون کشیده");
    }

    #[test]
    fn test_convert_digits_full_range() {
        assert_eq!(convert_digits("٠١٢٣٤٥٦٧٨٩"), "0123456789");
    }

    #[test]
    fn test_convert_digits_mixed_text() {
        assert_eq!(convert_digits("سال ٢٠٢٤"), "سال 2024");
        // ASCII digits pass through untouched
        assert_eq!(convert_digits("سال 2024"), "سال 2024");
    }

    #[test]
    fn test_extended_arabic_indic_digits_left_alone() {
        // U+06F0.. block is outside the converted range
        assert_eq!(convert_digits("۱۲۳"), "۱۲۳");
    }

    #[test]
    fn test_is_persian_block() {
        assert!(is_persian_block('س'));
        assert!(is_persian_block('؟'));
        assert!(!is_persian_block('a'));
        assert!(!is_persian_block(ZWNJ));
    }
}
