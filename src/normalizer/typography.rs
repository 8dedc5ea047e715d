// WHY: each rewrite rule is a named single-pass scan so stage ordering
// regressions surface in stage-level tests instead of only end-to-end ones

use super::script::{is_persian_block, ZWNJ};

/// Punctuation whose identical runs collapse to a single instance.
const COLLAPSIBLE_PUNCT: &[char] = &['!', '؟', '?', '.', '،'];

/// Punctuation that receives exactly one trailing space and no leading space.
const SPACED_PUNCT: &[char] = &['،', ',', ':', ';', '؛', '.', '!', '?', '؟'];

/// Prefix morphemes that fuse to a following Persian stem with a ZWNJ.
/// نمی is listed before می so the longer form wins at a shared token start.
const PREFIXES: &[&[char]] = &[
    &['ن', 'م', 'ی'], // نمی
    &['م', 'ی'],      // می
    &['ب', 'ی'],      // بی
];

/// Suffix morphemes that fuse to a preceding Persian stem with a ZWNJ.
/// ترین is checked before تر so the bare comparative only matches when the
/// superlative's trailing ین is absent.
const SUFFIXES: &[&[char]] = &[
    &['ه', 'ا'],           // ها
    &['ت', 'ر', 'ی', 'ن'], // ترین
    &['ت', 'ر'],           // تر
];

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Rewrite runs of 3+ literal periods as the horizontal ellipsis character.
///
/// Runs before repeated-punctuation collapsing: two-period runs fall through
/// to that stage and collapse to a single period.
pub fn normalize_ellipsis(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '.' {
            let mut run = 1usize;
            while chars.peek() == Some(&'.') {
                chars.next();
                run += 1;
            }
            if run >= 3 {
                out.push('…');
            } else {
                for _ in 0..run {
                    out.push('.');
                }
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Collapse any run of 2+ identical collapsible punctuation marks to one.
pub fn collapse_repeated_punctuation(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    for ch in text.chars() {
        if prev == Some(ch) && COLLAPSIBLE_PUNCT.contains(&ch) {
            continue;
        }
        out.push(ch);
        prev = Some(ch);
    }
    out
}

/// Collapse runs of 3+ identical Persian/Arabic-block letters to exactly 2.
///
/// Keeps mild emphasis spelling while dropping exaggerated stretching.
pub fn collapse_stretched_letters(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    let mut run = 0usize;
    for ch in text.chars() {
        if prev == Some(ch) {
            run += 1;
        } else {
            prev = Some(ch);
            run = 1;
        }
        if run > 2 && is_persian_block(ch) {
            continue;
        }
        out.push(ch);
    }
    out
}

/// Fuse the prefix morphemes می / نمی / بی to a following Persian stem.
///
/// The prefix must be a whole token (start of text or preceded by whitespace,
/// immediately followed by a whitespace/ZWNJ run); the run is replaced with a
/// single ZWNJ when a Persian/Arabic-block character follows it.
pub fn attach_prefixes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        let token_start = i == 0 || chars[i - 1].is_whitespace();
        if token_start {
            if let Some(len) = match_prefix(&chars[i..]) {
                let sep_start = i + len;
                let mut j = sep_start;
                while j < chars.len() && (chars[j].is_whitespace() || chars[j] == ZWNJ) {
                    j += 1;
                }
                if j > sep_start && j < chars.len() && is_persian_block(chars[j]) {
                    out.extend(&chars[i..sep_start]);
                    out.push(ZWNJ);
                    i = j;
                    continue;
                }
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

fn match_prefix(rest: &[char]) -> Option<usize> {
    PREFIXES
        .iter()
        .find(|prefix| rest.len() > prefix.len() && rest[..prefix.len()] == ***prefix)
        .map(|prefix| prefix.len())
}

/// Fuse the suffix morphemes ها / تر / ترین to a preceding Persian stem.
///
/// The stem's last character must be in the Persian/Arabic block and the
/// suffix must sit at a word boundary (not followed by a word character).
pub fn attach_suffixes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_whitespace() && i > 0 && is_persian_block(chars[i - 1]) {
            let mut j = i;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            if let Some(len) = match_suffix(&chars[j..]) {
                out.push(ZWNJ);
                out.extend(&chars[j..j + len]);
                i = j + len;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

fn match_suffix(rest: &[char]) -> Option<usize> {
    SUFFIXES
        .iter()
        .find(|suffix| {
            let len = suffix.len();
            rest.len() >= len
                && rest[..len] == ***suffix
                && !rest.get(len).is_some_and(|&c| is_word_char(c))
        })
        .map(|suffix| suffix.len())
}

/// Fuse the Ezafe after a plural marker: ها + whitespace + ی becomes ها‌ی.
pub fn attach_plural_ezafe(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == 'ه' && chars.get(i + 1) == Some(&'ا') {
            let mut j = i + 2;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            if j > i + 2
                && chars.get(j) == Some(&'ی')
                && !chars.get(j + 1).is_some_and(|&c| is_word_char(c))
            {
                out.push('ه');
                out.push('ا');
                out.push(ZWNJ);
                out.push('ی');
                i = j + 1;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

/// Remove whitespace immediately inside parentheses and guillemets.
pub fn tighten_brackets(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_ws = String::new();
    let mut after_opener = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !after_opener {
                pending_ws.push(ch);
            }
            continue;
        }
        if matches!(ch, ')' | '»') {
            pending_ws.clear();
        }
        if !pending_ws.is_empty() {
            out.push_str(&pending_ws);
            pending_ws.clear();
        }
        out.push(ch);
        after_opener = matches!(ch, '(' | '«');
    }
    out.push_str(&pending_ws);
    out
}

/// Rewrite commas (Latin or Persian) as "، " and Latin semicolons as "؛ ",
/// consuming any whitespace that surrounded them.
pub fn normalize_list_punctuation(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut pending_ws = String::new();
    let mut consume_ws = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !consume_ws {
                pending_ws.push(ch);
            }
            continue;
        }
        match ch {
            '،' | ',' => {
                pending_ws.clear();
                out.push('،');
                out.push(' ');
                consume_ws = true;
            }
            ';' => {
                pending_ws.clear();
                out.push('؛');
                out.push(' ');
                consume_ws = true;
            }
            _ => {
                if !pending_ws.is_empty() {
                    out.push_str(&pending_ws);
                    pending_ws.clear();
                }
                out.push(ch);
                consume_ws = false;
            }
        }
    }
    out.push_str(&pending_ws);
    out
}

/// Rewrite a Latin question mark directly following a Persian/Arabic-block
/// character as the Persian question mark.
pub fn localize_question_marks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    for ch in text.chars() {
        let rewritten = if ch == '?' && prev.is_some_and(is_persian_block) {
            '؟'
        } else {
            ch
        };
        out.push(rewritten);
        prev = Some(rewritten);
    }
    out
}

/// Remove whitespace around each spaced punctuation mark and insert exactly
/// one trailing space after it.
pub fn space_punctuation(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut pending_ws = false;
    let mut consume_ws = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !consume_ws {
                pending_ws = true;
            }
            continue;
        }
        if SPACED_PUNCT.contains(&ch) {
            pending_ws = false;
            out.push(ch);
            out.push(' ');
            consume_ws = true;
        } else {
            if pending_ws {
                out.push(' ');
                pending_ws = false;
            }
            out.push(ch);
            consume_ws = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ellipsis_three_or_more_dots() {
        assert_eq!(normalize_ellipsis("رفتم..."), "رفتم…");
        assert_eq!(normalize_ellipsis("رفتم....."), "رفتم…");
    }

    #[test]
    fn test_ellipsis_leaves_short_runs() {
        assert_eq!(normalize_ellipsis("رفتم.."), "رفتم..");
        assert_eq!(normalize_ellipsis("رفتم."), "رفتم.");
    }

    #[test]
    fn test_collapse_repeated_punctuation() {
        assert_eq!(collapse_repeated_punctuation("واقعا؟؟؟"), "واقعا؟");
        assert_eq!(collapse_repeated_punctuation("آره!!!!"), "آره!");
        assert_eq!(collapse_repeated_punctuation("خب.."), "خب.");
        // Mixed marks are distinct runs
        assert_eq!(collapse_repeated_punctuation("چی؟!"), "چی؟!");
    }

    #[test]
    fn test_collapse_stretched_letters() {
        assert_eq!(collapse_stretched_letters("سلامممممم"), "سلامم");
        // Two repeats stay; Latin runs are untouched
        assert_eq!(collapse_stretched_letters("سلامم"), "سلامم");
        assert_eq!(collapse_stretched_letters("noooo"), "noooo");
    }

    #[test]
    fn test_attach_prefix_mi() {
        assert_eq!(attach_prefixes("می روم"), "می\u{200C}روم");
        assert_eq!(attach_prefixes("نمی دانم"), "نمی\u{200C}دانم");
        assert_eq!(attach_prefixes("بی خبر"), "بی\u{200C}خبر");
    }

    #[test]
    fn test_attach_prefix_requires_token_start() {
        // می inside a longer token is not a prefix
        assert_eq!(attach_prefixes("سلامی روم"), "سلامی روم");
    }

    #[test]
    fn test_attach_prefix_requires_persian_stem() {
        assert_eq!(attach_prefixes("می go"), "می go");
    }

    #[test]
    fn test_attach_prefix_idempotent_over_zwnj() {
        let fused = "می\u{200C}روم";
        assert_eq!(attach_prefixes(fused), fused);
    }

    #[test]
    fn test_attach_suffixes() {
        assert_eq!(attach_suffixes("کتاب ها"), "کتاب\u{200C}ها");
        assert_eq!(attach_suffixes("بزرگ تر"), "بزرگ\u{200C}تر");
        assert_eq!(attach_suffixes("بزرگ ترین"), "بزرگ\u{200C}ترین");
    }

    #[test]
    fn test_attach_suffix_chain_fuses_in_one_pass() {
        // Fusing only the first suffix would leave "کتاب‌ها تر", which a
        // second pass would then fuse; doing both at once keeps the result
        // stable
        let fused = attach_suffixes("کتاب ها تر");
        assert_eq!(fused, "کتاب\u{200C}ها\u{200C}تر");
        assert_eq!(attach_suffixes(&fused), fused);
    }

    #[test]
    fn test_attach_suffix_requires_boundary() {
        // ترکیب starts with تر but continues with word characters
        assert_eq!(attach_suffixes("این ترکیب"), "این ترکیب");
    }

    #[test]
    fn test_attach_suffix_requires_persian_stem() {
        assert_eq!(attach_suffixes("book ها"), "book ها");
    }

    #[test]
    fn test_attach_plural_ezafe() {
        assert_eq!(attach_plural_ezafe("کتاب‌ها ی خوب"), "کتاب‌ها\u{200C}ی خوب");
        // ی followed by more word characters is not the Ezafe
        assert_eq!(attach_plural_ezafe("ها یار"), "ها یار");
    }

    #[test]
    fn test_tighten_brackets() {
        assert_eq!(tighten_brackets("( سلام )"), "(سلام)");
        assert_eq!(tighten_brackets("« سلام »"), "«سلام»");
        assert_eq!(tighten_brackets("قبل ( وسط ) بعد"), "قبل (وسط) بعد");
    }

    #[test]
    fn test_normalize_list_punctuation() {
        assert_eq!(normalize_list_punctuation("الف ، ب"), "الف، ب");
        assert_eq!(normalize_list_punctuation("الف،ب"), "الف، ب");
        assert_eq!(normalize_list_punctuation("a, b"), "a، b");
        assert_eq!(normalize_list_punctuation("a ; b"), "a؛ b");
    }

    #[test]
    fn test_localize_question_marks() {
        assert_eq!(localize_question_marks("چرا?"), "چرا؟");
        assert_eq!(localize_question_marks("why?"), "why?");
        assert_eq!(localize_question_marks("چرا? why?"), "چرا؟ why?");
    }

    #[test]
    fn test_space_punctuation() {
        assert_eq!(space_punctuation("سلام،جهان"), "سلام، جهان");
        assert_eq!(space_punctuation("سلام ، جهان"), "سلام، جهان");
        assert_eq!(space_punctuation("یک:دو"), "یک: دو");
    }

    #[test]
    fn test_space_punctuation_consecutive_marks() {
        // Each mark receives its own trailing space
        assert_eq!(space_punctuation("چی؟!"), "چی؟ ! ");
    }
}
