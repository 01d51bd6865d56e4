//! Locale-aware name comparison.
//!
//! Product names are mostly French ("Élégantes boucles", "Œuf en bois"), so a
//! plain byte comparison would sort every accented or capitalized name after
//! `z`. Names are decomposed (NFKD) and compared in three passes, like a
//! collator would:
//!
//! 1. base letters only (combining marks and case dropped, ligatures expanded);
//! 2. combining marks, unaccented first;
//! 3. case, lowercase first.
//!
//! Canonically equivalent spellings (precomposed `é` vs `e` + U+0301) compare
//! equal.

use core::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Compare two names the way a human reading a catalog expects.
pub fn compare(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| tertiary_key(a).cmp(&tertiary_key(b)))
        .then_with(|| a.nfc().cmp(b.nfc()))
}

fn base_chars(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfkd().filter(|c| !is_combining_mark(*c))
}

fn primary_key(s: &str) -> Vec<char> {
    let mut out = Vec::with_capacity(s.len());
    for c in base_chars(s).flat_map(char::to_lowercase) {
        match expand(c) {
            Some((first, second)) => {
                out.push(first);
                out.push(second);
            }
            None => out.push(apostrophe(c)),
        }
    }
    out
}

/// The combining marks attached to each base character, in order.
fn secondary_key(s: &str) -> Vec<Vec<char>> {
    let mut out: Vec<Vec<char>> = Vec::new();
    for c in s.nfkd() {
        if is_combining_mark(c) {
            if let Some(marks) = out.last_mut() {
                marks.push(c);
            }
        } else {
            out.push(Vec::new());
        }
    }
    out
}

/// One weight per base character: 0 for lowercase, 1 for uppercase.
fn tertiary_key(s: &str) -> Vec<u8> {
    base_chars(s).map(|c| u8::from(c.is_uppercase())).collect()
}

/// Ligatures have no decomposition; spell them out.
fn expand(c: char) -> Option<(char, char)> {
    match c {
        'œ' => Some(('o', 'e')),
        'æ' => Some(('a', 'e')),
        'ß' => Some(('s', 's')),
        _ => None,
    }
}

/// Typographic apostrophes sort like the ASCII one.
fn apostrophe(c: char) -> char {
    match c {
        '’' | '‘' => '\'',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut names: Vec<&'static str>) -> Vec<&'static str> {
        names.sort_by(|a, b| compare(a, b));
        names
    }

    #[test]
    fn accents_sort_with_their_base_letter() {
        assert_eq!(
            sorted(vec!["Zellige", "Élégantes boucles", "Bracelet"]),
            vec!["Bracelet", "Élégantes boucles", "Zellige"]
        );
    }

    #[test]
    fn decomposed_accents_sort_with_their_base_letter() {
        assert_eq!(compare("E\u{301}ventail", "Ezzz"), Ordering::Less);
        assert_eq!(compare("\u{C9}ventail", "Ezzz"), Ordering::Less);
    }

    #[test]
    fn precomposed_and_decomposed_spellings_are_equal() {
        assert_eq!(compare("E\u{301}ventail", "\u{C9}ventail"), Ordering::Equal);
    }

    #[test]
    fn letters_beyond_french_fold_too() {
        assert_eq!(compare("Şal", "Tapis"), Ordering::Less);
        assert_eq!(compare("Ğazal", "Hiboux"), Ordering::Less);
        assert_eq!(compare("Ångström", "Bague"), Ordering::Less);
    }

    #[test]
    fn case_does_not_dominate_ordering() {
        assert_eq!(sorted(vec!["babouche", "Argan", "Tapis"]), vec!["Argan", "babouche", "Tapis"]);
    }

    #[test]
    fn unaccented_before_accented_when_base_is_equal() {
        assert_eq!(compare("cote", "côte"), Ordering::Less);
        assert_eq!(compare("côte", "cote"), Ordering::Greater);
    }

    #[test]
    fn lowercase_before_uppercase_when_otherwise_equal() {
        assert_eq!(compare("miel", "Miel"), Ordering::Less);
    }

    #[test]
    fn ligatures_expand() {
        assert_eq!(primary_key("Œuf"), primary_key("oeuf"));
        assert_eq!(compare("Œuf", "Ogre"), Ordering::Less);
    }

    #[test]
    fn typographic_apostrophe_matches_ascii() {
        assert_eq!(primary_key("Miel d’Oranger"), primary_key("Miel d'Oranger"));
    }

    #[test]
    fn identical_names_compare_equal() {
        assert_eq!(compare("Tajine", "Tajine"), Ordering::Equal);
    }
}
