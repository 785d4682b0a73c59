//! Text normalization and Ukrainian-aware collation.
//!
//! Every catalog comparison goes through this module. Stored text is
//! cleaned (NFC composition, trimmed, whitespace collapsed); equality and
//! ordering work on a folded form where case and diacritics are ignored
//! but distinct Ukrainian letters stay distinct. Storage collation is
//! never trusted for Cyrillic text.

use std::cmp::Ordering;
use std::iter;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// The Ukrainian alphabet in collation order. Code-point order misplaces
/// ґ, є, і, and ї, so the table is explicit.
const UKRAINIAN: &[char] = &[
    'а', 'б', 'в', 'г', 'ґ', 'д', 'е', 'є', 'ж', 'з', 'и', 'і', 'ї', 'й',
    'к', 'л', 'м', 'н', 'о', 'п', 'р', 'с', 'т', 'у', 'ф', 'х', 'ц', 'ч',
    'ш', 'щ', 'ь', 'ю', 'я',
];

/// Normalize user-entered text to its stored form: NFC composition,
/// trimmed, interior whitespace runs collapsed to a single space.
pub fn clean(input: &str) -> String {
    let composed: String = input.nfc().collect();
    let mut out = String::with_capacity(composed.len());
    let mut in_gap = false;
    for ch in composed.trim().chars() {
        if ch.is_whitespace() {
            in_gap = true;
        } else {
            if in_gap {
                out.push(' ');
            }
            in_gap = false;
            out.push(ch);
        }
    }
    out
}

/// Case- and diacritic-insensitive comparison form of a string.
///
/// Applies [`clean`], lowercases, then maps each character: letters in
/// the locale table keep their identity (`и`/`й` and `і`/`ї` are distinct
/// letters, not accent variants), while letters outside the table are
/// canonically decomposed and stripped of combining marks, so `é` folds
/// to `e`. Two strings name the same title or person exactly when their
/// folded forms are equal.
pub fn fold(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in clean(input).chars() {
        for lower in ch.to_lowercase() {
            if is_combining_mark(lower) {
                // Marks that survive NFC have no precomposed form
                // (Ukrainian stress accents); folding drops them.
                continue;
            }
            if table_weight(lower).is_some() || !lower.is_alphabetic() {
                out.push(lower);
            } else {
                for base in iter::once(lower).nfd() {
                    if !is_combining_mark(base) {
                        out.push(base);
                    }
                }
            }
        }
    }
    out
}

/// Equality under [`fold`].
pub fn folded_eq(a: &str, b: &str) -> bool {
    fold(a) == fold(b)
}

/// Substring containment under [`fold`]. An empty needle matches
/// everything.
pub fn folded_contains(haystack: &str, needle: &str) -> bool {
    fold(haystack).contains(&fold(needle))
}

/// Locale ordering of two strings: folded forms compared by Ukrainian
/// alphabet position, with digits before Latin before Cyrillic and a
/// code-point fallback for characters outside the table.
pub fn collate(a: &str, b: &str) -> Ordering {
    collate_folded(&fold(a), &fold(b))
}

/// Compare two strings that are already in folded form.
pub fn collate_folded(a: &str, b: &str) -> Ordering {
    let mut rest = b.chars();
    for ca in a.chars() {
        let Some(cb) = rest.next() else {
            return Ordering::Greater;
        };
        let ord = weight(ca).cmp(&weight(cb));
        if ord != Ordering::Equal {
            return ord;
        }
    }
    if rest.next().is_some() {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}

/// Position of `ch` in the collation table: digits first, then Latin,
/// then the Ukrainian alphabet. `None` for everything else.
fn table_weight(ch: char) -> Option<u32> {
    if ch.is_ascii_digit() {
        return Some(ch as u32 - '0' as u32);
    }
    if ch.is_ascii_lowercase() {
        return Some(0x40 + ch as u32 - 'a' as u32);
    }
    UKRAINIAN
        .iter()
        .position(|&c| c == ch)
        .map(|i| 0x80 + i as u32)
}

/// Full collation weight. Characters outside the table keep code-point
/// order and sort below the letter block.
fn weight(ch: char) -> u32 {
    const LETTER_BLOCK: u32 = 0x11_0000;
    match table_weight(ch) {
        Some(w) => LETTER_BLOCK + w,
        None => ch as u32,
    }
}
