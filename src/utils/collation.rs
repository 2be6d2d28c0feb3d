//! Host-independent, locale-aware ordering for display names.
//!
//! Names are compared on three levels, the way a root-locale collator does:
//!
//! 1. base letters: the name transliterated to ASCII with `deunicode` and
//!    lowercased, so `Ōsaka`, `osaka` and `OSAKA` tie here;
//! 2. accents: the Unicode lowercase form, so `Osaka` sorts before `Ōsaka`;
//! 3. case: at the first differing position, lowercase before uppercase.
//!
//! Names that tie on all three levels compare `Equal`; callers rely on a
//! stable sort to keep their input order.

use std::cmp::Ordering;

/// Precomputed sort key for a display name. Derived `Ord` compares the
/// levels in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    base: String,
    accents: String,
    uppercase_mask: Vec<bool>,
}

impl CollationKey {
    pub fn new(name: &str) -> Self {
        Self {
            base: fold_key(name),
            accents: name.to_lowercase(),
            uppercase_mask: name.chars().map(char::is_uppercase).collect(),
        }
    }
}

/// ASCII transliteration, lowercased. Primary collation level.
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

pub fn compare_names(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}

/// Stable in-place sort by a name projected out of each element.
pub fn sort_by_name<T, F>(items: &mut [T], name: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by_cached_key(|item| CollationKey::new(name(item)));
}
