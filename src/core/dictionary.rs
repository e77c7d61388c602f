//! String-to-string dictionaries
//!
//! Alias tables, version tables and redirect tables are all flat string
//! dictionaries. Entries keep insertion order: redirect rules are tried in
//! the order they are written, so that order is part of the output.

use indexmap::IndexMap;

/// A flat string-to-string mapping in insertion order
pub type Dictionary = IndexMap<String, String>;

/// Fold over every entry of a dictionary.
///
/// The closure receives the accumulator, the value and the key, in insertion
/// order.
pub fn reduce<A, F>(dictionary: &Dictionary, initial: A, mut f: F) -> A
where
    F: FnMut(A, &str, &str) -> A,
{
    dictionary
        .iter()
        .fold(initial, |acc, (key, value)| f(acc, value, key))
}

/// Overlay `overlay` on a copy of `base`. Keys in `overlay` win; a replaced
/// key keeps its position from `base`.
pub fn merge(base: &Dictionary, overlay: &Dictionary) -> Dictionary {
    let mut merged = base.clone();
    merged.extend(overlay.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Build a dictionary from borrowed pairs
pub fn from_pairs<'a, I>(pairs: I) -> Dictionary
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
