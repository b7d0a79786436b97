//! Header row normalization.

use std::collections::HashSet;

const EMPTY_HEADER: &str = "__EMPTY";

/// Turn raw header cells into unique column names.
///
/// Blank cells become `__EMPTY`. A name already taken gets the first free `_1`, `_2`, ...
/// suffix, so `["a", "a", "", ""]` becomes `["a", "a_1", "__EMPTY", "__EMPTY_1"]`.
pub fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for cell in raw {
        let cell = cell.as_ref();
        let base = if cell.trim().is_empty() {
            EMPTY_HEADER
        } else {
            cell
        };

        let mut name = base.to_string();
        let mut n = 1;
        while seen.contains(&name) {
            name = format!("{base}_{n}");
            n += 1;
        }
        seen.insert(name.clone());
        out.push(name);
    }
    out
}
