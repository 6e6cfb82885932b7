//! Selector -> C identifier fragment.

/// Every symbol a selector may contain, with its spelled-out form.
/// The keys are single, distinct characters and no value contains a key, so
/// the order of replacement does not change the result.
const REPLACEMENTS: &[(char, &str)] = &[
    ('~', "tilde"),
    ('&', "and"),
    ('|', "bar"),
    ('*', "star"),
    ('/', "slash"),
    ('@', "at"),
    ('+', "plus"),
    ('-', "minus"),
    ('=', "equal"),
    ('>', "greaterthan"),
    ('<', "lowerthan"),
    (',', "comma"),
    ('%', "percent"),
    ('\\', "backslash"),
    (':', "_"),
];

/// Replace each symbol character of `selector` by its name from
/// [`REPLACEMENTS`]; everything else is copied as is.
pub fn mangle(selector: &str) -> String {
    let mut out = String::with_capacity(selector.len());
    for c in selector.chars() {
        match REPLACEMENTS.iter().find(|(k, _)| *k == c) {
            Some((_, v)) => out.push_str(v),
            None => out.push(c),
        }
    }
    out
}
