//! Field-level rewrites shared by the dataset conversions.

pub fn underscores_to_spaces(name: &str) -> String {
    name.replace('_', " ")
}

pub fn strip_angle_brackets(name: &str) -> &str {
    name.trim_matches(|c: char| c == '<' || c == '>')
}

/// GDELT actor names carry their bracketed qualifier at the end: `NIGERIA (NGA)`.
pub fn drop_bracket_suffix(name: &str) -> &str {
    match name.find('(') {
        Some(ix) => name[..ix].trim(),
        None => name,
    }
}

/// Titlecase mapping where it differs from the uppercase one: Latin digraphs,
/// sharp s and the Latin ligatures. Other scripts fall back to uppercase.
fn titlecase_special(c: char) -> Option<&'static str> {
    Some(match c {
        '\u{01C4}'..='\u{01C6}' => "\u{01C5}",
        '\u{01C7}'..='\u{01C9}' => "\u{01C8}",
        '\u{01CA}'..='\u{01CC}' => "\u{01CB}",
        '\u{01F1}'..='\u{01F3}' => "\u{01F2}",
        '\u{00DF}' => "Ss",
        '\u{FB00}' => "Ff",
        '\u{FB01}' => "Fi",
        '\u{FB02}' => "Fl",
        '\u{FB03}' => "Ffi",
        '\u{FB04}' => "Ffl",
        '\u{FB05}' | '\u{FB06}' => "St",
        _ => return None,
    })
}

/// Title-cases the first cased character of every word and lower-cases the
/// rest. Any character without case (digits, punctuation, spaces) ends a word.
pub fn title_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut in_word = false;
    for c in name.chars() {
        let cased = c.is_uppercase() || c.is_lowercase() || titlecase_special(c).is_some();
        if in_word {
            result.extend(c.to_lowercase());
        } else if let Some(title) = titlecase_special(c) {
            result.push_str(title);
        } else {
            result.extend(c.to_uppercase());
        }
        in_word = cased;
    }
    result
}

/// Floor division to a coarser granularity.
pub fn rescale(t: i64, step: i64) -> i64 {
    t.div_euclid(step)
}

/// Shift a 1-based time index to 0-based. `None` when `t` is `i64::MIN`.
pub fn rebase(t: i64) -> Option<i64> {
    t.checked_sub(1)
}
