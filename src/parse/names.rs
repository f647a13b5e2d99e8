/// Trims and squeezes runs of spaces. A blank name is `None`.
pub fn normalize_name(name: Option<&str>) -> Option<String> {
    let squeezed = name?
        .split(' ')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let trimmed = squeezed.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Joins whichever of first and last name are present.
pub fn full_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    let joined = [first, last]
        .iter()
        .flatten()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

/// A name guessed from an email address or user name. `first`/`last` are
/// only set when the local part could be split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedName {
    pub first: Option<String>,
    pub last: Option<String>,
    pub name: String,
}

/// Guesses a name from the local part of an address.
///
/// `jane.doe`, `jane_doe` and `jane-doe` split at the separator; `janeDoe`
/// splits at the case change. A local part that cannot be split becomes the
/// name as is. A blank local part gives `None`.
pub fn email_to_name(value: &str) -> Option<DerivedName> {
    let local = value.split('@').next().unwrap_or(value).trim();
    if let Some((first, last)) = split_at_separator(local).or_else(|| split_at_case_change(local)) {
        return Some(DerivedName {
            name: format!("{} {}", first, last),
            first: Some(first),
            last: Some(last),
        });
    }
    Some(DerivedName {
        first: None,
        last: None,
        name: normalize_name(Some(local))?,
    })
}

fn is_name_separator(c: char) -> bool {
    matches!(c, '.' | '_' | '-')
}

fn split_at_separator(local: &str) -> Option<(String, String)> {
    let chars: Vec<char> = local.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if !is_name_separator(*c) {
            continue;
        }
        let before = letters_ending_at(&chars, i);
        let after = letters_starting_at(&chars, i + 1);
        if !before.is_empty() && !after.is_empty() {
            return Some((before, after));
        }
    }
    None
}

fn split_at_case_change(local: &str) -> Option<(String, String)> {
    let chars: Vec<char> = local.chars().collect();
    for i in 1..chars.len() {
        if chars[i - 1].is_ascii_lowercase() && chars[i].is_ascii_uppercase() {
            let before = letters_ending_at(&chars, i);
            let after = letters_starting_at(&chars, i);
            return Some((before, after));
        }
    }
    None
}

/// The run of ASCII letters immediately before index `end`.
fn letters_ending_at(chars: &[char], end: usize) -> String {
    let start = chars[..end]
        .iter()
        .rposition(|c| !c.is_ascii_alphabetic())
        .map(|p| p + 1)
        .unwrap_or(0);
    chars[start..end].iter().collect()
}

/// The run of ASCII letters starting at index `start`.
fn letters_starting_at(chars: &[char], start: usize) -> String {
    chars
        .iter()
        .skip(start)
        .take_while(|c| c.is_ascii_alphabetic())
        .collect()
}
