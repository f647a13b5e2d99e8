use crate::model::Birthday;

use super::access::split_trailing;

/// Parses `YYYY-MM-DD` or the year-less `--MM-DD`.
///
/// The shape is decided by the number of `-` separated tokens: four tokens
/// (two leading empties) is a year-less date, three is a full date. Anything
/// else is not a birthday. An empty year token counts as no year.
pub fn parse_birthday(value: Option<&str>) -> Option<Birthday> {
    let tokens = split_trailing(value?, '-');
    let (year, month, day) = match tokens.as_slice() {
        [_, _, month, day] => (None, *month, *day),
        [year, month, day] => (Some(*year), *month, *day),
        _ => return None,
    };
    if month.is_empty() || day.is_empty() {
        return None;
    }
    Some(Birthday {
        year: year.filter(|y| !y.is_empty()).map(|y| y.to_string()),
        month: month.to_string(),
        day: day.to_string(),
    })
}
