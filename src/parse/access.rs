use serde_json::Value;

/// Walks `path` through nested objects. Any missing link, or a `null` at the
/// end, yields `None`.
pub fn get_opt<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(value, |node, key| node.get(*key))
        .filter(|v| !v.is_null())
}

/// String found at `path`.
pub fn str_at(value: &Value, path: &[&str]) -> Option<String> {
    get_opt(value, path)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

/// Text node (`{"$t": "..."}`) found at `path`.
pub fn text_at(value: &Value, path: &[&str]) -> Option<String> {
    get_opt(value, path)
        .and_then(|v| v.get("$t"))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

/// Elements of the array at `path`; a missing or non-array node is empty.
pub fn array_at<'a>(value: &'a Value, path: &[&str]) -> &'a [Value] {
    get_opt(value, path)
        .and_then(|v| v.as_array())
        .map(|arr| arr.as_slice())
        .unwrap_or(&[])
}

/// Splits on `sep` and drops trailing empty pieces, so `"a#"` gives `["a"]`
/// and `""` gives nothing.
pub fn split_trailing<'a>(value: &'a str, sep: char) -> Vec<&'a str> {
    let mut parts: Vec<&str> = value.split(sep).collect();
    while parts.last().map(|p| p.is_empty()).unwrap_or(false) {
        parts.pop();
    }
    parts
}

/// The piece after the last `#`, e.g. `home` for `http://schemas.google.com/g/2005#home`.
pub fn last_fragment(value: &str) -> Option<String> {
    split_trailing(value, '#')
        .last()
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_opt_follows_nested_keys() {
        let v = json!({ "a": { "b": { "c": 1 } } });
        assert_eq!(get_opt(&v, &["a", "b", "c"]), Some(&json!(1)));
    }

    #[test]
    fn get_opt_short_circuits_on_missing_link() {
        let v = json!({ "a": { "x": 1 } });
        assert_eq!(get_opt(&v, &["a", "b", "c"]), None);
    }

    #[test]
    fn get_opt_treats_null_as_absent() {
        let v = json!({ "a": null });
        assert_eq!(get_opt(&v, &["a"]), None);
    }

    #[test]
    fn get_opt_through_non_object_is_absent() {
        let v = json!({ "a": "text" });
        assert_eq!(get_opt(&v, &["a", "b"]), None);
    }

    #[test]
    fn text_at_reads_dollar_t() {
        let v = json!({ "gd$name": { "gd$fullName": { "$t": "Jane Doe" } } });
        assert_eq!(text_at(&v, &["gd$name", "gd$fullName"]), Some("Jane Doe".into()));
    }

    #[test]
    fn array_at_missing_is_empty() {
        let v = json!({});
        assert!(array_at(&v, &["gd$email"]).is_empty());
    }

    #[test]
    fn split_trailing_drops_trailing_empties_only() {
        assert_eq!(split_trailing("--05-17", '-'), vec!["", "", "05", "17"]);
        assert_eq!(split_trailing("1990-05-", '-'), vec!["1990", "05"]);
        assert!(split_trailing("", '-').is_empty());
    }

    #[test]
    fn last_fragment_takes_text_after_hash() {
        assert_eq!(
            last_fragment("http://schemas.google.com/g/2005#work"),
            Some("work".into())
        );
        assert_eq!(last_fragment("plain"), Some("plain".into()));
        assert_eq!(last_fragment(""), None);
    }
}
