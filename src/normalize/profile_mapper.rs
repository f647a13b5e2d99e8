use serde_json::Value;

use crate::error::ImportResult;
use crate::model::{AccessToken, CurrentUser};
use crate::parse::{image_url, parse_birthday, str_at};

/// Maps the userinfo body to the current user. An absent or blank body
/// yields no user; a body that is not JSON is an error.
pub fn current_user(body: Option<&str>, token: &AccessToken) -> ImportResult<Option<CurrentUser>> {
    let body = match body.filter(|b| !b.trim().is_empty()) {
        Some(b) => b,
        None => return Ok(None),
    };
    let me: Value = serde_json::from_str(body)?;
    Ok(Some(map_profile(&me, token)))
}

pub fn map_profile(me: &Value, token: &AccessToken) -> CurrentUser {
    let id = str_at(me, &["id"]);
    CurrentUser {
        profile_picture: image_url(id.as_deref()),
        id,
        email: str_at(me, &["email"]),
        name: str_at(me, &["name"]),
        first_name: str_at(me, &["given_name"]),
        last_name: str_at(me, &["family_name"]),
        gender: str_at(me, &["gender"]),
        birthday: parse_birthday(str_at(me, &["birthday"]).as_deref()),
        access_token: token.access_token.clone(),
        token_type: token.token_type.clone(),
    }
}
