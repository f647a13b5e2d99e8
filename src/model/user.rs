use serde::{Deserialize, Serialize};

use super::contact::Birthday;

/// The account that authorized the import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub birthday: Option<Birthday>,
    pub profile_picture: Option<String>,
    pub access_token: String,
    pub token_type: String,
}
