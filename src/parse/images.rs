use sha2::{Digest, Sha256};

pub const PROFILE_PICTURE_URL: &str = "https://profiles.google.com/s2/photos/profile/";
pub const GRAVATAR_URL: &str = "https://www.gravatar.com/avatar/";

/// Profile picture for an account id.
pub fn image_url(account_id: Option<&str>) -> Option<String> {
    let id = account_id.filter(|id| !id.is_empty())?;
    Some(format!("{}{}", PROFILE_PICTURE_URL, id))
}

/// Picture URL keyed by the SHA-256 of the normalized email address.
pub fn image_url_from_email(email: Option<&str>) -> Option<String> {
    let normalized = email?.trim().to_lowercase();
    let (user, domain) = normalized.split_once('@')?;
    if user.is_empty() || domain.is_empty() {
        return None;
    }
    let digest = Sha256::digest(normalized.as_bytes());
    Some(format!("{}{:x}", GRAVATAR_URL, digest))
}

/// Last path segment of a profile URL, used as the contact id.
pub fn contact_id(profile_url: Option<&str>) -> Option<String> {
    profile_url?
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_string())
}
