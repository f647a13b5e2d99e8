use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A calendar date that may be missing its year (`--MM-DD` in the feed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Birthday {
    pub year: Option<String>,
    pub month: String,
    pub day: String,
}

impl Birthday {
    /// Converts a full date to a `NaiveDate`. Year-less or invalid dates yield `None`.
    pub fn to_date(&self) -> Option<NaiveDate> {
        let year = self.year.as_deref()?.parse().ok()?;
        let month = self.month.parse().ok()?;
        let day = self.day.parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthdayRecord {
    pub value: Option<Birthday>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailEntry {
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneEntry {
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub number: Option<String>,
}

/// A postal address split into up to three street lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub line3: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteEntry {
    pub label: Option<String>,
    pub url: Option<String>,
}

/// A labelled date such as an anniversary or a custom event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateEntry {
    pub label: Option<String>,
    pub value: Option<Birthday>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessengerId {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub value: Option<String>,
}

/// The provider-agnostic contact record.
///
/// Singular fields (`email`, `phone`, `address1`, ...) are legacy aliases of
/// the first element of the matching list. Two exceptions: `website` holds
/// the last website seen and `birthday` the last birthday sub-record parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Option<String>,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,

    pub email: Option<String>,
    pub emails: Vec<EmailEntry>,

    pub phone: Option<String>,
    pub phone_number: Option<String>,
    pub phones: Vec<PhoneEntry>,
    pub phone_numbers: Vec<PhoneEntry>,

    pub address1: Option<String>,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
    pub addresses: Vec<PostalAddress>,

    pub website: Option<String>,
    pub websites: Vec<WebsiteEntry>,

    pub birthday: Option<Birthday>,
    pub birthdays: Vec<BirthdayRecord>,
    pub anniversary: Option<DateEntry>,
    pub anniversaries: Vec<DateEntry>,
    pub dates: Vec<DateEntry>,
    pub messenger_ids: Vec<MessengerId>,

    pub gender: Option<String>,
    pub company: Option<String>,
    pub position: Option<String>,
    pub nickname: Option<String>,
    pub notes: Option<String>,
    pub relation: Option<String>,
    pub profile_picture: Option<String>,
}

impl Contact {
    /// Key used to recognise the same person twice in one import:
    /// email, else profile picture, else name.
    pub fn dedup_key(&self) -> Option<&str> {
        self.email
            .as_deref()
            .or(self.profile_picture.as_deref())
            .or(self.name.as_deref())
    }
}
