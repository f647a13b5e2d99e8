use serde_json::Value;
use tracing::{debug, trace};

use crate::error::ImportResult;
use crate::model::*;
use crate::parse::access::split_trailing;
use crate::parse::*;

// Keys of a contacts feed entry.
const ID: &str = "id";
const NAME: &str = "gd$name";
const EMAIL: &str = "gd$email";
const BIRTHDAY: &str = "gContact$birthday";
const GENDER: &str = "gContact$gender";
const RELATION: &str = "gContact$relation";
const POSTAL_ADDRESS: &str = "gd$structuredPostalAddress";
const PHONE_NUMBER: &str = "gd$phoneNumber";
const WEBSITE: &str = "gContact$website";
const EVENT: &str = "gContact$event";
const ORGANIZATION: &str = "gd$organization";
const IM: &str = "gd$im";
const NICKNAME: &str = "gContact$nickname";
const CONTENT: &str = "content";

const PROFILE_REL: &str = "profile";
const ANNIVERSARY_REL: &str = "anniversary";

/// Parses a contacts feed body into named contacts, in feed order.
///
/// A body that is not JSON is an error. A body without `feed.entry` is an
/// empty feed.
pub fn normalize_contacts(body: &str) -> ImportResult<Vec<Contact>> {
    let json: Value = serde_json::from_str(body)?;
    Ok(normalize_feed(&json))
}

/// The raw entries of a feed; missing `feed` or `entry` gives none.
pub fn feed_entries(json: &Value) -> &[Value] {
    array_at(json, &["feed", "entry"])
}

/// Normalizes every entry and drops the ones without a name.
pub fn normalize_feed(json: &Value) -> Vec<Contact> {
    let entries = feed_entries(json);
    let mut contacts = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let contact = parse_entry(entry);
        if contact.name.is_some() {
            contacts.push(contact);
        } else {
            trace!(index, id = ?contact.id, "dropping contact without a name");
        }
    }
    debug!(
        entries = entries.len(),
        named = contacts.len(),
        "normalized contacts feed"
    );
    contacts
}

/// Builds one contact from a feed entry. Never fails; missing nodes leave
/// the matching fields empty.
pub fn parse_entry(entry: &Value) -> Contact {
    let emails = parse_emails(entry);
    let email = emails.first().and_then(|e| e.email.clone());
    let names = resolve_name(entry, email.as_deref());

    let phones = parse_phones(entry);
    let phone = phones.first().and_then(|p| p.number.clone());

    let addresses = parse_addresses(entry);
    let first_address = addresses.first();

    let websites = parse_websites(entry);
    let website = websites.last().and_then(|w| w.url.clone());
    let (id, profile_picture) =
        resolve_picture(entry, &websites, text_at(entry, &[ID]), email.as_deref());

    let dates = parse_events(entry);
    let anniversaries: Vec<DateEntry> = dates
        .iter()
        .filter(|d| d.label.as_deref() == Some(ANNIVERSARY_REL))
        .cloned()
        .collect();

    let (birthday, birthdays) = parse_birthdays(entry);
    let organization = array_at(entry, &[ORGANIZATION]).first();

    Contact {
        id,
        name: names.name,
        first_name: names.first,
        middle_name: names.middle,
        last_name: names.last,

        email,
        emails,

        phone: phone.clone(),
        phone_number: phone,
        phone_numbers: phones.clone(),
        phones,

        address1: first_address.and_then(|a| a.line1.clone()),
        address2: first_address.and_then(|a| a.line2.clone()),
        address3: first_address.and_then(|a| a.line3.clone()),
        city: first_address.and_then(|a| a.city.clone()),
        region: first_address.and_then(|a| a.region.clone()),
        postcode: first_address.and_then(|a| a.postcode.clone()),
        country: first_address.and_then(|a| a.country.clone()),
        addresses,

        website,
        websites,

        birthday,
        birthdays,
        anniversary: anniversaries.first().cloned(),
        anniversaries,
        dates,
        messenger_ids: parse_messenger_ids(entry),

        gender: str_at(entry, &[GENDER, "value"]),
        company: organization.and_then(|org| text_at(org, &["gd$orgName"])),
        position: organization.and_then(|org| text_at(org, &["gd$orgTitle"])),
        nickname: text_at(entry, &[NICKNAME]),
        notes: text_at(entry, &[CONTENT]),
        relation: parse_relation(entry),
        profile_picture,
    }
}

struct ResolvedName {
    name: Option<String>,
    first: Option<String>,
    middle: Option<String>,
    last: Option<String>,
}

/// Full name, else given + family name. A name that is really an email
/// address, or no name at all next to an email, is replaced by a name
/// guessed from that address; an unsplittable address yields its local part.
fn resolve_name(entry: &Value, email: Option<&str>) -> ResolvedName {
    let mut first = normalize_name(text_at(entry, &[NAME, "gd$givenName"]).as_deref());
    let mut last = normalize_name(text_at(entry, &[NAME, "gd$familyName"]).as_deref());
    let middle = normalize_name(text_at(entry, &[NAME, "gd$additionalName"]).as_deref());
    let mut name = normalize_name(text_at(entry, &[NAME, "gd$fullName"]).as_deref())
        .or_else(|| full_name(first.as_deref(), last.as_deref()));

    let derive_from = match &name {
        Some(n) if n.contains('@') => Some(n.clone()),
        Some(_) => None,
        None => email.map(|e| e.to_string()),
    };
    if let Some(source) = derive_from {
        let derived = email_to_name(&source);
        first = derived.as_ref().and_then(|d| d.first.clone());
        last = derived.as_ref().and_then(|d| d.last.clone());
        name = derived.map(|d| d.name);
    }

    ResolvedName {
        name,
        first,
        middle,
        last,
    }
}

fn parse_emails(entry: &Value) -> Vec<EmailEntry> {
    array_at(entry, &[EMAIL])
        .iter()
        .map(|item| {
            let label = label_of(item);
            EmailEntry {
                kind: label.clone(),
                label,
                email: str_at(item, &["address"]),
            }
        })
        .collect()
}

fn parse_phones(entry: &Value) -> Vec<PhoneEntry> {
    array_at(entry, &[PHONE_NUMBER])
        .iter()
        .map(|item| {
            let label = label_of(item);
            PhoneEntry {
                kind: label.clone(),
                label,
                number: str_at(item, &["$t"]),
            }
        })
        .collect()
}

fn parse_addresses(entry: &Value) -> Vec<PostalAddress> {
    array_at(entry, &[POSTAL_ADDRESS])
        .iter()
        .map(parse_address)
        .collect()
}

fn parse_address(item: &Value) -> PostalAddress {
    let label = label_of(item);
    let street =
        text_at(item, &["gd$street"]).or_else(|| text_at(item, &["gd$formattedAddress"]));
    let (line1, line2, line3) = split_street(street.as_deref());
    PostalAddress {
        kind: label.clone(),
        label,
        line1,
        line2,
        line3,
        city: text_at(item, &["gd$city"]),
        region: text_at(item, &["gd$region"]),
        postcode: text_at(item, &["gd$postcode"]),
        country: text_at(item, &["gd$country"]),
    }
}

/// Splits multi-line street text into two lines plus the rest joined by `", "`.
pub fn split_street(street: Option<&str>) -> (Option<String>, Option<String>, Option<String>) {
    let lines = match street {
        Some(s) => split_trailing(s, '\n'),
        None => return (None, None, None),
    };
    let line1 = lines.first().map(|l| l.to_string());
    let line2 = lines.get(1).map(|l| l.to_string());
    let line3 = lines
        .get(2..)
        .filter(|rest| !rest.is_empty())
        .map(|rest| rest.join(", "));
    (line1, line2, line3)
}

fn parse_websites(entry: &Value) -> Vec<WebsiteEntry> {
    array_at(entry, &[WEBSITE])
        .iter()
        .map(|item| WebsiteEntry {
            label: str_at(item, &["rel"]),
            url: str_at(item, &["href"]),
        })
        .collect()
}

/// Only entries listing websites get a picture. A leading `profile` website
/// also replaces the contact id with the profile's id.
fn resolve_picture(
    entry: &Value,
    websites: &[WebsiteEntry],
    id: Option<String>,
    email: Option<&str>,
) -> (Option<String>, Option<String>) {
    if get_opt(entry, &[WEBSITE]).is_none() {
        return (id, None);
    }
    match websites.first() {
        Some(site) if site.label.as_deref() == Some(PROFILE_REL) => {
            let profile_id = contact_id(site.url.as_deref());
            let picture = image_url(profile_id.as_deref());
            (profile_id, picture)
        }
        _ => (id, image_url_from_email(email)),
    }
}

fn parse_events(entry: &Value) -> Vec<DateEntry> {
    array_at(entry, &[EVENT])
        .iter()
        .map(|event| DateEntry {
            label: str_at(event, &["rel"]).or_else(|| str_at(event, &["label"])),
            value: parse_birthday(str_at(event, &["gd$when", "startTime"]).as_deref()),
        })
        .collect()
}

/// The birthday node is normally `{"when": "..."}`. Every string value it
/// carries (or every `when` of a list of them) becomes a record, and the
/// last one parsed is the contact's birthday.
fn parse_birthdays(entry: &Value) -> (Option<Birthday>, Vec<BirthdayRecord>) {
    let node = match get_opt(entry, &[BIRTHDAY]) {
        Some(node) => node,
        None => return (None, Vec::new()),
    };

    let mut birthday = parse_birthday(str_at(node, &["when"]).as_deref());
    let raw: Vec<&str> = match node {
        Value::Object(fields) => fields.values().filter_map(|v| v.as_str()).collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.get("when").and_then(|v| v.as_str()))
            .collect(),
        _ => Vec::new(),
    };

    let mut birthdays = Vec::with_capacity(raw.len());
    for value in raw {
        let parsed = parse_birthday(Some(value));
        birthday = parsed.clone();
        birthdays.push(BirthdayRecord { value: parsed });
    }
    (birthday, birthdays)
}

fn parse_relation(entry: &Value) -> Option<String> {
    match get_opt(entry, &[RELATION])? {
        Value::Array(items) => items.first().and_then(|r| str_at(r, &["rel"])),
        single => str_at(single, &["rel"]),
    }
}

fn parse_messenger_ids(entry: &Value) -> Vec<MessengerId> {
    array_at(entry, &[IM])
        .iter()
        .map(|item| MessengerId {
            kind: str_at(item, &["protocol"])
                .and_then(|p| last_fragment(&p))
                .map(|t| t.to_uppercase()),
            value: str_at(item, &["address"]),
        })
        .collect()
}
