pub mod access;
pub mod label;
pub mod birthday;
pub mod names;
pub mod images;

pub use access::{array_at, get_opt, last_fragment, str_at, text_at};
pub use birthday::parse_birthday;
pub use images::{contact_id, image_url, image_url_from_email};
pub use label::label_of;
pub use names::{email_to_name, full_name, normalize_name, DerivedName};
