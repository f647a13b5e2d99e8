pub mod contact;
pub mod user;
pub mod token;

// Re-exports for convenience
pub use contact::{
    Birthday, BirthdayRecord, Contact, DateEntry, EmailEntry, MessengerId, PhoneEntry,
    PostalAddress, WebsiteEntry,
};
pub use user::CurrentUser;
pub use token::AccessToken;
