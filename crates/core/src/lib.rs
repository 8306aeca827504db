//! Core types and pure logic for the Folio portfolio site.
//!
//! Everything in this crate is free of I/O: the static content catalog,
//! the project filter, contact-form validation, and the form state record
//! a presentation layer drives. Network submission lives in `folio-client`.

pub mod catalog;
pub mod contact;
pub mod filter;
pub mod form;
pub mod notification;
pub mod profile;
pub mod project;

pub use catalog::{Catalog, CatalogError};
pub use contact::{
    ALLOWED_ATTACHMENT_TYPES, Attachment, ContactSubmission, Field, MAX_ATTACHMENT_BYTES,
    ValidationErrors, validate, validate_attachment,
};
pub use filter::{ALL_CATEGORIES, FilterSummary, ProjectQuery, categories, filter};
pub use form::{ContactForm, FormError};
pub use notification::{Notification, NotificationVariant};
pub use profile::{Experience, SocialLink, Skill};
pub use project::Project;
