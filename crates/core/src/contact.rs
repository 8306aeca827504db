//! Contact-form payload and its validation rules.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// MIME types accepted for an attachment: PDF, legacy Word, and OOXML Word.
pub const ALLOWED_ATTACHMENT_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Largest accepted attachment, in bytes (5 MiB).
pub const MAX_ATTACHMENT_BYTES: usize = 5 * 1024 * 1024;

/// Minimum length of the trimmed message, in UTF-16 code units.
const MIN_MESSAGE_UNITS: usize = 10;

/// Lenient `local@domain.tld` shape. Unanchored on purpose: any substring
/// match is accepted.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email regex is valid"));

/// A file attached to a submission.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Original filename, forwarded to the endpoint unchanged.
    pub filename: String,
    /// Declared MIME type.
    pub content_type: String,
    pub data: Vec<u8>,
}

impl Attachment {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("size", &self.data.len())
            .finish()
    }
}

/// One contact-form payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub attachment: Option<Attachment>,
}

impl ContactSubmission {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
            attachment: None,
        }
    }

    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// Returns the text value of `field`, or `None` for [`Field::Attachment`].
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => Some(&self.name),
            Field::Email => Some(&self.email),
            Field::Subject => Some(&self.subject),
            Field::Message => Some(&self.message),
            Field::Attachment => None,
        }
    }

    /// `true` when [`validate`] reports no errors.
    pub fn is_valid(&self) -> bool {
        validate(self).is_empty()
    }
}

/// A contact-form field that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
    Attachment,
}

impl Field {
    /// Returns the form field name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
            Self::Attachment => "attachment",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field error messages. Empty means the submission is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, &'static str>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The message for `field`, if it failed.
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, msg)| (*field, *msg))
    }

    pub(crate) fn insert(&mut self, field: Field, message: &'static str) {
        self.0.insert(field, message);
    }

    pub(crate) fn remove(&mut self, field: Field) {
        self.0.remove(&field);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Strip the characters a browser's `String.prototype.trim` strips: Unicode
/// white space and line terminators plus the byte order mark, but not NEL.
fn trim_blank(value: &str) -> &str {
    value.trim_matches(|c: char| (c.is_whitespace() && c != '\u{85}') || c == '\u{FEFF}')
}

/// Check every field of `submission`.
///
/// Each rule runs on every call; a failing field never hides another
/// field's error.
pub fn validate(submission: &ContactSubmission) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if trim_blank(&submission.name).is_empty() {
        errors.insert(Field::Name, "Name is required");
    }

    if trim_blank(&submission.email).is_empty() {
        errors.insert(Field::Email, "Email is required");
    } else if !EMAIL_RE.is_match(&submission.email) {
        errors.insert(Field::Email, "Please enter a valid email address");
    }

    if trim_blank(&submission.subject).is_empty() {
        errors.insert(Field::Subject, "Subject is required");
    }

    let message = trim_blank(&submission.message);
    if message.is_empty() {
        errors.insert(Field::Message, "Message is required");
    } else if message.encode_utf16().count() < MIN_MESSAGE_UNITS {
        errors.insert(Field::Message, "Message must be at least 10 characters");
    }

    if let Some(message) = submission.attachment.as_ref().and_then(validate_attachment) {
        errors.insert(Field::Attachment, message);
    }

    errors
}

/// Check an attachment on its own. The type rule is checked before the
/// size rule.
pub fn validate_attachment(attachment: &Attachment) -> Option<&'static str> {
    if !ALLOWED_ATTACHMENT_TYPES.contains(&attachment.content_type.as_str()) {
        return Some("Please upload a PDF or Word document");
    }
    if attachment.size() > MAX_ATTACHMENT_BYTES {
        return Some("File size must be less than 5MB");
    }
    None
}
