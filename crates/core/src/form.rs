//! Mutable state of one contact form instance.
//!
//! A [`ContactForm`] is owned by exactly one controller. Field edits clear
//! that field's error; a submit attempt re-validates everything and gates
//! on the in-flight flag so at most one request is outstanding.

use thiserror::Error;
use tracing::debug;

use crate::contact::{
    Attachment, ContactSubmission, Field, ValidationErrors, validate, validate_attachment,
};

/// Reasons a submit attempt is refused before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A previous submission has not resolved yet.
    #[error("a submission is already in flight")]
    InFlight,

    /// One or more fields failed validation.
    #[error("invalid submission: {0}")]
    Invalid(ValidationErrors),
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    values: ContactSubmission,
    errors: ValidationErrors,
    submitting: bool,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current field values.
    pub fn values(&self) -> &ContactSubmission {
        &self.values
    }

    /// Errors from the last validation, minus fields edited since.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.errors.get(field)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.values.name = value.into();
        self.errors.remove(Field::Name);
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.values.email = value.into();
        self.errors.remove(Field::Email);
    }

    pub fn set_subject(&mut self, value: impl Into<String>) {
        self.values.subject = value.into();
        self.errors.remove(Field::Subject);
    }

    pub fn set_message(&mut self, value: impl Into<String>) {
        self.values.message = value.into();
        self.errors.remove(Field::Message);
    }

    /// Check and keep a newly picked file.
    ///
    /// A rejected file is not kept; any previously accepted file stays
    /// selected and the attachment error is set.
    pub fn select_attachment(&mut self, attachment: Attachment) -> Result<(), &'static str> {
        if let Some(message) = validate_attachment(&attachment) {
            debug!(
                filename = %attachment.filename,
                content_type = %attachment.content_type,
                size = attachment.size(),
                "attachment rejected"
            );
            self.errors.insert(Field::Attachment, message);
            return Err(message);
        }
        self.values.attachment = Some(attachment);
        self.errors.remove(Field::Attachment);
        Ok(())
    }

    pub fn clear_attachment(&mut self) {
        self.values.attachment = None;
        self.errors.remove(Field::Attachment);
    }

    /// Re-run every rule, replacing the stored errors. Returns `true` when
    /// the form is valid.
    pub fn validate(&mut self) -> bool {
        self.errors = validate(&self.values);
        self.errors.is_empty()
    }

    /// Start a submit attempt.
    ///
    /// On success the form is marked as submitting and a snapshot of the
    /// payload is returned; the caller must report the result through
    /// [`finish_submit`](Self::finish_submit).
    pub fn begin_submit(&mut self) -> Result<ContactSubmission, FormError> {
        if self.submitting {
            debug!("submit ignored, previous submission still in flight");
            return Err(FormError::InFlight);
        }
        if !self.validate() {
            debug!(errors = self.errors.len(), "submit blocked by validation");
            return Err(FormError::Invalid(self.errors.clone()));
        }
        self.submitting = true;
        Ok(self.values.clone())
    }

    /// Record the result of the attempt started by
    /// [`begin_submit`](Self::begin_submit).
    ///
    /// A successful attempt resets the form to empty. A failed one keeps
    /// every value so the user can retry.
    pub fn finish_submit(&mut self, succeeded: bool) {
        self.submitting = false;
        if succeeded {
            self.values = ContactSubmission::default();
            self.errors = ValidationErrors::default();
        }
    }
}
