//! One contact form wired to a transport.

use folio_core::{ContactForm, FormError, Notification, ValidationErrors};
use tracing::{info, instrument, warn};

use crate::transport::ContactTransport;

/// Result of one call to [`ContactSession::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent. Errors are also stored on the form.
    Rejected(ValidationErrors),
    /// A previous attempt has not settled; nothing was sent.
    InFlight,
    /// The backend accepted the message and the form was reset.
    Sent(Notification),
    /// The request failed; the form keeps its values.
    Failed(Notification),
}

impl SubmitOutcome {
    /// The notification to show, if the attempt reached the transport.
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            Self::Sent(n) | Self::Failed(n) => Some(n),
            Self::Rejected(_) | Self::InFlight => None,
        }
    }
}

/// A contact form together with the transport that delivers it.
#[derive(Debug)]
pub struct ContactSession<T> {
    form: ContactForm,
    transport: T,
}

impl<T: ContactTransport> ContactSession<T> {
    pub fn new(transport: T) -> Self {
        Self {
            form: ContactForm::new(),
            transport,
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Mutable access for field edits and attachment selection.
    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run one submit attempt: validate, send once, settle the form.
    ///
    /// Dropping the returned future before it completes settles the form as
    /// failed, so a later attempt is not blocked.
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> SubmitOutcome {
        let submission = match self.form.begin_submit() {
            Ok(submission) => submission,
            Err(FormError::InFlight) => return SubmitOutcome::InFlight,
            Err(FormError::Invalid(errors)) => return SubmitOutcome::Rejected(errors),
        };

        let pending = Pending {
            form: &mut self.form,
            settled: false,
        };

        match self.transport.send(&submission).await {
            Ok(receipt) => {
                pending.settle(true);
                info!(id = ?receipt.id(), "contact message sent");
                SubmitOutcome::Sent(Notification::sent())
            }
            Err(err) => {
                pending.settle(false);
                warn!(error = %err, "contact message not sent");
                SubmitOutcome::Failed(Notification::failed(&err.user_message()))
            }
        }
    }
}

/// Settles an in-flight form exactly once, as failed if dropped unsettled.
struct Pending<'a> {
    form: &'a mut ContactForm,
    settled: bool,
}

impl Pending<'_> {
    fn settle(mut self, succeeded: bool) {
        self.form.finish_submit(succeeded);
        self.settled = true;
    }
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.form.finish_submit(false);
        }
    }
}
