use folio_core::ContactSubmission;

use crate::{ContactReceipt, Error, FolioClient};

/// Something that can deliver a contact submission.
///
/// [`FolioClient`] is the HTTP implementation. The session is generic over
/// this trait so a presentation layer can swap in a different channel.
pub trait ContactTransport: Send + Sync {
    /// Deliver one submission and report the backend's answer.
    fn send(
        &self,
        submission: &ContactSubmission,
    ) -> impl std::future::Future<Output = Result<ContactReceipt, Error>> + Send;
}

impl ContactTransport for FolioClient {
    async fn send(&self, submission: &ContactSubmission) -> Result<ContactReceipt, Error> {
        self.submit(submission).await
    }
}
