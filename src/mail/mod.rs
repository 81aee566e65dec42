use async_trait::async_trait;

mod errors;
mod smtp;

pub use errors::MailError;
pub use smtp::SmtpMailer;

/// A message ready to hand to a transport. Addresses may carry a display
/// name (`Name <user@example.com>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Something that can deliver mail. The submission handler only ever talks to
/// this trait, so tests and alternative providers plug in here.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Checks that the transport is reachable and accepts our credentials.
    async fn verify(&self) -> Result<(), MailError>;

    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}
