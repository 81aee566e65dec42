use crate::configuration::{MailSettings, SmtpSecurity};
use crate::mail::{MailError, Mailer, OutgoingEmail};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl TryFrom<&MailSettings> for SmtpMailer {
    type Error = MailError;

    fn try_from(settings: &MailSettings) -> Result<Self, Self::Error> {
        let mut builder = match settings.security {
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?,
            SmtpSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            }
            SmtpSecurity::None => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
            }
        };
        if let Some(port) = settings.port {
            builder = builder.port(port);
        }
        if !settings.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                settings.username.to_owned(),
                settings.password.to_owned(),
            ));
        }
        Ok(Self {
            transport: builder.build(),
        })
    }
}

fn mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .parse::<Mailbox>()
        .map_err(|source| MailError::InvalidAddress {
            address: address.to_string(),
            source,
        })
}

fn build_message(email: &OutgoingEmail) -> Result<Message, MailError> {
    let message = Message::builder()
        .from(mailbox(&email.from)?)
        .to(mailbox(&email.to)?)
        .subject(email.subject.as_str())
        .header(ContentType::TEXT_HTML)
        .body(email.html.to_owned())?;
    Ok(message)
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn verify(&self) -> Result<(), MailError> {
        if self.transport.test_connection().await? {
            Ok(())
        } else {
            Err(MailError::ConnectionRejected)
        }
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let message = build_message(email)?;
        self.transport.send(message).await?;
        debug!("smtp accepted mail to {}", email.to);
        Ok(())
    }
}
