use crate::configuration::{ContactSettings, Environment, Settings};
use crate::data_models::{ContactSubmission, SubmissionReceipt};
use crate::errors::Error;
use crate::mail::{MailError, Mailer, SmtpMailer};
use crate::notifications;
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub mailer: Arc<dyn Mailer>,
    pub contact: ContactSettings,
    pub environment: Environment,
}

pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl AppState {
    pub fn new(mailer: Arc<dyn Mailer>, contact: ContactSettings, environment: Environment) -> Self {
        Self {
            mailer,
            contact,
            environment,
        }
    }

    pub fn try_from(settings: &Settings, environment: Environment) -> Result<Self, Error> {
        let mailer = SmtpMailer::try_from(&settings.mail)?;
        Ok(Self::new(
            Arc::new(mailer),
            settings.mail.contact_settings(),
            environment,
        ))
    }

    /// Sends the admin notification and the confirmation at the same time and
    /// waits for both. The submission only counts as delivered if both went out.
    pub async fn submit(
        &self,
        submission: &ContactSubmission,
    ) -> Result<SubmissionReceipt, MailError> {
        let admin = notifications::admin_notification(submission, &self.contact, Utc::now());
        let confirmation = notifications::confirmation(submission, &self.contact);

        let (admin_result, confirmation_result) = tokio::join!(
            self.mailer.send(&admin),
            self.mailer.send(&confirmation)
        );
        if let Err(err) = admin_result.and(confirmation_result) {
            error!("Error sending email: {err}");
            return Err(err);
        }

        info!("contact form from {} delivered", submission.email);
        Ok(SubmissionReceipt {
            name: submission.name.to_owned(),
            email: submission.email.to_owned(),
            phone: submission.phone.to_owned(),
            submitted_at: iso_timestamp(),
        })
    }

    pub async fn verify_mailer(&self) -> Result<(), MailError> {
        self.mailer.verify().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::OutgoingEmail;
    use async_trait::async_trait;
    use chrono::DateTime;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<OutgoingEmail>>,
        fail_for: Option<String>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn verify(&self) -> Result<(), MailError> {
            Ok(())
        }

        async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
            self.sent.lock().unwrap().push(email.clone());
            match &self.fail_for {
                Some(to) if *to == email.to => {
                    Err(MailError::Transport("mailbox unavailable".to_string()))
                }
                _ => Ok(()),
            }
        }
    }

    fn create_test_state(mailer: Arc<RecordingMailer>) -> AppState {
        let contact = ContactSettings {
            sender: "owner@example.com".to_string(),
            admin_address: "owner@example.com".to_string(),
            company_name: "Example Co".to_string(),
        };
        AppState::new(mailer, contact, Environment::Development)
    }

    fn create_test_submission() -> ContactSubmission {
        ContactSubmission {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: "1234567890".to_string(),
            message: "Hello there, general kenobi".to_string(),
        }
    }

    #[tokio::test]
    async fn submit_sends_admin_and_confirmation() {
        let mailer = Arc::new(RecordingMailer::default());
        let state = create_test_state(mailer.clone());

        let receipt = state
            .submit(&create_test_submission())
            .await
            .expect("Failed to submit");

        assert_eq!(receipt.name, "Ada");
        assert_eq!(receipt.email, "ada@example.com");
        assert_eq!(receipt.phone, "1234567890");
        assert!(DateTime::parse_from_rfc3339(&receipt.submitted_at).is_ok());
        assert!(receipt.submitted_at.ends_with('Z'));

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        let mut recipients = sent.iter().map(|e| e.to.as_str()).collect::<Vec<_>>();
        recipients.sort();
        assert_eq!(recipients, vec!["ada@example.com", "owner@example.com"]);
    }

    #[tokio::test]
    async fn submit_fails_when_confirmation_fails() {
        let mailer = Arc::new(RecordingMailer {
            fail_for: Some("ada@example.com".to_string()),
            ..Default::default()
        });
        let state = create_test_state(mailer.clone());

        let result = state.submit(&create_test_submission()).await;

        assert_eq!(
            result.expect_err("Partial delivery must fail").to_string(),
            "mailbox unavailable"
        );
        assert_eq!(mailer.sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn submit_does_not_deduplicate() {
        let mailer = Arc::new(RecordingMailer::default());
        let state = create_test_state(mailer.clone());
        let submission = create_test_submission();

        state.submit(&submission).await.expect("Failed to submit");
        state.submit(&submission).await.expect("Failed to submit");

        assert_eq!(mailer.sent.lock().unwrap().len(), 4);
    }
}
