use crate::configuration::ContactSettings;
use crate::data_models::ContactSubmission;
use crate::mail::OutgoingEmail;
use crate::traits::ExternalText;
use chrono::{DateTime, Utc};

pub fn admin_notification(
    submission: &ContactSubmission,
    settings: &ContactSettings,
    received_at: DateTime<Utc>,
) -> OutgoingEmail {
    let escaped = submission.escaped();
    let html = format!(
        "<h3>New Contact Form Submission</h3>\n\
         <p><strong>Name:</strong> {}</p>\n\
         <p><strong>Email:</strong> {}</p>\n\
         <p><strong>Phone:</strong> {}</p>\n\
         <p><strong>Message:</strong> {}</p>\n\
         <p><strong>Submission Time:</strong> {}</p>\n",
        escaped.name,
        escaped.email,
        escaped.phone,
        escaped.message,
        received_at.format("%Y-%m-%d %H:%M:%S UTC"),
    );
    OutgoingEmail {
        from: settings.sender.to_owned(),
        to: settings.admin_address.to_owned(),
        subject: format!("New Contact Form Submission from {}", submission.name),
        html,
    }
}

pub fn confirmation(submission: &ContactSubmission, settings: &ContactSettings) -> OutgoingEmail {
    let escaped = submission.escaped();
    let html = format!(
        "<h3>Thank you for reaching out!</h3>\n\
         <p>Dear {},</p>\n\
         <p>We have received your message and will get back to you shortly.</p>\n\
         <p>Here's a copy of your submission:</p>\n\
         <p><strong>Message:</strong> {}</p>\n\
         <hr>\n\
         <p>Best regards,<br>{}</p>\n",
        escaped.name,
        escaped.message,
        submission.escape(&settings.company_name),
    );
    OutgoingEmail {
        from: settings.sender.to_owned(),
        to: submission.email.to_owned(),
        subject: "Thank you for contacting us".to_string(),
        html,
    }
}
