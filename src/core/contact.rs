use crate::config::MailConfig;
use crate::domain::model::{ContactRequest, OutboundMail};
use crate::domain::ports::Mailer;
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::is_valid_email;

pub const MIN_MESSAGE_LENGTH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    Sent,
    /// Honeypot tripped: reported to the caller as success, nothing
    /// forwarded.
    Discarded,
}

pub struct ContactService<M: Mailer> {
    mailer: M,
    settings: MailConfig,
}

impl<M: Mailer> ContactService<M> {
    pub fn new(mailer: M, settings: MailConfig) -> Self {
        Self { mailer, settings }
    }

    pub async fn submit(&self, request: ContactRequest) -> Result<ContactOutcome> {
        validate_request(&request)?;

        if !trimmed(&request.website).is_empty() {
            tracing::info!("Honeypot field was filled in, dropping submission");
            return Ok(ContactOutcome::Discarded);
        }

        let mail = self.compose(&request);
        self.mailer.send(&mail).await?;

        tracing::info!("Contact message forwarded to {}", self.settings.to_address);
        Ok(ContactOutcome::Sent)
    }

    fn compose(&self, request: &ContactRequest) -> OutboundMail {
        let name = trimmed(&request.name);
        let email = trimmed(&request.email);
        let message = trimmed(&request.message);
        let project_type = match trimmed(&request.project_type) {
            "" => "Not specified",
            other => other,
        };
        let received = chrono::Utc::now().format("%Y-%m-%d %H:%M UTC");

        let text = format!(
            "New inquiry from the website contact form.\n\n\
             Name: {name}\n\
             Email: {email}\n\
             Project type: {project_type}\n\
             Received: {received}\n\n\
             Message:\n{message}\n"
        );

        OutboundMail {
            from: self.settings.from_address.clone(),
            to: vec![self.settings.to_address.clone()],
            subject: format!("New project inquiry from {name}"),
            text,
        }
    }
}

pub fn validate_request(request: &ContactRequest) -> Result<()> {
    let name = trimmed(&request.name);
    let email = trimmed(&request.email);
    let message = trimmed(&request.message);

    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(SiteError::ValidationError {
            message: "Name, email and message are required".to_string(),
        });
    }

    if !is_valid_email(email) {
        return Err(SiteError::ValidationError {
            message: "Please provide a valid email address".to_string(),
        });
    }

    if message.chars().count() < MIN_MESSAGE_LENGTH {
        return Err(SiteError::ValidationError {
            message: format!("Message must be at least {MIN_MESSAGE_LENGTH} characters"),
        });
    }

    Ok(())
}

fn trimmed(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockMailer {
        sent: Arc<Mutex<Vec<OutboundMail>>>,
        fail: bool,
    }

    impl MockMailer {
        fn new() -> Self {
            Self {
                sent: Arc::new(Mutex::new(Vec::new())),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                sent: Arc::new(Mutex::new(Vec::new())),
                fail: true,
            }
        }

        async fn sent_mails(&self) -> Vec<OutboundMail> {
            self.sent.lock().await.clone()
        }
    }

    #[async_trait]
    impl Mailer for MockMailer {
        async fn send(&self, mail: &OutboundMail) -> Result<()> {
            if self.fail {
                return Err(SiteError::MailDeliveryError {
                    message: "mail API returned status 500".to_string(),
                });
            }
            self.sent.lock().await.push(mail.clone());
            Ok(())
        }
    }

    fn valid_request() -> ContactRequest {
        ContactRequest {
            name: Some("Jane Doe".to_string()),
            email: Some("jane@example.com".to_string()),
            project_type: Some("Brand film".to_string()),
            message: Some("We need a launch video for our spring collection.".to_string()),
            website: None,
        }
    }

    fn service(mailer: MockMailer) -> ContactService<MockMailer> {
        ContactService::new(mailer, MailConfig::default())
    }

    #[tokio::test]
    async fn test_valid_submission_sends_one_mail() {
        let mailer = MockMailer::new();
        let svc = service(mailer.clone());

        let outcome = svc.submit(valid_request()).await.unwrap();

        assert_eq!(outcome, ContactOutcome::Sent);
        let sent = mailer.sent_mails().await;
        assert_eq!(sent.len(), 1);
        assert!(sent[0].subject.contains("Jane Doe"));
        assert!(sent[0].text.contains("jane@example.com"));
        assert!(sent[0].text.contains("Brand film"));
        assert!(sent[0].text.contains("launch video"));
    }

    #[tokio::test]
    async fn test_missing_fields_are_rejected_before_sending() {
        let mailer = MockMailer::new();
        let svc = service(mailer.clone());

        for broken in [
            ContactRequest {
                name: None,
                ..valid_request()
            },
            ContactRequest {
                email: Some("   ".to_string()),
                ..valid_request()
            },
            ContactRequest {
                message: None,
                ..valid_request()
            },
        ] {
            let err = svc.submit(broken).await.unwrap_err();
            match err {
                SiteError::ValidationError { message } => {
                    assert_eq!(message, "Name, email and message are required");
                }
                other => panic!("expected validation error, got {other:?}"),
            }
        }

        assert!(mailer.sent_mails().await.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_email_is_rejected() {
        let svc = service(MockMailer::new());
        let request = ContactRequest {
            email: Some("not-an-email".to_string()),
            ..valid_request()
        };

        let err = svc.submit(request).await.unwrap_err();
        match err {
            SiteError::ValidationError { message } => {
                assert_eq!(message, "Please provide a valid email address");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_short_message_is_rejected() {
        let svc = service(MockMailer::new());
        let request = ContactRequest {
            message: Some("too short".to_string()), // 9 characters
            ..valid_request()
        };

        let err = svc.submit(request).await.unwrap_err();
        assert!(matches!(err, SiteError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn test_ten_character_message_is_accepted() {
        let mailer = MockMailer::new();
        let svc = service(mailer.clone());
        let request = ContactRequest {
            message: Some("ten chars!".to_string()),
            ..valid_request()
        };

        let outcome = svc.submit(request).await.unwrap();
        assert_eq!(outcome, ContactOutcome::Sent);
    }

    #[tokio::test]
    async fn test_honeypot_discards_without_sending() {
        let mailer = MockMailer::new();
        let svc = service(mailer.clone());
        let request = ContactRequest {
            website: Some("https://spam.example".to_string()),
            ..valid_request()
        };

        let outcome = svc.submit(request).await.unwrap();

        assert_eq!(outcome, ContactOutcome::Discarded);
        assert!(mailer.sent_mails().await.is_empty());
    }

    #[tokio::test]
    async fn test_mailer_failure_propagates() {
        let svc = service(MockMailer::failing());

        let err = svc.submit(valid_request()).await.unwrap_err();
        assert!(matches!(err, SiteError::MailDeliveryError { .. }));
    }

    #[tokio::test]
    async fn test_missing_project_type_gets_placeholder() {
        let mailer = MockMailer::new();
        let svc = service(mailer.clone());
        let request = ContactRequest {
            project_type: None,
            ..valid_request()
        };

        svc.submit(request).await.unwrap();

        let sent = mailer.sent_mails().await;
        assert!(sent[0].text.contains("Project type: Not specified"));
    }
}
