use anyhow::Result;
use tracing::info;

use folio_core::{ContactMessage, MailDelivery};

pub async fn run(
    mailer: &dyn MailDelivery,
    name: &str,
    email: &str,
    subject: &str,
    message: &str,
) -> Result<()> {
    let message = ContactMessage::new(name, email, subject, message);
    mailer.deliver(&message).await?;

    info!(id = %message.id, via = mailer.name(), "contact message sent");
    println!("Thanks {}, your message was queued ({}).", message.name, mailer.name());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<ContactMessage>>,
    }

    #[async_trait::async_trait]
    impl MailDelivery for RecordingMailer {
        fn name(&self) -> &str {
            "recording"
        }

        async fn deliver(&self, message: &ContactMessage) -> folio_core::Result<()> {
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    struct FailingMailer;

    #[async_trait::async_trait]
    impl MailDelivery for FailingMailer {
        fn name(&self) -> &str {
            "failing"
        }

        async fn deliver(&self, _message: &ContactMessage) -> folio_core::Result<()> {
            Err(folio_core::Error::Delivery("endpoint unavailable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_message_reaches_mailer() {
        let mailer = RecordingMailer::default();
        run(&mailer, "Ada", "ada@example.com", "Hi", "Nice portfolio").await.unwrap();

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].email, "ada@example.com");
        assert_eq!(sent[0].message, "Nice portfolio");
    }

    #[tokio::test]
    async fn test_delivery_failure_is_reported() {
        let err = run(&FailingMailer, "Ada", "ada@example.com", "Hi", "Hello")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("endpoint unavailable"));
    }
}
