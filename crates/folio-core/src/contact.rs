use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tracing::info;
use uuid::Uuid;

use crate::{Error, Result};

/// Message submitted through the contact section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub sent_at: DateTime<Utc>,
}

impl ContactMessage {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
            sent_at: Utc::now(),
        }
    }
}

/// Endpoint that accepts contact messages
#[async_trait::async_trait]
pub trait MailDelivery: Send + Sync {
    /// Short name used in logs and status messages
    fn name(&self) -> &str;

    async fn deliver(&self, message: &ContactMessage) -> Result<()>;
}

/// Appends messages as JSON lines to a local outbox file
#[derive(Debug, Clone)]
pub struct OutboxMailer {
    path: PathBuf,
}

impl OutboxMailer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Read back every queued message, oldest first
    pub async fn pending(&self) -> Result<Vec<ContactMessage>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(Error::from))
            .collect()
    }
}

#[async_trait::async_trait]
impl MailDelivery for OutboxMailer {
    fn name(&self) -> &str {
        "outbox"
    }

    async fn deliver(&self, message: &ContactMessage) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut line = serde_json::to_string(message)?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| Error::Delivery(format!("{}: {}", self.path.display(), e)))?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        info!(id = %message.id, outbox = %self.path.display(), "queued contact message");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_outbox_appends_messages() {
        let dir = tempfile::tempdir().unwrap();
        let mailer = OutboxMailer::new(dir.path().join("mail").join("outbox.jsonl"));

        let first = ContactMessage::new("Ada", "ada@example.com", "Hello", "First message");
        let second = ContactMessage::new("Linus", "linus@example.com", "Hi", "Second message");
        mailer.deliver(&first).await.unwrap();
        mailer.deliver(&second).await.unwrap();

        let pending = mailer.pending().await.unwrap();
        assert_eq!(pending, vec![first, second]);
    }

    #[tokio::test]
    async fn test_missing_outbox_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mailer = OutboxMailer::new(dir.path().join("outbox.jsonl"));
        assert!(mailer.pending().await.unwrap().is_empty());
    }
}
