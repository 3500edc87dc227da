use async_trait::async_trait;
use tracing::info;

use super::{Notification, Notifier};
use crate::error::Result;

/// Writes notifications to the log instead of delivering them.
///
/// Used when mail delivery is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, notification: &Notification) -> Result<()> {
        info!(subject = %notification.subject, text = %notification.text, "notification");
        Ok(())
    }
}
