//! Notifications about new job offers.
//!
//! Delivery is fire-and-forget: [`dispatch`] hands the message to a detached
//! task and a failure is only logged and counted. There is no retry.

mod log;
mod mail_relay;

use async_trait::async_trait;
use metrics::counter;
use serde::Serialize;
use std::sync::Arc;
use tracing::{trace, warn};

use crate::domain::JobOffer;
use crate::error::Result;

pub use log::LogNotifier;
pub use mail_relay::MailRelayNotifier;

/// A message about an event worth telling people about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl Notification {
    /// Announce a freshly created job offer.
    pub fn job_offer_created(offer: &JobOffer) -> Self {
        Self {
            subject: format!("New job offer {}", offer.id),
            text: format!("New job offer: {}", offer.title()),
            html: format!(
                "<strong>New job offer:</strong> <em>{}</em>",
                escape_html(offer.title())
            ),
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Delivery channel for notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Channel name used in logs and metrics.
    fn name(&self) -> &'static str;

    async fn send(&self, notification: &Notification) -> Result<()>;
}

/// Send `notification` on a detached task.
///
/// The caller never waits for delivery and never sees its outcome.
pub fn dispatch(notifier: Arc<dyn Notifier>, notification: Notification) {
    tokio::spawn(async move {
        match notifier.send(&notification).await {
            Ok(()) => trace!(channel = notifier.name(), subject = %notification.subject, "notification sent"),
            Err(e) => {
                counter!(
                    "jobconnect_notifications_failed_total",
                    "channel" => notifier.name(),
                )
                .increment(1);
                warn!(
                    channel = notifier.name(),
                    subject = %notification.subject,
                    error = %e,
                    "notification not sent"
                );
            }
        }
    });
}
