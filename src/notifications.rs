//! User-visible notifications (toasts/alerts).
//!
//! Stores emit a [`Notification`] after each successful mutation. Sinks are
//! fire-and-forget: `notify` cannot fail and must not block the caller.

use crate::models::LanguageCode;
use serde::Serialize;
use std::sync::Mutex;

/// Severity of a notification, drives how a front end styles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Operation succeeded
    Success,
    /// Operation failed
    Error,
    /// Something the user should pay attention to
    Warning,
    /// Neutral information
    Info,
}

impl NotificationKind {
    /// Title used when the notification has none of its own.
    #[must_use]
    pub const fn default_title(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::Info => "Info",
        }
    }
}

/// A single user-visible event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Severity
    pub kind: NotificationKind,
    /// Short heading
    pub title: String,
    /// Body text
    pub message: String,
}

impl Notification {
    /// Builds a notification, using the kind's default title when `title` is `None`.
    pub fn new(kind: NotificationKind, message: impl Into<String>, title: Option<&str>) -> Self {
        Self {
            kind,
            title: title.unwrap_or(kind.default_title()).to_string(),
            message: message.into(),
        }
    }

    /// Generic success notification
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message, None)
    }

    /// Generic error notification
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message, None)
    }

    /// Generic warning notification
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Warning, message, None)
    }

    /// Generic info notification
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, message, None)
    }

    /// Toast for a newly added product.
    #[must_use]
    pub fn product_added(name: &str) -> Self {
        Self::new(
            NotificationKind::Success,
            format!("{name} has been added successfully!"),
            Some("Product Added"),
        )
    }

    /// Toast for an edited product.
    #[must_use]
    pub fn product_updated(name: &str) -> Self {
        Self::new(
            NotificationKind::Success,
            format!("{name} has been updated successfully!"),
            Some("Product Updated"),
        )
    }

    /// Toast for a deleted product.
    #[must_use]
    pub fn product_deleted(name: &str) -> Self {
        Self::new(
            NotificationKind::Warning,
            format!("{name} has been deleted."),
            Some("Product Deleted"),
        )
    }

    /// Reports a detection result; `confidence` is in [0,1] and shown as a whole percentage.
    #[must_use]
    pub fn language_detected(language: LanguageCode, confidence: f64) -> Self {
        Self::new(
            NotificationKind::Info,
            format!(
                "Detected {} ({:.0}% confidence)",
                language.name(),
                (confidence * 100.0).round()
            ),
            Some("Language Detected"),
        )
    }

    /// Warns that changes are being kept locally.
    #[must_use]
    pub fn offline_mode() -> Self {
        Self::new(
            NotificationKind::Warning,
            "You are working offline. Changes will sync when connection is restored.",
            Some("Offline Mode"),
        )
    }

    /// Reports that pending changes were synced.
    #[must_use]
    pub fn sync_complete() -> Self {
        Self::new(
            NotificationKind::Success,
            "All changes have been synced successfully!",
            Some("Sync Complete"),
        )
    }
}

/// Destination for notifications.
pub trait NotificationSink: Send + Sync {
    /// Delivers `notification`. Never fails, never blocks for long.
    fn notify(&self, notification: Notification);
}

/// Emits every notification as a `tracing` event at a level matching its kind.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn notify(&self, notification: Notification) {
        let Notification {
            kind,
            title,
            message,
        } = notification;
        match kind {
            NotificationKind::Error => tracing::error!(%title, "{message}"),
            NotificationKind::Warning => tracing::warn!(%title, "{message}"),
            NotificationKind::Success | NotificationKind::Info => {
                tracing::info!(%title, "{message}");
            }
        }
    }
}

/// Drops every notification. Used when the user turned notifications off.
#[derive(Debug, Default, Clone, Copy)]
pub struct MutedNotificationSink;

impl NotificationSink for MutedNotificationSink {
    fn notify(&self, notification: Notification) {
        tracing::trace!("Muted notification: {}", notification.title);
    }
}

/// Keeps every notification in memory, in delivery order.
#[derive(Debug, Default)]
pub struct RecordingNotificationSink {
    received: Mutex<Vec<Notification>>,
}

impl RecordingNotificationSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything received so far.
    pub fn received(&self) -> Vec<Notification> {
        self.received
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl NotificationSink for RecordingNotificationSink {
    fn notify(&self, notification: Notification) {
        match self.received.lock() {
            Ok(mut guard) => guard.push(notification),
            Err(poisoned) => poisoned.into_inner().push(notification),
        }
    }
}
