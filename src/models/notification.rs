use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NewRelease,
    Recommendation,
    Achievement,
    Social,
    System,
}

/// Extra context attached to a notification, depending on its kind
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie_poster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievement_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<NotificationMetadata>,
}

/// Per-category and per-channel delivery toggles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub new_releases: bool,
    pub recommendations: bool,
    pub achievements: bool,
    pub social: bool,
    pub system: bool,
    pub email_notifications: bool,
    pub push_notifications: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            new_releases: true,
            recommendations: true,
            achievements: true,
            social: true,
            system: false,
            email_notifications: true,
            push_notifications: false,
        }
    }
}

/// Visual category of a toast
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    #[default]
    Info,
}

/// Short-lived UI message, independent of notification state
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Toast {
    pub id: uuid::Uuid,
    pub title: String,
    pub message: String,
    pub kind: ToastKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_deserialize_wire_format() {
        let json = r#"{
            "id": "1",
            "type": "new_release",
            "title": "New Movie Alert!",
            "message": "Dune: Part Three is now available to watch",
            "timestamp": "2024-03-15T20:30:00Z",
            "read": false,
            "actionUrl": "/movie/123",
            "metadata": {"movieId": 123, "movieTitle": "Dune: Part Three"}
        }"#;

        let notification: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(notification.kind, NotificationKind::NewRelease);
        assert_eq!(notification.action_url.as_deref(), Some("/movie/123"));
        assert!(!notification.read);

        let metadata = notification.metadata.unwrap();
        assert_eq!(metadata.movie_id, Some(123));
        assert_eq!(metadata.movie_title.as_deref(), Some("Dune: Part Three"));
        assert_eq!(metadata.user_name, None);
    }

    #[test]
    fn test_notification_without_optional_fields() {
        let json = r#"{
            "id": "5",
            "type": "system",
            "title": "Weekly Recap Ready",
            "message": "Your weekly movie recap is ready!",
            "timestamp": "2024-03-15T20:30:00Z",
            "read": true
        }"#;

        let notification: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(notification.kind, NotificationKind::System);
        assert_eq!(notification.action_url, None);
        assert_eq!(notification.metadata, None);
    }

    #[test]
    fn test_preferences_serialization() {
        let json = serde_json::to_value(NotificationPreferences::default()).unwrap();
        assert_eq!(json["newReleases"], true);
        assert_eq!(json["system"], false);
        assert_eq!(json["pushNotifications"], false);
        assert_eq!(json.as_object().unwrap().len(), 7);
    }

    #[test]
    fn test_toast_kind_serialization() {
        assert_eq!(serde_json::to_string(&ToastKind::Error).unwrap(), "\"error\"");
        assert_eq!(ToastKind::default(), ToastKind::Info);
    }
}
