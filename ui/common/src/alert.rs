use crate::{fall::FallNotification, location::Coordinate};

#[derive(Debug, Clone, PartialEq)]
pub struct FallBanner {
    pub name: String,
    pub position: Coordinate,
    pub detected_at: Option<String>,
    pub call_status: Option<String>,
    pub message_status: Option<String>,
}

impl FallBanner {
    /// Banner for the latest poll, `None` unless the alert is active
    pub fn from_notification(n: &FallNotification) -> Option<Self> {
        if !n.is_active() {
            return None;
        }

        let non_empty = |s: &String| (!s.trim().is_empty()).then(|| s.clone());

        Some(Self {
            name: n.elderly_info.name.clone(),
            position: n.position(),
            detected_at: n
                .detected_at()
                .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
            call_status: non_empty(&n.notification_status.call),
            message_status: non_empty(&n.notification_status.message),
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snackbar {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
}

impl Snackbar {
    pub fn sos(id: u64, active: bool) -> Self {
        if active {
            Self {
                id,
                message: "SOS activated. Emergency contacts are being notified.".into(),
                severity: Severity::Error,
            }
        } else {
            Self {
                id,
                message: "SOS deactivated.".into(),
                severity: Severity::Success,
            }
        }
    }
}
