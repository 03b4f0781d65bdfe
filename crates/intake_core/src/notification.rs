/// Severity tag for user-facing notifications.
///
/// `Info` is the fallback for anything that is neither a confirmed success
/// nor a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    Success,
    Error,
    #[default]
    Info,
}

/// A dismissible user-facing message.
///
/// Opened by any completed operation (success or failure) and closed only by
/// explicit dismissal; there is no auto-timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::tagged(title, message, Severity::Success)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::tagged(title, message, Severity::Error)
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::tagged(title, message, Severity::Info)
    }

    fn tagged(title: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
        }
    }
}
