//! Stateless notification presenter.
//!
//! Every field is supplied fresh by the caller on each render; nothing is
//! retained between calls. Dismissal is a user command routed back to the
//! state machine, not handled here.

use intake_core::{NotificationView, Severity};

/// Fixed icon/style pair for a severity; total over the closed enum.
fn badge(severity: Severity) -> (&'static str, &'static str) {
    match severity {
        Severity::Success => ("[ok]", "success"),
        Severity::Error => ("[!!]", "error"),
        Severity::Info => ("[ i]", "info"),
    }
}

/// Renders the notification block, or `None` while it is hidden.
pub fn render(notification: Option<&NotificationView>) -> Option<String> {
    let notification = notification?;
    let (icon, style) = badge(notification.severity);
    Some(format!(
        "{icon} {title} ({style})\n     {message}\n     type `dismiss` to close",
        title = notification.title,
        message = notification.message,
    ))
}

#[cfg(test)]
mod tests {
    use super::{badge, render};
    use intake_core::{NotificationView, Severity};

    fn view(severity: Severity) -> NotificationView {
        NotificationView {
            title: "Title".to_string(),
            message: "Message body.".to_string(),
            severity,
        }
    }

    #[test]
    fn hidden_notification_renders_nothing() {
        assert_eq!(render(None), None);
    }

    #[test]
    fn badge_is_total_over_the_enum() {
        assert_eq!(badge(Severity::Success).1, "success");
        assert_eq!(badge(Severity::Error).1, "error");
        assert_eq!(badge(Severity::Info).1, "info");
    }

    #[test]
    fn omitted_severity_defaults_to_info() {
        assert_eq!(badge(Severity::default()).1, "info");
    }

    #[test]
    fn rendered_block_carries_title_message_and_style() {
        let text = render(Some(&view(Severity::Error))).expect("visible");
        assert!(text.contains("Title"));
        assert!(text.contains("Message body."));
        assert!(text.contains("(error)"));
    }
}
