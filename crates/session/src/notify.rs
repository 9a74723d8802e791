//! User-facing notifications for failures outside the edit cycle.

/// Shows a message to the user
pub trait Notifier {
    fn notify(&mut self, title: &str, body: &str);
}

/// Sends notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, title: &str, body: &str) {
        log::error!("{}: {}", title, body);
    }
}
