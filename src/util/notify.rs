//! Fire-and-forget user notifications.
//!
//! The session manager announces things like "signed out" but owns no
//! presentation. Hosts plug a toast layer in here; the default routes
//! through `log`.

/// Severity of a user-facing notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    Info,
    Success,
    Error,
}

/// A notification sink. Implementations must not fail or block.
pub trait Notifier {
    fn notify(&self, level: Notice, message: &str);
}

/// Default sink: notices go to the log output.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, level: Notice, message: &str) {
        match level {
            Notice::Info | Notice::Success => log::info!("{message}"),
            Notice::Error => log::warn!("{message}"),
        }
    }
}
