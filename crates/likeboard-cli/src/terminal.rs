//! Terminal implementations of the navigation and notification seams.

use colored::Colorize;
use likeboard_core::navigation::{Navigator, Notification, NotificationKind, Notifier, View};

/// Prints the command that leads to the requested view.
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, view: View) {
        tracing::debug!(%view, "Navigate");
        let hint = match view {
            View::Login => "Log in with `likeboard login --email <EMAIL>`",
            View::Register => "Create an account with `likeboard register`",
            View::Dashboard => "Browse marketers with `likeboard marketers`",
        };
        eprintln!("{}", hint.dimmed());
    }
}

pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => {
                println!("{} {}", "✓".green(), notification.message.green())
            }
            NotificationKind::Error => eprintln!("{} {}", "✗".red(), notification.message.red()),
        }
    }
}
