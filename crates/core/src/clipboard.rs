use color_eyre::eyre;
use tracing::warn;

#[cfg_attr(test, mockall::automock)]
pub trait Clipboard {
    fn write_text(&self, text: &str) -> eyre::Result<()>;
}

/// Toast shown after a copy attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    Success(&'static str),
    Failure(&'static str),
}

impl Notification {
    pub fn message(self) -> &'static str {
        match self {
            Notification::Success(message) | Notification::Failure(message) => message,
        }
    }
}

/// Copies `text` once, no retry. Only the notification reflects the outcome.
pub fn copy_to_clipboard(clipboard: &impl Clipboard, text: &str) -> Notification {
    match clipboard.write_text(text) {
        Ok(()) => Notification::Success("Copied to clipboard!"),
        Err(e) => {
            warn!(error = %e, "clipboard write failed");
            Notification::Failure("Failed to copy")
        }
    }
}

#[cfg(test)]
mod tests {
    use color_eyre::eyre::eyre;

    use super::*;
    use crate::view::ViewState;

    const ADDRESS: &str = "0x00000000000000000000000000000000000000B1";

    #[test]
    fn test_copy_success_notifies() {
        let mut clipboard = MockClipboard::new();
        clipboard
            .expect_write_text()
            .withf(|text| text == ADDRESS)
            .times(1)
            .returning(|_| Ok(()));

        assert_eq!(
            copy_to_clipboard(&clipboard, ADDRESS),
            Notification::Success("Copied to clipboard!")
        );
    }

    #[test]
    fn test_copy_failure_notifies_and_leaves_state() {
        let state = ViewState::Success(ADDRESS.to_string());
        let mut clipboard = MockClipboard::new();
        clipboard
            .expect_write_text()
            .times(1)
            .returning(|_| Err(eyre!("clipboard unavailable")));

        let notification = copy_to_clipboard(&clipboard, ADDRESS);

        assert_eq!(notification, Notification::Failure("Failed to copy"));
        assert_eq!(notification.message(), "Failed to copy");
        assert_eq!(state, ViewState::Success(ADDRESS.to_string()));
    }
}
