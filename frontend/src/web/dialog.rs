use schooladmin_shared::sync::Confirm;

/// `window.confirm` 确认框
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserConfirm;

impl Confirm for BrowserConfirm {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}
