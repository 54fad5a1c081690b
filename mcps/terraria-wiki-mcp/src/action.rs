//! Executing result actions

use crate::types::Action;

/// Something that can open a URL, usually the user's default browser
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str) -> std::io::Result<()>;
}

/// Opens URLs through the operating system's default handler
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> std::io::Result<()> {
        open::that(url)
    }
}

impl Action {
    /// Run the action, returning whether it was handled.
    ///
    /// [`Action::None`] always reports `false`. Opener failures are logged and
    /// reported as `false`; whether the article exists is never checked.
    pub fn invoke(&self, opener: &dyn UrlOpener) -> bool {
        match self {
            Action::None => false,
            Action::OpenUrl { url } => match opener.open(url) {
                Ok(()) => {
                    tracing::info!("Opened {}", url);
                    true
                }
                Err(e) => {
                    tracing::warn!("Failed to open browser for {}: {}", url, e);
                    false
                }
            },
        }
    }
}
