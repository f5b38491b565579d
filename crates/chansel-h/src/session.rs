use crate::cdp::{CdpClient, LaunchOptions};
use crate::page::CdpPage;
use chansel_engine::ChannelSelector;
use tracing::info;

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("Browser launch failed: {0}")]
    Launch(String),

    #[error("Navigation error: {0}")]
    Navigation(String),

    #[error("Browser shutdown failed: {0}")]
    Close(String),

    #[error("Profile directory error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Browser not launched")]
    NotReady,
}

/// Owns the Chromium process for one provider session.
pub struct HeadlessSession {
    client: Option<CdpClient>,
    options: LaunchOptions,
}

impl HeadlessSession {
    pub fn new(options: LaunchOptions) -> Self {
        Self {
            client: None,
            options,
        }
    }

    pub fn client(&self) -> Option<&CdpClient> {
        self.client.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        self.client.is_some()
    }

    pub async fn launch(&mut self) -> Result<(), SessionError> {
        self.client = Some(CdpClient::launch(&self.options).await?);
        Ok(())
    }

    pub async fn close(&mut self) -> Result<(), SessionError> {
        if let Some(client) = self.client.take() {
            client.close().await?;
        }
        Ok(())
    }

    /// Tear the browser down and start a fresh one.
    ///
    /// Guide positions and other per-session caches describe the old page,
    /// so every strategy cache is dropped with it.
    pub async fn restart(&mut self, selector: &mut ChannelSelector) -> Result<(), SessionError> {
        info!("Restarting headless session");
        self.close().await?;
        selector.clear_all_caches();
        self.launch().await
    }

    pub async fn navigate(&mut self, url: &str) -> Result<String, SessionError> {
        let client = self.client.as_ref().ok_or(SessionError::NotReady)?;

        info!("Navigating to: {}", url);
        client
            .page
            .goto(url)
            .await
            .map_err(|e| SessionError::Navigation(e.to_string()))?;

        let landed = client
            .page
            .url()
            .await
            .map_err(|e| SessionError::Navigation(e.to_string()))?
            .unwrap_or_default();
        Ok(landed)
    }

    /// A `Page` handle on the session's tab.
    pub fn page(&self) -> Result<CdpPage, SessionError> {
        let client = self.client.as_ref().ok_or(SessionError::NotReady)?;
        Ok(CdpPage::new(client.page.clone()))
    }
}

impl Default for HeadlessSession {
    fn default() -> Self {
        Self::new(LaunchOptions::from_env(false))
    }
}
