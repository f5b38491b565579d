//! Chromium process for a player session.

use crate::session::SessionError;
use chromiumoxide::cdp::browser_protocol::page::{
    EventJavascriptDialogOpening, HandleJavaScriptDialogParams,
};
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::task::JoinHandle;

/// Players refuse to start playback after a synthetic click without this.
const AUTOPLAY_FLAG: &str = "--autoplay-policy=no-user-gesture-required";

/// How the browser for a session is started.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Headed browser instead of headless.
    pub visible: bool,
    pub chrome_bin: Option<PathBuf>,
    /// Persistent profile, so provider logins survive between runs. Without
    /// one every launch gets a throwaway profile.
    pub user_data_dir: Option<PathBuf>,
}

impl LaunchOptions {
    /// Options from `CHROME_BIN` and `CHANSEL_USER_DATA_DIR`.
    pub fn from_env(visible: bool) -> Self {
        Self {
            visible,
            chrome_bin: std::env::var_os("CHROME_BIN").map(PathBuf::from),
            user_data_dir: std::env::var_os("CHANSEL_USER_DATA_DIR").map(PathBuf::from),
        }
    }

    pub fn with_user_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.user_data_dir = Some(dir.into());
        self
    }

    fn browser_config(&self, profile: &Path) -> Result<BrowserConfig, SessionError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .user_data_dir(profile)
            .arg(AUTOPLAY_FLAG);
        if self.visible {
            builder = builder.with_head();
        }
        if let Some(bin) = &self.chrome_bin {
            builder = builder.chrome_executable(bin);
        }
        builder.build().map_err(SessionError::Launch)
    }
}

/// Browser profile directory, removed on drop when it is a throwaway one.
#[derive(Debug)]
enum ProfileDir {
    Persistent(PathBuf),
    Temporary(TempDir),
}

impl ProfileDir {
    fn prepare(options: &LaunchOptions) -> Result<Self, SessionError> {
        match &options.user_data_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                Ok(ProfileDir::Persistent(dir.clone()))
            }
            None => Ok(ProfileDir::Temporary(
                tempfile::Builder::new().prefix("chansel-profile-").tempdir()?,
            )),
        }
    }

    fn path(&self) -> &Path {
        match self {
            ProfileDir::Persistent(dir) => dir,
            ProfileDir::Temporary(dir) => dir.path(),
        }
    }
}

pub struct CdpClient {
    browser: Browser,
    handler_task: JoinHandle<()>,
    dialog_task: JoinHandle<()>,
    pub page: Page,
    profile: ProfileDir,
}

impl CdpClient {
    pub async fn launch(options: &LaunchOptions) -> Result<Self, SessionError> {
        let profile = ProfileDir::prepare(options)?;
        tracing::info!(
            visible = options.visible,
            profile = %profile.path().display(),
            "Launching Chromium"
        );

        let (browser, mut handler) = Browser::launch(options.browser_config(profile.path())?)
            .await
            .map_err(|e| SessionError::Launch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Browser handler error (ignoring): {}", e);
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| SessionError::Launch(format!("failed to open tab: {}", e)))?;
        let dialog_task = accept_dialogs(&page).await?;

        Ok(Self {
            browser,
            handler_task,
            dialog_task,
            page,
            profile,
        })
    }

    pub async fn close(mut self) -> Result<(), SessionError> {
        self.dialog_task.abort();
        self.browser
            .close()
            .await
            .map_err(|e| SessionError::Close(e.to_string()))?;
        self.handler_task
            .await
            .map_err(|e| SessionError::Close(e.to_string()))?;

        if let ProfileDir::Temporary(dir) = self.profile {
            if let Err(e) = dir.close() {
                tracing::debug!("Failed to remove throwaway profile: {}", e);
            }
        }
        Ok(())
    }
}

/// Accept every alert/confirm/prompt so no dialog stalls an evaluation.
async fn accept_dialogs(page: &Page) -> Result<JoinHandle<()>, SessionError> {
    let mut dialogs = page
        .event_listener::<EventJavascriptDialogOpening>()
        .await
        .map_err(|e| SessionError::Launch(format!("dialog listener: {}", e)))?;

    let page = page.clone();
    Ok(tokio::spawn(async move {
        while let Some(event) = dialogs.next().await {
            tracing::info!(message = %event.message, "Accepting page dialog");
            if let Err(e) = page.execute(HandleJavaScriptDialogParams::new(true)).await {
                tracing::warn!("Failed to accept dialog: {}", e);
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistent_profile_is_created_and_kept() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("profiles").join("sling");
        let options = LaunchOptions::default().with_user_data_dir(&dir);

        let profile = ProfileDir::prepare(&options).unwrap();
        assert_eq!(profile.path(), dir.as_path());
        drop(profile);
        assert!(dir.is_dir());
    }

    #[test]
    fn test_throwaway_profile_is_removed_on_drop() {
        let profile = ProfileDir::prepare(&LaunchOptions::default()).unwrap();
        let path = profile.path().to_path_buf();
        assert!(path.is_dir());
        assert!(
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("chansel-profile-"))
        );

        drop(profile);
        assert!(!path.exists());
    }
}
