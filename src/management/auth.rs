use std::path::PathBuf;

use crate::{config, spotify, types::Token, warning};

/// Seconds before expiry at which a user token is refreshed.
const REFRESH_MARGIN_SECS: u64 = 240;

/// Owns the Spotify user token obtained through the PKCE login and keeps a
/// copy of it on disk so the next start does not require a new login.
pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    pub async fn load() -> Result<Self, String> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Returns the access token, refreshing it first when it is about to expire.
    ///
    /// A failed refresh leaves the old token in place; the provider will then
    /// reject it and the caller sees an authentication error.
    pub async fn get_valid_token(&mut self) -> String {
        if self.token.expires_within(REFRESH_MARGIN_SECS) && !self.token.refresh_token.is_empty() {
            match spotify::auth::refresh_token(&self.token.refresh_token).await {
                Ok(new_token) => {
                    self.token = new_token;
                    if let Err(e) = self.persist().await {
                        warning!("Failed to save refreshed token: {}", e);
                    }
                }
                Err(e) => warning!("Failed to refresh Spotify token: {}", e),
            }
        }

        self.token.access_token.clone()
    }

    fn token_path() -> PathBuf {
        config::data_dir().join("cache/token.json")
    }
}
