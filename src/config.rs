use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;
use url::Url;

use crate::error::StoreError;

/// Default config file, holding a `[db]` table with `url`, `username`
/// and `password` keys.
const CONFIG_FILE: &str = "db.toml";
const ENV_PREFIX: &str = "DB_";

/// Resolved database credentials: the `{url, username, password}` triple.
///
/// The provider treats this as an opaque input; where the values come from
/// (file, environment, secret store) is the caller's concern. [`Self::load`]
/// covers the common file-plus-env case.
#[derive(Debug, Clone, Deserialize)]
pub struct DbCredentials {
    pub url: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl DbCredentials {
    /// Credentials for a plain URL with no username/password.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: None,
            password: None,
        }
    }

    /// Load from `db.toml` with `DB_URL`/`DB_USERNAME`/`DB_PASSWORD`
    /// environment overrides; a `.env` file is honored if present.
    pub fn load() -> Result<Self, StoreError> {
        dotenvy::dotenv().ok();
        Self::load_from(CONFIG_FILE)
    }

    /// Load from an explicit config file path, still applying environment
    /// overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let creds = Figment::from(Toml::file(path.as_ref()))
            .focus("db")
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()?;
        Ok(creds)
    }

    /// Compose the connection URL, embedding username/password as userinfo
    /// when the URL addresses a network store. Host-less URLs such as
    /// `sqlite:lessons.db` pass through unchanged.
    pub fn connection_url(&self) -> Result<Url, StoreError> {
        let mut url = Url::parse(&self.url)
            .map_err(|e| StoreError::Configuration(figment::Error::from(e.to_string())))?;

        if url.has_host() {
            if let Some(username) = self.username.as_deref() {
                url.set_username(username).map_err(|()| {
                    StoreError::Configuration(figment::Error::from(
                        "connection URL does not accept a username".to_string(),
                    ))
                })?;
            }
            if let Some(password) = self.password.as_deref() {
                url.set_password(Some(password)).map_err(|()| {
                    StoreError::Configuration(figment::Error::from(
                        "connection URL does not accept a password".to_string(),
                    ))
                })?;
            }
        }

        Ok(url)
    }
}
