// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;

const DEFAULT_CALLBACK_URL: &str = "http://localhost:8080/auth/google/callback";

/// Which document store backs the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// Cloud Firestore in the given GCP project.
    Firestore { project_id: String },
    /// In-process store; contents are lost on restart.
    Memory,
}

impl StoreConfig {
    /// Parse a `STORE_URI` value (`firestore://<project>` or `memory://`).
    pub fn parse(uri: &str) -> Result<Self, ConfigError> {
        let uri = uri.trim();
        if let Some(project_id) = uri.strip_prefix("firestore://") {
            let project_id = project_id.trim_end_matches('/');
            if project_id.is_empty() || project_id.contains('/') {
                return Err(ConfigError::InvalidStoreUri(uri.to_string()));
            }
            return Ok(Self::Firestore {
                project_id: project_id.to_string(),
            });
        }
        if uri == "memory://" || uri == "memory" {
            return Ok(Self::Memory);
        }
        Err(ConfigError::InvalidStoreUri(uri.to_string()))
    }

    /// Pick the store from `STORE_URI`, defaulting to memory.
    ///
    /// A `MONGO_URI` without `STORE_URI` is an error.
    pub fn select(store_uri: Option<String>, mongo_uri: Option<String>) -> Result<Self, ConfigError> {
        let set = |v: Option<String>| v.filter(|v| !v.trim().is_empty());
        match (set(store_uri), set(mongo_uri)) {
            (Some(uri), _) => Self::parse(&uri),
            (None, Some(_)) => Err(ConfigError::UnsupportedMongoUri),
            (None, None) => Ok(Self::Memory),
        }
    }

    /// Short backend name for logs.
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Firestore { .. } => "firestore",
            Self::Memory => "memory",
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Google OAuth client ID
    pub google_client_id: String,
    /// Google OAuth client secret
    pub google_client_secret: String,
    /// Redirect URI registered with Google
    pub callback_url: String,
    /// Key signing the OAuth `state` parameter
    pub session_secret: Vec<u8>,
    /// Key signing bearer tokens
    pub jwt_secret: Vec<u8>,
    /// Document store selection
    pub store: StoreConfig,
    /// Extra origin allowed by CORS
    pub frontend_url: Option<String>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            google_client_id: "test_client_id".to_string(),
            google_client_secret: "test_client_secret".to_string(),
            callback_url: DEFAULT_CALLBACK_URL.to_string(),
            session_secret: b"test_session_secret_32_bytes!!!!".to_vec(),
            jwt_secret: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            store: StoreConfig::Memory,
            frontend_url: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let store = StoreConfig::select(env::var("STORE_URI").ok(), env::var("MONGO_URI").ok())?;

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            google_client_id: required("CLIENT_ID")?,
            google_client_secret: required("CLIENT_SECRET")?,
            callback_url: env::var("CALLBACK_URL")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|_| DEFAULT_CALLBACK_URL.to_string()),
            session_secret: required("SESSION_SECRET")?.into_bytes(),
            jwt_secret: required("JWT_SECRET")?.into_bytes(),
            store,
            frontend_url: env::var("FRONTEND_URL")
                .ok()
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty()),
        })
    }

    /// Whether cookies we set should carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        !self.callback_url.starts_with("http://")
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .map(|v| v.trim().to_string())
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid STORE_URI (expected firestore://<project> or memory://): {0}")]
    InvalidStoreUri(String),

    /// `MONGO_URI` set without `STORE_URI`. Without either, the in-memory
    /// store is used.
    #[error("MONGO_URI is not supported; set STORE_URI to firestore://<project> or memory://")]
    UnsupportedMongoUri,
}
