// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google OAuth 2.0 client.
//!
//! Handles:
//! - Building the consent-screen URL
//! - Exchanging the authorization code for an access token
//! - Fetching the OpenID userinfo profile

use crate::config::Config;
use crate::error::AppError;
use anyhow::Context;
use serde::Deserialize;
use std::time::Duration;

const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";
const SCOPES: &str = "openid email profile";
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Provider endpoints. Overridable so tests can stand in for Google.
#[derive(Debug, Clone)]
pub struct GoogleEndpoints {
    pub authorize: String,
    pub token: String,
    pub userinfo: String,
}

impl Default for GoogleEndpoints {
    fn default() -> Self {
        Self {
            authorize: AUTHORIZE_URL.to_string(),
            token: TOKEN_URL.to_string(),
            userinfo: USERINFO_URL.to_string(),
        }
    }
}

/// Verified profile returned by the provider after a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderProfile {
    pub identity: String,
    pub display_name: String,
    pub emails: Vec<String>,
    pub photos: Vec<String>,
}

/// Google OAuth client.
#[derive(Clone)]
pub struct GoogleOAuthClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    endpoints: GoogleEndpoints,
}

impl GoogleOAuthClient {
    /// Create a client for the app credentials in `config`.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .context("failed building OAuth HTTP client")?;

        Ok(Self {
            http,
            client_id: config.google_client_id.clone(),
            client_secret: config.google_client_secret.clone(),
            redirect_uri: config.callback_url.clone(),
            endpoints: GoogleEndpoints::default(),
        })
    }

    /// Replace the provider endpoints.
    pub fn with_endpoints(mut self, endpoints: GoogleEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// URL of the consent screen the user is redirected to.
    pub fn authorization_url(&self, state: &str) -> String {
        format!(
            "{}?\
             client_id={}&\
             redirect_uri={}&\
             response_type=code&\
             scope={}&\
             access_type=online&\
             prompt=select_account&\
             state={}",
            self.endpoints.authorize,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(SCOPES),
            urlencoding::encode(state)
        )
    }

    /// Complete a login: trade `code` for a token and read the profile.
    pub async fn exchange_code(&self, code: &str) -> Result<ProviderProfile, AppError> {
        let token = self.request_token(code).await?;
        let info = self.fetch_userinfo(&token.access_token).await?;

        tracing::debug!(identity = %info.sub, "Fetched Google profile");

        Ok(info.into_profile())
    }

    async fn request_token(&self, code: &str) -> Result<TokenResponse, AppError> {
        let response = self
            .http
            .post(&self.endpoints.token)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::IdentityProvider(format!("Token exchange failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Google token exchange failed");
            return Err(AppError::IdentityProvider(format!(
                "Token exchange failed with status {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::IdentityProvider(format!("Failed to parse token response: {}", e)))
    }

    async fn fetch_userinfo(&self, access_token: &str) -> Result<GoogleUserInfo, AppError> {
        let response = self
            .http
            .get(&self.endpoints.userinfo)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::IdentityProvider(format!("Userinfo request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::IdentityProvider(format!(
                "Userinfo request returned status {}",
                response.status()
            )));
        }

        let info: GoogleUserInfo = response
            .json()
            .await
            .map_err(|e| AppError::IdentityProvider(format!("Invalid userinfo JSON: {}", e)))?;

        if info.sub.trim().is_empty() {
            return Err(AppError::IdentityProvider(
                "Userinfo response has empty subject".to_string(),
            ));
        }

        Ok(info)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    sub: String,
    name: Option<String>,
    given_name: Option<String>,
    email: Option<String>,
    email_verified: Option<bool>,
    picture: Option<String>,
}

impl GoogleUserInfo {
    fn into_profile(self) -> ProviderProfile {
        // Unverified addresses are dropped.
        let email = self
            .email
            .filter(|e| !e.is_empty() && self.email_verified != Some(false));

        let display_name = self
            .name
            .or(self.given_name)
            .filter(|n| !n.trim().is_empty())
            .or_else(|| email.clone())
            .unwrap_or_else(|| self.sub.clone());

        ProviderProfile {
            identity: self.sub,
            display_name,
            emails: email.into_iter().collect(),
            photos: self.picture.into_iter().filter(|p| !p.is_empty()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(json: &str) -> GoogleUserInfo {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_full_profile_mapping() {
        let profile = info(
            r#"{"sub":"1234","name":"Ada Lovelace","email":"ada@example.com",
                "email_verified":true,"picture":"https://lh3.example/ada.png"}"#,
        )
        .into_profile();

        assert_eq!(
            profile,
            ProviderProfile {
                identity: "1234".to_string(),
                display_name: "Ada Lovelace".to_string(),
                emails: vec!["ada@example.com".to_string()],
                photos: vec!["https://lh3.example/ada.png".to_string()],
            }
        );
    }

    #[test]
    fn test_display_name_fallbacks() {
        let profile = info(r#"{"sub":"1","email":"a@example.com"}"#).into_profile();
        assert_eq!(profile.display_name, "a@example.com");

        let profile = info(r#"{"sub":"2"}"#).into_profile();
        assert_eq!(profile.display_name, "2");
        assert!(profile.emails.is_empty());
        assert!(profile.photos.is_empty());
    }

    #[test]
    fn test_unverified_email_is_dropped() {
        let profile =
            info(r#"{"sub":"1","name":"X","email":"x@example.com","email_verified":false}"#)
                .into_profile();
        assert!(profile.emails.is_empty());
    }

    #[test]
    fn test_authorization_url_contents() {
        let client = GoogleOAuthClient::new(&Config::default()).unwrap();
        let url = client.authorization_url("abc123");

        assert!(url.starts_with(AUTHORIZE_URL));
        assert!(url.contains("client_id=test_client_id"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("scope=openid%20email%20profile"));
        assert!(url.contains("state=abc123"));
        assert!(url.contains(&format!(
            "redirect_uri={}",
            urlencoding::encode("http://localhost:8080/auth/google/callback")
        )));
    }
}
