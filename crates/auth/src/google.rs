// Google ID-token verification, treated as an opaque external service:
// the credential goes to Google's tokeninfo endpoint and only a verified
// email comes back.

use crate::error::{AuthError, Result};
use serde::Deserialize;

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleClaims {
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub email_verified: Option<String>,
    pub aud: String,
}

#[derive(Clone)]
pub struct GoogleVerifier {
    http: reqwest::Client,
    client_id: Option<String>,
}

impl GoogleVerifier {
    pub fn new(client_id: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id,
        }
    }

    /// Audience check is only enforced when GOOGLE_CLIENT_ID is configured.
    pub fn from_env() -> Self {
        Self::new(std::env::var("GOOGLE_CLIENT_ID").ok())
    }

    pub async fn verify(&self, credential: &str) -> Result<GoogleClaims> {
        let response = self
            .http
            .get(TOKENINFO_URL)
            .query(&[("id_token", credential)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuthError::InvalidToken(
                "Google rejected the credential".to_string(),
            ));
        }

        let claims: GoogleClaims = response.json().await?;

        if let Some(ref expected) = self.client_id {
            if claims.aud != *expected {
                return Err(AuthError::InvalidToken(
                    "Credential issued for a different client".to_string(),
                ));
            }
        }

        if claims.email_verified.as_deref() == Some("false") {
            return Err(AuthError::InvalidToken(
                "Google account email is not verified".to_string(),
            ));
        }

        Ok(claims)
    }
}
