use secrecy::{ExposeSecret, SecretString};

use crate::error::{Credential, Error, Result};

const BEARER_PREFIX: &str = "Bearer ";

/// Represents the access pair every call is authorized and addressed with.
///
/// # Fields
///
/// * `token` - The bearer token, always stored with its `Bearer ` prefix.
///   Kept behind [`SecretString`] so it never lands in `Debug` output.
/// * `url` - The service base URL, always ending with `/`.
///
/// Both values are validated on construction and on every set; an empty
/// value fails with [`Error::MissingCredential`].
#[derive(Clone, Debug)]
pub struct Credentials {
    token: SecretString,
    url: String,
}

impl Credentials {
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        Ok(Self {
            token: normalize_token(token.into())?,
            url: normalize_url(url.into())?,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The `Authorization` header value.
    pub fn token(&self) -> &SecretString {
        &self.token
    }

    pub fn set_token(&mut self, token: impl Into<String>) -> Result<()> {
        self.token = normalize_token(token.into())?;
        Ok(())
    }

    pub fn set_url(&mut self, url: impl Into<String>) -> Result<()> {
        self.url = normalize_url(url.into())?;
        Ok(())
    }
}

impl PartialEq for Credentials {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url && self.token.expose_secret() == other.token.expose_secret()
    }
}

fn normalize_token(token: String) -> Result<SecretString> {
    if token.trim().is_empty() {
        return Err(Error::MissingCredential(Credential::Token));
    }

    let token = if token.starts_with(BEARER_PREFIX) {
        token
    } else {
        format!("{BEARER_PREFIX}{token}")
    };

    Ok(SecretString::from(token))
}

fn normalize_url(url: String) -> Result<String> {
    if url.trim().is_empty() {
        return Err(Error::MissingCredential(Credential::Url));
    }

    if url.ends_with('/') {
        Ok(url)
    } else {
        Ok(format!("{url}/"))
    }
}
