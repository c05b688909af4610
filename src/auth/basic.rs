use axum::http::{self, HeaderMap};
use base64::{engine::general_purpose::STANDARD, Engine as _};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BasicAuthError {
    #[error("missing Authorization header")]
    Missing,
    #[error("Authorization header is not a Basic credential")]
    NotBasic,
    #[error("Basic credential is not valid base64")]
    Encoding,
    #[error("Basic credential is not of the form user:password")]
    Format,
}

#[derive(Debug)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

// Get the Basic credentials from the request headers
pub fn get_basic_credentials(headers: &HeaderMap) -> Result<BasicCredentials, BasicAuthError> {
    let auth_header = headers
        .get(http::header::AUTHORIZATION)
        .ok_or(BasicAuthError::Missing)?
        .to_str()
        .map_err(|_| BasicAuthError::NotBasic)?;

    let encoded = auth_header
        .strip_prefix("Basic ")
        .ok_or(BasicAuthError::NotBasic)?
        .trim();

    let decoded = STANDARD
        .decode(encoded)
        .map_err(|_| BasicAuthError::Encoding)?;
    let decoded = String::from_utf8(decoded).map_err(|_| BasicAuthError::Encoding)?;

    let (username, password) = decoded.split_once(':').ok_or(BasicAuthError::Format)?;
    Ok(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}
