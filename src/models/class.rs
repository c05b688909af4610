use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Which kind of classroom a class code refers to
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    #[serde(rename = "code")]
    Codeshare,
    #[serde(rename = "poll")]
    Pollshare,
}

impl ClassKind {
    /// Anything other than "poll" is a codeshare class.
    pub fn from_class_type(class_type: Option<&str>) -> Self {
        match class_type {
            Some("poll") => ClassKind::Pollshare,
            _ => ClassKind::Codeshare,
        }
    }
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassKind::Codeshare => f.write_str("codeshare"),
            ClassKind::Pollshare => f.write_str("pollshare"),
        }
    }
}

/// Request to create a class
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct CreateClassRequest {
    pub password: String,
    /// "poll" for a pollshare class, anything else for codeshare
    pub class_type: Option<String>,
}

/// Response for a created class
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct CreateClassResponse {
    pub success: bool,
    pub class_id: String,
}

/// Request to close a class
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct CloseClassRequest {
    pub class_id: String,
}

/// Response for a closed class
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct CloseClassResponse {
    pub success: bool,
}
