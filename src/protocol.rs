//! Wire contract of the activities API.
//!
//! - `GET /activities`
//! - `POST /activities/{name}/signup` with `{"email": ...}`
//! - `DELETE /activities/{name}/unregister?email={email}`
//!
//! Path segments and query values are percent-encoded with
//! `encodeURIComponent` rules.

use serde::{Deserialize, Serialize};

pub const ACTIVITIES_PATH: &str = "/activities";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
}

/// Error body sent with non-2xx responses.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    /// Text to show the user. Non-string details (validation error lists)
    /// come back as compact JSON.
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Extracts `detail` from an error body, if the body has one.
pub fn parse_error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.message())
}

pub fn signup_path(activity: &str) -> String {
    format!("{ACTIVITIES_PATH}/{}/signup", encode_component(activity))
}

pub fn unregister_path(activity: &str, email: &str) -> String {
    format!(
        "{ACTIVITIES_PATH}/{}/unregister?email={}",
        encode_component(activity),
        encode_component(email)
    )
}

/// Percent-encodes everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
pub fn encode_component(raw: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(raw.len());
    for &b in raw.as_bytes() {
        match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(b as char),
            _ => {
                out.push('%');
                out.push(HEX[(b >> 4) as usize] as char);
                out.push(HEX[(b & 0x0f) as usize] as char);
            }
        }
    }
    out
}
