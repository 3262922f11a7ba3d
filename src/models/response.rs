use serde::{Deserialize, Serialize};

use super::{File, Peer, SystemSnapshot, Torrent, Tracker};

pub const STATUS_OK: &str = "ok";
pub const STATUS_ERROR: &str = "error";

/// Envelope without a payload, used for actions and errors
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: STATUS_OK.to_string(),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.to_string(),
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ViewResponse {
    pub status: String,
    pub torrents: Vec<Torrent>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilesResponse {
    pub status: String,
    pub files: Vec<File>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PeersResponse {
    pub status: String,
    pub peers: Vec<Peer>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrackersResponse {
    pub status: String,
    pub trackers: Vec<Tracker>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MethodsResponse {
    pub status: String,
    pub methods: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SystemResponse {
    pub status: String,
    pub system: SystemSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope_omits_message() {
        let json = serde_json::to_string(&StatusResponse::ok()).unwrap();
        assert_eq!(json, r#"{"status":"ok"}"#);
    }

    #[test]
    fn test_error_envelope_has_message() {
        let json = serde_json::to_string(&StatusResponse::error("boom")).unwrap();
        assert_eq!(json, r#"{"status":"error","message":"boom"}"#);
    }
}
