use serde::{Deserialize, Serialize};

/// Request payload for registering a device session
///
/// The caller's IP is never taken from the body.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct InitPlayerRequest {
    pub name: String,
    #[serde(alias = "play_count")]
    pub play_count: i32,
    pub udid: String,
}

/// Response for POST /game/init
///
/// `error` is empty on success, otherwise the failure text.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct InitPlayerResponse {
    pub msg: String,
    pub error: String,
}
