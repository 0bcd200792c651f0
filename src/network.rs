use axum::{
    extract::{ConnectInfo, State},
    http::HeaderMap,
    Json,
};
use serde_json::{json, Value};
use std::net::SocketAddr;

use crate::shared::AppState;

/// Resolves the caller's address.
///
/// Proxy headers are only consulted when `trust_proxy_headers` is set, since clients can
/// forge them. Otherwise the peer socket address is used.
pub fn resolve_client_ip(headers: &HeaderMap, peer: SocketAddr, trust_proxy_headers: bool) -> String {
    if trust_proxy_headers {
        // Take the first IP in the chain
        if let Some(forwarded_for) = headers.get("x-forwarded-for") {
            if let Ok(value) = forwarded_for.to_str() {
                if let Some(ip) = value.split(',').map(str::trim).find(|ip| !ip.is_empty()) {
                    return ip.to_string();
                }
            }
        }

        if let Some(real_ip) = headers.get("x-real-ip") {
            if let Ok(value) = real_ip.to_str() {
                let value = value.trim();
                if !value.is_empty() {
                    return value.to_string();
                }
            }
        }
    }

    peer.ip().to_string()
}

/// GET /
/// Echoes the caller's address as the server sees it
pub async fn client_ip(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Json<Value> {
    let ip = resolve_client_ip(&headers, peer, state.trust_proxy_headers);
    Json(json!({ "clientIP": ip }))
}
