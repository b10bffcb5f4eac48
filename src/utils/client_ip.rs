//! Client address and referrer extraction from request metadata.

use axum::http::HeaderMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

/// Maps the IPv6 loopback `::1` to `127.0.0.1`.
///
/// Every other value, IPv4 or IPv6, passes through unchanged.
pub fn normalize_ip(ip: &str) -> String {
    match ip.parse::<IpAddr>() {
        Ok(IpAddr::V6(v6)) if v6 == Ipv6Addr::LOCALHOST => Ipv4Addr::LOCALHOST.to_string(),
        _ => ip.to_string(),
    }
}

/// Determines the client address for a request.
///
/// When `behind_proxy` is set, the first `X-Forwarded-For` entry wins, then
/// `X-Real-IP`. Otherwise, or when neither header is usable, the socket peer
/// address is used. The result is normalized with [`normalize_ip`].
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> String {
    let forwarded = behind_proxy
        .then(|| forwarded_ip(headers))
        .flatten()
        .unwrap_or_else(|| peer.ip().to_string());

    normalize_ip(&forwarded)
}

fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    let from_xff = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|xff| xff.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    let from_real_ip = || {
        headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
    };

    from_xff.or_else(from_real_ip).map(str::to_string)
}

/// Returns the first non-empty of the `Referrer` and `Referer` headers.
pub fn referrer(headers: &HeaderMap) -> Option<String> {
    ["referrer", "referer"]
        .iter()
        .filter_map(|name| headers.get(*name))
        .filter_map(|v| v.to_str().ok())
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(str::to_string)
}
