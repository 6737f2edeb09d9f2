//! Avatar video hosting configuration
//!
//! Decides the base URL every avatar video URL is built on. Precedence:
//! 1. `public_url` (tunnel URL or bare host/IP)
//! 2. `cdn_url`
//! 3. the machine's outbound local IP, when `detect_local_ip` is set
//! 4. `http://localhost:8000/videos`

use serde::{Deserialize, Serialize};
use std::net::UdpSocket;

use crate::constants::{env, videos};

/// Avatar video hosting settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarConfig {
    /// Public host the videos are reachable at (ngrok URL, full URL or bare IP)
    #[serde(default = "default_public_url")]
    pub public_url: Option<String>,

    /// CDN base URL for the videos
    #[serde(default = "default_cdn_url")]
    pub cdn_url: Option<String>,

    /// Discover the local network IP when nothing else is configured
    #[serde(default)]
    pub detect_local_ip: bool,
}

fn default_public_url() -> Option<String> {
    non_empty_env(env::NGROK_URL)
}

fn default_cdn_url() -> Option<String> {
    non_empty_env(env::AVATAR_CDN_URL)
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            public_url: default_public_url(),
            cdn_url: default_cdn_url(),
            detect_local_ip: false,
        }
    }
}

impl AvatarConfig {
    /// Resolve the base URL for avatar videos
    ///
    /// Order: public host, CDN, detected LAN IP, localhost. A configured CDN
    /// wins over the LAN IP.
    pub fn video_base_url(&self, port: u16) -> String {
        if let Some(host) = self.public_url.as_deref().filter(|h| !h.trim().is_empty()) {
            return base_url_for_host(host.trim(), port);
        }

        if let Some(cdn) = self.cdn_url.as_deref().filter(|c| !c.trim().is_empty()) {
            return normalize_cdn_url(cdn.trim(), port);
        }

        if self.detect_local_ip {
            let ip = detect_local_ip().unwrap_or_else(|| "localhost".to_string());
            return base_url_for_host(&ip, port);
        }

        videos::DEFAULT_BASE_URL.to_string()
    }
}

/// Build the base URL for an explicit host
///
/// Tunnel and full URLs keep their scheme and get `/videos` appended once;
/// bare hosts are served over plain HTTP on the server port.
pub fn base_url_for_host(host: &str, port: u16) -> String {
    let host = host.trim_end_matches('/');
    if host.contains("ngrok") || host.starts_with("http") {
        if host.ends_with(videos::PATH_SEGMENT) {
            host.to_string()
        } else {
            format!("{}{}", host, videos::PATH_SEGMENT)
        }
    } else {
        format!("http://{}:{}{}", host, port, videos::PATH_SEGMENT)
    }
}

/// A CDN value without a scheme is treated as a path on the local server
pub fn normalize_cdn_url(cdn: &str, port: u16) -> String {
    let cdn = cdn.trim_end_matches('/');
    if cdn.starts_with("http") {
        cdn.to_string()
    } else {
        let path = cdn.trim_start_matches('/');
        format!("http://localhost:{}/{}", port, path)
    }
}

/// Outbound local IP via a connected UDP socket (nothing is sent)
pub fn detect_local_ip() -> Option<String> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect(videos::LOCAL_IP_PROBE).ok()?;
    let addr = socket.local_addr().ok()?;
    tracing::debug!(ip = %addr.ip(), "Detected local IP for avatar videos");
    Some(addr.ip().to_string())
}
