use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ProxyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyProtocol {
    Socks4,
    Socks5,
}

impl ProxyProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProxyProtocol::Socks4 => "socks4",
            ProxyProtocol::Socks5 => "socks5",
        }
    }
}

impl fmt::Display for ProxyProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProxyProtocol {
    type Err = ProxyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "socks4" => Ok(ProxyProtocol::Socks4),
            "socks5" => Ok(ProxyProtocol::Socks5),
            _ => Err(ProxyError::UnknownProtocol(s.to_string())),
        }
    }
}

/// One proxy server. `country_code` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Proxy {
    pub ip: String,
    pub port: u16,
    pub country_code: String,
    pub protocol: ProxyProtocol,
}

impl Proxy {
    pub fn new(ip: impl Into<String>, port: u16, protocol: ProxyProtocol) -> Self {
        Self {
            ip: ip.into(),
            port,
            country_code: String::new(),
            protocol,
        }
    }

    pub fn with_country_code(mut self, code: impl Into<String>) -> Self {
        self.country_code = code.into();
        self
    }

    /// `socks5://ip:port`, the form `yt-dlp --proxy` expects.
    pub fn to_ytdlp_format(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.ip, self.port)
    }
}
