use std::net::SocketAddr;

/// Runtime configuration shared by the server and CLI binaries.
///
/// Credentials for the upstream API are deliberately NOT part of this struct:
/// they are read from the environment at call time by
/// `kwfusion_labs::Credentials::from_env`, so a missing credential surfaces as
/// a per-request configuration error rather than a startup failure.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub labs_base_url: String,
    pub request_timeout_secs: u64,
}
