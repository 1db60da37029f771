use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tracing::warn;

pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let host = match env::var("CLINIC_API_HOST") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("CLINIC_API_HOST '{}' is not an IP address, using {}", raw, DEFAULT_HOST);
                DEFAULT_HOST
            }),
            Err(_) => {
                warn!("CLINIC_API_HOST not set, using {}", DEFAULT_HOST);
                DEFAULT_HOST
            }
        };

        let port = match env::var("CLINIC_API_PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("CLINIC_API_PORT '{}' is not a valid port, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            Err(_) => {
                warn!("CLINIC_API_PORT not set, using {}", DEFAULT_PORT);
                DEFAULT_PORT
            }
        };

        Self { host, port }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
