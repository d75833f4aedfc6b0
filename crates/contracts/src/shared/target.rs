use serde::{Deserialize, Serialize};

/// Адрес устройства, с которого читается журнал (`host` или `host:port`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SyncTarget {
    address: String,
}

impl SyncTarget {
    pub fn parse(input: &str) -> Result<Self, String> {
        let address = input.trim();
        if address.is_empty() {
            return Err("target address is empty".to_string());
        }
        if address.contains("://") {
            return Err(format!("target '{}' must not contain a scheme", address));
        }
        if address.contains('/') || address.contains('?') || address.contains('#') {
            return Err(format!("target '{}' must not contain a path", address));
        }

        let (host, port) = match address.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (address, None),
        };

        if host.is_empty() {
            return Err(format!("target '{}' has no host", address));
        }
        if !host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return Err(format!("target host '{}' contains invalid characters", host));
        }
        if host.starts_with('.') || host.ends_with('.') || host.contains("..") {
            return Err(format!("target host '{}' is malformed", host));
        }
        if let Some(port) = port {
            match port.parse::<u16>() {
                Ok(p) if p > 0 => {}
                _ => return Err(format!("target port '{}' is invalid", port)),
            }
        }

        Ok(Self {
            address: address.to_string(),
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// URL эндпоинта журнала на устройстве
    pub fn log_url(&self) -> String {
        format!("http://{}/api/g/log", self.address)
    }
}

impl std::fmt::Display for SyncTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.address)
    }
}
