//! Configuration types and parser
//!
//! The dashboard's configuration is a small TOML subset embedded into
//! the firmware at compile time. This parser handles only what the
//! config actually uses:
//!
//! - `[section]` headers
//! - `key = value` pairs (quoted string, integer)
//! - comment lines (`# ...`)
//!
//! Unknown keys are skipped so old firmware tolerates newer config
//! files; unknown sections are an error because they usually mean a
//! typo in the section name.

use heapless::String;

/// Maximum WiFi SSID length in bytes
pub const MAX_SSID_LEN: usize = 32;

/// Maximum WiFi passphrase length in bytes
pub const MAX_PASSWORD_LEN: usize = 64;

/// Maximum server host length in bytes
pub const MAX_HOST_LEN: usize = 48;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unrecognized section header
    InvalidSection,
    /// Value has the wrong shape for its key
    InvalidValue,
    /// String value exceeds its field capacity
    TooLong,
}

/// WiFi credentials
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NetworkConfig {
    pub ssid: String<MAX_SSID_LEN>,
    pub password: String<MAX_PASSWORD_LEN>,
}

/// Dashboard server endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServerConfig {
    pub host: String<MAX_HOST_LEN>,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 55556,
        }
    }
}

/// Complete dashboard configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DashboardConfig {
    pub network: NetworkConfig,
    pub server: ServerConfig,
    /// Seconds between fetch+render cycles
    pub poll_interval_s: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            server: ServerConfig::default(),
            poll_interval_s: 60,
        }
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Network,
    Server,
    Dashboard,
}

/// Parse a TOML-subset configuration into `DashboardConfig`
pub fn parse_config(input: &str) -> Result<DashboardConfig, ParseError> {
    let mut config = DashboardConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = match &line[1..line.len() - 1] {
                "network" => Section::Network,
                "server" => Section::Server,
                "dashboard" => Section::Dashboard,
                _ => return Err(ParseError::InvalidSection),
            };
            continue;
        }

        let (key, value) = line.split_once('=').ok_or(ParseError::InvalidValue)?;
        let key = key.trim();
        let value = value.trim();

        match (section, key) {
            (Section::Network, "ssid") => config.network.ssid = parse_string(value)?,
            (Section::Network, "password") => config.network.password = parse_string(value)?,
            (Section::Server, "host") => config.server.host = parse_string(value)?,
            (Section::Server, "port") => config.server.port = parse_int(value)?,
            (Section::Dashboard, "poll_interval_s") => {
                config.poll_interval_s = parse_int(value)?
            }
            // Unknown keys are skipped for forward compatibility
            _ => {}
        }
    }

    Ok(config)
}

fn parse_string<const N: usize>(value: &str) -> Result<String<N>, ParseError> {
    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseError::InvalidValue)?;
    String::try_from(inner).map_err(|_| ParseError::TooLong)
}

fn parse_int(value: &str) -> Result<u16, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
# Stele dashboard configuration
[network]
ssid = "attic"
password = "hunter2 hunter2"

[server]
host = "192.168.1.20"
port = 55556

[dashboard]
poll_interval_s = 60
"#;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.network.ssid.as_str(), "attic");
        assert_eq!(config.network.password.as_str(), "hunter2 hunter2");
        assert_eq!(config.server.host.as_str(), "192.168.1.20");
        assert_eq!(config.server.port, 55556);
        assert_eq!(config.poll_interval_s, 60);
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let config = parse_config("[network]\nssid = \"attic\"\n").unwrap();
        assert_eq!(config.server.port, 55556);
        assert_eq!(config.poll_interval_s, 60);
        assert!(config.network.password.is_empty());
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert_eq!(
            parse_config("[netwrok]\nssid = \"x\"\n"),
            Err(ParseError::InvalidSection)
        );
    }

    #[test]
    fn test_unknown_key_skipped() {
        let config = parse_config("[server]\nhost = \"h\"\nfuture_knob = 3\n").unwrap();
        assert_eq!(config.server.host.as_str(), "h");
    }

    #[test]
    fn test_unquoted_string_rejected() {
        assert_eq!(
            parse_config("[network]\nssid = attic\n"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_bad_port_rejected() {
        assert_eq!(
            parse_config("[server]\nport = \"55556\"\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[server]\nport = 99999\n"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_overlong_ssid_rejected() {
        let line = "[network]\nssid = \"0123456789012345678901234567890123456789\"\n";
        assert_eq!(parse_config(line), Err(ParseError::TooLong));
    }
}
