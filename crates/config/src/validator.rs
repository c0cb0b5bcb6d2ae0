use crate::config::Config;
use log::{error, info};

pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

pub fn validate(config: &Config) -> bool {
    info!("Starting configuration validation...");

    // --- Validate Log level ---
    if !VALID_LOG_LEVELS
        .iter()
        .any(|lvl| lvl.eq_ignore_ascii_case(&config.log.level))
    {
        error!("Invalid log level: {}", config.log.level);
        return false;
    }

    // --- Validate listen address ---
    if config.listen.address.is_empty() {
        error!("Listen address is empty");
        return false;
    }

    // --- Validate listen port ---
    if config.listen.port == 0 || config.listen.port > 65535 {
        error!(
            "Invalid listen port: {} (must be between 1 and 65535)",
            config.listen.port
        );
        return false;
    }

    // --- Validate relay buffer size ---
    if config.buffer_size == 0 {
        error!("Relay buffer size is invalid (0)");
        return false;
    }

    // --- Validate targets ---
    if config.targets.is_empty() {
        error!("No targets configured");
        return false;
    }

    info!("Configuration validation passed successfully\n");

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Listen, Log};

    fn config(targets: Vec<&str>) -> Config {
        Config {
            listen: Listen {
                address: "127.0.0.1".to_string(),
                port: 8080,
            },
            buffer_size: 4096,
            targets: targets.into_iter().map(str::to_string).collect(),
            log: Log {
                level: "info".to_string(),
            },
        }
    }

    #[test]
    fn accepts_a_complete_config() {
        assert!(validate(&config(vec!["127.0.0.1:3000"])));
    }

    #[test]
    fn rejects_empty_targets() {
        assert!(!validate(&config(vec![])));
    }

    #[test]
    fn rejects_port_out_of_range() {
        let mut cfg = config(vec!["127.0.0.1:3000"]);
        cfg.listen.port = 0;
        assert!(!validate(&cfg));

        cfg.listen.port = 70000;
        assert!(!validate(&cfg));
    }

    #[test]
    fn rejects_zero_buffer_size() {
        let mut cfg = config(vec!["127.0.0.1:3000"]);
        cfg.buffer_size = 0;
        assert!(!validate(&cfg));
    }

    #[test]
    fn rejects_unknown_log_level() {
        let mut cfg = config(vec!["127.0.0.1:3000"]);
        cfg.log.level = "shouting".to_string();
        assert!(!validate(&cfg));
    }

    #[test]
    fn defaults_fill_in_missing_fields() {
        let cfg: Config = serde_yaml::from_str("targets:\n  - \"10.0.0.1:9001\"\n").unwrap();

        assert_eq!(cfg.listen.address, "127.0.0.1");
        assert_eq!(cfg.listen.port, 80);
        assert_eq!(cfg.buffer_size, 4096);
        assert_eq!(cfg.log.level, "info");
        assert!(validate(&cfg));
    }
}
