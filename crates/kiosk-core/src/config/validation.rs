use crate::config::types::KioskConfig;
use crate::errors::ConfigError;

/// Validate the configuration.
///
/// Rejects zero intervals and timeouts (they would turn worker loops into
/// busy loops), a zero control port and an empty browser command.
pub fn validate_config(config: &KioskConfig) -> Result<(), ConfigError> {
    if config.control.port == Some(0) {
        return Err(invalid("control.port must be greater than 0"));
    }

    let durations = [
        ("control.read_timeout_secs", config.control.read_timeout_secs),
        ("refresh.interval_secs", config.refresh.interval_secs),
        (
            "refresh.navigate_timeout_secs",
            config.refresh.navigate_timeout_secs,
        ),
        ("network.poll_interval_secs", config.network.poll_interval_secs),
        ("network.probe_timeout_secs", config.network.probe_timeout_secs),
        ("display.pump_interval_ms", config.display.pump_interval_ms),
        ("shutdown.timeout_secs", config.shutdown.timeout_secs),
    ];
    for (name, value) in durations {
        if value == Some(0) {
            return Err(invalid(&format!("{} must be greater than 0", name)));
        }
    }

    if config.display.browser().trim().is_empty() {
        return Err(invalid("display.browser must not be empty"));
    }

    if let Some(url) = &config.network.probe_url
        && url.trim().is_empty()
    {
        return Err(invalid("network.probe_url must not be empty"));
    }

    if config.targets.default_target().trim().is_empty() {
        return Err(invalid("targets.default must not be empty"));
    }

    Ok(())
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::InvalidConfiguration {
        message: message.to_string(),
    }
}
