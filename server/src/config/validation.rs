//! Setting value validation.

use std::net::IpAddr;

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "SERVER_PORT" | "KEEP_ALIVE_PORT" => validate_int_range(value, 1, 65535)?,
        "FETCH_TIMEOUT_SECS" => validate_int_range(value, 1, 600)?,
        "BIND_ADDRESS" => {
            value
                .parse::<IpAddr>()
                .map_err(|_| "must be an IPv4 or IPv6 address")?;
        }
        "FONT_PATH" => {
            if value.is_empty() {
                return Err("must not be empty".into());
            }
        }
        // Boolean settings
        k if is_boolean_setting(k) => {
            if value != "true" && value != "false" {
                return Err("must be 'true' or 'false'".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

fn is_boolean_setting(key: &str) -> bool {
    matches!(key, "KEEP_ALIVE_ENABLED" | "ACCEPT_INVALID_CERTS")
}
