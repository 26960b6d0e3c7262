// =============================================================================
// CONFIGURATION MODULE
// =============================================================================
// This module handles loading configuration from environment variables.
//
// LEARNING NOTES:
// - Environment variables are the standard way to configure containers
// - We parse them into a strongly-typed Config struct
// - This makes configuration errors obvious at startup, not runtime
//
// Nothing is required: the service runs on its built-in sample data, so
// every variable has a default.
// =============================================================================

use anyhow::{Context, Result};
use std::env;

use crate::latency::Latency;

// -----------------------------------------------------------------------------
// CONFIG STRUCT
// -----------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// HTTP server port (default: 8003)
    pub port: u16,

    /// Delay of a regular API call in milliseconds (default: 500)
    pub delay_ms: u64,

    /// Delay of the unread counter and search suggestions (default: 100)
    pub light_delay_ms: u64,

    /// Delay of report generation (default: 2000)
    pub heavy_delay_ms: u64,

    /// When false, calls answer immediately (default: true)
    pub simulate_latency: bool,
}

/// Read `name`, falling back to `default` when unset, and parse it
fn var_or<T>(name: &str, default: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .trim()
        .parse()
        .with_context(|| format!("Failed to parse {}", name))
}

impl Config {
    // -------------------------------------------------------------------------
    // LOAD CONFIGURATION FROM ENVIRONMENT
    // -------------------------------------------------------------------------
    /// Creates a Config by reading environment variables.
    ///
    /// # Returns
    /// - `Ok(Config)` with defaults for anything unset
    /// - `Err` if a variable is set but doesn't parse
    ///
    /// # Example
    /// ```ignore
    /// let config = Config::from_env()?;
    /// println!("Server will listen on port {}", config.port);
    /// ```
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: var_or("PORT", "8003")?,
            delay_ms: var_or("API_DELAY_MS", "500")?,
            light_delay_ms: var_or("API_LIGHT_DELAY_MS", "100")?,
            heavy_delay_ms: var_or("API_HEAVY_DELAY_MS", "2000")?,
            simulate_latency: var_or("SIMULATE_LATENCY", "true")?,
        })
    }

    /// Delay strategy handed to the API
    pub fn latency(&self) -> Latency {
        if self.simulate_latency {
            Latency::from_millis(self.delay_ms, self.light_delay_ms, self.heavy_delay_ms)
        } else {
            Latency::None
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
// Environment variables are process-wide, so everything that touches them
// lives in a single test.
#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::time::Duration;

    use crate::latency::CallWeight;

    const VARS: [&str; 5] = [
        "PORT",
        "API_DELAY_MS",
        "API_LIGHT_DELAY_MS",
        "API_HEAVY_DELAY_MS",
        "SIMULATE_LATENCY",
    ];

    #[test]
    fn test_config_from_env() {
        for var in VARS {
            env::remove_var(var);
        }

        // Defaults
        let config = Config::from_env().expect("Failed to load config");
        assert_eq!(config.port, 8003);
        assert_eq!(config.latency(), Latency::from_millis(500, 100, 2000));

        // Overrides
        env::set_var("PORT", "9000");
        env::set_var("API_HEAVY_DELAY_MS", "50");
        let config = Config::from_env().expect("Failed to load config");
        assert_eq!(config.port, 9000);
        assert_eq!(config.latency().delay(CallWeight::Heavy), Duration::from_millis(50));

        env::set_var("SIMULATE_LATENCY", "false");
        let config = Config::from_env().expect("Failed to load config");
        assert_eq!(config.latency(), Latency::None);

        // Bad values name the variable
        env::set_var("PORT", "eighty");
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("PORT"));

        // Clean up
        for var in VARS {
            env::remove_var(var);
        }
    }
}
