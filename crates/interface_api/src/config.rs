//! API configuration

use serde::Deserialize;

use domain_restatement::validation::DEFAULT_MAX_DAILY_SERIES_YEARS;
use domain_tariff::Region;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Decimal places of the final rounding when a request sets none
    pub default_decimals: u32,
    /// Longest daily SELIC window accepted without a warning
    pub max_daily_series_years: u32,
    /// Region reported as default by the schedule listing
    pub default_region: Region,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_json: false,
            default_decimals: 2,
            max_daily_series_years: DEFAULT_MAX_DAILY_SERIES_YEARS,
            default_region: Region::Cjf,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `CALC_*` environment variables
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_json", defaults.log_json)?
            .set_default("default_decimals", i64::from(defaults.default_decimals))?
            .set_default("max_daily_series_years", i64::from(defaults.max_daily_series_years))?
            .set_default("default_region", defaults.default_region.code())?
            .add_source(config::Environment::with_prefix("CALC").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.max_daily_series_years, 10);
        assert_eq!(config.default_region, Region::Cjf);
    }
}
