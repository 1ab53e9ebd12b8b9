use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    pub graphql_url: Url,
    pub study_house_code: Option<String>,
    pub debug: bool,
    pub enable_swagger: bool,
    pub port: u16,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            // Load from environment variables with APP_ prefix. No separator,
            // so APP_STUDY_HOUSE_CODE maps to the flat study_house_code key.
            .add_source(Environment::with_prefix("APP"))
            .set_default(
                "graphql_url",
                "https://api.gankaotest2.com/api-jianke/graphql",
            )?
            .set_default("debug", false)?
            .set_default("enable_swagger", true)?
            .set_default("port", 8080)?
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
impl Settings {
    pub fn test_defaults() -> Self {
        Self {
            graphql_url: Url::parse("http://localhost:8000/graphql").unwrap(),
            study_house_code: None,
            debug: true,
            enable_swagger: false,
            port: 8080,
        }
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        unsafe {
            std::env::remove_var("APP_GRAPHQL_URL");
            std::env::remove_var("APP_STUDY_HOUSE_CODE");
            std::env::remove_var("APP_DEBUG");
            std::env::remove_var("APP_ENABLE_SWAGGER");
            std::env::remove_var("APP_PORT");
        }
        let settings = Settings::from_env().unwrap();
        assert_eq!(
            settings.graphql_url.as_str(),
            "https://api.gankaotest2.com/api-jianke/graphql"
        );
        assert!(settings.study_house_code.is_none());
        assert!(!settings.debug);
        assert!(settings.enable_swagger);
        assert_eq!(settings.port, 8080);
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        unsafe {
            std::env::set_var("APP_GRAPHQL_URL", "http://localhost:9000/graphql");
            std::env::set_var("APP_STUDY_HOUSE_CODE", "SH001");
            std::env::set_var("APP_PORT", "9090");
        }
        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.graphql_url.as_str(), "http://localhost:9000/graphql");
        assert_eq!(settings.study_house_code.as_deref(), Some("SH001"));
        assert_eq!(settings.port, 9090);
        unsafe {
            std::env::remove_var("APP_GRAPHQL_URL");
            std::env::remove_var("APP_STUDY_HOUSE_CODE");
            std::env::remove_var("APP_PORT");
        }
    }
}
