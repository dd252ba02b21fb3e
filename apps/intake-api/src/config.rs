use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, server::ServerConfig};
use database::mongodb::MongoConfig;
use domain_submissions::LocalRedirect;
use std::path::PathBuf;

pub use core_config::Environment;

pub const DEFAULT_STATIC_DIR: &str = "public";

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Raw `APP_ENV`, reported as-is by the diagnostics endpoint
    pub environment_name: Option<String>,
    /// Where accepted submissions are redirected (`SUBMIT_REDIRECT_PATH`)
    pub redirect: LocalRedirect,
    /// Static asset root (`STATIC_DIR`)
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let redirect = redirect_from_env()?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
            environment_name: Environment::raw_name(),
            redirect,
            static_dir: PathBuf::from(env_or_default("STATIC_DIR", DEFAULT_STATIC_DIR)),
        })
    }
}

fn redirect_from_env() -> Result<LocalRedirect, ConfigError> {
    match std::env::var("SUBMIT_REDIRECT_PATH") {
        Ok(raw) => LocalRedirect::parse(&raw).map_err(|e| ConfigError::ParseError {
            key: "SUBMIT_REDIRECT_PATH".to_string(),
            details: e.to_string(),
        }),
        Err(_) => Ok(LocalRedirect::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 5] = [
        "APP_ENV",
        "MONGODB_URI",
        "SUBMIT_REDIRECT_PATH",
        "STATIC_DIR",
        "PORT",
    ];

    fn with_env<F: FnOnce()>(set: &[(&str, &str)], f: F) {
        let vars: Vec<(&str, Option<&str>)> = VARS
            .iter()
            .map(|key| {
                let value = set.iter().find(|(k, _)| k == key).map(|(_, v)| *v);
                (*key, value)
            })
            .collect();
        temp_env::with_vars(vars, f);
    }

    #[test]
    fn test_defaults() {
        with_env(&[], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.environment, Environment::Development);
            assert_eq!(config.environment_name, None);
            assert_eq!(config.redirect.as_str(), "/");
            assert_eq!(config.static_dir, PathBuf::from("public"));
            assert_eq!(config.server.port, 3000);
            assert!(config.mongodb.uri().is_none());
        });
    }

    #[test]
    fn test_missing_uri_does_not_fail_startup() {
        with_env(&[("APP_ENV", "production")], || {
            let config = Config::from_env().unwrap();
            assert!(config.environment.is_production());
            assert_eq!(config.environment_name.as_deref(), Some("production"));
        });
    }

    #[test]
    fn test_local_redirect_is_kept() {
        with_env(&[("SUBMIT_REDIRECT_PATH", "/thanks")], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.redirect.as_str(), "/thanks");
        });
    }

    #[test]
    fn test_external_redirect_is_rejected() {
        for target in ["https://www.example.com/", "//example.com"] {
            with_env(&[("SUBMIT_REDIRECT_PATH", target)], || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("SUBMIT_REDIRECT_PATH"));
            });
        }
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        with_env(&[("PORT", "not-a-port")], || {
            assert!(Config::from_env().is_err());
        });
    }
}
