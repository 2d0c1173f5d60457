use std::collections::HashMap;
use std::net::IpAddr;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_path: String,
    pub audio_dir: PathBuf,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let host = env_map
            .get("HOST")
            .map(|s| s.as_str())
            .unwrap_or("0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|_| {
                ConfigError::InvalidValue("HOST".to_string(), "must be an IP address".to_string())
            })?;

        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let database_path = non_empty(&env_map, "DATABASE_PATH", "./audio.db")?;
        let audio_dir = PathBuf::from(non_empty(&env_map, "AUDIO_DIR", "./audios")?);

        let max_upload_bytes = match env_map.get("MAX_UPLOAD_BYTES") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue(
                        "MAX_UPLOAD_BYTES".to_string(),
                        format!("must be a positive integer, got {}", raw),
                    ))
                }
            },
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Config {
            host,
            port,
            database_path,
            audio_dir,
            max_upload_bytes,
        })
    }
}

fn non_empty(
    env_map: &HashMap<String, String>,
    key: &str,
    default: &str,
) -> Result<String, ConfigError> {
    match env_map.get(key) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidValue(
            key.to_string(),
            "must not be empty".to_string(),
        )),
        Some(value) => Ok(value.trim().to_string()),
        None => Ok(default.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_env_map(HashMap::new()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host.to_string(), "0.0.0.0");
        assert_eq!(config.database_path, "./audio.db");
        assert_eq!(config.audio_dir, PathBuf::from("./audios"));
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[test]
    fn test_overrides() {
        let mut env_map = HashMap::new();
        env_map.insert("PORT".to_string(), "9000".to_string());
        env_map.insert("HOST".to_string(), "127.0.0.1".to_string());
        env_map.insert("DATABASE_PATH".to_string(), "/tmp/catalog.db".to_string());
        env_map.insert("AUDIO_DIR".to_string(), "/tmp/audios".to_string());
        env_map.insert("MAX_UPLOAD_BYTES".to_string(), "1024".to_string());

        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host.to_string(), "127.0.0.1");
        assert_eq!(config.database_path, "/tmp/catalog.db");
        assert_eq!(config.audio_dir, PathBuf::from("/tmp/audios"));
        assert_eq!(config.max_upload_bytes, 1024);
    }

    #[test]
    fn test_invalid_port() {
        let mut env_map = HashMap::new();
        env_map.insert("PORT".to_string(), "not_a_number".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "PORT"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_invalid_host() {
        let mut env_map = HashMap::new();
        env_map.insert("HOST".to_string(), "localhost:80".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "HOST"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_empty_audio_dir() {
        let mut env_map = HashMap::new();
        env_map.insert("AUDIO_DIR".to_string(), "   ".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "AUDIO_DIR"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_zero_upload_limit() {
        let mut env_map = HashMap::new();
        env_map.insert("MAX_UPLOAD_BYTES".to_string(), "0".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "MAX_UPLOAD_BYTES"),
            _ => panic!("Expected InvalidValue error"),
        }
    }
}
