use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub supabase: SupabaseConfig,
    pub storage: StorageConfig,
    pub links: LinksConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    pub base_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub bucket: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    pub webhook_endpoint: String,
    #[serde(default = "default_feed_poll_secs")]
    pub feed_poll_secs: u64,
}

fn default_feed_poll_secs() -> u64 {
    5
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // Try the config file first; without one, build from env vars alone.
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                toml::from_str(&config_str).map_err(|e| format!("Failed to parse config file: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                // The store URL and key must be provided when there is no config file.
                let base_url = get_env("SUPABASE_URL")
                    .ok_or("Missing SUPABASE_URL env var and no config.toml found")?;
                let api_key = get_env("SUPABASE_API_KEY")
                    .ok_or("Missing SUPABASE_API_KEY env var and no config.toml found")?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    supabase: SupabaseConfig { base_url, api_key },
                    storage: StorageConfig {
                        bucket: get_env("STORAGE_BUCKET")
                            .unwrap_or_else(|| "campaign-media".to_string()),
                    },
                    links: LinksConfig {
                        webhook_endpoint: get_env("LINKS_WEBHOOK_ENDPOINT").unwrap_or_else(|| {
                            "https://req.iszap.com.br/webhook/criador-links-qrcode".to_string()
                        }),
                        feed_poll_secs: get_env_parse("LINKS_FEED_POLL_SECS", 5u64),
                    },
                }
            }
            Err(e) => {
                return Err(format!("Failed to read config file {config_path}: {e}").into());
            }
        };

        // Env vars override the file when both are present.
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("SUPABASE_URL") {
            config.supabase.base_url = v;
        }
        if let Ok(v) = env::var("SUPABASE_API_KEY") {
            config.supabase.api_key = v;
        }
        if let Ok(v) = env::var("STORAGE_BUCKET") {
            config.storage.bucket = v;
        }
        if let Ok(v) = env::var("LINKS_WEBHOOK_ENDPOINT") {
            config.links.webhook_endpoint = v;
        }
        if let Ok(v) = env::var("LINKS_FEED_POLL_SECS")
            && let Ok(n) = v.parse()
        {
            config.links.feed_poll_secs = n;
        }

        Ok(config)
    }
}
