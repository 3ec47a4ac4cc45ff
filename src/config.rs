use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    /// `None` disables persistence; every store call then fails.
    pub database_url: Option<String>,
    pub secret_key: String,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub log_level: String,
    pub mail: MailConfig,
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub from: String,
    pub verifier: String,
}

pub const DEFAULT_SECRET_KEY: &str = "dev-secret-change-in-production";
pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com/emails";
pub const DEFAULT_FROM_EMAIL: &str = "onboarding@resend.dev";
pub const DEFAULT_VERIFIER_EMAIL: &str = "cletusacaido@gmail.com";

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_optional("DATABASE_URL");
        let secret_key = env_or("SECRET_KEY", DEFAULT_SECRET_KEY);

        let host: IpAddr = env_or("GATEWAY_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid GATEWAY_HOST: {e}"))?;

        let port: u16 = env_or("PORT", "8035")
            .parse()
            .map_err(|e| format!("Invalid PORT: {e}"))?;

        let max_body_size: usize = env_or("GATEWAY_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid GATEWAY_MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("GATEWAY_LOG_LEVEL", "info");

        let verifier = env_or("VERIFIER_EMAIL", DEFAULT_VERIFIER_EMAIL);
        if !verifier.contains('@') {
            return Err(format!("Invalid VERIFIER_EMAIL: {verifier}"));
        }

        let mail = MailConfig {
            api_key: env_optional("RESEND_API_KEY"),
            api_url: env_or("RESEND_API_URL", DEFAULT_RESEND_API_URL),
            from: env_or("FROM_EMAIL", DEFAULT_FROM_EMAIL),
            verifier,
        };

        Ok(Config {
            database_url,
            secret_key,
            host,
            port,
            max_body_size,
            log_level,
            mail,
        })
    }
}

fn env_optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_optional(key).unwrap_or_else(|| default.to_string())
}
