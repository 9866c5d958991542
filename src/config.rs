use std::env;
use std::net::SocketAddr;

#[derive(Clone)]
pub struct Config {
    // Admin credentials (None = login disabled, requests fail closed)
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,

    // GitHub data repository
    pub github_owner: Option<String>,
    pub github_repo: Option<String>,
    pub github_token: Option<String>,
    pub github_api_base: String,
    pub drive_links_path: String,

    // Server
    pub bind_addr: SocketAddr,

    // Set the Secure attribute on session cookies (HTTPS deployments)
    pub cookie_secure: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("admin_username", &self.admin_username)
            .field(
                "admin_password",
                &self.admin_password.as_ref().map(|_| "[REDACTED]"),
            )
            .field("github_owner", &self.github_owner)
            .field("github_repo", &self.github_repo)
            .field(
                "github_token",
                &self.github_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("github_api_base", &self.github_api_base)
            .field("drive_links_path", &self.drive_links_path)
            .field("bind_addr", &self.bind_addr)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),

    #[error("Failed to parse {0}: {1}")]
    ParseError(String, String),
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Attempt to load .env file, but don't fail if it doesn't exist
        // (env vars may be set directly in production)
        let _ = dotenvy::dotenv();

        // Credentials and repository access are optional at startup;
        // operations that need them fail closed per request instead.
        let admin_username = env_opt("ADMIN_USERNAME");
        let admin_password = env_opt("ADMIN_PASSWORD");

        let github_owner = env_opt("GITHUB_OWNER");
        let github_repo = env_opt("GITHUB_REPO");
        let github_token = env_opt("GITHUB_TOKEN");

        let github_api_base = env_opt("GITHUB_API_BASE")
            .unwrap_or_else(|| "https://api.github.com".to_string())
            .trim_end_matches('/')
            .to_string();
        if !github_api_base.starts_with("http://") && !github_api_base.starts_with("https://") {
            return Err(ConfigError::InvalidValue(
                "GITHUB_API_BASE".to_string(),
                "must be an http(s) URL".to_string(),
            ));
        }

        let drive_links_path =
            env_opt("DRIVE_LINKS_PATH").unwrap_or_else(|| "data/drive-links.json".to_string());

        // Server
        let bind_addr_str = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_addr = bind_addr_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::ParseError("BIND_ADDR".to_string(), e.to_string()))?;

        let cookie_secure = parse_env_or_default("COOKIE_SECURE", false)?;

        Ok(Config {
            admin_username,
            admin_password,
            github_owner,
            github_repo,
            github_token,
            github_api_base,
            drive_links_path,
            bind_addr,
            cookie_secure,
        })
    }

    /// Both halves of the admin credential pair are present.
    pub fn admin_configured(&self) -> bool {
        self.admin_username.is_some() && self.admin_password.is_some()
    }

    /// Owner, repository, and token are all present.
    pub fn github_configured(&self) -> bool {
        self.github_owner.is_some() && self.github_repo.is_some() && self.github_token.is_some()
    }
}

/// Read an environment variable, treating unset and blank values alike.
///
/// A variable set to "" (or whitespace) counts as unconfigured so that the
/// credential checks fail closed instead of accepting an empty secret.
fn env_opt(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(val) if !val.trim().is_empty() => Some(val),
        _ => None,
    }
}

/// Helper function to parse environment variable with a default value
fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| ConfigError::ParseError(key.to_string(), format!("{}: {}", e, val))),
        Err(_) => Ok(default),
    }
}
