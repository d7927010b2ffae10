use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, str::FromStr};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default)]
    pub database_url: String,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    #[serde(default = "default_site_url")]
    pub site_url: String,

    #[serde(default)]
    pub resume_google_drive_id: Option<String>,

    #[serde(default)]
    pub show_blogs: bool,

    #[serde(default)]
    pub trust_x_forwarded_for: bool,

    #[serde(default = "default_contact_rate_limit_max")]
    pub contact_rate_limit_max: u32,

    #[serde(default = "default_contact_rate_limit_window_ms")]
    pub contact_rate_limit_window_ms: i64,

    #[serde(default = "default_rate_limit_sweep_probability")]
    pub rate_limit_sweep_probability: f64,

    #[serde(default = "default_rate_limit_sweep_interval_secs")]
    pub rate_limit_sweep_interval_secs: u64,

    #[serde(default = "default_email_host")]
    pub email_host: String,

    #[serde(default = "default_email_port")]
    pub email_port: u16,

    #[serde(default)]
    pub email_user: Option<String>,

    #[serde(default)]
    pub email_pass: Option<String>,

    #[serde(default)]
    pub notification_email: Option<String>,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Portfolio-Site".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_site_url() -> String {
    "http://localhost:8080".to_string()
}
fn default_contact_rate_limit_max() -> u32 {
    5
}
fn default_contact_rate_limit_window_ms() -> i64 {
    3_600_000
}
fn default_rate_limit_sweep_probability() -> f64 {
    0.05
}
fn default_rate_limit_sweep_interval_secs() -> u64 {
    300
}
fn default_email_host() -> String {
    "smtp.gmail.com".to_string()
}
fn default_email_port() -> u16 {
    465
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            env: default_env(),
            name: default_name(),
            port: default_port(),
            host: default_host(),
            worker_count: default_worker_count(),
            database_url: String::new(),
            cors_allowed_origins: default_cors_origins(),
            site_url: default_site_url(),
            resume_google_drive_id: None,
            show_blogs: false,
            trust_x_forwarded_for: false,
            contact_rate_limit_max: default_contact_rate_limit_max(),
            contact_rate_limit_window_ms: default_contact_rate_limit_window_ms(),
            rate_limit_sweep_probability: default_rate_limit_sweep_probability(),
            rate_limit_sweep_interval_secs: default_rate_limit_sweep_interval_secs(),
            email_host: default_email_host(),
            email_port: default_email_port(),
            email_user: None,
            email_pass: None,
            notification_email: None,
        }
    }
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins")
                    .try_parsing(true)
                    .ignore_empty(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // Fall back to the conventional unprefixed variable used by sqlx tooling
        config.database_url = fill_or_env(config.database_url, "DATABASE_URL")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.database_url.trim().is_empty() {
            errors.push("DATABASE_URL cannot be empty");
        }
        if url::Url::parse(&self.site_url).is_err() {
            errors.push("SITE_URL must be an absolute URL");
        }
        if self.worker_count == 0 {
            errors.push("WORKER_COUNT must be at least 1");
        }
        if self.contact_rate_limit_max == 0 {
            errors.push("CONTACT_RATE_LIMIT_MAX must be at least 1");
        }
        if self.contact_rate_limit_window_ms <= 0 {
            errors.push("CONTACT_RATE_LIMIT_WINDOW_MS must be positive");
        }
        if !(0.0..=1.0).contains(&self.rate_limit_sweep_probability) {
            errors.push("RATE_LIMIT_SWEEP_PROBABILITY must be within 0.0..=1.0");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Site root without a trailing slash, used to build absolute links.
    pub fn site_root(&self) -> &str {
        self.site_url.trim_end_matches('/')
    }

    pub fn resume_url(&self) -> Option<String> {
        self.resume_google_drive_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| format!("https://drive.google.com/file/d/{}/view", id))
    }

    /// Address notifications are delivered to; defaults to the SMTP account.
    pub fn notification_recipient(&self) -> Option<&str> {
        self.notification_email
            .as_deref()
            .or(self.email_user.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

fn fill_or_env(current: String, env_key: &str) -> Result<String, ConfigError> {
    if current.trim().is_empty() {
        env::var(env_key).map_err(|_| ConfigError::Message(format!("{env_key} must be set")))
    } else {
        Ok(current)
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl Redact for Option<String> {
    fn redact(&self) -> &str {
        match self {
            Some(value) => value.redact(),
            None => "[MISSING]",
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("database_url", &self.database_url.redact())
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("site_url", &self.site_url)
            .field("resume_google_drive_id", &self.resume_google_drive_id)
            .field("show_blogs", &self.show_blogs)
            .field("trust_x_forwarded_for", &self.trust_x_forwarded_for)
            .field("contact_rate_limit_max", &self.contact_rate_limit_max)
            .field("contact_rate_limit_window_ms", &self.contact_rate_limit_window_ms)
            .field("rate_limit_sweep_probability", &self.rate_limit_sweep_probability)
            .field("rate_limit_sweep_interval_secs", &self.rate_limit_sweep_interval_secs)
            .field("email_host", &self.email_host)
            .field("email_port", &self.email_port)
            .field("email_user", &self.email_user)
            .field("email_pass", &self.email_pass.redact())
            .field("notification_email", &self.notification_email)
            .finish()
    }
}
