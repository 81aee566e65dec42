use crate::errors::ConfigurationError;
use config::{Config, FileFormat};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use std::env::var;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Settings {
    pub application: Application,
    pub mail: MailSettings,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Application {
    pub host: String,
    pub port: u16,
    /// Directory with the static front-end, served for every non-API path.
    pub static_dir: Option<String>,
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MailSettings {
    pub host: String,
    pub port: Option<u16>,
    #[serde_as(as = "DisplayFromStr")]
    pub security: SmtpSecurity,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub sender: Option<String>,
    pub admin_address: Option<String>,
    pub company_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpSecurity {
    Tls,
    StartTls,
    None,
}

impl Display for SmtpSecurity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SmtpSecurity::Tls => write!(f, "tls"),
            SmtpSecurity::StartTls => write!(f, "starttls"),
            SmtpSecurity::None => write!(f, "none"),
        }
    }
}

impl FromStr for SmtpSecurity {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tls" => Ok(SmtpSecurity::Tls),
            "starttls" => Ok(SmtpSecurity::StartTls),
            "none" => Ok(SmtpSecurity::None),
            &_ => Err(ConfigurationError::UnknownSmtpSecurity),
        }
    }
}

/// Addresses and wording used when building the outgoing notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSettings {
    pub sender: String,
    pub admin_address: String,
    pub company_name: String,
}

impl MailSettings {
    pub fn sender(&self) -> &str {
        self.sender.as_deref().unwrap_or(&self.username)
    }

    pub fn admin_address(&self) -> &str {
        self.admin_address.as_deref().unwrap_or(&self.username)
    }

    pub fn contact_settings(&self) -> ContactSettings {
        ContactSettings {
            sender: self.sender().to_string(),
            admin_address: self.admin_address().to_string(),
            company_name: self.company_name.to_owned(),
        }
    }
}

/// The possible runtime environment for our application. Tags other than the
/// two known ones are kept as given and behave like production.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Environment {
    Development,
    Production,
    Other(String),
}

impl Environment {
    pub fn as_str(&self) -> &str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Other(tag) => tag.as_str(),
        }
    }
}

impl From<String> for Environment {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Self::Development,
            "prod" | "production" => Self::Production,
            _ => Self::Other(s),
        }
    }
}

pub fn get_env() -> Environment {
    var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "development".into())
        .into()
}

pub fn get_configuration(environment: &Environment) -> Result<Settings, config::ConfigError> {
    let second_source = format!("configuration/{}", environment.as_str());
    let settings = Config::builder()
        .add_source(config::File::new("configuration/base", FileFormat::Yaml))
        .add_source(config::File::new(&second_source, FileFormat::Yaml).required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;
    settings.try_deserialize::<Settings>()
}
