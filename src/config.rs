use crate::error::config::ConfigError;
use crate::scheduler::config::warmup;

pub struct Config {
    pub database_url: String,
    pub valkey_url: String,
    pub warmup_cron: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: require_env("DATABASE_URL")?,
            valkey_url: require_env("VALKEY_URL")?,
            warmup_cron: warmup_cron_from_env()?,
        })
    }
}

fn require_env(var: &str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
}

/// `WARMUP_CRON` overrides the built-in sweep schedule when set.
fn warmup_cron_from_env() -> Result<String, ConfigError> {
    match std::env::var("WARMUP_CRON") {
        Ok(value) => {
            validate_cron("WARMUP_CRON", &value)?;
            Ok(value)
        }
        Err(_) => Ok(warmup::CRON_EXPRESSION.to_string()),
    }
}

/// Shape check only; the scheduler parses the expression properly when the
/// job is registered. Catching a truncated value here fails startup with a
/// pointer to the variable instead of a scheduler error later.
fn validate_cron(var: &str, value: &str) -> Result<(), ConfigError> {
    let fields = value.split_whitespace().count();
    if !(6..=7).contains(&fields) {
        return Err(ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: format!("cron expression needs 6 or 7 fields, got {fields}"),
        });
    }
    Ok(())
}
