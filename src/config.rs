use std::net::SocketAddr;

use url::Url;

use crate::error::QuizError;

#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub log_level: String,
    pub webhook: Option<Webhook>,
}

/// Both variables present: serve a webhook listener. Neither: long polling.
#[derive(Debug, Clone)]
pub struct Webhook {
    pub url: Url,
    pub addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, QuizError> {
        let token = required("TELOXIDE_TOKEN")?;
        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());

        let webhook = match (
            std::env::var("WEBHOOK_URL").ok(),
            std::env::var("WEBHOOK_ADDR").ok(),
        ) {
            (Some(url), Some(addr)) => Some(Webhook {
                url: url.parse().map_err(|err: url::ParseError| {
                    QuizError::InvalidEnv {
                        name: "WEBHOOK_URL",
                        reason: err.to_string(),
                    }
                })?,
                addr: addr.parse().map_err(|err: std::net::AddrParseError| {
                    QuizError::InvalidEnv {
                        name: "WEBHOOK_ADDR",
                        reason: err.to_string(),
                    }
                })?,
            }),
            (None, None) => None,
            (Some(_), None) => return Err(QuizError::MissingEnv("WEBHOOK_ADDR")),
            (None, Some(_)) => return Err(QuizError::MissingEnv("WEBHOOK_URL")),
        };

        Ok(Self {
            token,
            log_level,
            webhook,
        })
    }
}

fn required(name: &'static str) -> Result<String, QuizError> {
    std::env::var(name).map_err(|_| QuizError::MissingEnv(name))
}
