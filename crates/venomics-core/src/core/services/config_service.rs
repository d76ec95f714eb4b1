//! Turns stored settings plus an API key into client and polling options.

use crate::AppError;
use crate::api::transport::{ClientConfig, DEFAULT_TIMEOUT_SECS};
use crate::core::jobs::{DEFAULT_POLL_INTERVAL, PollOptions};
use crate::core::pagination::DEFAULT_PAGE_SIZE;
use crate::error::ConfigError;
use crate::storage::config::Config;
use crate::utils::validation::{validate_positive, validate_url};
use std::path::PathBuf;
use std::time::Duration;

pub struct ConfigService {
    config: Config,
}

impl ConfigService {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Configured URL, falling back to VENOMICS_URL.
    pub fn get_url(&self) -> Option<String> {
        self.config.get_url()
    }

    pub fn set_url(&mut self, url: String) {
        self.config.set_url(url);
    }

    pub fn has_url(&self) -> bool {
        self.get_url().is_some()
    }

    pub fn set_timeout_secs(&mut self, secs: u64) {
        self.config.timeout_secs = Some(secs);
    }

    pub fn set_poll_interval_secs(&mut self, secs: u64) {
        self.config.poll_interval_secs = Some(secs);
    }

    pub fn set_page_size(&mut self, page_size: u32) {
        self.config.page_size = Some(page_size);
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn poll_interval(&self) -> Duration {
        self.config
            .poll_interval_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_POLL_INTERVAL)
    }

    pub fn page_size(&self) -> u32 {
        self.config.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Check every stored value; the URL is optional here.
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(url) = &self.config.url {
            validate_url(url)?;
        }
        if let Some(secs) = self.config.timeout_secs {
            validate_positive("timeout_secs", secs)?;
        }
        if let Some(secs) = self.config.poll_interval_secs {
            validate_positive("poll_interval_secs", secs)?;
        }
        if let Some(size) = self.config.page_size {
            validate_positive("page_size", u64::from(size))?;
        }
        Ok(())
    }

    /// Client settings; `url_override` wins over the stored URL.
    pub fn client_config(
        &self,
        url_override: Option<&str>,
        api_key: String,
    ) -> Result<ClientConfig, AppError> {
        let url = match url_override {
            Some(url) => url.to_string(),
            None => self.get_url().ok_or_else(|| ConfigError::MissingField {
                field: "url".to_string(),
                hint: "Pass --url, run 'venomics config set --url <URL>' or set VENOMICS_URL"
                    .to_string(),
            })?,
        };
        validate_url(&url)?;

        Ok(ClientConfig::new(url, api_key)
            .with_timeout(self.timeout())
            .with_page_size(self.page_size()))
    }

    /// Poll settings; `deadline` bounds the total wait when given.
    pub fn poll_options(&self, deadline: Option<Duration>) -> PollOptions {
        let options = PollOptions::default().with_interval(self.poll_interval());
        match deadline {
            Some(deadline) => options.with_deadline(deadline),
            None => options,
        }
    }

    pub fn save_config(&self, path: Option<PathBuf>) -> Result<(), AppError> {
        Ok(self.config.save(path)?)
    }
}
