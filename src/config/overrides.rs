//! Command-line overrides layered over the file configuration.
//!
//! Applied at startup and again to every reloaded config, so an edit to the
//! file never silently replaces a value given on the command line.

use crate::config::schema::DashboardConfig;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    /// Replaces `api.base_url`.
    pub base_url: Option<String>,
    /// Replaces `server.bind_address`.
    pub bind_address: Option<String>,
}

impl Overrides {
    /// Write every override into `config`.
    pub fn apply(&self, config: &mut DashboardConfig) {
        if let Some(url) = &self.base_url {
            replace("api.base_url", &mut config.api.base_url, url);
        }
        if let Some(bind) = &self.bind_address {
            replace("server.bind_address", &mut config.server.bind_address, bind);
        }
    }
}

fn replace(field: &'static str, slot: &mut String, value: &str) {
    if slot != value {
        tracing::info!(
            field,
            file_value = %slot,
            override_value = %value,
            "Command-line override takes precedence over config file"
        );
        *slot = value.to_string();
    }
}
