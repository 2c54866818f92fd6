//! Engine settings, layered from defaults, an optional file and the environment.
//!
//! ```toml
//! # coexist.toml
//! order_policy = "enforce"   # or "trust"
//! report_singletons = false
//! log_filter = "info"
//! ```
//!
//! Every key can also be given as an environment variable with the `COEXIST_`
//! prefix, e.g. `COEXIST_ORDER_POLICY=trust`.

use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_CONFIG_FILE: &str = "coexist.toml";
pub const ENV_PREFIX: &str = "COEXIST";

/// How the engine treats a start that lies before the previously reported one.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderPolicy {
    /// Reject the report with an out of order error.
    #[default]
    Enforce,
    /// Accept it. Grouping results are then undefined.
    Trust,
}

#[derive(Clone, PartialEq, Eq, Debug, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub order_policy: OrderPolicy,
    /// Also notify closed groups that only ever had one member.
    pub report_singletons: bool,
    /// Filter directive used when the binary sets up logging.
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            order_policy: OrderPolicy::Enforce,
            report_singletons: false,
            log_filter: String::from("info"),
        }
    }
}

impl EngineConfig {
    /// Loads the configuration. Without an explicit path the default file is
    /// read if it exists; an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };
        Self::from_builder(Config::builder().add_source(file))
    }
    /// Loads the configuration from the environment alone.
    pub fn from_env() -> Result<Self> {
        Self::from_builder(Config::builder())
    }
    fn from_builder(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
