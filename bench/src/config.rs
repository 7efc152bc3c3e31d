use crate::args::BenchvizArgs;
use benchviz_report::config::ChartConfig;
use benchviz_report::error::ChartDataError;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use std::path::Path;
use tracing::info;

pub const ENV_PREFIX: &str = "BENCHVIZ_";
const ENV_NESTING: &str = "__";

/// Chart configuration from defaults, an optional file and `BENCHVIZ_` variables,
/// e.g. `BENCHVIZ_TREND__AGGREGATION=weekdays`.
pub struct ConfigLoader<'a> {
    path: Option<&'a Path>,
    env_prefix: &'a str,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(path: Option<&'a Path>) -> Self {
        Self {
            path,
            env_prefix: ENV_PREFIX,
        }
    }

    pub fn with_env_prefix(mut self, env_prefix: &'a str) -> Self {
        self.env_prefix = env_prefix;
        self
    }

    pub fn load_config(&self) -> Result<ChartConfig, ChartDataError> {
        let mut figment = Figment::from(Serialized::defaults(ChartConfig::default()));

        if let Some(path) = self.path {
            info!("Loading config from path: '{}'...", path.display());
            if !path.is_file() {
                return Err(ChartDataError::InvalidConfiguration(format!(
                    "Cannot find configuration file at path: '{}'.",
                    path.display()
                )));
            }
            figment = match path.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => figment.merge(Toml::file(path)),
                Some("json") => figment.merge(Json::file(path)),
                e => {
                    return Err(ChartDataError::InvalidConfiguration(format!(
                        "invalid file extension: {}, only .json and .toml are supported.",
                        e.unwrap_or_default()
                    )));
                }
            };
        }

        let config: ChartConfig = figment
            .merge(Env::prefixed(self.env_prefix).split(ENV_NESTING))
            .extract()
            .map_err(|error| {
                ChartDataError::InvalidConfiguration(format!(
                    "Failed to load configuration: {error}"
                ))
            })?;
        Ok(config)
    }
}

/// Loads the configuration and applies the command line overrides on top.
pub fn resolve(args: &BenchvizArgs) -> Result<ChartConfig, ChartDataError> {
    let mut config = ConfigLoader::new(args.config.as_deref()).load_config()?;
    apply_overrides(&mut config, args);
    config.validate()?;
    info!(
        "Using config: {}x{}, dark: {}, aggregation: {}, merge policy: {}",
        config.width, config.height, config.dark, config.trend.aggregation, config.trend.merge_policy
    );
    Ok(config)
}

fn apply_overrides(config: &mut ChartConfig, args: &BenchvizArgs) {
    if args.dark {
        config.dark = true;
    }
    if let Some(aggregation) = args.aggregation {
        config.trend.aggregation = aggregation;
    }
    if let Some(merge_policy) = args.merge_policy {
        config.trend.merge_policy = merge_policy;
    }
}
