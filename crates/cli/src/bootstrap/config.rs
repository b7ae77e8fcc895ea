use delver_domain::config::{CliOverrides, Config};
use std::path::Path;

pub fn load_config(config_path: Option<&Path>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(config_path, overrides)?;
    config.validate()?;
    Ok(config)
}
