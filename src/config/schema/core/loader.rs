use super::Config;
use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;
use std::path::Path;

const STATE_DIR_NAME: &str = ".intro-writer";
const CONFIG_FILE_NAME: &str = "config.toml";

impl Config {
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        Self::load_or_init_in(&home.join(STATE_DIR_NAME))
    }

    /// Load `config.toml` from `state_dir`, writing defaults on first run.
    pub fn load_or_init_in(state_dir: &Path) -> Result<Self> {
        let config_path = state_dir.join(CONFIG_FILE_NAME);

        if !state_dir.exists() {
            fs::create_dir_all(state_dir).context("Failed to create .intro-writer directory")?;
        }

        let mut config = if config_path.exists() {
            let contents =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            let mut config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            config.config_path.clone_from(&config_path);
            config.state_dir = state_dir.to_path_buf();
            config
        } else {
            let config = Self {
                config_path: config_path.clone(),
                state_dir: state_dir.to_path_buf(),
                ..Self::default()
            };
            config.validate()?;
            config.save()?;
            config
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }
}
