use crate::config::toml_config::RenderConfig;
use crate::core::{ConfigProvider, RenderOptions};
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use std::env;

pub const CONFIG_PATH_VAR: &str = "BARCODE_CONFIG";

#[derive(Debug, Clone, Default)]
pub struct LambdaConfig {
    pub config_path: Option<String>,
    pub render: RenderConfig,
}

impl LambdaConfig {
    /// Reads the optional render config named by `BARCODE_CONFIG`.
    pub fn from_env() -> Result<Self> {
        Self::load(env::var(CONFIG_PATH_VAR).ok())
    }

    pub fn load(config_path: Option<String>) -> Result<Self> {
        let config_path = config_path.filter(|path| !path.trim().is_empty());
        let render = match &config_path {
            Some(path) => {
                validate_path(CONFIG_PATH_VAR, path)?;
                tracing::info!("Loading render configuration from {}", path);
                RenderConfig::from_file(path)?
            }
            None => RenderConfig::default(),
        };

        Ok(Self {
            config_path,
            render,
        })
    }
}

impl ConfigProvider for LambdaConfig {
    fn render_options(&self) -> RenderOptions {
        self.render.render_options()
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        self.render.validate()?;
        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_without_path_uses_defaults() {
        for path in [None, Some(String::new()), Some("  ".to_string())] {
            let config = LambdaConfig::load(path).unwrap();
            assert!(config.config_path.is_none());
            assert_eq!(config.render_options(), RenderOptions::default());
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_load_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[render]\ndpi = 200").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = LambdaConfig::load(Some(path)).unwrap();
        assert_eq!(config.render_options().dpi, 200);
    }

    #[test]
    fn test_missing_file_fails() {
        assert!(LambdaConfig::load(Some("/nonexistent/barcode.toml".to_string())).is_err());
    }
}
