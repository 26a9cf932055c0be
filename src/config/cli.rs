use crate::config::toml_config::RenderConfig;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "boleto-barcode")]
#[command(about = "Render a boleto digit line as an ITF barcode PNG")]
pub struct CliConfig {
    #[arg(long, help = "Digit line, with or without spaces and periods")]
    pub line: String,

    #[arg(long, short, help = "Write the PNG here instead of printing the JSON body")]
    pub output: Option<PathBuf>,

    #[arg(long, help = "TOML file with a [render] section")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Draw the encoded digits beneath the bars")]
    pub write_text: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Render settings from `--config`, with command-line flags on top.
    pub fn render_config(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::from_file(path)?,
            None => RenderConfig::default(),
        };
        if self.write_text {
            config.render.write_text = Some(true);
        }
        Ok(config)
    }
}

/// Checks the arguments themselves; the render config is validated after
/// it is loaded.
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(output) = &self.output {
            validate_path("output", &output.to_string_lossy())?;
        }
        if let Some(config) = &self.config {
            validate_path("config", &config.to_string_lossy())?;
        }
        Ok(())
    }
}
