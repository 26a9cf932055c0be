use crate::core::itf;
use crate::core::{ConfigProvider, RenderOptions};
use crate::domain::model::{
    mm_to_points, BARCODE_DATA_LENGTH, DEFAULT_DPI, DEFAULT_MARGIN_MM, DEFAULT_MODULE_HEIGHT_MM,
    DEFAULT_MODULE_WIDTH_MM, DEFAULT_NARROW_MODULES, DEFAULT_QUIET_ZONE_MM, DEFAULT_WIDE_MODULES,
    MAX_PIXELS, MIN_NARROW_PX, MIN_WIDE_GAP_PX,
};
use crate::utils::error::{BarcodeError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub render: RenderSection,
}

/// `[render]` table. Lengths are in millimetres; unset keys take the
/// boleto defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderSection {
    pub module_width_mm: Option<f64>,
    pub module_height_mm: Option<f64>,
    pub quiet_zone_mm: Option<f64>,
    pub margin_mm: Option<f64>,
    pub dpi: Option<u32>,
    pub write_text: Option<bool>,
    pub narrow_modules: Option<u32>,
    pub wide_modules: Option<u32>,
}

impl RenderConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| BarcodeError::ConfigError {
            message: format!(
                "Cannot read config file {}: {}",
                path.as_ref().display(),
                e
            ),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BarcodeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Expands `${VAR}` references; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BarcodeError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn module_width_mm(&self) -> f64 {
        self.render.module_width_mm.unwrap_or(DEFAULT_MODULE_WIDTH_MM)
    }

    pub fn module_height_mm(&self) -> f64 {
        self.render.module_height_mm.unwrap_or(DEFAULT_MODULE_HEIGHT_MM)
    }

    pub fn quiet_zone_mm(&self) -> f64 {
        self.render.quiet_zone_mm.unwrap_or(DEFAULT_QUIET_ZONE_MM)
    }

    pub fn margin_mm(&self) -> f64 {
        self.render.margin_mm.unwrap_or(DEFAULT_MARGIN_MM)
    }

    pub fn dpi(&self) -> u32 {
        self.render.dpi.unwrap_or(DEFAULT_DPI)
    }

    pub fn write_text(&self) -> bool {
        self.render.write_text.unwrap_or(false)
    }

    pub fn narrow_modules(&self) -> u32 {
        self.render.narrow_modules.unwrap_or(DEFAULT_NARROW_MODULES)
    }

    pub fn wide_modules(&self) -> u32 {
        self.render.wide_modules.unwrap_or(DEFAULT_WIDE_MODULES)
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_positive("render.module_width_mm", self.module_width_mm())?;
        validation::validate_positive("render.module_height_mm", self.module_height_mm())?;
        validation::validate_non_negative("render.quiet_zone_mm", self.quiet_zone_mm())?;
        validation::validate_non_negative("render.margin_mm", self.margin_mm())?;
        validation::validate_range("render.module_width_mm", self.module_width_mm(), 0.0, 5.0)?;
        validation::validate_range("render.module_height_mm", self.module_height_mm(), 0.0, 300.0)?;
        validation::validate_range("render.quiet_zone_mm", self.quiet_zone_mm(), 0.0, 100.0)?;
        validation::validate_range("render.margin_mm", self.margin_mm(), 0.0, 100.0)?;
        validation::validate_range("render.dpi", self.dpi(), 72, 2400)?;
        validation::validate_range("render.narrow_modules", self.narrow_modules(), 1, 20)?;
        validation::validate_range("render.wide_modules", self.wide_modules(), 2, 60)?;

        if self.wide_modules() <= self.narrow_modules() {
            return Err(BarcodeError::InvalidConfigValueError {
                field: "render.wide_modules".to_string(),
                value: self.wide_modules().to_string(),
                reason: format!(
                    "Wide elements must be wider than narrow ones ({} modules)",
                    self.narrow_modules()
                ),
            });
        }

        let options = self.render_options();
        if !options.is_resolvable() {
            let (narrow, wide) = options.element_px();
            return Err(BarcodeError::InvalidConfigValueError {
                field: "render.dpi".to_string(),
                value: self.dpi().to_string(),
                reason: format!(
                    "Elements are {:.2} px narrow / {:.2} px wide; need at least {} px narrow and {} px between them",
                    narrow, wide, MIN_NARROW_PX, MIN_WIDE_GAP_PX
                ),
            });
        }

        let modules = itf::symbol_modules(BARCODE_DATA_LENGTH, self.narrow_modules(), self.wide_modules());
        let (width, height) = options.canvas_px(modules);
        if width * height > MAX_PIXELS {
            return Err(BarcodeError::InvalidConfigValueError {
                field: "render".to_string(),
                value: format!("{}x{} px", width, height),
                reason: format!("Barcode image would exceed {} pixels", MAX_PIXELS),
            });
        }

        Ok(())
    }
}

impl ConfigProvider for RenderConfig {
    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            module_width: mm_to_points(self.module_width_mm()),
            module_height: mm_to_points(self.module_height_mm()),
            quiet_zone: mm_to_points(self.quiet_zone_mm()),
            margin: mm_to_points(self.margin_mm()),
            dpi: self.dpi(),
            write_text: self.write_text(),
            narrow_modules: self.narrow_modules(),
            wide_modules: self.wide_modules(),
        }
    }
}

impl Validate for RenderConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = RenderConfig::from_toml_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.render_options(), RenderOptions::default());
    }

    #[test]
    fn test_parse_render_section() {
        let toml_content = r#"
[render]
module_width_mm = 0.2
dpi = 600
write_text = true
"#;
        let config = RenderConfig::from_toml_str(toml_content).unwrap();
        let options = config.render_options();

        assert_eq!(options.module_width, 0.2 * 2.834645669291339);
        assert_eq!(options.module_height, 13.0 * 2.834645669291339);
        assert_eq!(options.dpi, 600);
        assert!(options.write_text);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BOLETO_TEST_RENDER_DPI", "150");

        let config = RenderConfig::from_toml_str("[render]\ndpi = ${BOLETO_TEST_RENDER_DPI}\n").unwrap();
        assert_eq!(config.dpi(), 150);

        std::env::remove_var("BOLETO_TEST_RENDER_DPI");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let cases = [
            "[render]\nmodule_width_mm = 0.0",
            "[render]\nmodule_height_mm = -2.0",
            "[render]\ndpi = 10",
            "[render]\nnarrow_modules = 3\nwide_modules = 3",
            "[render]\ndpi = 150",
            "[render]\nnarrow_modules = 2\nwide_modules = 3",
            "[render]\nmodule_height_mm = 100000.0",
            "[render]\nquiet_zone_mm = 5000.0",
            "[render]\nmodule_width_mm = 5.0\ndpi = 2400\nwide_modules = 60",
        ];
        for case in cases {
            let config = RenderConfig::from_toml_str(case).unwrap();
            assert!(
                matches!(
                    config.validate(),
                    Err(BarcodeError::InvalidConfigValueError { .. })
                ),
                "expected rejection for {case:?}"
            );
        }
    }

    #[test]
    fn test_lowest_accepted_dpi() {
        assert!(RenderConfig::from_toml_str("[render]\ndpi = 196").unwrap().validate().is_ok());
        assert!(RenderConfig::from_toml_str("[render]\ndpi = 195").unwrap().validate().is_err());
        // wider modules make low resolutions usable again
        let coarse = "[render]\nmodule_width_mm = 0.5\ndpi = 72";
        assert!(RenderConfig::from_toml_str(coarse).unwrap().validate().is_ok());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[render]\nquiet_zone_mm = 3.0").unwrap();

        let config = RenderConfig::from_file(file.path()).unwrap();
        assert_eq!(config.quiet_zone_mm(), 3.0);
        assert!(RenderConfig::from_file("/nonexistent/render.toml").is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = RenderConfig::from_toml_str("[render\n").unwrap_err();
        assert!(matches!(err, BarcodeError::ConfigError { .. }));
    }
}
