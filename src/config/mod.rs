use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

pub mod validator;

use crate::cli::Cli;
use crate::registry::Widget;
use crate::rules::Rule;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    /// Presentation defaults applied to every form input
    #[serde(default)]
    pub defaults: DefaultProps,
    #[serde(default)]
    pub resolver: ResolverSettings,
    /// Extra named scalars on top of the built-in table
    #[serde(default)]
    pub scalars: Vec<ScalarEntry>,
}

/// Global default props (lowest merge precedence)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DefaultProps {
    #[serde(default = "default_true")]
    pub filled: bool,
    #[serde(default = "default_true")]
    pub rounded: bool,
    #[serde(default = "default_true")]
    pub dense: bool,
}

impl Default for DefaultProps {
    fn default() -> Self {
        Self {
            filled: true,
            rounded: true,
            dense: true,
        }
    }
}

fn default_true() -> bool {
    true
}

pub const DEFAULT_MAX_DEPTH: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResolverSettings {
    /// Bound on type nesting, guards against self-referential input types
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// A named scalar registered through configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScalarEntry {
    pub name: String,
    #[serde(default = "default_widget")]
    pub widget: Widget,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

fn default_widget() -> Widget {
    Widget::Text
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_root(".")
    }

    /// Load from the file named on the command line, then environment
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let config_path = &cli.config;
        let root = config_path
            .parent()
            .and_then(|p| p.to_str())
            .filter(|p| !p.is_empty())
            .unwrap_or(".");

        let s = Config::builder()
            .add_source(File::from(config_path.clone()).required(false))
            .add_source(Self::environment())
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;
        if let Some(max_depth) = cli.max_depth {
            settings.resolver.max_depth = max_depth;
        }

        settings.load_scalars_from_dir(&format!("{}/config/scalars", root))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        let config_path = std::path::Path::new(root).join("cylc-forms");
        let s = Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(Self::environment())
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;

        settings.load_scalars_from_dir(&format!("{}/config/scalars", root))?;
        settings.validate()?;
        Ok(settings)
    }

    /// `CYLC_FORMS_DEFAULTS__DENSE=false` style overrides
    fn environment() -> Environment {
        Environment::with_prefix("CYLC_FORMS")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        validator::ConfigValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }

    /// One scalar per file, JSON or YAML
    fn load_scalars_from_dir(&mut self, path: &str) -> Result<(), anyhow::Error> {
        let pattern = format!("{}/*", path);
        for entry in glob::glob(&pattern)? {
            match entry {
                Ok(path) => {
                    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
                        if matches!(ext, "json" | "yaml" | "yml") {
                            let content = std::fs::read_to_string(&path)?;
                            let scalar: ScalarEntry = if ext == "json" {
                                serde_json::from_str(&content)?
                            } else {
                                serde_yaml::from_str(&content)?
                            };
                            tracing::debug!(scalar = %scalar.name, file = %path.display(), "Loaded scalar");
                            self.scalars.push(scalar);
                        }
                    }
                }
                Err(e) => tracing::warn!("Failed to read glob entry: {}", e),
            }
        }
        Ok(())
    }

    /// Render as TOML, for `cylc-forms config`
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
