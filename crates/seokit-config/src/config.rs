use std::{
  collections::HashSet,
  fs,
  path::{Path, PathBuf},
  sync::OnceLock,
};

use seokit_macros::Configurable;
use serde::{Deserialize, Serialize};

use crate::{
  error::ConfigError,
  page::PageSpec,
  route::RouteDescriptor,
  site::SiteConfig,
};

/// Configuration for seokit.
///
/// [`Config`] replaces the route and page tables that would otherwise be
/// hard-coded into the tools. It is typically loaded from a TOML or JSON
/// file, then adjusted by `--config KEY=VALUE` overrides and command flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Configurable)]
#[serde(default)]
pub struct Config {
  /// Site identity (name and origin).
  #[config(nested)]
  pub site: Option<SiteConfig>,

  /// Route Page Materializer settings.
  #[config(nested)]
  pub materialize: Option<MaterializeConfig>,

  /// Source Meta-Block Rewriter settings.
  #[config(nested)]
  pub rewrite: Option<RewriteConfig>,

  /// Number of threads to use for per-item parallelism.
  #[config(key = "jobs", allow_empty)]
  pub jobs: Option<usize>,

  /// Routes to materialize, in order.
  pub routes: Vec<RouteDescriptor>,

  /// Page source files to rewrite, in order.
  pub pages: Vec<PageSpec>,
}

/// Where the Materializer reads its template and writes its pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Configurable)]
#[serde(default)]
pub struct MaterializeConfig {
  /// The built HTML document every route is cloned from.
  #[config(key = "base_document")]
  pub base_document: PathBuf,

  /// Directory receiving `<path>/index.html` for each route.
  #[config(key = "output_root")]
  pub output_root: PathBuf,
}

impl Default for MaterializeConfig {
  fn default() -> Self {
    Self {
      base_document: PathBuf::from("dist/index.html"),
      output_root:   PathBuf::from("dist"),
    }
  }
}

/// How the Rewriter recognises and inserts metadata in page sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Configurable)]
#[serde(default)]
pub struct RewriteConfig {
  /// Directory page files are resolved against.
  #[config(key = "root")]
  pub root: PathBuf,

  /// Tag name of the metadata component, e.g. `Seo` for `<Seo ... />`.
  #[config(key = "component")]
  pub component: String,

  /// Exact import declaration that makes the component referenceable.
  #[config(key = "import")]
  pub import: String,

  /// Rank of the top-level heading (`1` for `<h1>`).
  #[config(key = "heading_level")]
  pub heading_level: u8,
}

impl Default for RewriteConfig {
  fn default() -> Self {
    Self {
      root:          PathBuf::from("."),
      component:     "Seo".to_string(),
      import:        r#"import Seo from "@/components/Seo";"#.to_string(),
      heading_level: 1,
    }
  }
}

impl Config {
  /// Site settings, falling back to defaults when the table is absent.
  #[must_use]
  pub fn site(&self) -> SiteConfig {
    self.site.clone().unwrap_or_default()
  }

  /// Materializer settings, falling back to defaults when absent.
  #[must_use]
  pub fn materialize(&self) -> MaterializeConfig {
    self.materialize.clone().unwrap_or_default()
  }

  /// Rewriter settings, falling back to defaults when absent.
  #[must_use]
  pub fn rewrite(&self) -> RewriteConfig {
    self.rewrite.clone().unwrap_or_default()
  }

  /// Load configuration from a file (TOML or JSON).
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the format is
  /// unsupported.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| {
      ConfigError::Read {
        path: path.to_path_buf(),
        source,
      }
    })?;

    let extension = path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_ascii_lowercase);

    match extension.as_deref() {
      Some("json") => {
        serde_json::from_str(&content).map_err(|source| {
          ConfigError::Json {
            path: path.to_path_buf(),
            source,
          }
        })
      },
      Some("toml") => {
        toml::from_str(&content).map_err(|source| {
          ConfigError::Toml {
            path: path.to_path_buf(),
            source,
          }
        })
      },
      _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    }
  }

  /// Load configuration from files and overrides, then validate it.
  ///
  /// Explicit files are merged in order. Without any, a config file is
  /// discovered in the usual locations, and plain defaults are used if none
  /// exists.
  ///
  /// # Errors
  ///
  /// Returns an error if a file cannot be loaded, an override is malformed,
  /// or the resulting configuration is invalid.
  pub fn load(
    config_files: &[PathBuf],
    config_overrides: &[String],
  ) -> Result<Self, ConfigError> {
    let mut config = if let Some((first, rest)) = config_files.split_first() {
      let mut merged = Self::from_file(first)?;
      for path in rest {
        merged.merge(Self::from_file(path)?);
      }

      if !rest.is_empty() {
        log::debug!("Loaded and merged {} config files", config_files.len());
      }

      merged
    } else if let Some(discovered) = Self::find_config_file() {
      log::debug!("Using discovered config file: {}", discovered.display());
      Self::from_file(&discovered)?
    } else {
      log::debug!("No config file found, using defaults");
      Self::default()
    };

    config.apply_overrides(config_overrides)?;
    config.validate()?;

    Ok(config)
  }

  /// Apply configuration overrides from `KEY=VALUE` strings.
  ///
  /// # Errors
  ///
  /// Returns an error if a string is not in `KEY=VALUE` form, the key is not
  /// recognised, or the value does not parse as the field's type.
  ///
  /// # Example
  ///
  /// ```rust, ignore
  /// config.apply_overrides(&[
  ///   "site.origin=https://example.com".to_string(),
  ///   "rewrite.heading_level=1".to_string(),
  /// ])?;
  /// ```
  pub fn apply_overrides(
    &mut self,
    overrides: &[String],
  ) -> Result<(), ConfigError> {
    for override_str in overrides {
      let (key, value) = override_str.split_once('=').ok_or_else(|| {
        ConfigError::Override(format!(
          "Invalid config override format: '{override_str}'. Expected \
           KEY=VALUE"
        ))
      })?;

      self.apply_override(key.trim(), value.trim())?;
    }

    Ok(())
  }

  /// Merge another config into this one, the other config taking precedence.
  ///
  /// # Merge Rules
  ///
  /// - Tables and [`Option<T>`] fields: replaced when the other side is set
  /// - `routes` and `pages`: appended
  pub fn merge(&mut self, other: Self) {
    self.merge_fields(other);
  }

  /// Search for config files in common locations
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    static RESULT: OnceLock<Option<PathBuf>> = OnceLock::new();
    RESULT
      .get_or_init(|| {
        let config_filenames = [
          "seokit.toml",
          "seokit.json",
          ".seokit.toml",
          ".seokit.json",
          ".config/seokit.toml",
          ".config/seokit.json",
        ];

        let current_dir = std::env::current_dir().ok()?;
        if let Some(found) = config_filenames
          .iter()
          .map(|name| current_dir.join(name))
          .find(|path| path.exists())
        {
          return Some(found);
        }

        let xdg_config_home = std::env::var_os("XDG_CONFIG_HOME")?;
        ["seokit.toml", "seokit.json"]
          .iter()
          .map(|name| PathBuf::from(&xdg_config_home).join(name))
          .find(|path| path.exists())
      })
      .clone()
  }

  /// Validate routes, pages and settings, reporting every problem at once.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::Invalid`] listing all validation failures.
  pub fn validate(&self) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    self.site().validate(&mut errors);

    let mut seen_paths = HashSet::new();
    for (index, route) in self.routes.iter().enumerate() {
      route.validate(index, &mut errors);
      if !route.path.is_empty() && !seen_paths.insert(route.path.as_str()) {
        errors.push(format!("Duplicate route path: '{}'", route.path));
      }
    }

    let mut seen_files = HashSet::new();
    for page in &self.pages {
      if !seen_files.insert(page.file.as_path()) {
        errors.push(format!("Duplicate page file: {}", page.file.display()));
      }
    }

    let rewrite = self.rewrite();
    if !(1..=5).contains(&rewrite.heading_level) {
      errors.push(format!(
        "rewrite.heading_level must be between 1 and 5, got {}",
        rewrite.heading_level
      ));
    }
    if rewrite.component.trim().is_empty() {
      errors.push("rewrite.component must not be empty".to_string());
    }

    if errors.is_empty() {
      Ok(())
    } else {
      Err(ConfigError::Invalid(errors))
    }
  }

  /// Generate a default configuration file with commented explanations
  ///
  /// # Errors
  ///
  /// Returns an error if the format is unknown or the file cannot be written.
  pub fn generate_default_config(
    format: &str,
    path: &Path,
  ) -> Result<(), ConfigError> {
    let config_content = crate::templates::get_template(format)?;

    fs::write(path, config_content).map_err(|source| {
      ConfigError::Write {
        path: path.to_path_buf(),
        source,
      }
    })?;

    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }
}
