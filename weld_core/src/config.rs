use std::path::Path;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::CompileOptions;
use crate::SharedOptions;
use crate::TechRegistry;
use crate::WeldError;
use crate::WeldResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["weld.toml", ".weld.toml", ".config/weld.toml"];

/// Configuration loaded from a `weld.toml` file.
///
/// ```toml
/// marker = "borschik"
/// default_tech = "txt"
/// pretty_print = true
/// transforms = ["include"]
///
/// [techs]
/// es = "js"
///
/// [shared]
/// banner = "generated"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WeldConfig {
	/// The word directives start with.
	#[serde(default)]
	pub marker: Option<String>,
	/// The tech for includes whose suffix has none. An empty string disables
	/// the fallback.
	#[serde(default)]
	pub default_tech: Option<String>,
	#[serde(default)]
	pub pretty_print: Option<bool>,
	/// Transform names, run in order.
	#[serde(default)]
	pub transforms: Option<Vec<String>>,
	/// Extra file suffixes mapped to registered tech names.
	#[serde(default)]
	pub techs: IndexMap<String, String>,
	/// Passed verbatim to every tech and transform.
	#[serde(default)]
	pub shared: SharedOptions,
}

impl WeldConfig {
	/// Find the config file in `root`, if there is one.
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config discovered in `root`. Returns `Ok(None)` when no
	/// candidate exists.
	pub fn load(root: &Path) -> WeldResult<Option<WeldConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		Self::load_file(&config_path).map(Some)
	}

	pub fn load_file(path: &Path) -> WeldResult<WeldConfig> {
		let content = std::fs::read_to_string(path).map_err(|e| {
			WeldError::Read {
				path: path.display().to_string(),
				reason: e.to_string(),
			}
		})?;

		Self::parse(&content)
	}

	pub fn parse(content: &str) -> WeldResult<WeldConfig> {
		toml::from_str(content).map_err(|e| WeldError::ConfigParse(e.to_string()))
	}

	/// Copy the configured values into `options`.
	pub fn apply(&self, options: &mut CompileOptions) {
		if let Some(marker) = &self.marker {
			options.marker.clone_from(marker);
		}

		if let Some(default_tech) = &self.default_tech {
			options.default_tech = (!default_tech.is_empty()).then(|| default_tech.clone());
		}

		if let Some(pretty_print) = self.pretty_print {
			options.pretty_print = pretty_print;
		}

		if let Some(transforms) = &self.transforms {
			options.transforms.clone_from(transforms);
		}

		options
			.shared
			.extend(self.shared.iter().map(|(key, value)| (key.clone(), value.clone())));
	}

	/// Register the configured suffix aliases.
	pub fn register_techs(&self, techs: &mut TechRegistry) -> WeldResult<()> {
		for (suffix, target) in &self.techs {
			techs.alias(suffix.as_str(), target.as_str())?;
		}

		Ok(())
	}
}
