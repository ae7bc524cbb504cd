use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::GomarkdocError;
use crate::GomarkdocResult;
use crate::format::Format;
use crate::reconcile::ReconcileOptions;
use crate::render::RendererOptions;
use crate::render::Repository;
use crate::tags::default_tags;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	[".gomarkdoc.yml", ".gomarkdoc.yaml", ".gomarkdoc.toml"];

/// Settings read from a config file or collected from command line flags.
///
/// Every field is optional so that sources can be layered with
/// [`GomarkdocConfig::layer`]. Keys are camelCase:
///
/// ```yaml
/// output: "{{ directory }}/README.md"
/// embed: true
/// tags: [integration]
/// repository:
///   url: https://github.com/owner/repo
///   defaultBranch: main
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GomarkdocConfig {
	pub include_unexported: Option<bool>,
	pub output: Option<String>,
	pub check: Option<bool>,
	pub embed: Option<bool>,
	pub format: Option<String>,
	/// Inline template overrides keyed by template name.
	pub template: BTreeMap<String, String>,
	/// Template override files keyed by template name.
	pub template_file: BTreeMap<String, PathBuf>,
	pub header: Option<String>,
	pub header_file: Option<PathBuf>,
	pub footer: Option<String>,
	pub footer_file: Option<PathBuf>,
	pub tags: Option<Vec<String>>,
	pub repository: Repository,
}

impl GomarkdocConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the first discovered config file at `root`. Returns `None` if
	/// there is none.
	pub fn load(root: &Path) -> GomarkdocResult<Option<Self>> {
		let Some(path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		tracing::debug!(path = %path.display(), "loading config file");
		Self::load_file(&path).map(Some)
	}

	/// Load a specific config file. TOML is used for `.toml` files and YAML
	/// for everything else.
	pub fn load_file(path: &Path) -> GomarkdocResult<Self> {
		let to_error = |reason: String| {
			GomarkdocError::ConfigParse {
				path: path.display().to_string(),
				reason,
			}
		};

		let content = std::fs::read_to_string(path).map_err(|e| to_error(e.to_string()))?;
		if content.trim().is_empty() {
			return Ok(Self::default());
		}

		let is_toml = path
			.extension()
			.and_then(|extension| extension.to_str())
			.is_some_and(|extension| extension.eq_ignore_ascii_case("toml"));

		if is_toml {
			toml::from_str(&content).map_err(|e| to_error(e.to_string()))
		} else {
			serde_yaml_ng::from_str(&content).map_err(|e| to_error(e.to_string()))
		}
	}

	/// Combine two sources. Values set in `over` win; template maps are
	/// merged entry by entry.
	#[must_use]
	pub fn layer(mut self, over: Self) -> Self {
		self.template.extend(over.template);
		self.template_file.extend(over.template_file);

		Self {
			include_unexported: over.include_unexported.or(self.include_unexported),
			output: over.output.or(self.output),
			check: over.check.or(self.check),
			embed: over.embed.or(self.embed),
			format: over.format.or(self.format),
			template: self.template,
			template_file: self.template_file,
			header: over.header.or(self.header),
			header_file: over.header_file.or(self.header_file),
			footer: over.footer.or(self.footer),
			footer_file: over.footer_file.or(self.footer_file),
			tags: over.tags.or(self.tags),
			repository: Repository {
				url: over.repository.url.or(self.repository.url),
				default_branch: over
					.repository
					.default_branch
					.or(self.repository.default_branch),
				path: over.repository.path.or(self.repository.path),
			},
		}
	}

	/// Fill in defaults. Tags fall back to the `-tags` option in `GOFLAGS`.
	pub fn into_options(self) -> GomarkdocResult<CommandOptions> {
		let format = self
			.format
			.as_deref()
			.map(str::parse::<Format>)
			.transpose()?
			.unwrap_or_default();

		Ok(CommandOptions {
			output: self.output.unwrap_or_default(),
			check: self.check.unwrap_or_default(),
			embed: self.embed.unwrap_or_default(),
			show_diff: false,
			format,
			include_unexported: self.include_unexported.unwrap_or_default(),
			template: self.template,
			template_file: self.template_file,
			header: self.header,
			header_file: self.header_file,
			footer: self.footer,
			footer_file: self.footer_file,
			tags: self.tags.unwrap_or_else(default_tags),
			repository: self.repository,
		})
	}
}

/// The resolved configuration for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOptions {
	/// Destination path template. Empty prints everything.
	pub output: String,
	pub check: bool,
	pub embed: bool,
	/// Attach a unified diff to drift errors in check mode.
	pub show_diff: bool,
	pub format: Format,
	pub include_unexported: bool,
	pub template: BTreeMap<String, String>,
	pub template_file: BTreeMap<String, PathBuf>,
	pub header: Option<String>,
	pub header_file: Option<PathBuf>,
	pub footer: Option<String>,
	pub footer_file: Option<PathBuf>,
	pub tags: Vec<String>,
	pub repository: Repository,
}

impl CommandOptions {
	/// Reject flag combinations that can't work.
	pub fn validate(&self) -> GomarkdocResult<()> {
		if self.check && self.output.is_empty() {
			return Err(GomarkdocError::CheckWithoutOutput);
		}

		Ok(())
	}

	pub fn reconcile_options(&self) -> ReconcileOptions {
		ReconcileOptions {
			check: self.check,
			embed: self.embed,
			show_diff: self.show_diff,
		}
	}

	/// Template overrides with file sources read. Inline sources win over
	/// files for the same name.
	pub fn resolve_overrides(&self, working_dir: &Path) -> GomarkdocResult<BTreeMap<String, String>> {
		let mut overrides = BTreeMap::new();

		for (name, path) in &self.template_file {
			if self.template.contains_key(name) {
				continue;
			}

			let source = std::fs::read_to_string(working_dir.join(path)).map_err(|e| {
				GomarkdocError::TemplateOverride {
					name: name.clone(),
					reason: e.to_string(),
				}
			})?;
			overrides.insert(name.clone(), source);
		}

		overrides.extend(self.template.clone());
		Ok(overrides)
	}

	pub fn renderer_options(&self, working_dir: &Path) -> GomarkdocResult<RendererOptions> {
		Ok(RendererOptions {
			format: self.format,
			overrides: self.resolve_overrides(working_dir)?,
			repository: self.repository.clone(),
		})
	}

	pub fn resolve_header(&self, working_dir: &Path) -> GomarkdocResult<String> {
		resolve_text("header", self.header.as_deref(), self.header_file.as_deref(), working_dir)
	}

	pub fn resolve_footer(&self, working_dir: &Path) -> GomarkdocResult<String> {
		resolve_text("footer", self.footer.as_deref(), self.footer_file.as_deref(), working_dir)
	}
}

fn resolve_text(
	kind: &'static str,
	inline: Option<&str>,
	file: Option<&Path>,
	working_dir: &Path,
) -> GomarkdocResult<String> {
	if let Some(text) = inline.filter(|text| !text.is_empty()) {
		return Ok(text.to_string());
	}

	let Some(path) = file else {
		return Ok(String::new());
	};

	std::fs::read_to_string(working_dir.join(path)).map_err(|e| {
		GomarkdocError::HeaderFooterFile {
			kind,
			path: path.display().to_string(),
			reason: e.to_string(),
		}
	})
}
