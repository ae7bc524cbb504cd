use std::collections::BTreeMap;
use std::io;
use std::io::Write;
use std::path::PathBuf;

use clap::ArgAction;
use clap::Parser;
use clap::builder::PossibleValuesParser;
use gomarkdoc_core::GomarkdocConfig;
use gomarkdoc_core::Repository;

/// Version reported by `--version`. Set `GOMARKDOC_VERSION` at build time to
/// override the crate version.
pub const VERSION: &str = match option_env!("GOMARKDOC_VERSION") {
	Some(version) => version,
	None => env!("CARGO_PKG_VERSION"),
};

#[derive(Debug, Parser)]
#[command(
	name = "gomarkdoc",
	about = "Generate markdown documentation for Go packages.",
	long_about = "gomarkdoc generates markdown documentation for Go packages and keeps it in \
	              sync with the files it is written to.\n\nPackages are given as local paths \
	              (./pkg), recursive paths (./...) or import paths (encoding/json). Output goes \
	              to stdout unless an output path template is provided.\n\nExamples:\n  \
	              gomarkdoc ./...\n  gomarkdoc -o '{{ directory }}/README.md' ./...\n  \
	              gomarkdoc -e -o README.md .\n  gomarkdoc -c -o '{{ directory }}/README.md' ./...",
	disable_version_flag = true
)]
#[allow(clippy::struct_excessive_bools)]
pub struct GomarkdocCli {
	/// Packages to document. Defaults to the current directory.
	pub packages: Vec<String>,

	/// Config file to read. Defaults to `.gomarkdoc.yml`, `.gomarkdoc.yaml`
	/// or `.gomarkdoc.toml` in the working directory.
	#[arg(long)]
	pub config: Option<PathBuf>,

	/// Include unexported symbols.
	#[arg(long, short = 'u', default_value_t = false)]
	pub include_unexported: bool,

	/// Output path template, e.g. `{{ directory }}/README.md`. Documentation
	/// is printed to stdout when unset.
	#[arg(long, short)]
	pub output: Option<String>,

	/// Check that the output files are up to date without writing them.
	/// Requires `--output`.
	#[arg(long, short, default_value_t = false)]
	pub check: bool,

	/// Embed the documentation between `gomarkdoc:embed` markers in the
	/// output files instead of replacing them.
	#[arg(long, short, default_value_t = false)]
	pub embed: bool,

	/// Markdown flavor to produce.
	#[arg(long, short, value_parser = PossibleValuesParser::new(["github", "azure-devops", "plain"]))]
	pub format: Option<String>,

	/// Inline template override as `name=source`. Repeatable.
	#[arg(long, short, value_parser = parse_key_value)]
	pub template: Vec<(String, String)>,

	/// Template override file as `name=path`. Repeatable.
	#[arg(long, value_parser = parse_key_value)]
	pub template_file: Vec<(String, String)>,

	/// Text placed above the documentation in each output.
	#[arg(long)]
	pub header: Option<String>,

	/// File whose contents are placed above the documentation.
	#[arg(long)]
	pub header_file: Option<PathBuf>,

	/// Text placed below the documentation in each output.
	#[arg(long)]
	pub footer: Option<String>,

	/// File whose contents are placed below the documentation.
	#[arg(long)]
	pub footer_file: Option<PathBuf>,

	/// Comma separated build tags. Falls back to the `-tags` option in
	/// `GOFLAGS`.
	#[arg(long, value_delimiter = ',')]
	pub tags: Option<Vec<String>>,

	/// Repository URL used to link packages to their source.
	#[arg(long = "repository.url")]
	pub repository_url: Option<String>,

	/// Branch used in source links.
	#[arg(long = "repository.default-branch")]
	pub repository_default_branch: Option<String>,

	/// Path from the repository root to the working directory.
	#[arg(long = "repository.path")]
	pub repository_path: Option<String>,

	/// Increase log output. Repeat for more detail.
	#[arg(long, short, action = ArgAction::Count)]
	pub verbose: u8,

	/// Show a unified diff when `--check` finds out of date output.
	#[arg(long, default_value_t = false)]
	pub diff: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,

	/// Print the version and exit.
	#[arg(long, default_value_t = false)]
	pub version: bool,
}

impl GomarkdocCli {
	/// The flags as a config layer. Flags that weren't passed stay unset so
	/// the config file can provide them.
	pub fn to_config(&self) -> GomarkdocConfig {
		GomarkdocConfig {
			include_unexported: self.include_unexported.then_some(true),
			output: self.output.clone(),
			check: self.check.then_some(true),
			embed: self.embed.then_some(true),
			format: self.format.clone(),
			template: self.template.iter().cloned().collect(),
			template_file: self
				.template_file
				.iter()
				.map(|(name, path)| (name.clone(), PathBuf::from(path)))
				.collect::<BTreeMap<_, _>>(),
			header: self.header.clone(),
			header_file: self.header_file.clone(),
			footer: self.footer.clone(),
			footer_file: self.footer_file.clone(),
			tags: self.tags.clone(),
			repository: Repository {
				url: self.repository_url.clone(),
				default_branch: self.repository_default_branch.clone(),
				path: self.repository_path.clone(),
			},
		}
	}
}

/// Parse a `name=value` argument.
pub fn parse_key_value(value: &str) -> Result<(String, String), String> {
	match value.split_once('=') {
		Some((name, rest)) if !name.is_empty() => Ok((name.to_string(), rest.to_string())),
		_ => Err(format!("expected `name=value`, got `{value}`")),
	}
}

/// Log filter for the number of `-v` flags.
pub fn log_filter(verbosity: u8) -> &'static str {
	match verbosity {
		0 => "warn",
		1 => "info",
		_ => "debug",
	}
}

/// Write the version, or `<unknown>` when it is empty.
pub fn print_version<W: Write>(writer: &mut W, version: &str) -> io::Result<()> {
	if version.is_empty() {
		writeln!(writer, "<unknown>")
	} else {
		writeln!(writer, "{version}")
	}
}
