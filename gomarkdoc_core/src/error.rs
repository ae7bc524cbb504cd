use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum GomarkdocError {
	#[error(transparent)]
	#[diagnostic(code(gomarkdoc::io_error))]
	Io(#[from] std::io::Error),

	#[error("invalid output template: {0}")]
	#[diagnostic(
		code(gomarkdoc::invalid_output_template),
		help("output templates use minijinja syntax, e.g. `{{{{ directory }}}}/README.md`")
	)]
	InvalidOutputTemplate(String),

	#[error("failed to resolve output path for `{identifier}`: {reason}")]
	#[diagnostic(
		code(gomarkdoc::output_template),
		help("available fields: directory, identifier, dir, import_path, is_local, is_wildcard")
	)]
	OutputTemplate { identifier: String, reason: String },

	#[error("check mode cannot be run without an output set")]
	#[diagnostic(
		code(gomarkdoc::check_without_output),
		help("pass `--output` with a path template such as `{{{{ directory }}}}/README.md`")
	)]
	CheckWithoutOutput,

	#[error("invalid format: `{0}`")]
	#[diagnostic(
		code(gomarkdoc::invalid_format),
		help("valid formats: github, azure-devops, plain")
	)]
	InvalidFormat(String),

	#[error("couldn't resolve template for {name}: {reason}")]
	#[diagnostic(code(gomarkdoc::template_override))]
	TemplateOverride { name: String, reason: String },

	#[error("unknown template name: `{0}`")]
	#[diagnostic(
		code(gomarkdoc::unknown_template),
		help("templates that can be overridden: file, package, symbol, doc")
	)]
	UnknownTemplate(String),

	#[error("couldn't resolve {kind} file `{path}`: {reason}")]
	#[diagnostic(code(gomarkdoc::header_footer_file))]
	HeaderFooterFile {
		kind: &'static str,
		path: String,
		reason: String,
	},

	#[error("failed to parse config file `{path}`: {reason}")]
	#[diagnostic(
		code(gomarkdoc::config_parse),
		help("config files are YAML (.yml, .yaml) or TOML (.toml) with camelCase keys")
	)]
	ConfigParse { path: String, reason: String },

	#[error("invalid package in directory: {0}")]
	#[diagnostic(code(gomarkdoc::invalid_package_directory))]
	InvalidPackageDirectory(String),

	#[error("invalid package at import path: {0}")]
	#[diagnostic(code(gomarkdoc::invalid_import_path))]
	InvalidImportPath(String),

	#[error("template rendering failed: {0}")]
	#[diagnostic(code(gomarkdoc::template_render))]
	TemplateRender(String),

	#[error("output does not match current files. Did you forget to run gomarkdoc?")]
	#[diagnostic(
		code(gomarkdoc::out_of_date),
		help("run gomarkdoc without `--check` to regenerate `{path}`")
	)]
	OutOfDate { path: String, diff: Option<String> },

	#[error("failed to write output file {path}: {source}")]
	#[diagnostic(code(gomarkdoc::write_output))]
	WriteOutput {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to read output file {path}: {source}")]
	#[diagnostic(
		code(gomarkdoc::read_output),
		help("check that the path is a readable file")
	)]
	ReadOutput {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("failure while attempting to check contents of {path}: {source}")]
	#[diagnostic(code(gomarkdoc::compare))]
	CompareStreams {
		path: String,
		#[source]
		source: std::io::Error,
	},
}

pub type GomarkdocResult<T> = Result<T, GomarkdocError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
