use std::collections::BTreeMap;
use std::sync::Arc;

use minijinja::Environment;
use minijinja::context;
use serde::Deserialize;
use serde::Serialize;

use crate::GomarkdocError;
use crate::GomarkdocResult;
use crate::format::Format;
use crate::format::MarkdownFormat;
use crate::model::Package;
use crate::model::Symbol;
use crate::model::SymbolKind;

/// Turns loaded packages into the text for one destination.
pub trait Renderer {
	/// Render `packages` into a single document wrapped by `header` and
	/// `footer`. The result is delivered byte for byte, so it should end with
	/// a newline.
	fn render(&self, header: &str, footer: &str, packages: &[&Package]) -> GomarkdocResult<String>;
}

/// Names of the templates that make up a document. Each can be overridden.
pub const TEMPLATE_NAMES: [&str; 4] = ["file", "package", "symbol", "doc"];

const FILE_TEMPLATE: &str = r#"<!-- Code generated by gomarkdoc. DO NOT EDIT -->

{% if header %}
{{ header }}

{% endif %}
{% for package in packages %}
{% include "package" %}
{% endfor %}
{% if footer %}
{{ footer }}

{% endif %}
Generated by {{ "gomarkdoc" | link("https://github.com/princjef/gomarkdoc") }}
"#;

const PACKAGE_TEMPLATE: &str = r#"{{ package.name | heading(1) }}

{{ ('import "' ~ package.import_path ~ '"') | code_block("go") }}

{% if package.source_url %}
{{ "Source" | link(package.source_url) }}

{% endif %}
{% if package.doc %}
{% with doc = package.doc %}{% include "doc" %}{% endwith %}

{% endif %}
{% if package.symbols %}
{{ "Index" | heading(2) }}

{% for symbol in package.symbols %}
- {{ symbol.title | local_link(symbol.anchor) }}
{% endfor %}

{% for symbol in package.symbols %}
{% include "symbol" %}
{% endfor %}
{% endif %}
"#;

const SYMBOL_TEMPLATE: &str = r#"{{ symbol.anchor | anchor }}
{{ symbol.title | heading(2) }}

{{ symbol.signature | code_block("go") }}

{% if symbol.doc %}
{% with doc = symbol.doc %}{% include "doc" %}{% endwith %}

{% endif %}
"#;

const DOC_TEMPLATE: &str = "{{ doc }}";

/// Repository details used to link each package to its source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Repository {
	/// Base URL of the repository, e.g. `https://github.com/owner/repo`.
	pub url: Option<String>,
	/// Branch to link to. Defaults to `main`.
	pub default_branch: Option<String>,
	/// Path from the repository root to the working directory.
	pub path: Option<String>,
}

impl Repository {
	/// Link to the source of a package directory, when a URL is configured.
	pub fn source_url(&self, directory: &str) -> Option<String> {
		let url = self.url.as_deref()?.trim_end_matches('/');
		let branch = self.default_branch.as_deref().unwrap_or("main");

		let segments: Vec<&str> = self
			.path
			.as_deref()
			.unwrap_or_default()
			.split('/')
			.chain(directory.split(['/', '\\']))
			.filter(|segment| !segment.is_empty() && *segment != ".")
			.collect();

		if segments.is_empty() {
			Some(format!("{url}/blob/{branch}"))
		} else {
			Some(format!("{url}/blob/{branch}/{}", segments.join("/")))
		}
	}
}

/// Settings for [`TemplateRenderer`].
#[derive(Debug, Clone, Default)]
pub struct RendererOptions {
	pub format: Format,
	/// Template source keyed by template name, replacing the defaults.
	pub overrides: BTreeMap<String, String>,
	pub repository: Repository,
}

/// Renders packages through a set of `minijinja` templates.
#[derive(Debug)]
pub struct TemplateRenderer {
	env: Environment<'static>,
	repository: Repository,
}

impl TemplateRenderer {
	/// Build the renderer. Unknown override names and templates that fail to
	/// compile are reported here, before any package is loaded.
	pub fn new(options: RendererOptions) -> GomarkdocResult<Self> {
		let mut env = Environment::new();
		env.set_keep_trailing_newline(true);
		env.set_trim_blocks(true);
		env.set_lstrip_blocks(true);

		for (name, source) in [
			("file", FILE_TEMPLATE),
			("package", PACKAGE_TEMPLATE),
			("symbol", SYMBOL_TEMPLATE),
			("doc", DOC_TEMPLATE),
		] {
			env.add_template(name, source)
				.map_err(|e| GomarkdocError::TemplateRender(e.to_string()))?;
		}

		for (name, source) in options.overrides {
			if !TEMPLATE_NAMES.contains(&name.as_str()) {
				return Err(GomarkdocError::UnknownTemplate(name));
			}

			env.add_template_owned(name.clone(), source)
				.map_err(|e| {
					GomarkdocError::TemplateOverride {
						name,
						reason: e.to_string(),
					}
				})?;
		}

		register_filters(&mut env, &options.format.markdown());

		Ok(Self {
			env,
			repository: options.repository,
		})
	}
}

fn register_filters(env: &mut Environment<'static>, format: &Arc<dyn MarkdownFormat>) {
	let f = Arc::clone(format);
	env.add_filter("heading", move |text: String, level: usize| {
		f.heading(level, &text)
	});

	let f = Arc::clone(format);
	env.add_filter("code_block", move |code: String, language: Option<String>| {
		f.code_block(language.as_deref().unwrap_or_default(), &code)
	});

	let f = Arc::clone(format);
	env.add_filter("anchor", move |name: String| f.anchor(&name));

	let f = Arc::clone(format);
	env.add_filter("link", move |text: String, href: String| f.link(&text, &href));

	let f = Arc::clone(format);
	env.add_filter("local_link", move |text: String, anchor: String| {
		f.local_link(&text, &anchor)
	});

	let f = Arc::clone(format);
	env.add_filter("escape_md", move |text: String| f.escape(&text));
}

impl Renderer for TemplateRenderer {
	fn render(&self, header: &str, footer: &str, packages: &[&Package]) -> GomarkdocResult<String> {
		let views: Vec<PackageView<'_>> = packages
			.iter()
			.map(|package| PackageView::new(package, &self.repository))
			.collect();

		let mut text = self
			.env
			.get_template("file")
			.and_then(|template| {
				template.render(context! {
					header => header,
					footer => footer,
					packages => views,
				})
			})
			.map_err(|e| GomarkdocError::TemplateRender(e.to_string()))?;

		if !text.ends_with('\n') {
			text.push('\n');
		}

		Ok(text)
	}
}

#[derive(Debug, Serialize)]
struct PackageView<'a> {
	name: &'a str,
	import_path: &'a str,
	directory: &'a str,
	doc: &'a str,
	files: &'a [String],
	source_url: Option<String>,
	symbols: Vec<SymbolView<'a>>,
}

impl<'a> PackageView<'a> {
	fn new(package: &'a Package, repository: &Repository) -> Self {
		Self {
			name: &package.name,
			import_path: &package.import_path,
			directory: &package.directory,
			doc: &package.doc,
			files: &package.files,
			source_url: repository.source_url(&package.directory),
			symbols: package.symbols.iter().map(SymbolView::from).collect(),
		}
	}
}

#[derive(Debug, Serialize)]
struct SymbolView<'a> {
	kind: SymbolKind,
	name: &'a str,
	receiver: Option<&'a str>,
	title: String,
	anchor: String,
	signature: &'a str,
	doc: &'a str,
	exported: bool,
}

impl<'a> From<&'a Symbol> for SymbolView<'a> {
	fn from(symbol: &'a Symbol) -> Self {
		Self {
			kind: symbol.kind,
			name: &symbol.name,
			receiver: symbol.receiver.as_deref(),
			title: symbol.title(),
			anchor: symbol.anchor(),
			signature: &symbol.signature,
			doc: &symbol.doc,
			exported: symbol.exported,
		}
	}
}
