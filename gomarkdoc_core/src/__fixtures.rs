use std::collections::HashSet;
use std::path::Path;

use crate::GomarkdocError;
use crate::GomarkdocResult;
use crate::loader::SourceLoader;
use crate::model::Package;
use crate::model::Symbol;
use crate::model::SymbolKind;
use crate::render::Renderer;

pub(crate) const DEMO_SOURCE: &str = r#"//go:build linux && !cgo

// Package demo does things.
//
// More detail.
package demo

import "fmt"

// MaxSize is the limit.
const MaxSize = 10

const (
	// First is one.
	First = 1
	second = 2
)

// Client talks.
type Client struct {
	Name string
}

// Do runs.
func (c *Client) Do(ctx context.Context) error {
	return nil
}

func helper() {}

var Global = "x"
"#;

pub(crate) fn write(root: &Path, relative: &str, content: &str) {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent).unwrap_or_else(|e| panic!("create_dir_all: {e}"));
	}
	std::fs::write(&path, content).unwrap_or_else(|e| panic!("write: {e}"));
}

pub(crate) fn mkdir(root: &Path, relative: &str) {
	std::fs::create_dir_all(root.join(relative)).unwrap_or_else(|e| panic!("create_dir_all: {e}"));
}

pub(crate) fn read(path: impl AsRef<Path>) -> String {
	std::fs::read_to_string(path).unwrap_or_else(|e| panic!("read: {e}"))
}

/// `root/relative` as a string, for use as a local package argument.
pub(crate) fn abs(root: &Path, relative: &str) -> String {
	root.join(relative).display().to_string()
}

/// A small Go package source with one documented function.
pub(crate) fn go_source(package: &str, function: &str) -> String {
	format!(
		"// Package {package} is a fixture.\npackage {package}\n\n// {function} says hello.\nfunc {function}() string {{\n\treturn \"hello\"\n}}\n"
	)
}

pub(crate) fn demo_package() -> Package {
	Package {
		name: "demo".to_string(),
		import_path: "example.com/demo".to_string(),
		directory: "./demo".to_string(),
		doc: "Package demo does things.".to_string(),
		files: vec!["demo.go".to_string()],
		symbols: vec![
			Symbol {
				kind: SymbolKind::Type,
				name: "Client".to_string(),
				receiver: None,
				signature: "type Client struct".to_string(),
				doc: "Client talks.".to_string(),
				exported: true,
			},
			Symbol {
				kind: SymbolKind::Method,
				name: "Do".to_string(),
				receiver: Some("Client".to_string()),
				signature: "func (c *Client) Do() error".to_string(),
				doc: "Do runs.".to_string(),
				exported: true,
			},
		],
	}
}

/// Loads a package named after the last path segment, failing for any
/// identifier in `failing`.
#[derive(Debug, Default)]
pub(crate) struct StubLoader {
	pub failing: HashSet<String>,
}

impl StubLoader {
	pub fn failing<I: IntoIterator<Item = S>, S: Into<String>>(identifiers: I) -> Self {
		Self {
			failing: identifiers.into_iter().map(Into::into).collect(),
		}
	}
}

impl SourceLoader for StubLoader {
	fn load(&self, identifier: &str, _tags: &[String]) -> GomarkdocResult<Package> {
		if self.failing.contains(identifier) {
			return Err(GomarkdocError::InvalidPackageDirectory(identifier.to_string()));
		}

		let name = identifier
			.rsplit('/')
			.find(|segment| !segment.is_empty())
			.unwrap_or(identifier)
			.to_string();

		Ok(Package {
			name,
			import_path: identifier.to_string(),
			directory: identifier.to_string(),
			doc: String::new(),
			files: Vec::new(),
			symbols: Vec::new(),
		})
	}
}

/// Renders `header|name,name|footer`.
#[derive(Debug, Default)]
pub(crate) struct ListRenderer;

impl Renderer for ListRenderer {
	fn render(&self, header: &str, footer: &str, packages: &[&Package]) -> GomarkdocResult<String> {
		let names: Vec<&str> = packages.iter().map(|package| package.name.as_str()).collect();
		Ok(format!("{header}|{}|{footer}\n", names.join(",")))
	}
}
