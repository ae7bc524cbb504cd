use std::fmt;

use serde::Serialize;

/// Documentation model for a single Go package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
	/// Name from the package clause (e.g. `json`).
	pub name: String,
	/// The identifier the package was loaded with.
	pub import_path: String,
	/// Directory the source files were read from.
	pub directory: String,
	/// Package doc comment with the comment markers removed.
	pub doc: String,
	/// Source files that satisfied the build constraints, sorted.
	pub files: Vec<String>,
	/// Top-level declarations in source order.
	pub symbols: Vec<Symbol>,
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
	pub kind: SymbolKind,
	pub name: String,
	/// Receiver type name for methods, without pointer markers.
	pub receiver: Option<String>,
	/// The declaration line, without a trailing opening brace.
	pub signature: String,
	pub doc: String,
	pub exported: bool,
}

impl Symbol {
	/// Heading text, e.g. `func (Client) Do`.
	pub fn title(&self) -> String {
		match &self.receiver {
			Some(receiver) => format!("{} ({receiver}) {}", self.kind, self.name),
			None => format!("{} {}", self.kind, self.name),
		}
	}

	/// Anchor name, e.g. `Client.Do`.
	pub fn anchor(&self) -> String {
		match &self.receiver {
			Some(receiver) => format!("{receiver}.{}", self.name),
			None => self.name.clone(),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
	Const,
	Var,
	Func,
	Method,
	Type,
}

impl fmt::Display for SymbolKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let keyword = match self {
			Self::Const => "const",
			Self::Var => "var",
			Self::Func | Self::Method => "func",
			Self::Type => "type",
		};
		f.write_str(keyword)
	}
}

/// Whether a Go identifier is exported.
pub fn is_exported(name: &str) -> bool {
	name.chars().next().is_some_and(char::is_uppercase)
}
