use std::path::Path;
use std::path::PathBuf;

use crate::GomarkdocError;
use crate::GomarkdocResult;
use crate::PackageDescriptor;
use crate::constraint::BuildContext;
use crate::model::Package;
use crate::model::Symbol;
use crate::model::SymbolKind;
use crate::model::is_exported;
use crate::paths::is_local_path;

/// Turns a package identifier into a documentation model.
pub trait SourceLoader {
	/// Load the package named by `identifier`, selecting source files with
	/// the given build `tags`.
	fn load(&self, identifier: &str, tags: &[String]) -> GomarkdocResult<Package>;
}

/// Load every descriptor in order.
///
/// A wildcard descriptor that fails to load is left without a package and
/// the run carries on, since recursive expansion sweeps up directories that
/// aren't packages. Any other failure is returned immediately.
pub fn load_packages<L: SourceLoader + ?Sized>(
	descriptors: &mut [PackageDescriptor],
	loader: &L,
	tags: &[String],
) -> GomarkdocResult<()> {
	for descriptor in descriptors.iter_mut() {
		match loader.load(&descriptor.identifier, tags) {
			Ok(package) => descriptor.package = Some(package),
			Err(e) if descriptor.is_wildcard => {
				tracing::debug!(
					dir = %descriptor.directory,
					error = %e,
					"unable to load package in directory"
				);
			}
			Err(e) => return Err(e),
		}
	}

	Ok(())
}

/// Loads Go packages from disk by scanning source lines.
///
/// This reads package clauses, doc comments and column-zero declarations.
/// It does not parse Go, so declarations produced by unusual formatting
/// may be missed.
#[derive(Debug, Clone)]
pub struct GoSourceLoader {
	working_dir: PathBuf,
	include_unexported: bool,
}

impl GoSourceLoader {
	pub fn new(working_dir: impl Into<PathBuf>) -> Self {
		Self {
			working_dir: working_dir.into(),
			include_unexported: false,
		}
	}

	/// Keep unexported symbols in the loaded packages.
	#[must_use]
	pub fn include_unexported(mut self, include: bool) -> Self {
		self.include_unexported = include;
		self
	}

	fn resolve_directory(&self, identifier: &str) -> Option<PathBuf> {
		if is_local_path(identifier) || identifier == "." || identifier == ".." {
			return Some(self.working_dir.join(identifier));
		}

		if let Some(dir) = self.resolve_module_import(identifier) {
			return Some(dir);
		}

		let goroot = std::env::var_os("GOROOT")?;
		let candidate = Path::new(&goroot).join("src").join(identifier);
		candidate.is_dir().then_some(candidate)
	}

	/// Resolve an import path inside the module enclosing the working
	/// directory.
	fn resolve_module_import(&self, identifier: &str) -> Option<PathBuf> {
		let (module_root, module_path) = find_module(&self.working_dir)?;

		let candidate = if identifier == module_path {
			module_root
		} else {
			let rest = identifier.strip_prefix(&module_path)?.strip_prefix('/')?;
			rest.split('/')
				.fold(module_root, |path, segment| path.join(segment))
		};

		candidate.is_dir().then_some(candidate)
	}

	fn invalid_package(identifier: &str) -> GomarkdocError {
		if is_local_path(identifier) {
			GomarkdocError::InvalidPackageDirectory(identifier.to_string())
		} else {
			GomarkdocError::InvalidImportPath(identifier.to_string())
		}
	}
}

impl SourceLoader for GoSourceLoader {
	fn load(&self, identifier: &str, tags: &[String]) -> GomarkdocResult<Package> {
		let dir = self
			.resolve_directory(identifier)
			.ok_or_else(|| Self::invalid_package(identifier))?;
		let context = BuildContext::host(tags);
		let candidates =
			list_source_files(&dir).map_err(|_| Self::invalid_package(identifier))?;

		let mut name: Option<String> = None;
		let mut doc = String::new();
		let mut files = Vec::new();
		let mut symbols = Vec::new();

		for file_name in candidates {
			let content = std::fs::read_to_string(dir.join(&file_name))?;
			let source = scan_source(&content);

			if let Some(constraint) = &source.build_constraint {
				if context.evaluate(constraint) == Some(false) {
					tracing::debug!(file = %file_name, constraint, "excluded by build constraint");
					continue;
				}
			}

			let Some(package_name) = source.package_name else {
				continue;
			};

			if package_name.ends_with("_test") {
				continue;
			}

			if name.is_none() {
				name = Some(package_name);
			}

			if doc.is_empty() && !source.doc.is_empty() {
				doc = source.doc;
			}

			symbols.extend(
				source
					.symbols
					.into_iter()
					.filter(|symbol| self.include_unexported || symbol.exported),
			);
			files.push(file_name);
		}

		let name = name.ok_or_else(|| Self::invalid_package(identifier))?;
		let directory = if is_local_path(identifier) {
			identifier.to_string()
		} else {
			dir.display().to_string()
		};

		Ok(Package {
			name,
			import_path: identifier.to_string(),
			directory,
			doc,
			files,
			symbols,
		})
	}
}

/// Locate the nearest `go.mod` at or above `start` and return the module
/// root with its declared module path.
fn find_module(start: &Path) -> Option<(PathBuf, String)> {
	start.ancestors().find_map(|dir| {
		let content = std::fs::read_to_string(dir.join("go.mod")).ok()?;
		let module_path = content.lines().find_map(|line| {
			line.trim()
				.strip_prefix("module ")
				.map(|rest| rest.trim().trim_matches('"').to_string())
		})?;
		Some((dir.to_path_buf(), module_path))
	})
}

/// Go source files in `dir`, sorted, excluding tests and files the go tool
/// ignores.
fn list_source_files(dir: &Path) -> std::io::Result<Vec<String>> {
	let mut files: Vec<String> = std::fs::read_dir(dir)?
		.filter_map(Result::ok)
		.filter(|entry| entry.file_type().is_ok_and(|kind| kind.is_file()))
		.filter_map(|entry| entry.file_name().to_str().map(ToString::to_string))
		.filter(|name| {
			name.ends_with(".go")
				&& !name.ends_with("_test.go")
				&& !name.starts_with('_')
				&& !name.starts_with('.')
		})
		.collect();
	files.sort();
	Ok(files)
}

/// What a line scan found in one source file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScannedSource {
	pub build_constraint: Option<String>,
	pub package_name: Option<String>,
	pub doc: String,
	pub symbols: Vec<Symbol>,
}

#[derive(Debug, Clone, Copy)]
enum Group {
	None,
	Open(SymbolKind),
}

/// Scan a Go source file for its package clause, doc comments and
/// top-level declarations.
pub fn scan_source(content: &str) -> ScannedSource {
	let mut source = ScannedSource::default();
	let mut comment: Vec<&str> = Vec::new();
	let mut group = Group::None;
	let mut in_block_comment = false;

	for line in content.lines() {
		let line = line.trim_end();

		if in_block_comment {
			if line.contains("*/") {
				in_block_comment = false;
			}
			continue;
		}

		if let Group::Open(kind) = group {
			if line == ")" {
				group = Group::None;
				comment.clear();
			} else if let Some(text) = line.strip_prefix('\t').and_then(comment_text) {
				comment.push(text);
			} else if let Some(entry) = line.strip_prefix('\t').filter(|l| !l.starts_with('\t')) {
				if let Some(name) = leading_identifier(entry) {
					let declaration = format!("{kind} {}", entry.trim());
					source.symbols.push(symbol(kind, name, None, &declaration, &comment));
				}
				comment.clear();
			} else {
				comment.clear();
			}
			continue;
		}

		if let Some(directive) = line.strip_prefix("//go:") {
			if source.package_name.is_none() {
				if let Some(expression) = directive.strip_prefix("build ") {
					source.build_constraint = Some(expression.trim().to_string());
				}
			}
			continue;
		}

		if let Some(text) = comment_text(line) {
			comment.push(text);
			continue;
		}

		if line.starts_with("/*") {
			in_block_comment = !line.contains("*/");
			comment.clear();
			continue;
		}

		if source.package_name.is_none() {
			if let Some(rest) = line.strip_prefix("package ") {
				source.package_name = leading_identifier(rest).map(ToString::to_string);
				source.doc = join_comment(&comment);
			}
			comment.clear();
			continue;
		}

		if let Some(rest) = line.strip_prefix("func ") {
			if let Some(found) = scan_func(rest, line, &comment) {
				source.symbols.push(found);
			}
		} else if let Some((kind, rest)) = declaration(line) {
			if rest.starts_with('(') {
				group = Group::Open(kind);
			} else if let Some(name) = leading_identifier(rest) {
				source.symbols.push(symbol(kind, name, None, line, &comment));
			}
		}

		comment.clear();
	}

	source
}

fn declaration(line: &str) -> Option<(SymbolKind, &str)> {
	[
		("const ", SymbolKind::Const),
		("var ", SymbolKind::Var),
		("type ", SymbolKind::Type),
	]
	.into_iter()
	.find_map(|(keyword, kind)| line.strip_prefix(keyword).map(|rest| (kind, rest.trim_start())))
}

fn scan_func(rest: &str, line: &str, comment: &[&str]) -> Option<Symbol> {
	let rest = rest.trim_start();

	let Some(after_paren) = rest.strip_prefix('(') else {
		let name = leading_identifier(rest)?;
		return Some(symbol(SymbolKind::Func, name, None, line, comment));
	};

	let close = after_paren.find(')')?;
	let receiver = after_paren[..close]
		.split_whitespace()
		.last()
		.map(|ty| ty.trim_start_matches('*'))
		.map(|ty| ty.split('[').next().unwrap_or(ty))?;
	let name = leading_identifier(after_paren[close + 1..].trim_start())?;

	Some(symbol(
		SymbolKind::Method,
		name,
		Some(receiver.to_string()),
		line,
		comment,
	))
}

fn symbol(
	kind: SymbolKind,
	name: &str,
	receiver: Option<String>,
	line: &str,
	comment: &[&str],
) -> Symbol {
	let exported = is_exported(name) && receiver.as_deref().is_none_or(is_exported);
	let signature = line.trim().trim_end_matches('{').trim_end().to_string();

	Symbol {
		kind,
		name: name.to_string(),
		receiver,
		signature,
		doc: join_comment(comment),
		exported,
	}
}

fn comment_text(line: &str) -> Option<&str> {
	let text = line.strip_prefix("//")?;
	Some(text.strip_prefix(' ').unwrap_or(text))
}

fn join_comment(lines: &[&str]) -> String {
	lines.join("\n").trim().to_string()
}

fn leading_identifier(text: &str) -> Option<&str> {
	let end = text
		.char_indices()
		.find(|(_, c)| !(c.is_alphanumeric() || *c == '_'))
		.map_or(text.len(), |(index, _)| index);

	(end > 0).then(|| &text[..end])
}
