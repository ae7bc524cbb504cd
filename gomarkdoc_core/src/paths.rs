//! Lexical path helpers shared by package expansion and output routing.
//!
//! Paths are handled as strings rather than [`std::path::Path`] values
//! because the same values double as loader identifiers and template data,
//! and their exact textual form (such as a leading `./`) carries meaning.

use std::path::MAIN_SEPARATOR;
use std::path::MAIN_SEPARATOR_STR;
use std::path::Path;

/// Prefix marking a path relative to the current directory (`./`).
pub fn cwd_path_prefix() -> String {
	format!(".{MAIN_SEPARATOR}")
}

/// Prefix marking a path relative to the parent directory (`../`).
pub fn parent_path_prefix() -> String {
	format!("..{MAIN_SEPARATOR}")
}

/// Suffix marking a recursive package argument (`/...`).
pub fn recursive_suffix() -> String {
	format!("{MAIN_SEPARATOR}...")
}

/// Convert `/` separators to the separator of the host platform.
pub fn normalize_separators(path: &str) -> String {
	if MAIN_SEPARATOR == '/' {
		path.to_string()
	} else {
		path.replace('/', MAIN_SEPARATOR_STR)
	}
}

/// Whether `path` names a filesystem location rather than an import path.
///
/// Only paths starting with `./`, `../` or an absolute root qualify. A bare
/// `.` is deliberately not local.
pub fn is_local_path(path: &str) -> bool {
	path.starts_with(&cwd_path_prefix())
		|| path.starts_with(&parent_path_prefix())
		|| Path::new(path).is_absolute()
}

/// Lexically clean a path: collapse repeated separators, drop `.` segments
/// and resolve `..` against preceding segments where possible.
///
/// An empty result becomes `"."`. Rooted paths never climb above the root.
pub fn clean_path(path: &str) -> String {
	if path.is_empty() {
		return ".".to_string();
	}

	let rooted = path.starts_with(MAIN_SEPARATOR);
	let mut segments: Vec<&str> = Vec::new();

	for segment in path.split(MAIN_SEPARATOR) {
		match segment {
			"" | "." => {}
			".." => {
				match segments.last() {
					Some(last) if *last != ".." => {
						segments.pop();
					}
					_ if rooted => {}
					_ => segments.push(".."),
				}
			}
			other => segments.push(other),
		}
	}

	let joined = segments.join(MAIN_SEPARATOR_STR);

	match (rooted, joined.is_empty()) {
		(true, _) => format!("{MAIN_SEPARATOR}{joined}"),
		(false, true) => ".".to_string(),
		(false, false) => joined,
	}
}

/// Join `name` onto `base` and clean the result, restoring the `./` prefix
/// when cleaning removed it so the result stays a local path.
pub fn join_local(base: &str, name: &str) -> String {
	let joined = clean_path(&format!("{base}{MAIN_SEPARATOR}{name}"));

	if is_local_path(&joined) {
		joined
	} else {
		format!("{}{joined}", cwd_path_prefix())
	}
}
