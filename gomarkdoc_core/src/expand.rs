use std::path::Path;

use crate::PackageDescriptor;
use crate::paths::is_local_path;
use crate::paths::join_local;
use crate::paths::normalize_separators;
use crate::paths::recursive_suffix;

/// Directory names that recursive expansion never descends into.
pub const IGNORED_DIRECTORIES: [&str; 4] = [".git", ".hg", ".svn", ".bzr"];

/// Identifies if the directory is one we intentionally skip.
pub fn is_ignored_directory(name: &str) -> bool {
	IGNORED_DIRECTORIES.contains(&name)
}

/// Expand raw package arguments into package descriptors.
///
/// Arguments ending in `/...` are walked breadth-first and every directory
/// found (including the starting one) becomes a wildcard descriptor.
/// Unreadable directories contribute nothing. Every other argument becomes
/// exactly one descriptor.
pub fn expand_paths<S: AsRef<str>>(paths: &[S]) -> Vec<PackageDescriptor> {
	let suffix = recursive_suffix();
	let mut expanded = Vec::new();

	for raw in paths {
		let path = normalize_separators(raw.as_ref());

		let Some(trimmed) = path.strip_suffix(&suffix) else {
			if is_local_path(&path) {
				expanded.push(PackageDescriptor::local(path, false));
			} else {
				expanded.push(PackageDescriptor::import(path));
			}
			continue;
		};

		// `./...` trims to `.` which is not local, so keep the separator in
		// that case.
		let root = if is_local_path(trimmed) {
			trimmed.to_string()
		} else {
			path[..path.len() - 3].to_string()
		};

		if !is_local_path(&root) {
			// Keep the argument verbatim so it isn't mistaken for a walk.
			expanded.push(PackageDescriptor::import(path));
			continue;
		}

		walk_directories(&root, &mut expanded);
	}

	expanded
}

fn walk_directories(root: &str, expanded: &mut Vec<PackageDescriptor>) {
	expanded.push(PackageDescriptor::local(root, true));

	let mut worklist = vec![root.to_string()];
	let mut cursor = 0;

	while let Some(current) = worklist.get(cursor).cloned() {
		cursor += 1;

		for name in read_subdirectories(&current) {
			if is_ignored_directory(&name) {
				continue;
			}

			let sub_path = join_local(&current, &name);
			expanded.push(PackageDescriptor::local(sub_path.clone(), true));
			worklist.push(sub_path);
		}
	}
}

/// Names of the immediate sub-directories of `dir`, sorted. Symlinks are not
/// followed. Read errors yield an empty list.
fn read_subdirectories(dir: &str) -> Vec<String> {
	let entries = match std::fs::read_dir(Path::new(dir)) {
		Ok(entries) => entries,
		Err(e) => {
			tracing::debug!(dir, error = %e, "skipping unreadable directory");
			return Vec::new();
		}
	};

	let mut names: Vec<String> = entries
		.filter_map(Result::ok)
		.filter(|entry| entry.file_type().is_ok_and(|kind| kind.is_dir()))
		.filter_map(|entry| entry.file_name().to_str().map(ToString::to_string))
		.collect();
	names.sort();
	names
}
