use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::io::ErrorKind;
use std::io::Write;
use std::path::Path;
use std::sync::LazyLock;

use regex::bytes::Regex;
use similar::TextDiff;

use crate::GomarkdocError;
use crate::GomarkdocResult;
use crate::compare::streams_equal;

/// Opening marker of a managed region.
pub const EMBED_START: &str = "<!-- gomarkdoc:embed:start -->";
/// Closing marker of a managed region.
pub const EMBED_END: &str = "<!-- gomarkdoc:embed:end -->";

static STANDALONE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?mi)^[ \t]*<!--\s*gomarkdoc:embed\s*-->\s*?$").expect("valid regex")
});

static EMBED_REGION: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"(?mi)^[ \t]*<!--\s*gomarkdoc:embed:start\s*-->(?s-u:.*?)<!--\s*gomarkdoc:embed:end\s*-->\s*?$",
	)
	.expect("valid regex")
});

/// How rendered text reaches its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilePolicy {
	/// Write to standard output.
	Print,
	/// Compare against the file on disk without writing.
	Verify,
	/// Splice into the managed region of an existing file.
	Merge,
	/// Overwrite the file.
	Replace,
}

/// Flags that pick the [`ReconcilePolicy`] for each destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOptions {
	pub check: bool,
	pub embed: bool,
	/// Attach a unified diff to drift errors.
	pub show_diff: bool,
}

impl ReconcileOptions {
	/// The policy for one destination. An empty destination always prints.
	pub fn policy_for(&self, destination: &str) -> ReconcilePolicy {
		if destination.is_empty() {
			ReconcilePolicy::Print
		} else if self.check {
			ReconcilePolicy::Verify
		} else if self.embed {
			ReconcilePolicy::Merge
		} else {
			ReconcilePolicy::Replace
		}
	}
}

/// Deliver `text` to `destination`, returning the policy that was applied.
///
/// The text is printed, written and compared exactly as given.
pub fn reconcile<W: Write>(
	destination: &str,
	text: &str,
	options: &ReconcileOptions,
	stdout: &mut W,
) -> GomarkdocResult<ReconcilePolicy> {
	let policy = options.policy_for(destination);

	match policy {
		ReconcilePolicy::Print => {
			stdout.write_all(text.as_bytes())?;
			stdout.flush()?;
		}
		ReconcilePolicy::Verify => {
			verify_file(destination, text, options)?;
			tracing::info!(path = destination, "documentation is up to date");
		}
		ReconcilePolicy::Merge => {
			let existing = match fs::read(destination) {
				Ok(content) => Some(content),
				Err(e) if e.kind() == ErrorKind::NotFound => {
					tracing::debug!(path = destination, "starting new embed target");
					None
				}
				Err(source) => {
					return Err(GomarkdocError::ReadOutput {
						path: destination.to_string(),
						source,
					});
				}
			};
			write_file(destination, embed_bytes(existing.as_deref(), text))?;
			tracing::info!(path = destination, "embedded documentation");
		}
		ReconcilePolicy::Replace => {
			write_file(destination, text)?;
			tracing::info!(path = destination, "wrote documentation");
		}
	}

	Ok(policy)
}

/// Write `content` to `path`, creating parent directories as needed.
pub fn write_file(path: &str, content: impl AsRef<[u8]>) -> GomarkdocResult<()> {
	let to_error = |source| {
		GomarkdocError::WriteOutput {
			path: path.to_string(),
			source,
		}
	};

	if let Some(parent) = Path::new(path).parent() {
		if !parent.as_os_str().is_empty() {
			fs::create_dir_all(parent).map_err(to_error)?;
		}
	}

	let mut options = fs::OpenOptions::new();
	options.write(true).create(true).truncate(true);

	#[cfg(unix)]
	{
		use std::os::unix::fs::OpenOptionsExt;
		options.mode(0o664);
	}

	let mut file = options.open(path).map_err(to_error)?;
	file.write_all(content.as_ref()).map_err(to_error)
}

/// Check that the file at `path` already holds what would be written.
///
/// A missing or unopenable file counts as drift. With `embed` set the file
/// is compared against its merged form.
pub fn verify_file(path: &str, text: &str, options: &ReconcileOptions) -> GomarkdocResult<()> {
	let out_of_date = |current: &[u8], expected: &[u8]| {
		GomarkdocError::OutOfDate {
			path: path.to_string(),
			diff: options
				.show_diff
				.then(|| unified_diff(path, current, expected)),
		}
	};

	if options.embed {
		let Ok(current) = fs::read(path) else {
			return Err(out_of_date(b"", &embed_bytes(None, text)));
		};
		let expected = embed_bytes(Some(&current), text);

		return if current == expected {
			Ok(())
		} else {
			Err(out_of_date(&current, &expected))
		};
	}

	let expected = text.as_bytes();
	let Ok(file) = File::open(path) else {
		return Err(out_of_date(b"", expected));
	};

	let equal = streams_equal(BufReader::new(file), expected).map_err(|source| {
		GomarkdocError::CompareStreams {
			path: path.to_string(),
			source,
		}
	})?;

	if equal {
		return Ok(());
	}

	let current = fs::read(path).unwrap_or_default();
	Err(out_of_date(&current, expected))
}

/// Wrap `text` in the managed region markers.
pub fn wrap_embed(text: &str) -> String {
	format!("{EMBED_START}\n\n{}\n\n{EMBED_END}", text.trim_end_matches('\n'))
}

/// Splice `text` into `existing`.
///
/// Every standalone `<!-- gomarkdoc:embed -->` line and every
/// `<!-- gomarkdoc:embed:start -->` ... `<!-- gomarkdoc:embed:end -->`
/// region is replaced with the wrapped text. Content without any marker gets
/// the wrapped text appended after a blank line.
pub fn embed_contents(existing: Option<&str>, text: &str) -> String {
	let merged = embed_bytes(existing.map(str::as_bytes), text);
	String::from_utf8_lossy(&merged).into_owned()
}

/// [`embed_contents`] over raw file content. Bytes outside the managed
/// region are kept as they are, whatever their encoding.
pub fn embed_bytes(existing: Option<&[u8]>, text: &str) -> Vec<u8> {
	let wrapped = wrap_embed(text);

	let Some(existing) = existing.filter(|content| !content.is_empty()) else {
		return format!("{wrapped}\n").into_bytes();
	};

	let mut replaced = 0usize;
	let merged = STANDALONE_MARKER
		.replace_all(existing, |_: &regex::bytes::Captures<'_>| {
			replaced += 1;
			wrapped.as_bytes()
		})
		.into_owned();
	let merged = EMBED_REGION
		.replace_all(&merged, |_: &regex::bytes::Captures<'_>| {
			replaced += 1;
			wrapped.as_bytes()
		})
		.into_owned();

	if replaced > 0 {
		return merged;
	}

	tracing::debug!("no embed markers found, appending");
	let separator: &[u8] = if existing.ends_with(b"\n") { b"\n" } else { b"\n\n" };
	[existing, separator, wrapped.as_bytes(), &b"\n"[..]].concat()
}

fn unified_diff(path: &str, current: &[u8], expected: &[u8]) -> String {
	let current = String::from_utf8_lossy(current);
	let expected = String::from_utf8_lossy(expected);
	TextDiff::from_lines(current.as_ref(), expected.as_ref())
		.unified_diff()
		.context_radius(3)
		.header(path, "expected")
		.to_string()
}
