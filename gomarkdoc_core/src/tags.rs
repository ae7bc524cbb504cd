/// Environment variable consulted for build tags when none are configured.
pub const GOFLAGS_ENV: &str = "GOFLAGS";

/// Build tags taken from the `-tags` option of `GOFLAGS`.
///
/// This is a best-effort fallback: a missing variable or a flags string that
/// doesn't parse produces an empty list.
pub fn default_tags() -> Vec<String> {
	let Ok(flags) = std::env::var(GOFLAGS_ENV) else {
		return Vec::new();
	};

	let tags = parse_tags_flag(&flags);
	tracing::debug!(flags, ?tags, "resolved build tags from {GOFLAGS_ENV}");
	tags
}

/// Parse a whitespace separated flags string that may contain a `tags`
/// option and return the comma separated tags it holds.
///
/// Accepts `-tags=a,b`, `--tags=a,b` and `-tags a,b`. Parsing stops at the
/// first non-flag argument or at `--`. Any other flag, or a malformed one,
/// makes the whole string invalid and yields no tags.
pub fn parse_tags_flag(flags: &str) -> Vec<String> {
	parse_flag_set(flags).unwrap_or_default()
}

fn parse_flag_set(flags: &str) -> Option<Vec<String>> {
	let mut fields = flags.split_whitespace();
	let mut value = String::new();

	while let Some(field) = fields.next() {
		if field == "--" {
			break;
		}

		let Some(flag) = field.strip_prefix('-').filter(|rest| !rest.is_empty()) else {
			break;
		};
		let flag = flag.strip_prefix('-').unwrap_or(flag);

		if flag.is_empty() || flag.starts_with('-') || flag.starts_with('=') {
			return None;
		}

		let (name, inline_value) = match flag.split_once('=') {
			Some((name, value)) => (name, Some(value)),
			None => (flag, None),
		};

		if name != "tags" {
			return None;
		}

		value = match inline_value {
			Some(inline) => inline.to_string(),
			None => fields.next()?.to_string(),
		};
	}

	Some(
		value
			.split(',')
			.map(str::trim)
			.filter(|tag| !tag.is_empty())
			.map(ToString::to_string)
			.collect(),
	)
}
