use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;

use crate::GomarkdocError;

/// The flavor of markdown to produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
	/// GitHub Flavored Markdown.
	#[default]
	Github,
	/// Azure DevOps markdown.
	AzureDevops,
	/// Plain markdown without anchors, fenced code or in-page links.
	Plain,
}

impl Format {
	pub const ALL: [Format; 3] = [Self::Github, Self::AzureDevops, Self::Plain];

	pub fn name(self) -> &'static str {
		match self {
			Self::Github => "github",
			Self::AzureDevops => "azure-devops",
			Self::Plain => "plain",
		}
	}

	/// The formatting capabilities for this flavor.
	pub fn markdown(self) -> Arc<dyn MarkdownFormat> {
		match self {
			Self::Github => Arc::new(GitHubFlavoredMarkdown),
			Self::AzureDevops => Arc::new(AzureDevOpsMarkdown),
			Self::Plain => Arc::new(PlainMarkdown),
		}
	}
}

impl fmt::Display for Format {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Format {
	type Err = GomarkdocError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|format| format.name() == value)
			.ok_or_else(|| GomarkdocError::InvalidFormat(value.to_string()))
	}
}

/// Markdown building blocks that differ between flavors. These back the
/// filters available to documentation templates.
pub trait MarkdownFormat: fmt::Debug + Send + Sync {
	/// A heading of the given level (1-6).
	fn heading(&self, level: usize, text: &str) -> String {
		format!("{} {}", "#".repeat(level.clamp(1, 6)), self.escape(text))
	}

	/// A code block in the given language.
	fn code_block(&self, language: &str, code: &str) -> String {
		format!("```{language}\n{}\n```", code.trim_end_matches('\n'))
	}

	/// An invisible anchor that [`local_link`](Self::local_link) can target.
	fn anchor(&self, name: &str) -> String {
		format!("<a name=\"{name}\"></a>")
	}

	/// A link to an external location.
	fn link(&self, text: &str, href: &str) -> String {
		format!("[{text}]({href})")
	}

	/// A link to an anchor within the same document.
	fn local_link(&self, text: &str, anchor: &str) -> String;

	/// Escape text so markdown control characters render literally.
	fn escape(&self, text: &str) -> String {
		let mut escaped = String::with_capacity(text.len());
		for c in text.chars() {
			if matches!(c, '\\' | '*' | '_' | '[' | ']' | '<' | '>' | '`' | '#') {
				escaped.push('\\');
			}
			escaped.push(c);
		}
		escaped
	}
}

#[derive(Debug, Clone, Copy)]
pub struct GitHubFlavoredMarkdown;

impl MarkdownFormat for GitHubFlavoredMarkdown {
	fn local_link(&self, text: &str, anchor: &str) -> String {
		format!("[{}](<#{anchor}>)", self.escape(text))
	}
}

#[derive(Debug, Clone, Copy)]
pub struct AzureDevOpsMarkdown;

impl MarkdownFormat for AzureDevOpsMarkdown {
	fn local_link(&self, text: &str, anchor: &str) -> String {
		format!("[{}](#{})", self.escape(text), anchor.to_lowercase())
	}
}

#[derive(Debug, Clone, Copy)]
pub struct PlainMarkdown;

impl MarkdownFormat for PlainMarkdown {
	fn code_block(&self, _language: &str, code: &str) -> String {
		code.trim_end_matches('\n')
			.lines()
			.map(|line| {
				if line.is_empty() {
					String::new()
				} else {
					format!("    {line}")
				}
			})
			.collect::<Vec<_>>()
			.join("\n")
	}

	fn anchor(&self, _name: &str) -> String {
		String::new()
	}

	fn local_link(&self, text: &str, _anchor: &str) -> String {
		self.escape(text)
	}
}
