//! Evaluation of `//go:build` constraint expressions.

use std::collections::HashSet;

/// The set of tags a build constraint is evaluated against.
#[derive(Debug, Clone, Default)]
pub struct BuildContext {
	tags: HashSet<String>,
}

impl BuildContext {
	/// A context for the host platform plus the given user tags.
	pub fn host(tags: &[String]) -> Self {
		let mut set: HashSet<String> = tags.iter().cloned().collect();
		set.insert(go_os(std::env::consts::OS).to_string());
		set.insert(go_arch(std::env::consts::ARCH).to_string());
		set.insert("gc".to_string());
		if cfg!(unix) {
			set.insert("unix".to_string());
		}
		Self { tags: set }
	}

	/// A context that satisfies exactly the given tags.
	pub fn with_tags<I, S>(tags: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			tags: tags.into_iter().map(Into::into).collect(),
		}
	}

	/// Whether a single tag is satisfied. Release tags (`go1.N`) always are.
	pub fn satisfies(&self, tag: &str) -> bool {
		self.tags.contains(tag) || is_release_tag(tag)
	}

	/// Evaluate a constraint expression such as `linux && (amd64 || !cgo)`.
	///
	/// Returns `None` when the expression doesn't parse.
	pub fn evaluate(&self, expression: &str) -> Option<bool> {
		let tokens = tokenize(expression)?;
		let mut parser = Parser {
			tokens: &tokens,
			position: 0,
			context: self,
		};
		let value = parser.or_expression()?;

		if parser.position == tokens.len() {
			Some(value)
		} else {
			None
		}
	}
}

fn is_release_tag(tag: &str) -> bool {
	tag.strip_prefix("go1.")
		.is_some_and(|minor| !minor.is_empty() && minor.chars().all(|c| c.is_ascii_digit()))
}

fn go_os(os: &str) -> &str {
	match os {
		"macos" => "darwin",
		other => other,
	}
}

fn go_arch(arch: &str) -> &str {
	match arch {
		"x86_64" => "amd64",
		"x86" => "386",
		"aarch64" => "arm64",
		"powerpc64" => "ppc64",
		other => other,
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
	Tag(String),
	Not,
	And,
	Or,
	Open,
	Close,
}

fn tokenize(expression: &str) -> Option<Vec<Token>> {
	let mut tokens = Vec::new();
	let mut chars = expression.chars().peekable();

	while let Some(&c) = chars.peek() {
		match c {
			c if c.is_whitespace() => {
				chars.next();
			}
			'!' => {
				chars.next();
				tokens.push(Token::Not);
			}
			'(' => {
				chars.next();
				tokens.push(Token::Open);
			}
			')' => {
				chars.next();
				tokens.push(Token::Close);
			}
			'&' | '|' => {
				chars.next();
				if chars.next() != Some(c) {
					return None;
				}
				tokens.push(if c == '&' { Token::And } else { Token::Or });
			}
			c if c.is_alphanumeric() || c == '_' || c == '.' => {
				let mut tag = String::new();
				while let Some(&c) = chars.peek() {
					if !(c.is_alphanumeric() || c == '_' || c == '.') {
						break;
					}
					tag.push(c);
					chars.next();
				}
				tokens.push(Token::Tag(tag));
			}
			_ => return None,
		}
	}

	Some(tokens)
}

struct Parser<'a> {
	tokens: &'a [Token],
	position: usize,
	context: &'a BuildContext,
}

impl Parser<'_> {
	fn peek(&self) -> Option<&Token> {
		self.tokens.get(self.position)
	}

	fn or_expression(&mut self) -> Option<bool> {
		let mut value = self.and_expression()?;
		while self.peek() == Some(&Token::Or) {
			self.position += 1;
			let rhs = self.and_expression()?;
			value = value || rhs;
		}
		Some(value)
	}

	fn and_expression(&mut self) -> Option<bool> {
		let mut value = self.not_expression()?;
		while self.peek() == Some(&Token::And) {
			self.position += 1;
			let rhs = self.not_expression()?;
			value = value && rhs;
		}
		Some(value)
	}

	fn not_expression(&mut self) -> Option<bool> {
		if self.peek() == Some(&Token::Not) {
			self.position += 1;
			return self.not_expression().map(|value| !value);
		}
		self.atom()
	}

	fn atom(&mut self) -> Option<bool> {
		let token = self.peek()?.clone();
		self.position += 1;

		match token {
			Token::Tag(tag) => Some(self.context.satisfies(&tag)),
			Token::Open => {
				let value = self.or_expression()?;
				if self.peek() != Some(&Token::Close) {
					return None;
				}
				self.position += 1;
				Some(value)
			}
			_ => None,
		}
	}
}
