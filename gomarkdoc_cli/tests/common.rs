#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn gomarkdoc_cmd(dir: &Path) -> Command {
	let mut cmd = Command::new(get_cargo_bin("gomarkdoc"));
	cmd.current_dir(dir).env("NO_COLOR", "1").env_remove("GOFLAGS");
	cmd
}

/// Write `content` to `root/relative`, creating parent directories.
pub fn write(root: &Path, relative: &str, content: &str) -> std::io::Result<()> {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(path, content)
}

/// A Go package named `package` with one documented function.
pub fn go_source(package: &str, function: &str) -> String {
	format!(
		"// Package {package} is a fixture.\npackage {package}\n\n// {function} says hello.\nfunc {function}() string {{\n\treturn \"hello\"\n}}\n"
	)
}
