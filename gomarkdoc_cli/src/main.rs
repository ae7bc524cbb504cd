use std::path::Path;
use std::path::PathBuf;
use std::process;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use clap::Parser;
use gomarkdoc_cli::GomarkdocCli;
use gomarkdoc_cli::VERSION;
use gomarkdoc_cli::log_filter;
use gomarkdoc_cli::print_version;
use gomarkdoc_core::GomarkdocConfig;
use gomarkdoc_core::GomarkdocError;
use gomarkdoc_core::GomarkdocResult;
use gomarkdoc_core::run_command;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

static USE_COLOR: AtomicBool = AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = GomarkdocCli::parse();

	let use_color = !args.no_color
		&& std::env::var_os("NO_COLOR").is_none()
		&& supports_color::on(supports_color::Stream::Stderr).is_some();
	USE_COLOR.store(use_color, Ordering::Relaxed);

	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_filter(args.verbose)));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();

	if args.version {
		if let Err(e) = print_version(&mut std::io::stdout(), VERSION) {
			eprintln!("{} {e}", colored!("error:", red));
			process::exit(1);
		}
		return;
	}

	if let Err(e) = run(&args) {
		if let GomarkdocError::OutOfDate {
			diff: Some(diff), ..
		} = &e
		{
			print_diff(diff);
		}

		let report: miette::Report = e.into();
		eprintln!("{report:?}");
		process::exit(1);
	}
}

fn run(args: &GomarkdocCli) -> GomarkdocResult<()> {
	let working_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

	let file_config = match &args.config {
		Some(path) => {
			let path = resolve(&working_dir, path);
			tracing::debug!(path = %path.display(), "loading config file");
			Some(GomarkdocConfig::load_file(&path)?)
		}
		None => GomarkdocConfig::load(&working_dir)?,
	};

	let mut options = file_config
		.unwrap_or_default()
		.layer(args.to_config())
		.into_options()?;
	options.show_diff = args.diff;

	let mut stdout = std::io::stdout().lock();
	run_command(&args.packages, &options, &working_dir, &mut stdout)?;

	Ok(())
}

fn resolve(working_dir: &Path, path: &Path) -> PathBuf {
	if path.is_absolute() {
		path.to_path_buf()
	} else {
		working_dir.join(path)
	}
}

/// Print a unified diff, colorized.
fn print_diff(diff: &str) {
	for line in diff.lines() {
		if line.starts_with("---") || line.starts_with("+++") || line.starts_with("@@") {
			eprintln!("{}", colored!(line, bold));
		} else if line.starts_with('-') {
			eprintln!("{}", colored!(line, red));
		} else if line.starts_with('+') {
			eprintln!("{}", colored!(line, green));
		} else {
			eprintln!("{line}");
		}
	}
}
