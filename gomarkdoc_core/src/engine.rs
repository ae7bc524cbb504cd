use std::io::Write;
use std::path::Path;

use crate::CommandOptions;
use crate::GomarkdocResult;
use crate::destination::OutputTemplate;
use crate::destination::group_by_destination;
use crate::destination::resolve_destinations;
use crate::expand::expand_paths;
use crate::loader::GoSourceLoader;
use crate::loader::SourceLoader;
use crate::loader::load_packages;
use crate::reconcile::ReconcileOptions;
use crate::reconcile::ReconcilePolicy;
use crate::reconcile::reconcile;
use crate::render::Renderer;
use crate::render::TemplateRenderer;

/// Everything [`generate`] needs besides the loader and renderer.
#[derive(Debug)]
pub struct GeneratePlan<'a> {
	pub output: &'a OutputTemplate,
	pub tags: &'a [String],
	pub header: &'a str,
	pub footer: &'a str,
	pub reconcile: ReconcileOptions,
}

/// Counts of destinations handled by each kind of delivery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
	pub printed: usize,
	/// Files replaced or merged.
	pub written: usize,
	pub verified: usize,
}

impl RunSummary {
	fn record(&mut self, policy: ReconcilePolicy) {
		match policy {
			ReconcilePolicy::Print => self.printed += 1,
			ReconcilePolicy::Verify => self.verified += 1,
			ReconcilePolicy::Merge | ReconcilePolicy::Replace => self.written += 1,
		}
	}
}

/// Expand `paths`, route, load, render and reconcile every destination.
///
/// No paths means the current directory. The first fatal error stops the
/// run.
pub fn generate<L, R, W>(
	paths: &[String],
	plan: &GeneratePlan<'_>,
	loader: &L,
	renderer: &R,
	stdout: &mut W,
) -> GomarkdocResult<RunSummary>
where
	L: SourceLoader + ?Sized,
	R: Renderer + ?Sized,
	W: Write,
{
	let default_paths = [".".to_string()];
	let paths = if paths.is_empty() { &default_paths[..] } else { paths };

	let mut descriptors = expand_paths(paths);
	tracing::debug!(count = descriptors.len(), "expanded package paths");

	resolve_destinations(&mut descriptors, plan.output)?;
	load_packages(&mut descriptors, loader, plan.tags)?;

	let mut summary = RunSummary::default();
	for unit in group_by_destination(&descriptors) {
		let text = renderer.render(plan.header, plan.footer, &unit.packages)?;
		let policy = reconcile(unit.destination, &text, &plan.reconcile, stdout)?;
		summary.record(policy);
	}

	Ok(summary)
}

/// Run with the built-in Go loader and template renderer.
///
/// Configuration problems are reported before any package is loaded.
pub fn run_command<W: Write>(
	paths: &[String],
	options: &CommandOptions,
	working_dir: &Path,
	stdout: &mut W,
) -> GomarkdocResult<RunSummary> {
	options.validate()?;
	let output = OutputTemplate::parse(&options.output)?;
	let renderer = TemplateRenderer::new(options.renderer_options(working_dir)?)?;
	let header = options.resolve_header(working_dir)?;
	let footer = options.resolve_footer(working_dir)?;

	let loader = GoSourceLoader::new(working_dir).include_unexported(options.include_unexported);
	let plan = GeneratePlan {
		output: &output,
		tags: &options.tags,
		header: &header,
		footer: &footer,
		reconcile: options.reconcile_options(),
	};

	let summary = generate(paths, &plan, &loader, &renderer, stdout)?;
	tracing::info!(
		printed = summary.printed,
		written = summary.written,
		verified = summary.verified,
		"documentation run complete"
	);

	Ok(summary)
}
