use std::collections::HashMap;

use minijinja::Environment;
use minijinja::UndefinedBehavior;

use crate::DestinationUnit;
use crate::GomarkdocError;
use crate::GomarkdocResult;
use crate::PackageDescriptor;
use crate::paths::clean_path;

/// A compiled output path template such as `{{ directory }}/README.md`.
///
/// An empty template, or one that renders to an empty string, routes output
/// to standard output.
#[derive(Debug)]
pub struct OutputTemplate {
	env: Environment<'static>,
	empty: bool,
}

const OUTPUT_TEMPLATE_NAME: &str = "output";

impl OutputTemplate {
	/// Compile `source`, failing on syntax errors.
	pub fn parse(source: &str) -> GomarkdocResult<Self> {
		let mut env = Environment::new();
		env.set_undefined_behavior(UndefinedBehavior::Strict);
		env.add_template_owned(OUTPUT_TEMPLATE_NAME, source.to_string())
			.map_err(|e| GomarkdocError::InvalidOutputTemplate(e.to_string()))?;

		Ok(Self {
			env,
			empty: source.is_empty(),
		})
	}

	/// Whether the template source is empty, meaning every package is printed.
	pub fn is_empty(&self) -> bool {
		self.empty
	}

	/// Evaluate the template for one descriptor. Non-empty results are
	/// cleaned.
	pub fn render(&self, descriptor: &PackageDescriptor) -> GomarkdocResult<String> {
		let to_error = |e: minijinja::Error| {
			GomarkdocError::OutputTemplate {
				identifier: descriptor.identifier.clone(),
				reason: e.to_string(),
			}
		};

		let rendered = self
			.env
			.get_template(OUTPUT_TEMPLATE_NAME)
			.map_err(to_error)?
			.render(descriptor.template_data())
			.map_err(to_error)?;

		if rendered.is_empty() {
			Ok(rendered)
		} else {
			Ok(clean_path(&rendered))
		}
	}
}

/// Assign each descriptor its destination from the output template.
pub fn resolve_destinations(
	descriptors: &mut [PackageDescriptor],
	template: &OutputTemplate,
) -> GomarkdocResult<()> {
	for descriptor in descriptors.iter_mut() {
		descriptor.destination = template.render(descriptor)?;
	}

	Ok(())
}

/// Fold loaded descriptors sharing a destination into units.
///
/// Units appear in the order their destination was first seen and keep
/// their packages in descriptor order. Descriptors without a package are
/// skipped.
pub fn group_by_destination(descriptors: &[PackageDescriptor]) -> Vec<DestinationUnit<'_>> {
	let mut units: Vec<DestinationUnit<'_>> = Vec::new();
	let mut positions: HashMap<&str, usize> = HashMap::new();

	for descriptor in descriptors {
		let Some(package) = &descriptor.package else {
			continue;
		};

		let destination = descriptor.destination.as_str();
		let index = *positions.entry(destination).or_insert_with(|| {
			units.push(DestinationUnit {
				destination,
				packages: Vec::new(),
			});
			units.len() - 1
		});
		units[index].packages.push(package);
	}

	units
}
