use serde::Serialize;

use crate::model::Package;

/// One package slated for documentation.
///
/// Descriptors are created by [`expand_paths`](crate::expand_paths), receive
/// their destination from
/// [`resolve_destinations`](crate::resolve_destinations) and their package
/// from [`load_packages`](crate::load_packages).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
	/// Local path the package is loaded from. Always `"."` for packages
	/// referenced by import path.
	pub directory: String,
	/// Name handed to the loader. Equal to `directory` for local packages,
	/// otherwise the import path (e.g. `encoding/json`).
	pub identifier: String,
	/// Whether the descriptor was discovered by recursive expansion.
	pub is_wildcard: bool,
	/// Whether `directory` is a real filesystem path.
	pub is_local: bool,
	/// Resolved output path. Empty means standard output.
	pub destination: String,
	/// The loaded documentation model. `None` until loaded, and for wildcard
	/// descriptors that failed to load.
	pub package: Option<Package>,
}

impl PackageDescriptor {
	/// A descriptor for a filesystem directory.
	pub fn local(directory: impl Into<String>, is_wildcard: bool) -> Self {
		let directory = directory.into();
		Self {
			identifier: directory.clone(),
			directory,
			is_wildcard,
			is_local: true,
			destination: String::new(),
			package: None,
		}
	}

	/// A descriptor for a package referenced by import path.
	pub fn import(identifier: impl Into<String>) -> Self {
		Self {
			directory: ".".to_string(),
			identifier: identifier.into(),
			is_wildcard: false,
			is_local: false,
			destination: String::new(),
			package: None,
		}
	}

	/// The data exposed to the output path template.
	pub fn template_data(&self) -> DescriptorTemplateData<'_> {
		DescriptorTemplateData {
			directory: &self.directory,
			identifier: &self.identifier,
			dir: &self.directory,
			import_path: &self.identifier,
			is_local: self.is_local,
			is_wildcard: self.is_wildcard,
		}
	}
}

/// Serializable view of a [`PackageDescriptor`] for output templates.
#[derive(Debug, Serialize)]
pub struct DescriptorTemplateData<'a> {
	pub directory: &'a str,
	pub identifier: &'a str,
	pub dir: &'a str,
	pub import_path: &'a str,
	pub is_local: bool,
	pub is_wildcard: bool,
}

/// All loaded packages routed to a single destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationUnit<'a> {
	/// Output path shared by every package in the unit. Empty means standard
	/// output.
	pub destination: &'a str,
	/// Packages in descriptor order.
	pub packages: Vec<&'a Package>,
}
