//! `gomarkdoc_core` generates markdown documentation for Go packages and
//! keeps it in sync with the files it is written to.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Package arguments (./pkg, ./tree/..., encoding/json)
//!   → Expansion (recursive arguments become one descriptor per directory)
//!   → Routing (the output template assigns each descriptor a destination)
//!   → Loading (a SourceLoader turns identifiers into documentation models)
//!   → Grouping (descriptors sharing a destination form one unit)
//!   → Rendering (a Renderer turns each unit into markdown)
//!   → Reconciling (print, replace, merge into markers, or verify)
//! ```
//!
//! ## Modules
//!
//! - [`expand`]: Package argument expansion with breadth-first directory traversal.
//! - [`tags`]: Build tag resolution from the `GOFLAGS` environment variable.
//! - [`destination`]: Output path templates and grouping by destination.
//! - [`loader`]: The [`SourceLoader`] trait and the line-scanning [`GoSourceLoader`].
//! - [`render`]: The [`Renderer`] trait and the `minijinja` based [`TemplateRenderer`].
//! - [`reconcile`]: Delivery of rendered text to standard output or files.
//! - [`config`]: Config file loading and layering into [`CommandOptions`].
//!
//! ## Embedding
//!
//! With `embed` set, documentation is placed between markers in an existing
//! file instead of replacing it:
//!
//! ```markdown
//! # My project
//!
//! <!-- gomarkdoc:embed:start -->
//!
//! ...generated documentation...
//!
//! <!-- gomarkdoc:embed:end -->
//! ```
//!
//! A lone `<!-- gomarkdoc:embed -->` line marks where the region should be
//! created. Files without markers get the region appended.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gomarkdoc_core::GomarkdocConfig;
//! use std::path::Path;
//!
//! let options = GomarkdocConfig {
//! 	output: Some("{{ directory }}/README.md".to_string()),
//! 	..Default::default()
//! }
//! .into_options()
//! .unwrap();
//!
//! let paths = vec!["./...".to_string()];
//! let summary =
//! 	gomarkdoc_core::run_command(&paths, &options, Path::new("."), &mut std::io::stdout())
//! 		.unwrap();
//! println!("wrote {} file(s)", summary.written);
//! ```

pub use compare::*;
pub use config::*;
pub use descriptor::*;
pub use destination::*;
pub use engine::*;
pub use error::*;
pub use expand::*;
pub use format::*;
pub use loader::*;
pub use model::*;
pub use reconcile::*;
pub use render::*;
pub use tags::*;

mod compare;
pub mod config;
pub mod constraint;
mod descriptor;
pub mod destination;
mod engine;
#[allow(unused_assignments)]
mod error;
pub mod expand;
mod format;
pub mod loader;
mod model;
pub mod paths;
pub mod reconcile;
pub mod render;
pub mod tags;

#[cfg(test)]
mod __fixtures;
