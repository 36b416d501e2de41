//! # Neurite - a crate for importing SWC neuron morphologies
//!
//! SWC is the plain-text format most neuron reconstruction tools trade in:
//! one point sample per line, each naming its parent, together tracing the
//! soma and the tree of axons and dendrites around it. This crate parses
//! those files and rebuilds them as renderer-ready scenes: an optional soma
//! sphere plus a list of branches, each a run of points carrying positions
//! and radii.
//!
//! ## Example
//!
//! ```
//! use neurite::{parse, ImportOptions, MorphologyBuilder};
//!
//! let table = parse(
//!     "# a tiny neuron
//! 1 1 0 0 0 5 -1
//! 2 2 1 0 0 1 1
//! 3 2 2 0 0 1 2
//! ",
//! )
//! .expect("valid swc");
//!
//! let options = ImportOptions {
//!     scale: 1.0,
//!     ..ImportOptions::default()
//! };
//! let scene = MorphologyBuilder::new(&table, options).build();
//!
//! assert!(scene.soma.is_some());
//! assert_eq!(scene.branches.len(), 1);
//! assert_eq!(scene.branches[0].points.len(), 3);
//! ```
//!
//! ## The SWC file
//!
//! A file starts with a block of `#` comment lines, then one sample per
//! line:
//!
//! ```text
//! id type x y z radius parent
//! ```
//!
//! All seven fields are numeric and separated by single spaces. `type`
//! encodes the compartment (1 soma, 2 axon, 3 dendrite, 4 apical
//! dendrite), `parent` is the id of the previous sample along the neurite
//! or `-1` for a root. Reconstruction tools bend these rules in
//! predictable ways and this crate accepts what they emit: signs,
//! exponents, `inf` and `nan` in any field; duplicated ids (the last
//! definition wins but keeps the first position in file order); extra
//! fields past the seventh (ignored).
//!
//! In return, parsing is strict about structure. Comments are only a
//! header: a `#` line after the first sample is an error, as is a blank
//! line or a line with fewer than seven fields. A file that fails to parse
//! produces nothing at all.
//!
//! ## Hosts
//!
//! [`import_file`] and [`import_dir`] push finished scenes into a
//! [`SceneHost`], which is whatever you implement it on: a scene graph, a
//! mesh exporter, a test recorder. A directory import keeps going past
//! files that fail and reports the outcome for each file; a host only ever
//! sees the scenes that succeeded.

pub mod error;
pub mod import;
pub mod morphology;
pub mod parser;
pub mod sample;
pub mod scene;

pub use crate::error::{FormatError, Result, SwcError};
pub use crate::import::{import_dir, import_file, import_file_named, FileImport, SWC_EXTENSION};
pub use crate::morphology::{ImportOptions, MorphologyBuilder};
pub use crate::parser::parse;
pub use crate::sample::{CompartmentKind, Sample, SampleTable, NO_PARENT};
pub use crate::scene::{
    default_diffuse, Branch, BranchPoint, NullHost, SceneDescription, SceneHost, Soma,
};

/// Points are 3D with `f64` coordinates throughout the crate.
pub type Point3 = nalgebra::Point3<f64>;
