//! File and directory import entry points.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Result, SwcError};
use crate::morphology::{ImportOptions, MorphologyBuilder};
use crate::parser;
use crate::scene::{SceneDescription, SceneHost};

/// Extension the batch importer looks for, without the dot.
pub const SWC_EXTENSION: &str = "swc";

/// What happened to one file during a directory import.
#[derive(Debug)]
pub struct FileImport {
    pub path: PathBuf,
    pub outcome: Result<SceneDescription>,
}

/// Imports one file, naming the neuron after the file stem.
///
/// The scene reaches `host` only on success; a file that fails to read or
/// parse leaves the host untouched.
pub fn import_file<P, H>(path: P, options: &ImportOptions, host: &mut H) -> Result<SceneDescription>
where
    P: AsRef<Path>,
    H: SceneHost,
{
    let path = path.as_ref();
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("neuron"));
    import_file_named(path, &name, options, host)
}

/// Imports one file under an explicit neuron name.
pub fn import_file_named<P, H>(
    path: P,
    name: &str,
    options: &ImportOptions,
    host: &mut H,
) -> Result<SceneDescription>
where
    P: AsRef<Path>,
    H: SceneHost,
{
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SwcError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parser::parse(&text)?;
    let scene = MorphologyBuilder::new(&table, *options).build();
    host.add_neuron(name, &scene);
    debug!(
        "imported {}: {} samples, {} branches, soma {}",
        path.display(),
        table.len(),
        scene.branches.len(),
        if scene.soma.is_some() { "present" } else { "absent" },
    );
    Ok(scene)
}

/// Imports every `*.swc` file directly inside `dir`, in lexical filename
/// order.
///
/// One bad file does not stop the batch: its error lands in the returned
/// report and the walk moves on. Only a missing directory fails the whole
/// call.
pub fn import_dir<P, H>(dir: P, options: &ImportOptions, host: &mut H) -> Result<Vec<FileImport>>
where
    P: AsRef<Path>,
    H: SceneHost,
{
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(SwcError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut report = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable entry in {}: {}", dir.display(), err);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        if !path
            .extension()
            .map_or(false, |extension| extension == SWC_EXTENSION)
        {
            continue;
        }

        let outcome = import_file(&path, options, host);
        if let Err(err) = &outcome {
            warn!("skipping {}: {}", path.display(), err);
        }
        report.push(FileImport { path, outcome });
    }
    Ok(report)
}
