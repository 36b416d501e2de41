//! Prints a summary of every neuron in an SWC file or directory.
//!
//! Usage: `print_swc <file-or-directory> [scale]`. Set `RUST_LOG=warn` to
//! see which files or samples were skipped and why.

use neurite::{import_dir, import_file, ImportOptions, SceneDescription, SceneHost};

struct Printer;

impl SceneHost for Printer {
    fn add_neuron(&mut self, name: &str, scene: &SceneDescription) {
        println!("neuron {name:?}");
        match &scene.soma {
            Some(soma) => println!(
                "  soma: radius {:.4} at ({:.4}, {:.4}, {:.4})",
                soma.radius, soma.position.x, soma.position.y, soma.position.z
            ),
            None => println!("  soma: none"),
        }
        for (index, branch) in scene.branches.iter().enumerate() {
            println!(
                "  branch {:>3} [{}] {} points",
                index,
                branch.material_key(),
                branch.points.len()
            );
        }
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let path = match args.next() {
        Some(path) => std::path::PathBuf::from(path),
        None => {
            eprintln!("usage: print_swc <file-or-directory> [scale]");
            std::process::exit(2);
        }
    };
    let scale = args
        .next()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(1000.0);
    let options = ImportOptions {
        scale,
        ..ImportOptions::default()
    };

    let result = if path.is_dir() {
        import_dir(&path, &options, &mut Printer).map(|report| {
            let failed = report.iter().filter(|file| file.outcome.is_err()).count();
            println!("{} files, {} failed", report.len(), failed);
        })
    } else {
        import_file(&path, &options, &mut Printer).map(|_| ())
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
