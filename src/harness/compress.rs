use std::{
    fs, io,
    path::{Path, PathBuf},
    process::{Command, ExitStatus},
};

use log::{debug, error, info, warn};

use crate::tools::walk::{relative_to, walk_files};

/// Outcome of one compressor call.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Source path relative to the uncompressed root
    pub relative: PathBuf,
    pub status: ExitStatus,
    /// Whether the output file existed once the compressor exited
    pub produced: bool,
}

impl Invocation {
    pub fn succeeded(&self) -> bool {
        self.status.success()
    }
}

/// Compress every file under `input_root` into the same relative path under
/// `output_root`, one `lzkn64 -c` call at a time.
///
/// The exit status is recorded but never stops the pass; a compressor that
/// fails to write its output shows up later as a mismatch. Only a failure to
/// launch the executable at all is returned as an error.
pub fn compress_tree(
    compressor: &Path,
    input_root: &Path,
    output_root: &Path,
) -> io::Result<Vec<Invocation>> {
    // The compressor is handed absolute paths
    let listing = fs::canonicalize(input_root)
        .and_then(|root| walk_files(&root).map(|files| (root, files)));
    let (input_root, sources) = listing.map_err(|e| {
        error!(
            "Fatal error: cannot read uncompressed directory {}: {}",
            input_root.display(),
            e
        );
        e
    })?;
    let output_root = fs::canonicalize(output_root)?;
    info!(
        "Compressing {} files from {}",
        sources.len(),
        input_root.display()
    );

    let mut invocations = Vec::with_capacity(sources.len());
    for source in sources {
        let relative = relative_to(&source, &input_root)?;
        let destination = output_root.join(relative);

        // Mirror the source layout
        if let Some(parent) = destination.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let status = compress_file(compressor, &source, &destination)?;
        if !status.success() {
            warn!("{} exited with {} on {}", compressor.display(), status, relative.display());
        }
        let produced = destination.is_file();
        if !produced {
            warn!("No output written for {}", relative.display());
        }
        invocations.push(Invocation {
            relative: relative.to_path_buf(),
            status,
            produced,
        });
    }
    Ok(invocations)
}

/// Run `<compressor> -c <source> <destination>` and wait for it.
pub fn compress_file(compressor: &Path, source: &Path, destination: &Path) -> io::Result<ExitStatus> {
    debug!("{} -c {} {}", compressor.display(), source.display(), destination.display());
    Command::new(compressor)
        .arg("-c")
        .arg(source)
        .arg(destination)
        .status()
        .map_err(|e| {
            error!("Fatal error: could not run {}: {}", compressor.display(), e);
            e
        })
}
