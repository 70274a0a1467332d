//! The harness module checks an external lzkn64 compressor against a set of known-good outputs.
//!
//! A run happens in the following steps:
//! - Workspace: Wipe and recreate the temporary directory.
//! - Compress: Run `lzkn64 -c` on every uncompressed file, mirroring the directory layout into the
//!   temporary directory.
//! - Compare: Check every freshly compressed file byte for byte against the compressed directory.
//! - Report: Remove the temporary directory and print the verdict.
//!
//! Only files the compressor produced are compared, so a reference file with no uncompressed
//! counterpart is never noticed. The compressor's exit status is ignored unless strict mode is on;
//! a compressor that crashes is caught through its output, which is either missing or differs
//! from the reference. Both count as nonmatching files.
//!

pub mod compare;
pub mod compress;
pub mod report;
pub mod workspace;

use std::{io, path::PathBuf};

use log::info;

use crate::tools::cli::VerifyOpts;
use compare::{compare_tree, Verdict};
use compress::compress_tree;
use workspace::Workspace;

/// Everything the report needs once the temporary directory is gone.
#[derive(Debug, Clone, Default)]
pub struct Outcome {
    pub verdict: Verdict,
    /// Sources whose compressor call exited nonzero
    pub failed_invocations: Vec<PathBuf>,
    /// Whether `failed_invocations` count against the run
    pub strict: bool,
}

impl Outcome {
    pub fn passed(&self) -> bool {
        self.verdict.passed() && !(self.strict && !self.failed_invocations.is_empty())
    }

    /// Process exit status: 0 on success, 1 on any failure.
    pub fn exit_code(&self) -> u8 {
        if self.passed() {
            0
        } else {
            1
        }
    }
}

/// Compress, compare and clean up. The temporary directory is removed before this returns,
/// also when an error cuts the run short.
pub fn run(opts: &VerifyOpts) -> io::Result<Outcome> {
    let workspace = Workspace::prepare(&opts.temp_dir)?;

    let invocations = compress_tree(&opts.lzkn64, &opts.uncompressed_dir, workspace.root())?;
    let mut verdict = compare_tree(workspace.root(), &opts.compressed_dir)?;
    for missing in invocations.iter().filter(|i| !i.produced) {
        verdict = verdict.missing_output(&missing.relative);
    }

    workspace.finish()?;

    let failed_invocations = invocations
        .into_iter()
        .filter(|i| !i.succeeded())
        .map(|i| i.relative)
        .collect();
    let outcome = Outcome {
        verdict,
        failed_invocations,
        strict: opts.strict,
    };
    info!(
        "Compared {} files, {} nonmatching",
        outcome.verdict.compared,
        outcome.verdict.mismatches.len()
    );
    Ok(outcome)
}


#[cfg(all(test, unix))]
mod test {
    use super::{
        compare::MismatchKind,
        run,
        test_support::{serial, stub_compressor},
    };
    use crate::tools::cli::VerifyOpts;
    use std::{fs, path::Path};

    const X_COMPRESSED: [u8; 3] = [0x81, 0x00, 0x00];

    /// Uncompressed tree with `x.bin` (four zero bytes), its reference, and a stub that
    /// "compresses" by emitting the reference bytes.
    fn fixture(root: &Path) -> VerifyOpts {
        let uncompressed = root.join("uncompressed");
        let compressed = root.join("compressed");
        fs::create_dir(&uncompressed).unwrap();
        fs::create_dir(&compressed).unwrap();
        fs::write(uncompressed.join("x.bin"), [0; 4]).unwrap();
        fs::write(compressed.join("x.bin"), X_COMPRESSED).unwrap();
        fs::write(root.join("x.lzkn"), X_COMPRESSED).unwrap();
        let exe = stub_compressor(
            root,
            &format!("cat '{}' > \"$3\"", root.join("x.lzkn").display()),
        );
        VerifyOpts {
            uncompressed_dir: uncompressed,
            compressed_dir: compressed,
            temp_dir: root.join("recompressed"),
            lzkn64: exe,
            ..VerifyOpts::default()
        }
    }

    #[test]
    fn matching_output_passes() {
        let _serial = serial();
        let dir = tempfile::tempdir().unwrap();
        let opts = fixture(dir.path());

        let outcome = run(&opts).unwrap();
        assert!(outcome.passed());
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(outcome.verdict.compared, 1);
        assert!(!opts.temp_dir.exists());
    }

    #[test]
    fn trailing_byte_fails() {
        let _serial = serial();
        let dir = tempfile::tempdir().unwrap();
        let mut opts = fixture(dir.path());
        opts.lzkn64 = stub_compressor(
            dir.path(),
            &format!(
                "cat '{}' > \"$3\"; printf 'x' >> \"$3\"",
                dir.path().join("x.lzkn").display()
            ),
        );

        let outcome = run(&opts).unwrap();
        assert!(!outcome.passed());
        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(outcome.verdict.mismatch_names().collect::<Vec<_>>(), vec!["x.bin"]);
        assert!(!opts.temp_dir.exists());
    }

    #[test]
    fn missing_reference_fails() {
        let _serial = serial();
        let dir = tempfile::tempdir().unwrap();
        let opts = fixture(dir.path());
        fs::write(opts.uncompressed_dir.join("y.bin"), [0; 4]).unwrap();

        let outcome = run(&opts).unwrap();
        assert_eq!(outcome.verdict.mismatch_names().collect::<Vec<_>>(), vec!["y.bin"]);
        assert_eq!(outcome.exit_code(), 1);
    }

    #[test]
    fn silent_compressor_fails() {
        let _serial = serial();
        let dir = tempfile::tempdir().unwrap();
        let mut opts = fixture(dir.path());
        opts.lzkn64 = stub_compressor(dir.path(), "exit 1");

        // Nothing was written, so nothing was compared, but the missing output still counts
        let outcome = run(&opts).unwrap();
        assert_eq!(outcome.verdict.compared, 0);
        assert!(!outcome.passed());
        assert_eq!(outcome.verdict.mismatch_names().collect::<Vec<_>>(), vec!["x.bin"]);
        assert_eq!(outcome.verdict.mismatches[0].kind, MismatchKind::MissingOutput);
        assert!(!opts.temp_dir.exists());

        opts.strict = true;
        let outcome = run(&opts).unwrap();
        assert_eq!(outcome.failed_invocations, vec![Path::new("x.bin").to_path_buf()]);
    }

    #[test]
    fn strict_catches_nonzero_exit_with_good_output() {
        let _serial = serial();
        let dir = tempfile::tempdir().unwrap();
        let mut opts = fixture(dir.path());
        opts.lzkn64 = stub_compressor(
            dir.path(),
            &format!("cat '{}' > \"$3\"; exit 2", dir.path().join("x.lzkn").display()),
        );

        assert!(run(&opts).unwrap().passed());
        opts.strict = true;
        let outcome = run(&opts).unwrap();
        assert!(outcome.verdict.passed());
        assert!(!outcome.passed());
    }

    #[test]
    fn nested_paths_are_mirrored() {
        let _serial = serial();
        let dir = tempfile::tempdir().unwrap();
        let mut opts = fixture(dir.path());
        fs::create_dir_all(opts.uncompressed_dir.join("a/b")).unwrap();
        fs::create_dir_all(opts.compressed_dir.join("a/b")).unwrap();
        fs::write(opts.uncompressed_dir.join("a/b/c.bin"), [7; 16]).unwrap();
        fs::write(opts.compressed_dir.join("a/b/c.bin"), [7; 16]).unwrap();
        // Reference-only files are never looked at
        fs::write(opts.compressed_dir.join("a/orphan.bin"), [1]).unwrap();
        // Identity compressor, so the references are the inputs themselves
        fs::write(opts.compressed_dir.join("x.bin"), [0; 4]).unwrap();
        opts.lzkn64 = stub_compressor(dir.path(), "cp \"$2\" \"$3\"");

        let outcome = run(&opts).unwrap();
        assert!(outcome.passed());
        assert_eq!(outcome.verdict.compared, 2);
    }

    #[test]
    fn repeat_runs_agree_and_clean_up() {
        let _serial = serial();
        let dir = tempfile::tempdir().unwrap();
        let opts = fixture(dir.path());
        fs::create_dir(&opts.temp_dir).unwrap();
        fs::write(opts.temp_dir.join("stale.bin"), [1, 2, 3]).unwrap();

        let first = run(&opts).unwrap();
        assert!(!opts.temp_dir.exists());
        let second = run(&opts).unwrap();
        assert!(!opts.temp_dir.exists());
        assert_eq!(first.verdict, second.verdict);
        assert!(first.passed());
    }

    #[test]
    fn spawn_failure_still_cleans_up() {
        let _serial = serial();
        let dir = tempfile::tempdir().unwrap();
        let mut opts = fixture(dir.path());
        opts.lzkn64 = dir.path().join("missing-lzkn64");

        assert!(run(&opts).is_err());
        assert!(!opts.temp_dir.exists());
    }

    #[test]
    fn missing_uncompressed_dir_is_fatal() {
        let _serial = serial();
        let dir = tempfile::tempdir().unwrap();
        let mut opts = fixture(dir.path());
        opts.uncompressed_dir = dir.path().join("nowhere");

        assert!(run(&opts).is_err());
        assert!(!opts.temp_dir.exists());
    }
}
