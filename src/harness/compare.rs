use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::{Path, PathBuf},
};

use log::{debug, info};

use crate::tools::walk::{relative_to, walk_files};

const CHUNK_SIZE: usize = 8 * 1024;

/// Why a produced file failed to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MismatchKind {
    /// Both files were read and the bytes differ
    Differs,
    /// One side could not be opened or read, usually a missing reference
    Unreadable(String),
    /// The compressor left no output file behind
    MissingOutput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Bare filename, as shown in the report
    pub name: String,
    pub relative: PathBuf,
    pub kind: MismatchKind,
}

/// Result of the comparison pass. The run passed when no mismatch was recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verdict {
    pub compared: usize,
    pub mismatches: Vec<Mismatch>,
}

impl Verdict {
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Names of nonmatching files in the order they were found.
    pub fn mismatch_names(&self) -> impl Iterator<Item = &str> {
        self.mismatches.iter().map(|m| m.name.as_str())
    }

    /// Count a source the compressor produced nothing for.
    pub fn missing_output(self, relative: &Path) -> Self {
        self.record(relative, MismatchKind::MissingOutput)
    }

    fn record(mut self, relative: &Path, kind: MismatchKind) -> Self {
        let name = relative
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!("{} does not match: {:?}", relative.display(), kind);
        self.mismatches.push(Mismatch {
            name,
            relative: relative.to_path_buf(),
            kind,
        });
        self
    }
}

/// Compare every file under `produced_root` with the file at the same
/// relative path under `reference_root`.
///
/// Reference files that were never produced are not looked at.
pub fn compare_tree(produced_root: &Path, reference_root: &Path) -> io::Result<Verdict> {
    let produced = walk_files(produced_root)?;
    info!(
        "Comparing {} files against {}",
        produced.len(),
        reference_root.display()
    );

    produced.iter().try_fold(Verdict::default(), |verdict, candidate| -> io::Result<Verdict> {
        let relative = relative_to(candidate, produced_root)?;
        let reference = reference_root.join(relative);
        let verdict = Verdict {
            compared: verdict.compared + 1,
            ..verdict
        };
        Ok(match files_match(candidate, &reference) {
            Ok(true) => verdict,
            Ok(false) => verdict.record(relative, MismatchKind::Differs),
            Err(e) => verdict.record(relative, MismatchKind::Unreadable(e.to_string())),
        })
    })
}

/// Byte-exact comparison of two files. Metadata other than length is ignored.
pub fn files_match(a: &Path, b: &Path) -> io::Result<bool> {
    let fa = File::open(a)?;
    let fb = File::open(b)?;
    if fa.metadata()?.len() != fb.metadata()?.len() {
        return Ok(false);
    }

    let mut ra = BufReader::new(fa);
    let mut rb = BufReader::new(fb);
    let mut buf_a = vec![0_u8; CHUNK_SIZE];
    let mut buf_b = vec![0_u8; CHUNK_SIZE];
    loop {
        let got = read_chunk(&mut ra, &mut buf_a)?;
        if got != read_chunk(&mut rb, &mut buf_b)? || buf_a[..got] != buf_b[..got] {
            return Ok(false);
        }
        if got == 0 {
            return Ok(true);
        }
    }
}

/// Fill `buf` as far as the reader allows. Short only at end of data.
fn read_chunk<R: Read>(source: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
