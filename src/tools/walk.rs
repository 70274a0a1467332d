use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::trace;

/// List every non-directory entry below `top`, recursively.
///
/// Entries come back in the order the filesystem returns them. Within one
/// directory the files are listed before any subdirectory is entered. Symbolic
/// links to directories are not followed.
pub fn walk_files(top: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    walk_into(top, &mut files)?;
    Ok(files)
}

fn walk_into(dir: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
    let mut subdirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            subdirs.push(entry.path());
        } else if file_type.is_symlink() && entry.path().is_dir() {
            trace!("Not following directory link {}", entry.path().display());
        } else {
            files.push(entry.path());
        }
    }
    for subdir in subdirs {
        walk_into(&subdir, files)?;
    }
    Ok(())
}

/// The part of `path` below `root`, for joining onto another root.
pub fn relative_to<'a>(path: &'a Path, root: &Path) -> io::Result<&'a Path> {
    path.strip_prefix(root).map_err(|_| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("{} is not under {}", path.display(), root.display()),
        )
    })
}
