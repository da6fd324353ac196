//! Copy and move primitives used by tag-driven bulk file operations

use log::{debug, info};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::error::ScanError;
use super::traits::FileMover;

/// File mover over the local filesystem
///
/// Each source lands at `destination/<file name>`. An existing entry at that
/// path is never replaced, for copies and moves alike; it fails the source
/// with `AlreadyExists`. Processing stops at the first failure; entries
/// already handled stay where they were put.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsMover;

impl FileMover for FsMover {
    fn copy_files(&self, sources: &[PathBuf], destination: &Path) -> Result<Vec<PathBuf>, ScanError> {
        let done = transfer(sources, destination, copy_entry)?;
        info!("copied {} file(s) to {}", done.len(), destination.display());
        Ok(done)
    }

    fn move_files(&self, sources: &[PathBuf], destination: &Path) -> Result<Vec<PathBuf>, ScanError> {
        let done = transfer(sources, destination, move_entry)?;
        info!("moved {} file(s) to {}", done.len(), destination.display());
        Ok(done)
    }
}

fn transfer(
    sources: &[PathBuf],
    destination: &Path,
    op: fn(&Path, &Path) -> io::Result<()>,
) -> Result<Vec<PathBuf>, ScanError> {
    if !destination.is_dir() {
        return Err(ScanError::NotADirectory {
            path: destination.to_path_buf(),
        });
    }

    let mut done = Vec::with_capacity(sources.len());
    for source in sources {
        let result = match source.file_name() {
            Some(name) => {
                let target = destination.join(name);
                // Never overwrite: two tagged files may share a name
                if fs::symlink_metadata(&target).is_ok() {
                    Err(io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        format!("destination path {} already exists", target.display()),
                    ))
                } else {
                    op(source, &target).map(|()| target)
                }
            }
            None => Err(io::Error::new(io::ErrorKind::InvalidInput, "path has no file name")),
        };
        match result {
            Ok(target) => {
                debug!("{} -> {}", source.display(), target.display());
                done.push(target);
            }
            Err(source_err) if done.is_empty() => return Err(ScanError::io(source, source_err)),
            Err(source_err) => {
                return Err(ScanError::PartialBatch {
                    completed: done.len(),
                    path: source.clone(),
                    source: source_err,
                });
            }
        }
    }
    Ok(done)
}

fn copy_entry(from: &Path, to: &Path) -> io::Result<()> {
    if from.is_dir() {
        copy_dir(from, to)
    } else {
        fs::copy(from, to).map(|_| ())
    }
}

fn copy_dir(from: &Path, to: &Path) -> io::Result<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        copy_entry(&entry.path(), &to.join(entry.file_name()))?;
    }
    Ok(())
}

fn move_entry(from: &Path, to: &Path) -> io::Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    // rename fails across filesystems; fall back to copy then delete
    copy_entry(from, to)?;
    if from.is_dir() {
        fs::remove_dir_all(from)
    } else {
        fs::remove_file(from)
    }
}
