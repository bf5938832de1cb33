use super::types::{FileError, FileType, ReadError};
use std::path::{Path, PathBuf};

pub fn reader_from_filetype(path: &Path) -> Result<FileType, FileError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("ncdf" | "nc" | "cdf") => Ok(FileType::NetCdf),
        Some("txt" | "dat") => Ok(FileType::OmniText),
        _ => Err(FileError::UnknownFileType(path.to_path_buf())),
    }
}

/// Joins `file_dir` and `file_name`, failing when either does not exist.
pub fn source_path(file_dir: &Path, file_name: &str) -> Result<PathBuf, ReadError> {
    if !file_dir.is_dir() {
        return Err(ReadError::MissingDirectory(file_dir.to_path_buf()));
    }

    let path = file_dir.join(file_name);
    if !path.is_file() {
        return Err(ReadError::MissingFile(path));
    }

    Ok(path)
}
