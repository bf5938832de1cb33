pub mod fill;
pub mod nc;
pub mod omni;
pub mod types;
pub mod utils;

pub use fill::FillValue;
pub use nc::NcReader;
pub use omni::OmniReader;
pub use types::{FileError, FileType, IndexReader, ReadError, SpectralReader};
pub use utils::{reader_from_filetype, source_path};

use std::path::PathBuf;

pub fn create_spectral_reader(
    file_name: PathBuf,
    fill: FillValue,
) -> Result<Box<dyn SpectralReader>, FileError> {
    match reader_from_filetype(&file_name)? {
        FileType::NetCdf => Ok(Box::new(NcReader::new(file_name).with_fill(fill))),
        found => Err(FileError::UnexpectedFileType {
            path: file_name,
            expected: FileType::NetCdf,
            found,
        }),
    }
}

pub fn create_index_reader(
    file_name: PathBuf,
    f107_fill: FillValue,
) -> Result<Box<dyn IndexReader>, FileError> {
    match reader_from_filetype(&file_name)? {
        FileType::OmniText => Ok(Box::new(OmniReader::new(file_name).with_f107_fill(f107_fill))),
        found => Err(FileError::UnexpectedFileType {
            path: file_name,
            expected: FileType::OmniText,
            found,
        }),
    }
}
