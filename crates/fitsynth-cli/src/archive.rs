use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::info;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::ExportError;

/// Bundle `files` into a deflate-compressed zip at `archive_path`.
///
/// Entries are stored under their bare file names, in the order given.
pub fn write_archive(archive_path: &Path, files: &[PathBuf]) -> Result<(), ExportError> {
    if let Some(parent) = archive_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent).map_err(ExportError::io(parent))?;
    }

    let file = File::create(archive_path).map_err(ExportError::io(archive_path))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        zip.start_file(name, options)
            .map_err(ExportError::zip(archive_path))?;
        let mut src = File::open(path).map_err(ExportError::io(path))?;
        std::io::copy(&mut src, &mut zip).map_err(ExportError::io(path))?;
    }

    zip.finish().map_err(ExportError::zip(archive_path))?;
    info!(
        archive = %archive_path.display(),
        files = files.len(),
        "archive written"
    );
    Ok(())
}
