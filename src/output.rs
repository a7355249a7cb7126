use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{RenderError, Result};

/// Write a file through a temporary sibling and rename it into place.
///
/// The destination is either fully written or left untouched; the
/// temporary is removed if anything fails before the rename. A replaced
/// file keeps its permissions, a new one gets the mode a plain create
/// would give it (0666 minus the umask on Unix).
pub fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> std::io::Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".checkerboard-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // umask is applied on open
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir).map_err(|e| RenderError::io(path, e))?;

    if let Ok(existing) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| RenderError::io(path, e))?;
    }

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        write(&mut writer).map_err(|e| RenderError::io(path, e))?;
        writer.flush().map_err(|e| RenderError::io(path, e))?;
    }

    tmp.persist(path).map_err(|e| RenderError::io(path, e.error))?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}

pub fn write_bytes_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    write_atomic(path, |w| w.write_all(bytes))
}
