//! Wavefront OBJ export of balloon meshes

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::physics::{Balloon, BalloonError, Vertex};

/// Errors that can occur during export
#[derive(Debug)]
pub enum ExportError {
    /// The balloon has no mesh to export
    Balloon(BalloonError),
    /// Failed to write to a caller-supplied writer
    Write(io::Error),
    /// Failed to write the output file
    Io {
        path: std::path::PathBuf,
        error: io::Error,
    },
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Balloon(error) => write!(f, "Cannot export balloon: {}", error),
            ExportError::Write(error) => write!(f, "Failed to write OBJ data: {}", error),
            ExportError::Io { path, error } => {
                write!(f, "Failed to write '{}': {}", path.display(), error)
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Balloon(error) => Some(error),
            ExportError::Write(error) => Some(error),
            ExportError::Io { error, .. } => Some(error),
        }
    }
}

impl From<BalloonError> for ExportError {
    fn from(error: BalloonError) -> Self {
        ExportError::Balloon(error)
    }
}

/// Write `balloon` as OBJ text.
///
/// One `v`/`vn` pair per flat point, one face per triangle referencing its
/// own three points, so per-face normals survive the export.
pub fn write_obj<W: Write>(balloon: &Balloon, name: &str, dest: &mut W) -> Result<(), ExportError> {
    let points = balloon.points()?;
    write_points(points, name, dest).map_err(ExportError::Write)
}

fn write_points<W: Write>(points: &[Vertex], name: &str, dest: &mut W) -> io::Result<()> {
    writeln!(dest, "o {}", name)?;
    for p in points {
        writeln!(dest, "v {} {} {}", p.position.x, p.position.y, p.position.z)?;
    }
    for p in points {
        writeln!(dest, "vn {} {} {}", p.normal.x, p.normal.y, p.normal.z)?;
    }
    for i in 0..points.len() / 3 {
        let (a, b, c) = (3 * i + 1, 3 * i + 2, 3 * i + 3);
        writeln!(dest, "f {a}//{a} {b}//{b} {c}//{c}")?;
    }
    Ok(())
}

/// Export `balloon` to an OBJ file at `path`.
pub fn export_obj<P: AsRef<Path>>(balloon: &Balloon, path: P) -> Result<(), ExportError> {
    let path = path.as_ref();
    let points = balloon.points()?;
    let io_error = |error: io::Error| ExportError::Io {
        path: path.to_path_buf(),
        error,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("balloon");
    write_points(points, name, &mut writer).map_err(io_error)?;
    writer.flush().map_err(io_error)?;

    log::info!("Exported {} triangles to {}", points.len() / 3, path.display());
    Ok(())
}
