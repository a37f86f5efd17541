//! The archiver collaborator: bundles generated files into a gzipped
//! tarball so they can be unpacked on machines where the generator cannot
//! run. Paths inside the archive are relative to the given base directory.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::Compression;
use flate2::write::GzEncoder;

/// Creates a `.tar.gz` at `tarball_path` containing `relative_paths`,
/// resolved against and stored relative to `base_dir`.
pub fn create_tarball(tarball_path: &Path, base_dir: &Path, relative_paths: &[&Path]) -> Result<()> {
    let file = File::create(tarball_path)
        .with_context(|| format!("failed to create {}", tarball_path.display()))?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for relative in relative_paths {
        builder
            .append_path_with_name(base_dir.join(relative), relative)
            .with_context(|| format!("failed to archive {}", relative.display()))?;
    }
    builder
        .into_inner()
        .and_then(GzEncoder::finish)
        .with_context(|| format!("failed to finish {}", tarball_path.display()))?;
    Ok(())
}
