use std::{io, path::Path};

use thiserror::Error;

/// Reads a compiled SPIR-V blob from disk.
pub fn load_spirv(path: &Path) -> Result<Vec<u8>, Error> {
    std::fs::read(path).map_err(|e| Error::Read(path.display().to_string(), e))
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read the shader at '{0}':\n{1}")]
    Read(String, #[source] io::Error),
}
