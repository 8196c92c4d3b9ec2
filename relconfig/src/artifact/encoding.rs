//! Structured encoders and the artifact writer.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::artifact::{ArtifactFormat, ReleaseConfigsArtifact};
use crate::error::{Error, Result};

/// Serializes a [`ReleaseConfigsArtifact`] into one output file.
pub trait ArtifactEncoder {
    /// Encodes the artifact.
    ///
    /// # Errors
    ///
    /// Returns an `Encoding` error if serialization fails.
    fn encode(&self, artifact: &ReleaseConfigsArtifact) -> Result<Vec<u8>>;

    /// Name of the file the encoding is written to.
    fn file_name(&self) -> &'static str;
}

/// YAML encoding.
pub struct YamlEncoder;

impl ArtifactEncoder for YamlEncoder {
    fn encode(&self, artifact: &ReleaseConfigsArtifact) -> Result<Vec<u8>> {
        Ok(serde_yaml::to_string(artifact)?.into_bytes())
    }

    fn file_name(&self) -> &'static str {
        "all_release_configs.yaml"
    }
}

/// Compact binary encoding (postcard).
pub struct PostcardEncoder;

impl ArtifactEncoder for PostcardEncoder {
    fn encode(&self, artifact: &ReleaseConfigsArtifact) -> Result<Vec<u8>> {
        Ok(postcard::to_stdvec(artifact)?)
    }

    fn file_name(&self) -> &'static str {
        "all_release_configs.pb"
    }
}

/// Pretty-printed JSON encoding.
pub struct JsonEncoder;

impl ArtifactEncoder for JsonEncoder {
    fn encode(&self, artifact: &ReleaseConfigsArtifact) -> Result<Vec<u8>> {
        let mut bytes = serde_json::to_vec_pretty(artifact)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    fn file_name(&self) -> &'static str {
        "all_release_configs.json"
    }
}

/// Decodes an artifact written in a structured format.
///
/// # Errors
///
/// Returns an `Encoding` error if the bytes do not decode, or if `format`
/// is the build-variable listing, which cannot be decoded.
pub fn decode(format: ArtifactFormat, bytes: &[u8]) -> Result<ReleaseConfigsArtifact> {
    match format {
        ArtifactFormat::Yaml => Ok(serde_yaml::from_slice(bytes)?),
        ArtifactFormat::Pb => Ok(postcard::from_bytes(bytes)?),
        ArtifactFormat::Json => Ok(serde_json::from_slice(bytes)?),
        ArtifactFormat::Make => Err(Error::Encoding {
            format: format.to_string(),
            message: "build-variable listings cannot be decoded".to_string(),
        }),
    }
}

/// Writes artifacts into an output directory.
///
/// Output is all-or-nothing. Every format is encoded in memory and staged in
/// a temporary file inside the output directory before any artifact name is
/// taken. If moving a staged file into place fails, the artifacts already
/// moved are removed again.
pub struct ArtifactWriter {
    out_dir: PathBuf,
    formats: Vec<ArtifactFormat>,
}

impl ArtifactWriter {
    /// Creates a writer for `formats` into `out_dir`.
    pub fn new(out_dir: impl Into<PathBuf>, formats: &[ArtifactFormat]) -> Self {
        Self {
            out_dir: out_dir.into(),
            formats: formats.to_vec(),
        }
    }

    /// The output directory.
    #[must_use]
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Encodes and writes every format, returning the written paths.
    ///
    /// # Errors
    ///
    /// Returns an `Encoding` error before anything is written, or an I/O
    /// error if writing fails. In both cases no artifact is left behind.
    pub fn write(&self, artifact: &ReleaseConfigsArtifact) -> Result<Vec<PathBuf>> {
        let encoded = self
            .formats
            .iter()
            .map(|format| {
                let encoder = format.create_encoder();
                Ok((self.out_dir.join(encoder.file_name()), encoder.encode(artifact)?))
            })
            .collect::<Result<Vec<_>>>()?;

        fs::create_dir_all(&self.out_dir)?;

        // Dropping a staged file deletes it, so an early return cleans up.
        let mut staged = Vec::with_capacity(encoded.len());
        for (path, bytes) in encoded {
            let mut file = NamedTempFile::new_in(&self.out_dir)?;
            file.write_all(&bytes)?;
            file.as_file().sync_all()?;
            staged.push((path, file));
        }

        let mut written = Vec::with_capacity(staged.len());
        for (path, file) in staged {
            if let Err(e) = file.persist(&path) {
                rollback(&written);
                return Err(e.error.into());
            }
            written.push(path);
        }

        for path in &written {
            log::info!("Wrote {}", path.display());
        }
        Ok(written)
    }
}

fn rollback(written: &[PathBuf]) {
    for path in written {
        if let Err(e) = fs::remove_file(path) {
            log::warn!("Failed to remove {}: {e}", path.display());
        }
    }
}
