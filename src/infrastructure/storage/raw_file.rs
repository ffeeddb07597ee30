//! Headerless f32 PCM file adapter
//!
//! Samples are stored back to back as 4-byte little-endian floats, in
//! recording order. Sample rate and channel count are not stored.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::application::ports::{SampleStore, StorageError};
use crate::domain::recording::config::OUTPUT_PATH;

const SAMPLE_BYTES: usize = std::mem::size_of::<f32>();

/// Writes recordings to a single raw file, truncating any previous content
pub struct RawFileStore {
    path: PathBuf,
}

impl RawFileStore {
    /// Store at the default output path in the working directory
    pub fn new() -> Self {
        Self::with_path(OUTPUT_PATH)
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for RawFileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SampleStore for RawFileStore {
    async fn save(&self, samples: &[f32]) -> Result<u64, StorageError> {
        let file = File::create(&self.path)
            .await
            .map_err(|source| StorageError::Open {
                path: self.location(),
                source,
            })?;

        let write_err = |source| StorageError::Write {
            path: self.location(),
            source,
        };

        let mut writer = BufWriter::new(file);
        for sample in samples {
            writer
                .write_all(&sample.to_le_bytes())
                .await
                .map_err(write_err)?;
        }
        writer.flush().await.map_err(write_err)?;
        writer.get_mut().sync_all().await.map_err(write_err)?;

        Ok((samples.len() * SAMPLE_BYTES) as u64)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Load a raw f32 file back into memory
pub async fn read_raw_samples(path: impl AsRef<Path>) -> Result<Vec<f32>, StorageError> {
    let path = path.as_ref();
    let bytes = fs::read(path).await.map_err(|source| StorageError::Read {
        path: path.display().to_string(),
        source,
    })?;

    decode_samples(&bytes).ok_or_else(|| StorageError::Misaligned {
        path: path.display().to_string(),
        len: bytes.len() as u64,
    })
}

/// Decode little-endian f32 samples; `None` if the length is not a multiple of 4
fn decode_samples(bytes: &[u8]) -> Option<Vec<f32>> {
    if bytes.len() % SAMPLE_BYTES != 0 {
        return None;
    }
    Some(
        bytes
            .chunks_exact(SAMPLE_BYTES)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path() {
        let store = RawFileStore::new();
        assert_eq!(store.path(), Path::new("recorded.raw"));
        assert_eq!(store.location(), "recorded.raw");
    }

    #[test]
    fn decode_little_endian() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1.5f32.to_le_bytes());
        bytes.extend_from_slice(&(-0.25f32).to_le_bytes());
        assert_eq!(decode_samples(&bytes), Some(vec![1.5, -0.25]));
    }

    #[test]
    fn decode_rejects_partial_sample() {
        assert_eq!(decode_samples(&[0, 0, 0]), None);
        assert_eq!(decode_samples(&[]), Some(vec![]));
    }

    #[tokio::test]
    async fn save_writes_four_bytes_per_sample() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.raw");
        let store = RawFileStore::with_path(&path);

        let written = store.save(&[0.0; 10]).await.unwrap();
        assert_eq!(written, 40);
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 40);
    }

    #[tokio::test]
    async fn save_preserves_order_and_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.raw");
        let store = RawFileStore::with_path(&path);
        let samples = [0.0, 0.0, 0.0, 3.0, 3.0, -3.0];

        store.save(&samples).await.unwrap();
        assert_eq!(read_raw_samples(&path).await.unwrap(), samples);
    }

    #[tokio::test]
    async fn save_truncates_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.raw");
        std::fs::write(&path, vec![0xAB; 100]).unwrap();

        RawFileStore::with_path(&path).save(&[1.0]).await.unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 4);
    }

    #[tokio::test]
    async fn save_into_missing_directory_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let store = RawFileStore::with_path(dir.path().join("missing").join("out.raw"));

        let err = store.save(&[1.0]).await.unwrap_err();
        assert!(matches!(err, StorageError::Open { .. }));
        assert!(err.to_string().starts_with("Unable to open file"));
    }

    #[tokio::test]
    async fn read_reports_misaligned_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("odd.raw");
        std::fs::write(&path, [1u8, 2, 3, 4, 5]).unwrap();

        let err = read_raw_samples(&path).await.unwrap_err();
        assert!(matches!(err, StorageError::Misaligned { len: 5, .. }));
    }

    #[tokio::test]
    async fn read_missing_file() {
        let err = read_raw_samples("/nonexistent/recorded.raw").await.unwrap_err();
        assert!(matches!(err, StorageError::Read { .. }));
    }
}
