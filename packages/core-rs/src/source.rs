use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::Path;

/// Identifies the exact input a report was produced from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    pub file_name: String,
    pub sha256: String,
    pub size_bytes: u64,
}

pub fn digest_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

impl SourceInfo {
    pub fn from_bytes(file_name: impl Into<String>, data: &[u8]) -> Self {
        Self {
            file_name: file_name.into(),
            sha256: digest_bytes(data),
            size_bytes: data.len() as u64,
        }
    }

    /// Reads the whole file, returning its contents with the fingerprint.
    pub fn read(path: &Path) -> io::Result<(Self, Vec<u8>)> {
        let data = fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Ok((Self::from_bytes(file_name, &data), data))
    }

    pub fn short_digest(&self) -> &str {
        &self.sha256[..self.sha256.len().min(12)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn digest_matches_known_sha256() {
        assert_eq!(
            digest_bytes(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn read_returns_contents_and_fingerprint() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"Site name,URL\n").unwrap();
        let (info, data) = SourceInfo::read(file.path()).unwrap();
        assert_eq!(data, b"Site name,URL\n");
        assert_eq!(info.size_bytes, 14);
        assert_eq!(info.sha256, digest_bytes(&data));
        assert_eq!(info.short_digest().len(), 12);
    }
}
