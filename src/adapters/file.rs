use crate::domain::ports::IndexSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::fs;

/// Reads the index document from a local path.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: String,
}

impl FileSource {
    pub fn new(path: String) -> Self {
        Self { path }
    }
}

#[async_trait]
impl IndexSource for FileSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        tracing::debug!("Reading index file: {}", self.path);
        let data = fs::read(&self.path)?;
        Ok(data)
    }

    fn location(&self) -> &str {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_file_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"resources":[]}}"#).unwrap();

        let source = FileSource::new(file.path().to_str().unwrap().to_string());
        let data = tokio_test::block_on(source.fetch()).unwrap();
        assert_eq!(data, br#"{"resources":[]}"#);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let source = FileSource::new("./does-not-exist.json".to_string());
        assert!(tokio_test::block_on(source.fetch()).is_err());
    }
}
