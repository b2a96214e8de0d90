//! Dataset fetching
//!
//! Fetch-if-absent, else reuse the cached file: an extracted file is used
//! as is, a cached archive is extracted, and only when neither exists is the
//! archive downloaded.

use super::catalog::{DatasetCatalog, DatasetEntry};
use super::{DatasetError, DatasetResult};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Downloads and extracts catalog datasets into a local directory
#[derive(Debug, Clone)]
pub struct DatasetFetcher {
    catalog: DatasetCatalog,
    client: reqwest::Client,
}

impl DatasetFetcher {
    pub fn new(catalog: DatasetCatalog) -> Self {
        Self {
            catalog,
            client: reqwest::Client::new(),
        }
    }

    /// Use a preconfigured HTTP client (proxy, timeouts, TLS)
    pub fn with_client(catalog: DatasetCatalog, client: reqwest::Client) -> Self {
        Self { catalog, client }
    }

    pub fn catalog(&self) -> &DatasetCatalog {
        &self.catalog
    }

    fn entry(&self, name: &str) -> DatasetResult<&DatasetEntry> {
        self.catalog
            .get(name)
            .ok_or_else(|| DatasetError::UnknownDataset(name.to_string()))
    }

    /// Local path of the extracted file, whether or not it exists yet
    pub fn local_path(&self, name: &str, dest: impl AsRef<Path>) -> DatasetResult<PathBuf> {
        Ok(dest.as_ref().join(&self.entry(name)?.file))
    }

    /// Make the named dataset available under `dest` and return the path of the `.gr` file.
    pub async fn prepare(&self, name: &str, dest: impl AsRef<Path>) -> DatasetResult<PathBuf> {
        let entry = self.entry(name)?;
        let dest = dest.as_ref();
        fs::create_dir_all(dest)?;

        let file_path = dest.join(&entry.file);
        if file_path.is_file() {
            info!("Dataset {} is ready at {:?}", name, file_path);
            return Ok(file_path);
        }

        let archive_path = dest.join(&entry.archive);
        if archive_path.is_file() {
            debug!("Reusing cached archive {:?}", archive_path);
        } else {
            self.download(&entry.url, &archive_path).await?;
        }

        // Decompression is synchronous and can run for minutes on the large graphs
        let target = file_path.clone();
        tokio::task::spawn_blocking(move || extract_archive(&archive_path, &target)).await??;
        info!("Dataset {} is ready at {:?}", name, file_path);
        Ok(file_path)
    }

    /// Stream `url` into `path` chunk by chunk, through a `.part` file.
    async fn download(&self, url: &str, path: &Path) -> DatasetResult<()> {
        info!("Downloading {}", url);

        let partial = partial_path(path);
        let written = match self.stream_to(url, &partial).await {
            Ok(n) => n,
            Err(e) => {
                let _ = tokio::fs::remove_file(&partial).await;
                return Err(e);
            }
        };
        tokio::fs::rename(&partial, path).await?;

        debug!("Downloaded {} bytes to {:?}", written, path);
        Ok(())
    }

    async fn stream_to(&self, url: &str, partial: &Path) -> DatasetResult<u64> {
        let mut response = self.client.get(url).send().await?.error_for_status()?;
        let mut out = tokio::io::BufWriter::new(tokio::fs::File::create(partial).await?);

        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await? {
            out.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        out.flush().await?;
        Ok(written)
    }
}

/// Gunzip `archive` into `target`, writing through a temporary file.
pub fn extract_archive(archive: &Path, target: &Path) -> DatasetResult<u64> {
    info!("Extracting {:?}", archive);

    let partial = partial_path(target);
    let mut decoder = GzDecoder::new(BufReader::new(File::open(archive)?));
    let mut out = BufWriter::new(File::create(&partial)?);

    let written = match io::copy(&mut decoder, &mut out).and_then(|n| out.flush().map(|_| n)) {
        Ok(n) => n,
        Err(e) => {
            drop(out);
            let _ = fs::remove_file(&partial);
            return Err(DatasetError::Io(e));
        }
    };
    drop(out);

    fs::rename(&partial, target)?;
    debug!("Extracted {} bytes to {:?}", written, target);
    Ok(written)
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    path.with_file_name(name)
}
