use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use parking_lot::Mutex;

use crate::error::{LoadErrorKind, Result, TldError};
use crate::store::{RuleStore, TopLevelDomains};

use super::format::ListFormat;
use super::{read_list, RuleLoader};

/// Default update interval: 7 days
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// RuleLoader that keeps local copies of the lists fresh by downloading them.
///
/// A local copy older than the update interval is refreshed on load. When
/// the refresh fails, the stale copy is used instead.
pub struct AutoRuleLoader {
    // Paths
    pub rules_path: Option<PathBuf>,
    pub tlds_path: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,

    // Download URLs
    pub rules_url: String,
    pub tlds_url: String,

    // Update interval
    pub update_interval: Duration,

    download_lock: Mutex<()>,
}

impl AutoRuleLoader {
    /// Create a new AutoRuleLoader using the default list URLs
    pub fn new() -> Self {
        Self {
            rules_path: None,
            tlds_path: None,
            data_dir: None,
            rules_url: ListFormat::PublicSuffix.default_url().to_string(),
            tlds_url: ListFormat::RootZone.default_url().to_string(),
            update_interval: DEFAULT_UPDATE_INTERVAL,
            download_lock: Mutex::new(()),
        }
    }

    /// Set data directory
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Set explicit public suffix list path (overrides data directory)
    pub fn with_rules_path(mut self, path: impl AsRef<Path>) -> Self {
        self.rules_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set explicit TLD list path (overrides data directory)
    pub fn with_tlds_path(mut self, path: impl AsRef<Path>) -> Self {
        self.tlds_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set custom public suffix list URL
    pub fn with_rules_url(mut self, url: impl Into<String>) -> Self {
        self.rules_url = url.into();
        self
    }

    /// Set custom TLD list URL
    pub fn with_tlds_url(mut self, url: impl Into<String>) -> Self {
        self.tlds_url = url.into();
        self
    }

    /// Set update interval for checking file freshness
    /// Default is 7 days (DEFAULT_UPDATE_INTERVAL)
    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = interval;
        self
    }

    /// Local path for a list format
    fn get_path(&self, format: ListFormat) -> PathBuf {
        let explicit = match format {
            ListFormat::PublicSuffix => &self.rules_path,
            ListFormat::RootZone => &self.tlds_path,
        };
        if let Some(path) = explicit {
            return path.clone();
        }

        let filename = format.default_filename();
        match self.data_dir {
            Some(ref dir) => dir.join(filename),
            None => PathBuf::from(filename),
        }
    }

    fn get_url(&self, format: ListFormat) -> &str {
        match format {
            ListFormat::PublicSuffix => &self.rules_url,
            ListFormat::RootZone => &self.tlds_url,
        }
    }

    /// Check if file needs download
    fn should_download(&self, path: &Path) -> bool {
        match fs::metadata(path) {
            Ok(meta) => {
                if meta.len() == 0 {
                    return true;
                }
                match meta.modified() {
                    Ok(mtime) => SystemTime::now()
                        .duration_since(mtime)
                        .map(|d| d > self.update_interval)
                        .unwrap_or(true),
                    Err(_) => true,
                }
            }
            Err(_) => true,
        }
    }

    /// Download file from URL
    fn download(&self, path: &Path, url: &str, format: ListFormat) -> Result<()> {
        let _lock = self.download_lock.lock();

        // Double-check after acquiring lock
        if !self.should_download(path) {
            return Ok(());
        }

        log::info!("downloading {} from {}", path.display(), url);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Download to temporary file
        let tmp_path = path.with_extension("tmp");

        let response = ureq::get(url).call().map_err(|e| {
            TldError::load(
                LoadErrorKind::DownloadFailed,
                format!("Download failed: {}", e),
            )
        })?;

        let write_tmp = || -> Result<()> {
            let mut file = fs::File::create(&tmp_path)?;
            let (_, body) = response.into_parts();
            let mut reader = body.into_reader();
            std::io::copy(&mut reader, &mut file)?;
            file.flush()?;
            drop(file);

            // Verify the downloaded file
            format.verify(&tmp_path).map_err(|e| {
                TldError::load(
                    LoadErrorKind::DownloadFailed,
                    format!("Verification failed: {}", e),
                )
            })?;

            // Move to final location
            fs::rename(&tmp_path, path)?;
            Ok(())
        };

        if let Err(e) = write_tmp() {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        log::info!("downloaded {} successfully", path.display());
        Ok(())
    }

    /// Ensure the list is available locally, refreshing it when stale
    fn ensure_downloaded(&self, format: ListFormat) -> Result<PathBuf> {
        let path = self.get_path(format);

        if !self.should_download(&path) {
            return Ok(path);
        }

        match self.download(&path, self.get_url(format), format) {
            Ok(()) => Ok(path),
            Err(e) if format.verify(&path).is_ok() => {
                log::warn!(
                    "refreshing {} failed, using stale copy: {}",
                    path.display(),
                    e
                );
                Ok(path)
            }
            Err(e) => Err(e),
        }
    }
}

impl Default for AutoRuleLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleLoader for AutoRuleLoader {
    fn load_rules(&self) -> Result<RuleStore> {
        let path = self.ensure_downloaded(ListFormat::PublicSuffix)?;
        RuleStore::from_text(&read_list(&path)?)
    }

    fn load_tlds(&self) -> Result<TopLevelDomains> {
        let path = self.ensure_downloaded(ListFormat::RootZone)?;
        TopLevelDomains::from_text(&read_list(&path)?)
    }
}
