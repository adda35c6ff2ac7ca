use crate::vacancy::{Vacancy, VacancyRecord, SALARY_NOT_SPECIFIED};
use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_FILE_NAME: &str = "vacancies.json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store io error at {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("store file {} is not a valid vacancy list: {source}", path.display())]
    Json { path: PathBuf, source: serde_json::Error },
}

/// Filters for [`VacancyStorage::get_vacancies`]. Absent fields apply no filtering.
#[derive(Debug, Clone, Default)]
pub struct Criteria {
    /// Presence alone drops records without a salary; the value is never compared.
    pub salary_min: Option<i64>,
    /// Every keyword must occur in the description (case-insensitive).
    pub keywords: Option<Vec<String>>,
}

/// Storage capability for normalized vacancies.
pub trait VacancyStorage {
    /// Insert unless a record with the same url exists. The first write for a url wins.
    fn add_vacancy(&self, vacancy: &Vacancy) -> Result<(), StoreError>;
    fn get_vacancies(&self, criteria: &Criteria) -> Result<Vec<VacancyRecord>, StoreError>;
    /// Remove every record with the vacancy's url. Missing urls are a no-op.
    fn delete_vacancy(&self, vacancy: &Vacancy) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub file_name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from(DEFAULT_DATA_DIR), file_name: DEFAULT_FILE_NAME.to_string() }
    }
}

impl StoreConfig {
    pub fn path(&self) -> PathBuf { self.data_dir.join(&self.file_name) }
}

/// File-backed store holding one JSON array of [`VacancyRecord`].
///
/// Each mutation rewrites the whole file through a temp file in the same
/// directory followed by a rename, so a failed write leaves the old contents.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| StoreError::Io { path: dir.to_path_buf(), source })?;
        }
        let store = Self { path };
        if !store.path.exists() {
            store.write_records(&[])?;
            tracing::info!(path = %store.path.display(), "initialized empty vacancy store");
        }
        Ok(store)
    }

    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        Self::open(config.path())
    }

    pub fn path(&self) -> &Path { &self.path }

    /// Add a batch with a single read and write. Returns how many urls were new.
    pub fn add_all(&self, vacancies: &[Vacancy]) -> Result<usize, StoreError> {
        let mut records = self.read_records()?;
        let before = records.len();
        for vacancy in vacancies {
            if records.iter().any(|r| r.url == vacancy.url()) {
                tracing::debug!(url = vacancy.url(), "skipping stored vacancy");
                continue;
            }
            records.push(vacancy.to_record());
        }
        let added = records.len() - before;
        if added > 0 {
            self.write_records(&records)?;
        }
        Ok(added)
    }

    fn read_records(&self) -> Result<Vec<VacancyRecord>, StoreError> {
        let f = File::open(&self.path).map_err(|source| self.io_err(source))?;
        serde_json::from_reader(BufReader::new(f)).map_err(|source| StoreError::Json { path: self.path.clone(), source })
    }

    fn write_records(&self, records: &[VacancyRecord]) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(d) if !d.as_os_str().is_empty() => d.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut tmp = temp_file_in(&dir).map_err(|source| self.io_err(source))?;
        // keep the mode of the file being replaced
        if let Ok(meta) = fs::metadata(&self.path) {
            tmp.as_file().set_permissions(meta.permissions()).map_err(|source| self.io_err(source))?;
        }
        let json = serde_json::to_string_pretty(records)
            .map_err(|source| StoreError::Json { path: self.path.clone(), source })?;
        tmp.write_all(json.as_bytes()).map_err(|source| self.io_err(source))?;
        tmp.as_file().sync_all().map_err(|source| self.io_err(source))?;
        tmp.persist(&self.path).map_err(|e| self.io_err(e.error))?;
        Ok(())
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }
}

/// Temp file created with the usual umask-derived mode rather than owner-only.
fn temp_file_in(dir: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    builder.prefix(".vacancies").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

impl VacancyStorage for JsonStore {
    fn add_vacancy(&self, vacancy: &Vacancy) -> Result<(), StoreError> {
        let mut records = self.read_records()?;
        if records.iter().any(|r| r.url == vacancy.url()) {
            tracing::debug!(url = vacancy.url(), "vacancy already stored");
            return Ok(());
        }
        records.push(vacancy.to_record());
        self.write_records(&records)
    }

    fn get_vacancies(&self, criteria: &Criteria) -> Result<Vec<VacancyRecord>, StoreError> {
        let mut records = self.read_records()?;
        if criteria.salary_min.is_some() {
            records.retain(|r| r.salary != SALARY_NOT_SPECIFIED);
        }
        if let Some(keywords) = &criteria.keywords {
            let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
            records.retain(|r| {
                let description = r.description.to_lowercase();
                keywords.iter().all(|k| description.contains(k.as_str()))
            });
        }
        Ok(records)
    }

    fn delete_vacancy(&self, vacancy: &Vacancy) -> Result<(), StoreError> {
        let mut records = self.read_records()?;
        let before = records.len();
        records.retain(|r| r.url != vacancy.url());
        tracing::debug!(url = vacancy.url(), removed = before - records.len(), "deleted vacancy");
        self.write_records(&records)
    }
}
