//! Upload session: the ordered list of data sources, which of them are active, and the
//! reduced snapshot that survives a restart of the process.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strata_model::{Assessment, DataSource, UniversalData};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::analyze::analyze_union;
use crate::correlate::{correlate, CorrelationIndex};
use crate::enterprise::{enterprise_metrics, EnterpriseMetrics, SizingDefaults};

/// File name the session snapshot is stored under inside the state directory.
pub const SESSION_STORAGE_KEY: &str = "strata-relay-session.json";

/// Length of a user-chosen source code.
pub const SOURCE_CODE_LEN: usize = 2;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("source code must not be empty")]
    InvalidCode,
    #[error("code \"{0}\" already exists, use a different code")]
    DuplicateCode(String),
    #[error("no data source with code \"{0}\"")]
    UnknownCode(String),
    #[error("data source \"{0}\" already has its workbook loaded")]
    AlreadyLoaded(String),
    #[error("session state i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("session snapshot is not valid JSON: {0}")]
    Snapshot(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Landing,
    Assessment,
}

/// Normalize a user-entered source code: first two characters, upper-cased.
pub fn normalize_code(input: &str) -> Result<String, SessionError> {
    let code: String = input
        .trim()
        .chars()
        .take(SOURCE_CODE_LEN)
        .collect::<String>()
        .to_uppercase();
    if code.is_empty() {
        return Err(SessionError::InvalidCode);
    }
    Ok(code)
}

/// Display name of an upload: the file name without its last extension.
pub fn display_name(file_name: &str) -> String {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => file_name[..idx].to_string(),
        _ => file_name.to_string(),
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    current_page: Page,
    data_sources: Vec<DataSource>,
    active_sheets: Vec<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a session from a persisted snapshot. Restored sources are summaries only
    /// until their workbook is attached again with [`Session::attach_data`].
    pub fn restore(snapshot: SessionSnapshot) -> Self {
        Self {
            current_page: snapshot.current_page,
            data_sources: snapshot.data_sources,
            active_sheets: snapshot.active_sheets,
        }
    }

    pub fn current_page(&self) -> Page {
        self.current_page
    }

    pub fn sources(&self) -> &[DataSource] {
        &self.data_sources
    }

    pub fn active_sheets(&self) -> &[String] {
        &self.active_sheets
    }

    pub fn is_active(&self, code: &str) -> bool {
        self.active_sheets.iter().any(|c| c == code)
    }

    /// Append a parsed workbook as a new, active data source.
    ///
    /// With a user code the code is normalized (see [`normalize_code`]); without one the
    /// file name is the code. Codes are unique within a session.
    pub fn add_source(
        &mut self,
        data: UniversalData,
        user_code: Option<&str>,
    ) -> Result<&DataSource, SessionError> {
        let code = match user_code {
            Some(raw) => normalize_code(raw)?,
            None if data.file_name.is_empty() => "new_data".to_string(),
            None => data.file_name.clone(),
        };
        if self.data_sources.iter().any(|s| s.code == code) {
            return Err(SessionError::DuplicateCode(code));
        }

        let name = if data.file_name.is_empty() {
            "Data Sheet".to_string()
        } else {
            display_name(&data.file_name)
        };
        log::debug!("adding source {code} ({} VMs)", data.vm_count);

        self.active_sheets.push(code.clone());
        self.data_sources.push(DataSource::new(code, name, data));
        self.current_page = Page::Assessment;
        Ok(&self.data_sources[self.data_sources.len() - 1])
    }

    /// Re-attach the workbook payload of a source restored from a snapshot.
    pub fn attach_data(&mut self, code: &str, data: UniversalData) -> Result<(), SessionError> {
        let source = self
            .data_sources
            .iter_mut()
            .find(|s| s.code == code)
            .ok_or_else(|| SessionError::UnknownCode(code.to_string()))?;
        if source.is_loaded() {
            return Err(SessionError::AlreadyLoaded(code.to_string()));
        }
        source.vm_count = data.vm_count;
        source.file_type = Some(data.file_type);
        source.data = Some(data);
        Ok(())
    }

    /// Flip a source between active and inactive. Returns whether it is now active.
    pub fn toggle_sheet(&mut self, code: &str) -> Result<bool, SessionError> {
        if !self.data_sources.iter().any(|s| s.code == code) {
            return Err(SessionError::UnknownCode(code.to_string()));
        }
        if let Some(pos) = self.active_sheets.iter().position(|c| c == code) {
            self.active_sheets.remove(pos);
            Ok(false)
        } else {
            self.active_sheets.push(code.to_string());
            Ok(true)
        }
    }

    /// Active sources in upload order.
    pub fn active_sources(&self) -> Vec<&DataSource> {
        self.data_sources
            .iter()
            .filter(|s| self.is_active(&s.code))
            .collect()
    }

    pub fn correlate(&self) -> CorrelationIndex {
        correlate(self.active_sources())
    }

    /// Readiness assessment over the deduplicated union of the active sources.
    pub fn assessment(&self) -> Assessment {
        analyze_union(self.active_sources())
    }

    /// Dashboard metrics over the same deduplicated VM set as [`Session::assessment`].
    pub fn enterprise_metrics(&self, defaults: &SizingDefaults) -> EnterpriseMetrics {
        let index = self.correlate();
        enterprise_metrics(index.anchors().filter_map(|a| a.primary_record()), defaults)
    }

    /// Drop every source and return to the landing page.
    pub fn restart(&mut self) {
        *self = Self::default();
    }

    pub fn back_to_landing(&mut self) {
        self.current_page = Page::Landing;
    }

    /// The persisted subset: page, source summaries (no workbook payloads), active codes.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_page: self.current_page,
            data_sources: self
                .data_sources
                .iter()
                .map(|s| DataSource { data: None, ..s.clone() })
                .collect(),
            active_sheets: self.active_sheets.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub current_page: Page,
    pub data_sources: Vec<DataSource>,
    pub active_sheets: Vec<String>,
}

/// File-backed snapshot persistence under a fixed key.
#[derive(Clone, Debug)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SESSION_STORAGE_KEY),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored snapshot, or `None` if nothing has been saved yet.
    pub fn load(&self) -> Result<Option<SessionSnapshot>, SessionError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&text)?))
    }

    /// Replace the stored snapshot. The file is written next to its destination and
    /// renamed into place, so readers never observe a partial snapshot.
    pub fn save(&self, snapshot: &SessionSnapshot) -> Result<(), SessionError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(tmp.as_file_mut(), snapshot)?;
        tmp.as_file_mut().write_all(b"\n")?;
        tmp.as_file_mut().flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }

    /// Remove the stored snapshot. Missing files are not an error.
    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
