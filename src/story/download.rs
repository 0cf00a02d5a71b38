//! Story Download
//!
//! A generated story offered as a plain-text file named
//! `sgu_story_<YYYYMMDD_HHMMSS>.txt`. The file content is the literal story
//! text, byte for byte.

use chrono::{DateTime, Local, TimeZone};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::story::{DOWNLOAD_MIME, DOWNLOAD_PREFIX, DOWNLOAD_TIMESTAMP_FORMAT};
use crate::types::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryDownload {
    file_name: String,
    content: String,
}

impl StoryDownload {
    /// Download stamped with the current local time
    pub fn for_story(text: &str) -> Self {
        Self::at(text, Local::now())
    }

    pub fn at<Tz: TimeZone>(text: &str, timestamp: DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            file_name: format!(
                "{}{}.txt",
                DOWNLOAD_PREFIX,
                timestamp.format(DOWNLOAD_TIMESTAMP_FORMAT)
            ),
            content: text.to_string(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content(&self) -> &[u8] {
        self.content.as_bytes()
    }

    pub fn mime(&self) -> &'static str {
        DOWNLOAD_MIME
    }

    /// `data:` URL carrying the story for a browser download link
    pub fn data_url(&self) -> String {
        format!(
            "data:{};charset=utf-8,{}",
            DOWNLOAD_MIME,
            urlencoding::encode(&self.content)
        )
    }

    /// Write the story into `dir`, returning the file path
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, self.content())?;
        info!("Saved story to {}", path.display());
        Ok(path)
    }
}
