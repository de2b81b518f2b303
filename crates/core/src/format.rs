use crate::error::{Result, WeekError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Workbook container a table was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Legacy binary workbook (`.xls`)
    Xls,
    /// XML workbook (`.xlsx`)
    Xlsx,
    /// XML workbook with macros (`.xlsm`)
    Xlsm,
    /// Binary workbook with macros (`.xlsb`)
    Xlsb,
}

impl SourceFormat {
    /// Identify the format from a file extension (without the dot, any case).
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "xls" => Ok(SourceFormat::Xls),
            "xlsx" => Ok(SourceFormat::Xlsx),
            "xlsm" => Ok(SourceFormat::Xlsm),
            "xlsb" => Ok(SourceFormat::Xlsb),
            other => Err(WeekError::UnsupportedFormat(format!(".{other}"))),
        }
    }

    /// Identify the format from a path's extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| WeekError::UnsupportedFormat(path.display().to_string()))?;
        Self::from_extension(ext)
    }

    /// Whether the reader for this container hands out dates as bare day
    /// serials with no type marker.
    #[must_use]
    pub fn lacks_date_typing(self) -> bool {
        matches!(self, SourceFormat::Xlsb)
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            SourceFormat::Xls => "xls",
            SourceFormat::Xlsx => "xlsx",
            SourceFormat::Xlsm => "xlsm",
            SourceFormat::Xlsb => "xlsb",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}
