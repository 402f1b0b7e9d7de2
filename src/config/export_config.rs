use std::path::PathBuf;

use error_stack::{report, ResultExt};

use super::app_config::require_non_blank;
use super::ConfigurationError;

/// Drive folder receiving every exported spreadsheet.
pub const DEFAULT_TARGET_FOLDER_ID: &str = "1euVnfDZbsquY-iMZR7_GIeyA2_4zbKsq";

/// Columns kept in the exported spreadsheet.
pub const DEFAULT_COLUMNS: [&str; 16] = [
    "Classe",
    "Classe Groupe",
    "Nom",
    "Prénom",
    "Date De Naissance",
    "Nom / Prénom de l'élève",
    "Genre",
    "PersonneID",
    "Responsable 1 Nom",
    "Responsable 1 Prénom",
    "Responsable 1 Titre",
    "Responsable 1 Rue",
    "Responsable 1 Numéro",
    "Responsable1_BP",
    "Responsable 1 Localité",
    "Responsable 1 CP",
];

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%Hh%M";
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    pub target_folder_id: String,
    pub columns: Vec<String>,
    /// Timezone used for the timestamp appended to exported file names.
    pub timezone: chrono_tz::Tz,
    pub timestamp_format: String,
    #[serde(deserialize_with = "count_or_text")]
    pub preview_rows: usize,
    /// Where the CSV buffer is written before upload. System temp dir when unset.
    pub temp_dir: Option<PathBuf>,
}

/// Accepts `5` as well as `"5"`, the form environment overrides arrive in.
fn count_or_text<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(usize),
        Text(String),
    }

    match <Count as serde::Deserialize>::deserialize(deserializer)? {
        Count::Number(count) => Ok(count),
        Count::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            target_folder_id: DEFAULT_TARGET_FOLDER_ID.to_string(),
            columns: DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect(),
            timezone: chrono_tz::Europe::Paris,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            temp_dir: None,
        }
    }
}

impl ExportConfig {
    pub fn validate(&self) -> error_stack::Result<(), ConfigurationError> {
        require_non_blank("export.target_folder_id", &self.target_folder_id)?;
        require_non_blank("export.timestamp_format", &self.timestamp_format)?;
        if self.columns.is_empty() {
            return Err(report!(ConfigurationError::InvalidField(
                "export.columns".to_string()
            )))
            .attach_printable("At least one column must be listed");
        }
        Ok(())
    }
}
