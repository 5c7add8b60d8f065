use serde::Serialize;

use crate::error::ValidationError;

pub const RESTORE_FINAL_WARNING: &str = "Final warning: this deletes every channel and role in the guild and restores them from the file. This cannot be undone! Are you sure?";

/// Download name for `GET /backup`: the `filename` parameter of an
/// `attachment` disposition, else `backup-{guild}.json`.
pub fn download_filename(disposition: Option<&str>, guild_id: &str) -> String {
    disposition
        .filter(|value| value.contains("attachment"))
        .and_then(disposition_filename)
        .unwrap_or_else(|| format!("backup-{guild_id}.json"))
}

/// Value of the first `filename` parameter. A quoted value runs to its
/// closing quote, so `;` inside it is kept.
fn disposition_filename(disposition: &str) -> Option<String> {
    let start = disposition.find("filename")?;
    let rest = &disposition[start + "filename".len()..];
    let (_, value) = rest.split_once('=')?;
    let value = value.trim_start();
    let name = match value.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let inner = &value[1..];
            inner.find(quote).map_or(inner, |end| &inner[..end])
        }
        _ => value.split(';').next().unwrap_or_default().trim_end(),
    };
    Some(name.to_string()).filter(|name| !name.is_empty())
}

/// A restore that passed every client-side check; the file is read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreRequest {
    pub confirmation: String,
}

impl RestoreRequest {
    pub fn validate(
        has_file: bool,
        typed_phrase: &str,
        expected_phrase: Option<&str>,
    ) -> Result<Self, ValidationError> {
        if !has_file {
            return Err(ValidationError::MissingBackupFile);
        }
        let expected = expected_phrase.ok_or(ValidationError::MissingPhraseElement)?;
        if typed_phrase.trim() != expected.trim() {
            return Err(ValidationError::PhraseMismatch);
        }
        Ok(Self {
            confirmation: typed_phrase.to_string(),
        })
    }

    pub fn into_job(self, guild_id: &str, backup_data_str: String) -> RestoreJob {
        RestoreJob {
            guild_id: guild_id.to_string(),
            backup_data_str,
            confirmation: self.confirmation,
        }
    }
}

/// Payload of `start_restore`. The file text is sent unparsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestoreJob {
    pub guild_id: String,
    pub backup_data_str: String,
    pub confirmation: String,
}
