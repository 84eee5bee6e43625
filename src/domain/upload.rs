use std::fmt;
use std::path::Path;

use bytes::Bytes;
use serde::Serialize;

use crate::domain::config::UploadConfig;
use crate::domain::error::{DomainError, ValidationError};

/// Audio file selected by the user. The payload is reference-counted, so
/// cloning is cheap.
#[derive(Debug, Clone)]
pub struct AudioFile {
    name: String,
    mime_type: Option<String>,
    data: Bytes,
}

impl AudioFile {
    /// A malformed `mime_type` is replaced by the one implied by the
    /// extension, or dropped.
    pub fn new(name: impl Into<String>, mime_type: Option<String>, data: impl Into<Bytes>) -> Self {
        let name = name.into();
        let mime_type = mime_type.filter(|m| is_valid_mime(m)).or_else(|| {
            extension_of(&name)
                .and_then(|ext| mime_for_extension(&ext))
                .map(str::to_string)
        });
        Self {
            name,
            mime_type,
            data: data.into(),
        }
    }

    /// Read a file from disk, inferring the MIME type from its extension.
    pub async fn from_path(path: &Path) -> Result<Self, DomainError> {
        let data = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| DomainError::Io(format!("Invalid file name: {}", path.display())))?
            .to_string();
        let mime_type = extension_of(&name)
            .and_then(|ext| mime_for_extension(&ext))
            .map(str::to_string);

        Ok(Self::new(name, mime_type, data))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Lower-cased extension including the leading dot.
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.name)
    }

    pub fn metadata(&self) -> FileMetadata {
        FileMetadata {
            name: self.name.clone(),
            size: self.size(),
            mime_type: self.mime_type.clone().unwrap_or_else(|| "unknown".to_string()),
            formatted_size: format_file_size(self.size()),
        }
    }
}

/// Descriptive metadata rendered next to the file preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMetadata {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub formatted_size: String,
}

/// A single rule an input file broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationViolation {
    FileTooLarge { size: u64, max: u64 },
    UnsupportedType {
        mime_type: Option<String>,
        supported_extensions: Vec<String>,
    },
}

impl fmt::Display for ValidationViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationViolation::FileTooLarge { size, max } => write!(
                f,
                "File size ({}) exceeds maximum limit of {}",
                format_file_size(*size),
                format_file_size(*max)
            ),
            ValidationViolation::UnsupportedType {
                mime_type,
                supported_extensions,
            } => write!(
                f,
                "Unsupported file type: {}. Supported formats: {}",
                mime_type.as_deref().unwrap_or("unknown"),
                supported_extensions.join(", ")
            ),
        }
    }
}

/// Checks uploads against the configured size limit and type allow-list.
#[derive(Debug, Clone)]
pub struct FileValidator {
    max_file_size_bytes: u64,
    allowed_mime_types: Vec<String>,
    allowed_extensions: Vec<String>,
}

impl FileValidator {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            max_file_size_bytes: config.max_file_size_bytes,
            allowed_mime_types: config.allowed_mime_types.clone(),
            allowed_extensions: config
                .allowed_extensions
                .iter()
                .map(|e| e.to_ascii_lowercase())
                .collect(),
        }
    }

    /// Validate a file, collecting every violated rule.
    pub fn validate(&self, file: &AudioFile) -> Result<(), ValidationError> {
        let mut violations = Vec::new();

        if file.size() > self.max_file_size_bytes {
            violations.push(ValidationViolation::FileTooLarge {
                size: file.size(),
                max: self.max_file_size_bytes,
            });
        }

        let mime_allowed = file
            .mime_type()
            .is_some_and(|m| self.allowed_mime_types.iter().any(|a| a == m));
        let extension_allowed = file
            .extension()
            .is_some_and(|ext| self.allowed_extensions.contains(&ext));
        if !mime_allowed && !extension_allowed {
            violations.push(ValidationViolation::UnsupportedType {
                mime_type: file.mime_type().map(str::to_string),
                supported_extensions: self.allowed_extensions.clone(),
            });
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }
}

fn extension_of(name: &str) -> Option<String> {
    name.rfind('.')
        .map(|idx| name[idx..].to_ascii_lowercase())
        .filter(|ext| ext.len() > 1)
}

/// `type/subtype` made of token characters, optionally followed by parameters.
fn is_valid_mime(value: &str) -> bool {
    let essence = value.split(';').next().unwrap_or_default().trim();
    let is_token = |part: &str| {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "!#$&-^_.+".contains(c))
    };
    matches!(essence.split_once('/'), Some((kind, subtype)) if is_token(kind) && is_token(subtype))
}

/// MIME type for a known audio extension (with leading dot).
pub fn mime_for_extension(extension: &str) -> Option<&'static str> {
    match extension {
        ".mp3" => Some("audio/mpeg"),
        ".wav" => Some("audio/wav"),
        ".mp4" => Some("audio/mp4"),
        ".m4a" => Some("audio/m4a"),
        ".ogg" => Some("audio/ogg"),
        ".flac" => Some("audio/flac"),
        ".webm" => Some("audio/webm"),
        _ => None,
    }
}

/// Human-readable size: base 1024, at most two decimals.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}
