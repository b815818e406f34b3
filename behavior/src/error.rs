//! Error type shared by configuration and preference storage.

#[derive(Debug, thiserror::Error)]
pub enum BehaviorError {
    /// The embedded configuration is not valid JSON for [`crate::config::SiteConfig`].
    #[error("config parse failed: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// A configuration value parsed but is out of range.
    #[error("invalid config value for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// No preference storage exists in this environment.
    #[error("preference storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The storage backend rejected a read.
    #[error("preference read failed for {key}: {reason}")]
    StorageRead { key: String, reason: String },

    /// The storage backend rejected a write (quota, private mode, ...).
    #[error("preference write failed for {key}: {reason}")]
    StorageWrite { key: String, reason: String },
}
