use thiserror::Error;

/// Failure of one REST round trip. The web shell alerts each of these once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("{message}")]
    Network { message: String },
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("unexpected response body: {message}")]
    Decode { message: String },
}

impl RequestError {
    /// Text shown in the blocking notification.
    pub fn notice(&self) -> String {
        format!("Operation failed: {self}")
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network { .. } | Self::Decode { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("could not open socket: {0}")]
    Open(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed frame: {0}")]
    Frame(String),
    #[error("{0}")]
    Rejected(String),
    #[error("channel is not connected")]
    NotConnected,
}

/// Client-side checks that block an interaction before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Error: action or target id missing.")]
    MissingActionOrTarget,
    #[error("Error: invalid action name.")]
    InvalidAction,
    #[error("Please select at least one member.")]
    NoMembersSelected,
    #[error("Error: the role list could not be found.")]
    RoleListMissing,
    #[error("Invalid index.")]
    InvalidRoleIndex,
    #[error("Please choose a backup file.")]
    MissingBackupFile,
    #[error("Error: the confirmation phrase element could not be found on the page.")]
    MissingPhraseElement,
    #[error("Confirmation phrase does not match.")]
    PhraseMismatch,
    #[error("Select at least one target guild, or enable broadcasting to all guilds.")]
    NoBroadcastTargets,
    #[error("Please select a role.")]
    MissingRole,
    #[error("Please select a target user.")]
    MissingUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("config island is not valid JSON: {0}")]
    Malformed(String),
    #[error("socket path must start with '/'")]
    InvalidSocketPath,
    #[error("{field} must be greater than zero")]
    ZeroInterval { field: &'static str },
    #[error("action reason must not be empty")]
    EmptyReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_notice_prefixes_message() {
        let error = RequestError::Status {
            status: 403,
            message: "Missing permission".to_string(),
        };
        assert_eq!(error.notice(), "Operation failed: Missing permission");
        assert_eq!(error.status(), Some(403));
    }

    #[test]
    fn validation_texts_are_user_facing() {
        assert_eq!(
            ValidationError::NoMembersSelected.to_string(),
            "Please select at least one member."
        );
        assert_eq!(ValidationError::InvalidRoleIndex.to_string(), "Invalid index.");
    }
}
