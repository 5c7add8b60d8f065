use serde::Serialize;

use crate::error::ValidationError;

pub const BROADCAST_PHRASE: &str = "START GLOBAL BROADCAST";

/// Values read from `#broadcast-form` and the invite widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastRequest {
    pub confirmation: String,
    pub broadcast_to_all: bool,
    pub target_guilds: Vec<String>,
    pub title: String,
    pub message: String,
    pub invite_url: String,
}

impl BroadcastRequest {
    /// The phrase must match exactly, untrimmed.
    pub fn validate(self) -> Result<BroadcastJob, ValidationError> {
        if self.confirmation != BROADCAST_PHRASE {
            return Err(ValidationError::PhraseMismatch);
        }
        if !self.broadcast_to_all && self.target_guilds.is_empty() {
            return Err(ValidationError::NoBroadcastTargets);
        }
        Ok(BroadcastJob {
            title: self.title,
            message: self.message,
            invite_url: self.invite_url,
            broadcast_to_all: self.broadcast_to_all,
            target_guilds: self.target_guilds,
        })
    }
}

/// Payload of `start_global_broadcast`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BroadcastJob {
    pub title: String,
    pub message: String,
    pub invite_url: String,
    pub broadcast_to_all: bool,
    pub target_guilds: Vec<String>,
}

impl BroadcastJob {
    pub fn final_warning(&self) -> String {
        let targets = if self.broadcast_to_all {
            "all guilds".to_string()
        } else {
            format!("{} selected guilds", self.target_guilds.len())
        };
        format!(
            "Final warning: you are about to send a direct message to every user in {targets}. Continue?"
        )
    }
}
