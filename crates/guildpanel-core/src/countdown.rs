pub const PERMANENT_LABEL: &str = "Permanent";
pub const EXPIRED_LABEL: &str = "Expired";
pub const PENDING_LABEL: &str = "Calculating...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountdownDisplay {
    Permanent,
    Remaining(String),
    Expired,
}

impl CountdownDisplay {
    pub fn text(&self) -> &str {
        match self {
            Self::Permanent => PERMANENT_LABEL,
            Self::Remaining(text) => text,
            Self::Expired => EXPIRED_LABEL,
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired)
    }
}

/// Reads `data-expires`. Unparseable and zero values mean a permanent mute.
pub fn parse_expiry(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|expires| *expires != 0)
}

/// Remaining time for an absolute expiry, both in unix seconds.
pub fn countdown_display(expires_at: Option<i64>, now: i64) -> CountdownDisplay {
    let Some(expires_at) = expires_at.filter(|expires| *expires != 0) else {
        return CountdownDisplay::Permanent;
    };
    let remaining = expires_at.saturating_sub(now);
    if remaining <= 0 {
        return CountdownDisplay::Expired;
    }
    CountdownDisplay::Remaining(format_remaining(remaining))
}

fn format_remaining(remaining: i64) -> String {
    let days = remaining / 86_400;
    let hours = (remaining % 86_400) / 3_600;
    let minutes = (remaining % 3_600) / 60;
    let seconds = remaining % 60;

    let mut text = String::new();
    if days > 0 {
        text.push_str(&format!("{days}d "));
    }
    if hours > 0 || days > 0 {
        text.push_str(&format!("{hours:02}:"));
    }
    text.push_str(&format!("{minutes:02}:{seconds:02}"));
    text
}
