use serde_json::Number;

use crate::model::GlobalStats;

pub const WELCOME_FLAG_KEY: &str = "welcomeShown";

/// Lines typed by the dashboard welcome overlay: (headline, subline).
pub const WELCOME_SCRIPT: [(&str, &str); 4] = [
    ("Verifying identity...", "Connecting to authentication server..."),
    ("Welcome, Administrator", "Access granted."),
    ("Guild Control Console", "Initializing Control Panel..."),
    ("System ready", "All systems nominal. Welcome."),
];
pub const WELCOME_START_DELAY_MS: u32 = 500;
pub const WELCOME_SUBLINE_DELAY_MS: u32 = 500;
pub const WELCOME_NEXT_MESSAGE_MS: u32 = 1_200;
pub const WELCOME_END_DELAY_MS: u32 = 1_500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatCounter {
    Guilds,
    Users,
    Latency,
    Commands,
}

impl StatCounter {
    pub const ALL: [Self; 4] = [Self::Guilds, Self::Users, Self::Latency, Self::Commands];

    pub fn element_id(self) -> &'static str {
        match self {
            Self::Guilds => "guild-count",
            Self::Users => "user-count",
            Self::Latency => "latency",
            Self::Commands => "command-count",
        }
    }
}

impl GlobalStats {
    fn counter(&self, counter: StatCounter) -> Option<&Number> {
        match counter {
            StatCounter::Guilds => self.guilds.as_ref(),
            StatCounter::Users => self.users.as_ref(),
            StatCounter::Latency => self.latency.as_ref(),
            StatCounter::Commands => self.commands.as_ref(),
        }
    }

    /// Latency gets a ` ms` suffix; the other counters are bare numbers.
    pub fn counter_text(&self, counter: StatCounter) -> String {
        let value = self
            .counter(counter)
            .map_or_else(|| "-".to_string(), ToString::to_string);
        match counter {
            StatCounter::Latency => format!("{value} ms"),
            _ => value,
        }
    }
}

/// Integer with comma thousands separators, as the stat cards display totals.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn format_number(value: &Number) -> String {
    value
        .as_i64()
        .map_or_else(|| value.to_string(), format_thousands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn latency_is_suffixed() {
        let stats: GlobalStats =
            serde_json::from_value(json!({"guilds": 3, "users": 150, "latency": 42, "commands": 10}))
                .expect("stats should decode");
        let texts: Vec<String> = StatCounter::ALL
            .iter()
            .map(|counter| stats.counter_text(*counter))
            .collect();
        assert_eq!(texts, vec!["3", "150", "42 ms", "10"]);
    }

    #[test]
    fn missing_counters_show_dash() {
        let stats = GlobalStats::default();
        assert_eq!(stats.counter_text(StatCounter::Users), "-");
        assert_eq!(stats.counter_text(StatCounter::Latency), "- ms");
    }

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
        assert_eq!(format_thousands(-12_345), "-12,345");
        assert_eq!(format_number(&Number::from(150_000)), "150,000");
    }
}
