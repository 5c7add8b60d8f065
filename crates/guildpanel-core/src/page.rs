/// The admin screen a document belongs to, read from `<body data-page-id>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageKind {
    Dashboard,
    Guild,
    Settings,
    ChannelControl,
    Moderation,
    Announcements,
    AuditCore,
    Warnings,
    Permissions,
    SuperuserAccounts,
    BotProfile,
    Backup,
    SuperuserBroadcast,
    /// Ships its own inline script; nothing is mounted.
    Tickets,
    Unknown(String),
}

impl PageKind {
    pub fn from_page_id(raw: &str) -> Self {
        match raw.trim() {
            "dashboard" => Self::Dashboard,
            "guild" => Self::Guild,
            "settings" => Self::Settings,
            "channel_control" => Self::ChannelControl,
            "moderation" => Self::Moderation,
            "announcements" => Self::Announcements,
            "audit_core" => Self::AuditCore,
            "warnings" => Self::Warnings,
            "permissions" => Self::Permissions,
            "superuser_accounts" => Self::SuperuserAccounts,
            "bot_profile" => Self::BotProfile,
            "backup" => Self::Backup,
            "superuser_broadcast" => Self::SuperuserBroadcast,
            "tickets" => Self::Tickets,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn page_id(&self) -> &str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Guild => "guild",
            Self::Settings => "settings",
            Self::ChannelControl => "channel_control",
            Self::Moderation => "moderation",
            Self::Announcements => "announcements",
            Self::AuditCore => "audit_core",
            Self::Warnings => "warnings",
            Self::Permissions => "permissions",
            Self::SuperuserAccounts => "superuser_accounts",
            Self::BotProfile => "bot_profile",
            Self::Backup => "backup",
            Self::SuperuserBroadcast => "superuser_broadcast",
            Self::Tickets => "tickets",
            Self::Unknown(raw) => raw.as_str(),
        }
    }

    pub fn requires_guild(&self) -> bool {
        matches!(
            self,
            Self::Guild
                | Self::Settings
                | Self::ChannelControl
                | Self::Moderation
                | Self::Announcements
                | Self::AuditCore
                | Self::Warnings
                | Self::Permissions
                | Self::Backup
        )
    }

    /// Pages that take the body-level click dispatcher and form router.
    pub fn binds_common_handlers(&self) -> bool {
        matches!(
            self,
            Self::Guild
                | Self::Settings
                | Self::ChannelControl
                | Self::Moderation
                | Self::Announcements
        )
    }
}

/// Everything read once from the host document at start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    pub page: PageKind,
    pub guild_id: Option<String>,
    pub owner_id: Option<String>,
}

impl PageContext {
    pub fn from_dataset(page_id: Option<&str>, guild_id: Option<&str>, owner_id: Option<&str>) -> Self {
        Self {
            page: PageKind::from_page_id(page_id.unwrap_or_default()),
            guild_id: non_empty(guild_id),
            owner_id: non_empty(owner_id),
        }
    }

    pub fn guild_id(&self) -> Option<&str> {
        self.guild_id.as_deref()
    }

    /// Guild id when the page needs one; `None` means the controller must not mount.
    pub fn mount_guild(&self) -> Option<&str> {
        if self.page.requires_guild() {
            self.guild_id()
        } else {
            Some("")
        }
    }

    /// The dashboard hides content until its welcome sequence finishes, once per session.
    pub fn reveal_content_immediately(&self, welcome_shown: bool) -> bool {
        !(self.page == PageKind::Dashboard && !welcome_shown)
    }
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_ids_round_trip_and_unknowns_are_kept() {
        for id in [
            "dashboard",
            "guild",
            "settings",
            "channel_control",
            "moderation",
            "announcements",
            "audit_core",
            "warnings",
            "permissions",
            "superuser_accounts",
            "bot_profile",
            "backup",
            "superuser_broadcast",
            "tickets",
        ] {
            assert_eq!(PageKind::from_page_id(id).page_id(), id);
        }
        assert_eq!(
            PageKind::from_page_id("lottery"),
            PageKind::Unknown("lottery".to_string())
        );
    }

    #[test]
    fn audit_core_skips_common_dispatcher() {
        assert!(!PageKind::AuditCore.binds_common_handlers());
        assert!(PageKind::Moderation.binds_common_handlers());
    }

    #[test]
    fn guild_scoped_pages_need_an_id() {
        let ctx = PageContext::from_dataset(Some("moderation"), Some("  "), None);
        assert_eq!(ctx.mount_guild(), None);

        let ctx = PageContext::from_dataset(Some("moderation"), Some("55"), Some("7"));
        assert_eq!(ctx.mount_guild(), Some("55"));
        assert_eq!(ctx.owner_id.as_deref(), Some("7"));

        let ctx = PageContext::from_dataset(Some("superuser_accounts"), None, None);
        assert_eq!(ctx.mount_guild(), Some(""));
    }

    #[test]
    fn dashboard_waits_for_welcome_once_per_session() {
        let ctx = PageContext::from_dataset(Some("dashboard"), None, None);
        assert!(!ctx.reveal_content_immediately(false));
        assert!(ctx.reveal_content_immediately(true));

        let ctx = PageContext::from_dataset(Some("guild"), Some("1"), None);
        assert!(ctx.reveal_content_immediately(false));
    }
}
