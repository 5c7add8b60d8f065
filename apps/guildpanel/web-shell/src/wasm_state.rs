use std::collections::BTreeMap;

use guildpanel_core::audit::AuditFeed;

#[derive(Debug, Default)]
pub(crate) struct AuditPageState {
    pub(super) guild_id: String,
    pub(super) feed: AuditFeed,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PermissionsPageState {
    /// Permission key to the label shown next to its checkbox.
    pub(super) page_names: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct AccountsPageState {
    pub(super) saving: bool,
}
