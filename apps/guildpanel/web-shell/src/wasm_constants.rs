pub(crate) const PANEL_CONFIG_ISLAND_ID: &str = "panel-config";
pub(crate) const USER_PERMISSIONS_ISLAND_ID: &str = "user-permissions-data";
pub(crate) const MAIN_CONTENT_ID: &str = "main-content-wrapper";
pub(crate) const ALL_ROLES_SOURCE_ID: &str = "guild-page-all-roles-source";

pub(crate) const SPINNER_HTML: &str = "<span class=\"spinner-border spinner-border-sm\"></span>";

// Dashboard
pub(crate) const WELCOME_OVERLAY_ID: &str = "welcome-overlay";
pub(crate) const WELCOME_MAIN_LINE_ID: &str = "welcome-text-main";
pub(crate) const WELCOME_SUB_LINE_ID: &str = "welcome-text-sub";
pub(crate) const GUILD_SELECT_FORM_ID: &str = "guild-select-form";
pub(crate) const GUILD_SELECTOR_ID: &str = "guild-selector";

// Guild overview
pub(crate) const MANAGEMENT_TABS_ID: &str = "managementTabs";
pub(crate) const MANAGEMENT_PANES_ID: &str = "managementTabsContent";
pub(crate) const TOTAL_CURRENCY_ID: &str = "total-currency-stat";
pub(crate) const ECONOMY_USER_COUNT_ID: &str = "economy-user-count-stat";
pub(crate) const ECONOMY_CHART_ID: &str = "economy-leaderboard-chart";
pub(crate) const ROLE_MODAL_ID: &str = "roleModal";
pub(crate) const ROLE_MODAL_MEMBER_ID: &str = "role-modal-member-id";
pub(crate) const ROLE_MODAL_USERNAME_ID: &str = "role-modal-username";
pub(crate) const MEMBER_ROLES_FORM_ID: &str = "member-roles-form";
pub(crate) const EDIT_ITEM_MODAL_ID: &str = "editItemModal";
pub(crate) const EDIT_ITEM_MODAL_LABEL_ID: &str = "editItemModalLabel";
pub(crate) const EDIT_ITEM_FORM_ID: &str = "edit-item-form";
pub(crate) const MEMBER_LIST_BODY_ID: &str = "member-list-body";
pub(crate) const SELECT_ALL_MEMBERS_ID: &str = "select-all-members";
pub(crate) const BULK_TOOLBAR_ID: &str = "bulk-actions-toolbar";
pub(crate) const BULK_SELECTED_COUNT_ID: &str = "bulk-selected-count";
pub(crate) const MEMBER_SEARCH_INPUT_ID: &str = "member-search-input";
pub(crate) const ROLE_EDITOR_MODAL_ID: &str = "role-editor-modal";
pub(crate) const ROLE_EDITOR_FORM_ID: &str = "role-editor-form";
pub(crate) const ROLE_EDITOR_TITLE_ID: &str = "role-editor-title";
pub(crate) const CREATE_ROLE_BUTTON_ID: &str = "create-new-role-btn";
pub(crate) const EDIT_ROLE_ID_INPUT: &str = "edit-role-id";
pub(crate) const ROLE_NAME_INPUT_ID: &str = "role-name";
pub(crate) const ROLE_COLOR_INPUT_ID: &str = "role-color";
pub(crate) const ROLE_PREVIEW_ID: &str = "role-preview";
pub(crate) const CLEAR_ALL_PERMS_ID: &str = "clear-all-perms";
pub(crate) const SAVE_ROLE_BUTTON_ID: &str = "save-role-btn";
pub(crate) const ROLES_TABLE_SELECTOR: &str = "#roles-tab-pane tbody";

// Settings
pub(crate) const DEPLOY_TICKET_BUTTON_ID: &str = "deploy-ticket-button";
pub(crate) const TICKET_SETTINGS_FORM_ID: &str = "ticket-settings-form";
pub(crate) const STAFF_ROLES_FIELD: &str = "staff_role_ids";

// Audit core
pub(crate) const AUDIT_LOG_CONTAINER_ID: &str = "audit-log-container";
pub(crate) const NO_LOGS_PLACEHOLDER_ID: &str = "no-logs-placeholder";
pub(crate) const EXEMPT_USER_FORM_ID: &str = "exempt-user-form";
pub(crate) const EXEMPT_CHANNEL_FORM_ID: &str = "exempt-channel-form";

// Warnings
pub(crate) const WARNINGS_FORM_ID: &str = "warnings-form";
pub(crate) const ISSUE_WARN_BUTTON_ID: &str = "issue-warn-btn";
pub(crate) const REVOKE_WARN_BUTTON_ID: &str = "revoke-warn-btn";
pub(crate) const DEFAULT_WARN_REASON: &str = "No reason specified";

// Permissions
pub(crate) const PERMISSION_FORM_ID: &str = "permission-group-form";
pub(crate) const PERMISSION_ROLE_SELECT_ID: &str = "role-select";
pub(crate) const EDITING_ROLE_INPUT_ID: &str = "editing_role_id";
pub(crate) const PERMISSION_FORM_TITLE_ID: &str = "form-title";
pub(crate) const SAVE_PERMISSION_BUTTON_ID: &str = "save-perm-btn";
pub(crate) const CANCEL_EDIT_BUTTON_ID: &str = "cancel-edit-btn";
pub(crate) const PERMISSION_GROUPS_LIST_ID: &str = "permission-groups-list";

// Superuser accounts
pub(crate) const ACCOUNT_FORM_ID: &str = "sub-account-form";
pub(crate) const SUB_ACCOUNTS_LIST_ID: &str = "sub-accounts-list";
pub(crate) const ACCOUNT_ID_INPUT: &str = "account_id";
pub(crate) const ACCOUNT_NAME_INPUT: &str = "account_name";
pub(crate) const ALL_GUILDS_SWITCH_ID: &str = "can_manage_all_guilds";
pub(crate) const ACCOUNT_GUILDS_SELECT_ID: &str = "guilds";
pub(crate) const GUILD_SELECT_CONTAINER_ID: &str = "guild-select-container";
pub(crate) const SAVE_ACCOUNT_BUTTON_ID: &str = "save-account-btn";
pub(crate) const NEW_KEY_MODAL_ID: &str = "newKeyModal";
pub(crate) const NEW_KEY_DISPLAY_ID: &str = "new-access-key-display";
pub(crate) const COPY_KEY_BUTTON_ID: &str = "copy-key-btn";
pub(crate) const COPY_KEY_LABEL_HTML: &str = "<i class=\"fa-solid fa-copy\"></i> Copy to clipboard";

// Backup
pub(crate) const CREATE_BACKUP_BUTTON_ID: &str = "create-backup-btn";
pub(crate) const RESTORE_FORM_ID: &str = "restore-form";
pub(crate) const BACKUP_FILE_INPUT_ID: &str = "backup-file-input";
pub(crate) const CONFIRMATION_PHRASE_ID: &str = "confirmation-phrase";
pub(crate) const CONFIRMATION_INPUT_ID: &str = "confirmation-input";
pub(crate) const RESTORE_LOG_CARD_ID: &str = "restore-log-card";
pub(crate) const RESTORE_LOG_ID: &str = "restore-log-container";
pub(crate) const RESTORE_BUTTON_ID: &str = "restore-btn";

// Superuser broadcast
pub(crate) const TOTAL_USERS_ID: &str = "total-users-count";
pub(crate) const INVITE_GUILD_SELECT_ID: &str = "invite-guild-select";
pub(crate) const GENERATE_INVITE_BUTTON_ID: &str = "generate-invite-btn";
pub(crate) const INVITE_LINK_DISPLAY_ID: &str = "invite-link-display";
pub(crate) const BROADCAST_FORM_ID: &str = "broadcast-form";
pub(crate) const BROADCAST_ALL_SWITCH_ID: &str = "broadcast-all-switch";
pub(crate) const TARGET_GUILDS_SELECT_ID: &str = "target-guilds-select";
pub(crate) const BROADCAST_LOG_CARD_ID: &str = "log-card";
pub(crate) const BROADCAST_LOG_ID: &str = "broadcast-log";
pub(crate) const START_BROADCAST_BUTTON_ID: &str = "start-broadcast-btn";
