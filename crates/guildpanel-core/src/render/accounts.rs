use maud::html;

use crate::accounts::PermissionSummary;
use crate::model::SubAccount;
use crate::render::format_unix_seconds;

pub fn sub_accounts(accounts: &[SubAccount]) -> String {
    html! {
        @if accounts.is_empty() {
            p class="text-center text-muted p-3" { "No sub-accounts have been created." }
        } @else {
            @for account in accounts {
                @let summary = PermissionSummary::of(&account.permissions);
                div class="list-group-item"
                    data-account-id=(account.id.as_str())
                    data-account-data=(serde_json::to_string(account).unwrap_or_default()) {
                    div class="d-flex w-100 justify-content-between" {
                        h5 class="mb-1" { (account.account_name) }
                        div {
                            button class="btn btn-sm btn-outline-info edit-account-btn" { "Edit" }
                            button class="btn btn-sm btn-outline-danger delete-account-btn" { "Delete" }
                        }
                    }
                    p class="mb-1" {
                        strong { "Permissions:" }
                        " "
                        span class=(format!("badge {}", summary.badge_class())) { (summary.label()) }
                    }
                    small class="text-muted" {
                        "Created: " (format_unix_seconds(account.created_at))
                        " | Last used: "
                        @match account.last_used_at {
                            Some(seconds) => (format_unix_seconds(seconds)),
                            None => "Never used",
                        }
                    }
                }
            }
        }
    }
    .into_string()
}
