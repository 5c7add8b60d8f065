use std::collections::BTreeMap;

use maud::html;

use crate::model::{PermissionGroup, PermissionGroups};
use crate::permissions::badge_class;

/// Permission group list. `page_names` maps permission keys to the labels the
/// page shows next to its checkboxes; unknown keys render as-is.
pub fn permission_groups(
    groups: &PermissionGroups,
    page_names: &BTreeMap<String, String>,
) -> String {
    html! {
        @if groups.is_empty() {
            p class="text-muted text-center p-3" { "No permission groups have been created yet." }
        } @else {
            @for (role_id, group) in groups.iter() {
                div class="list-group-item" data-role-id=(role_id) {
                    div class="d-flex w-100 justify-content-between" {
                        h5 class="mb-1" { "@" (group.name) }
                        div {
                            button class="btn btn-sm btn-outline-info edit-perm-btn" { "Edit" }
                            button class="btn btn-sm btn-outline-danger delete-perm-btn" { "Delete" }
                        }
                    }
                    p class="mb-1" {
                        @if group.permissions.is_empty() {
                            span class="text-muted" { "No page permissions" }
                        }
                        @for permission in &group.permissions {
                            span class=(format!("badge {} me-1", badge_class(permission))) {
                                (page_names.get(permission).unwrap_or(permission))
                            }
                            " "
                        }
                    }
                }
            }
        }
    }
    .into_string()
}
