use maud::html;

use crate::model::WarnedUser;
use crate::render::safe_url;

/// Warning tags saturate at the third strike.
const WARN_LIMIT: u32 = 3;

pub fn warned_users(users: &[WarnedUser]) -> String {
    html! {
        @if users.is_empty() {
            li class="list-group-item text-muted text-center" { "No warnings on record." }
        } @else {
            @for user in users {
                li class="list-group-item d-flex justify-content-between align-items-center" {
                    span {
                        img src=(safe_url(&user.avatar_url)) class="avatar" alt="";
                        (user.name)
                    }
                    span class=(format!("warn-count-tag warn-count-{}", user.warn_count.min(WARN_LIMIT))) {
                        (user.warn_count) " / " (WARN_LIMIT)
                    }
                }
            }
        }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_class_caps_at_three() {
        let html = warned_users(&[
            WarnedUser {
                name: "a".to_string(),
                avatar_url: String::new(),
                warn_count: 1,
            },
            WarnedUser {
                name: "b".to_string(),
                avatar_url: String::new(),
                warn_count: 5,
            },
        ]);
        assert!(html.contains("warn-count-1"));
        assert!(html.contains("warn-count-3"));
        assert!(html.contains("5 / 3"));
        assert!(warned_users(&[]).contains("No warnings on record."));
    }
}
