//! One controller per admin screen. Each `mount` reads its own elements,
//! tolerates their absence, and registers listeners through `Subscriptions`.

use super::*;

pub(super) mod accounts;
pub(super) mod audit_core;
pub(super) mod backup;
pub(super) mod broadcast;
pub(super) mod channel_control;
pub(super) mod dashboard;
pub(super) mod guild;
pub(super) mod moderation;
pub(super) mod permissions;
pub(super) mod settings;
pub(super) mod warnings;

pub(super) use audit_core::close_audit_channel;

/// Fetches one collection and writes its rendered HTML into `container_id`.
/// Returns whether the container was updated.
pub(super) async fn load_into<T: DeserializeOwned>(
    api_request: ApiRequest,
    container_id: &'static str,
    to_html: impl FnOnce(T) -> String,
) -> bool {
    let Ok(response) = request::<T>(&api_request).await else {
        return false;
    };
    set_html(container_id, &to_html(response));
    true
}
