use tokio::sync::mpsc;

use crate::api::client::CookClient;
use crate::error::ErrorInfo;
use crate::link::LookupRequest;

use super::state::AppMessage;

pub(super) fn spawn_lookup_link(
    client: &CookClient,
    request: LookupRequest,
    tx: &mpsc::UnboundedSender<AppMessage>,
) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let LookupRequest { generation, query } = request;
        let result = client
            .lookup_link(&query)
            .await
            .map_err(|e| ErrorInfo::from_cook_error(&e));
        let _ = tx.send(AppMessage::LinkLookedUp { generation, result });
    });
}

pub(super) fn spawn_submit(
    client: &CookClient,
    fields: Vec<(&'static str, String)>,
    tx: &mpsc::UnboundedSender<AppMessage>,
) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = client
            .create_recipe(&fields)
            .await
            .map_err(|e| ErrorInfo::from_cook_error(&e));
        let _ = tx.send(AppMessage::Submitted(result));
    });
}
