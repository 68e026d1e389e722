//! Scripted transport and response builders shared by unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use linode_core::client::{Transport, TransportRequest, TransportResponse};
use mockall::mock;
use serde_json::{json, Value};

use crate::client::LinodeClient;

mock! {
    pub LinodeTransport {}

    #[async_trait]
    impl Transport for LinodeTransport {
        async fn execute(&self, request: TransportRequest) -> linode_core::Result<TransportResponse>;
    }
}

pub(crate) fn client_with(transport: MockLinodeTransport) -> LinodeClient {
    LinodeClient::with_transport(Arc::new(transport))
}

pub(crate) fn page_response(page: u32, pages: u32, data: Value) -> TransportResponse {
    let results = data.as_array().map_or(0, Vec::len);
    TransportResponse::new(
        200,
        json!({"page": page, "pages": pages, "results": results, "data": data}).to_string(),
    )
}

pub(crate) fn event_json(
    id: u64,
    action: &str,
    status: &str,
    entity_type: &str,
    entity_id: Value,
    created: &str,
) -> Value {
    json!({
        "id": id,
        "action": action,
        "status": status,
        "entity": {
            "id": entity_id,
            "label": "linode123",
            "type": entity_type,
            "url": "/v4/linode/instances/123"
        },
        "created": created,
        "seen": false,
        "read": false,
        "percent_complete": null,
        "username": "exampleUser"
    })
}
