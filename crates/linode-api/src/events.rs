//! Account event stream.

use linode_core::client::TransportRequest;
use linode_core::ids::EventId;
use linode_core::list::{ListOptions, Page};
use linode_core::types::Event;
use serde_json::json;
use tracing::debug;

use crate::client::LinodeClient;
use crate::resource::{Resource, Scope};
use crate::Result;

impl LinodeClient {
    /// List every event matching `options`, across all pages.
    ///
    /// # Errors
    ///
    /// Same conditions as [`LinodeClient::list_all`].
    pub async fn list_events(&self, options: &ListOptions) -> Result<Vec<Event>> {
        self.list_all(Resource::Events, Scope::Root, options).await
    }

    /// Fetch one page of events.
    ///
    /// # Errors
    ///
    /// Same conditions as [`LinodeClient::list_page`].
    pub async fn list_events_page(&self, options: &ListOptions) -> Result<Page<Event>> {
        self.list_page(Resource::Events, Scope::Root, options).await
    }

    /// Fetch a single event.
    pub async fn get_event(&self, id: EventId) -> Result<Event> {
        self.get_entity(Resource::Events, Scope::Root, id).await
    }

    /// Mark an event as read.
    pub async fn mark_event_read(&self, id: EventId) -> Result<()> {
        self.post_event_marker(id, "read").await
    }

    /// Mark an event, and every event before it, as seen.
    pub async fn mark_events_seen(&self, id: EventId) -> Result<()> {
        self.post_event_marker(id, "seen").await
    }

    async fn post_event_marker(&self, id: EventId, marker: &str) -> Result<()> {
        let path = format!("{}/{id}/{marker}", Resource::Events.endpoint()?);
        self.send(TransportRequest::post(path).with_json(json!({})))
            .await?;
        debug!(event_id = %id, marker, "marked Linode event");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{client_with, event_json, page_response, MockLinodeTransport};
    use linode_core::client::TransportResponse;
    use linode_core::types::{EventAction, EventStatus};
    use linode_core::Error;
    use reqwest::Method;

    #[tokio::test]
    async fn list_events_normalizes_created() {
        let mut transport = MockLinodeTransport::new();
        transport
            .expect_execute()
            .withf(|request| request.path == "account/events")
            .times(1)
            .returning(|_| {
                Ok(page_response(
                    1,
                    1,
                    serde_json::Value::Array(vec![event_json(
                        1,
                        "linode_boot",
                        "finished",
                        "linode",
                        json!(123),
                        "2018-01-02T03:04:05",
                    )]),
                ))
            });

        let client = client_with(transport);
        let events = client.list_events(&ListOptions::new()).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action, EventAction::LinodeBoot);
        assert_eq!(events[0].status, EventStatus::Finished);
        assert!(events[0].created.is_some());
    }

    #[tokio::test]
    async fn get_event_by_id() {
        let mut transport = MockLinodeTransport::new();
        transport
            .expect_execute()
            .withf(|request| request.method == Method::GET && request.path == "account/events/42")
            .times(1)
            .returning(|_| {
                Ok(TransportResponse::new(
                    200,
                    event_json(42, "volume_attach", "started", "volume", json!(7), "")
                        .to_string(),
                ))
            });

        let client = client_with(transport);
        let event = client.get_event(EventId::new(42)).await.unwrap();
        assert_eq!(event.id, EventId::new(42));
        assert!(event.created.is_none());
    }

    #[tokio::test]
    async fn mark_event_read_posts_marker() {
        let mut transport = MockLinodeTransport::new();
        transport
            .expect_execute()
            .withf(|request| {
                request.method == Method::POST
                    && request.path == "account/events/42/read"
                    && request.body == Some(json!({}))
            })
            .times(1)
            .returning(|_| Ok(TransportResponse::new(200, "{}")));

        let client = client_with(transport);
        client.mark_event_read(EventId::new(42)).await.unwrap();
    }

    #[tokio::test]
    async fn mark_events_seen_reports_api_error() {
        let mut transport = MockLinodeTransport::new();
        transport
            .expect_execute()
            .withf(|request| request.path == "account/events/42/seen")
            .times(1)
            .returning(|_| {
                Ok(TransportResponse::new(
                    404,
                    r#"{"errors":[{"reason":"Not found"}]}"#,
                ))
            });

        let client = client_with(transport);
        let err = client.mark_events_seen(EventId::new(42)).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, Error::Api { status: 404, .. }));
    }
}
