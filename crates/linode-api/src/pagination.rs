//! Pagination engine: gathers every page of a collection into one ordered list.
//!
//! Pages are fetched strictly one after another, starting at [`ListOptions::page`] and
//! continuing while the response reports more pages. Items keep page order, then in-page
//! order; nothing is de-duplicated. The operation is all-or-nothing: the first failing page
//! aborts it and no partial results are returned.

use linode_core::client::TransportRequest;
use linode_core::dates::NormalizeDates;
use linode_core::list::{ListOptions, Page};
use linode_core::Error;
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::Validate;

use crate::client::LinodeClient;
use crate::resource::{Resource, Scope};
use crate::Result;

impl LinodeClient {
    /// Fetch every page of `resource` and return the concatenated items.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] for out-of-range options, [`Error::ConfigError`] if
    /// the resource is not paginated or `scope` does not fit it, and the first transport, API,
    /// decode or timestamp error raised by any page.
    pub async fn list_all<T>(
        &self,
        resource: Resource,
        scope: Scope,
        options: &ListOptions,
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned + NormalizeDates,
    {
        let endpoint = paginated_endpoint(resource, scope, options)?;

        let mut items = Vec::new();
        let mut page = options.page;
        loop {
            let mut current: Page<T> = self.fetch_page(&endpoint, options, page).await?;
            items.append(&mut current.data);

            if page >= current.pages {
                break;
            }
            page += 1;
        }

        debug!(
            resource = %resource,
            last_page = page,
            items = items.len(),
            "listed Linode collection"
        );
        Ok(items)
    }

    /// Fetch the single page named by [`ListOptions::page`].
    ///
    /// # Errors
    ///
    /// Same conditions as [`LinodeClient::list_all`], for one page.
    pub async fn list_page<T>(
        &self,
        resource: Resource,
        scope: Scope,
        options: &ListOptions,
    ) -> Result<Page<T>>
    where
        T: DeserializeOwned + NormalizeDates,
    {
        let endpoint = paginated_endpoint(resource, scope, options)?;
        self.fetch_page(&endpoint, options, options.page).await
    }

    async fn fetch_page<T>(
        &self,
        endpoint: &str,
        options: &ListOptions,
        page: u32,
    ) -> Result<Page<T>>
    where
        T: DeserializeOwned + NormalizeDates,
    {
        let mut request = TransportRequest::get(endpoint).with_query(options.to_pairs(page));
        if let Some((name, value)) = options.filter_header() {
            request = request.with_header(name, value);
        }

        let current: Page<T> = self.fetch(request).await?;
        debug!(
            endpoint,
            page,
            pages = current.pages,
            items = current.data.len(),
            "fetched Linode page"
        );
        Ok(current)
    }
}

fn paginated_endpoint(resource: Resource, scope: Scope, options: &ListOptions) -> Result<String> {
    options.validate()?;

    if !resource.is_paginated() {
        return Err(Error::ConfigError(format!(
            "resource `{resource}` is not paginated"
        )));
    }

    resource.resolve(scope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Volume;
    use crate::test_support::{client_with, page_response, MockLinodeTransport};
    use linode_core::client::TransportResponse;
    use linode_core::list::Filter;
    use mockall::Sequence;
    use serde_json::json;

    fn expect_page(
        transport: &mut MockLinodeTransport,
        seq: &mut Sequence,
        path: &'static str,
        page: u32,
        response: TransportResponse,
    ) {
        let expected_page = page.to_string();
        transport
            .expect_execute()
            .withf(move |request| {
                request.path == path
                    && request.query_value("page") == Some(expected_page.as_str())
                    && request.query_value("page_size") == Some("100")
            })
            .times(1)
            .in_sequence(seq)
            .return_once(move |_| Ok(response));
    }

    #[tokio::test]
    async fn concatenates_pages_in_order() {
        let mut transport = MockLinodeTransport::new();
        let mut seq = Sequence::new();
        expect_page(
            &mut transport,
            &mut seq,
            "volumes",
            1,
            page_response(1, 3, json!([{"id": 1}, {"id": 2}])),
        );
        expect_page(
            &mut transport,
            &mut seq,
            "volumes",
            2,
            page_response(2, 3, json!([{"id": 3}, {"id": 4}])),
        );
        expect_page(
            &mut transport,
            &mut seq,
            "volumes",
            3,
            page_response(3, 3, json!([{"id": 5}])),
        );

        let client = client_with(transport);
        let volumes: Vec<Volume> = client
            .list_all(Resource::Volumes, Scope::Root, &ListOptions::new())
            .await
            .unwrap();

        let ids: Vec<u64> = volumes.iter().map(|volume| volume.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn zero_pages_yields_empty_list() {
        let mut transport = MockLinodeTransport::new();
        let mut seq = Sequence::new();
        expect_page(&mut transport, &mut seq, "volumes", 1, page_response(1, 0, json!([])));

        let client = client_with(transport);
        let volumes: Vec<Volume> = client
            .list_all(Resource::Volumes, Scope::Root, &ListOptions::new())
            .await
            .unwrap();
        assert!(volumes.is_empty());
    }

    #[tokio::test]
    async fn failure_on_later_page_discards_results() {
        let mut transport = MockLinodeTransport::new();
        let mut seq = Sequence::new();
        expect_page(
            &mut transport,
            &mut seq,
            "volumes",
            1,
            page_response(1, 3, json!([{"id": 1}])),
        );
        transport
            .expect_execute()
            .withf(|request| request.query_value("page") == Some("2"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(Error::HttpError("connection reset".to_string())));

        let client = client_with(transport);
        let err = client
            .list_all::<Volume>(Resource::Volumes, Scope::Root, &ListOptions::new())
            .await
            .unwrap_err();
        assert_eq!(err, Error::HttpError("connection reset".to_string()));
    }

    #[tokio::test]
    async fn api_error_page_surfaces_status() {
        let mut transport = MockLinodeTransport::new();
        let mut seq = Sequence::new();
        expect_page(
            &mut transport,
            &mut seq,
            "volumes",
            1,
            page_response(1, 2, json!([{"id": 1}])),
        );
        expect_page(
            &mut transport,
            &mut seq,
            "volumes",
            2,
            TransportResponse::new(500, r#"{"errors":[{"reason":"internal"}]}"#),
        );

        let client = client_with(transport);
        let err = client
            .list_all::<Volume>(Resource::Volumes, Scope::Root, &ListOptions::new())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            Error::Api {
                status: 500,
                message: "internal".to_string()
            }
        );
    }

    #[tokio::test]
    async fn parent_scope_resolves_nested_path() {
        let mut transport = MockLinodeTransport::new();
        let mut seq = Sequence::new();
        expect_page(
            &mut transport,
            &mut seq,
            "linode/instances/123/volumes",
            1,
            page_response(1, 1, json!([{"id": 9, "linode_id": 123}])),
        );

        let client = client_with(transport);
        let volumes: Vec<Volume> = client
            .list_all(Resource::InstanceVolumes, Scope::Parent(123), &ListOptions::new())
            .await
            .unwrap();
        assert!(volumes[0].is_attached());
    }

    #[tokio::test]
    async fn starts_at_requested_page() {
        let mut transport = MockLinodeTransport::new();
        let mut seq = Sequence::new();
        expect_page(
            &mut transport,
            &mut seq,
            "volumes",
            2,
            page_response(2, 3, json!([{"id": 3}])),
        );
        expect_page(
            &mut transport,
            &mut seq,
            "volumes",
            3,
            page_response(3, 3, json!([{"id": 5}])),
        );

        let client = client_with(transport);
        let volumes: Vec<Volume> = client
            .list_all(Resource::Volumes, Scope::Root, &ListOptions::new().with_page(2))
            .await
            .unwrap();
        assert_eq!(volumes.len(), 2);
    }

    #[tokio::test]
    async fn list_page_fetches_one_page_with_filter() {
        let filter = Filter::new().eq("label", "data");
        let mut transport = MockLinodeTransport::new();
        transport
            .expect_execute()
            .withf(|request| {
                request.query_value("page") == Some("2")
                    && request.query_value("page_size") == Some("25")
                    && request.header("X-Filter") == Some(r#"{"label":"data"}"#)
            })
            .times(1)
            .returning(|_| Ok(page_response(2, 5, json!([{"id": 1, "label": "data"}]))));

        let client = client_with(transport);
        let options = ListOptions::new()
            .with_page(2)
            .with_page_size(25)
            .with_filter(&filter);
        let page: Page<Volume> = client
            .list_page(Resource::Volumes, Scope::Root, &options)
            .await
            .unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.pages, 5);
        assert!(page.has_next());
    }

    #[tokio::test]
    async fn malformed_timestamp_aborts_listing() {
        let mut transport = MockLinodeTransport::new();
        let mut seq = Sequence::new();
        expect_page(
            &mut transport,
            &mut seq,
            "volumes",
            1,
            page_response(1, 1, json!([{"id": 1, "created": "2018-13-45 25:00"}])),
        );

        let client = client_with(transport);
        let err = client
            .list_all::<Volume>(Resource::Volumes, Scope::Root, &ListOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidTimestamp(_)));
    }

    #[tokio::test]
    async fn non_paginated_resource_is_rejected() {
        let client = client_with(MockLinodeTransport::new());
        let err = client
            .list_all::<Volume>(Resource::Account, Scope::Root, &ListOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[tokio::test]
    async fn scope_mismatch_is_rejected() {
        let client = client_with(MockLinodeTransport::new());
        let err = client
            .list_all::<Volume>(Resource::InstanceDisks, Scope::Root, &ListOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));

        let err = client
            .list_all::<Volume>(Resource::Volumes, Scope::Parent(1), &ListOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[tokio::test]
    async fn invalid_options_are_rejected() {
        let client = client_with(MockLinodeTransport::new());
        let options = ListOptions::new().with_page_size(10);
        let err = client
            .list_all::<Volume>(Resource::Volumes, Scope::Root, &options)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
    }
}
