//! Asynchronous Linode API client implementation.

use std::fmt;
use std::sync::Arc;

use linode_core::client::{ClientConfig, HttpTransportBuilder, Transport, TransportRequest};
use linode_core::config::LinodeConfig;
use linode_core::dates::NormalizeDates;
use linode_core::ids::{
    ConfigId, DiskId, DomainId, DomainRecordId, InstanceId, InvoiceId, LongviewClientId,
    NodeBalancerConfigId, NodeBalancerId, NodeBalancerNodeId, SnapshotId, StackscriptId, TicketId,
    VolumeId,
};
use linode_core::list::ListOptions;
use linode_core::Error;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::models::{
    Account, Domain, DomainRecord, Image, Instance, InstanceBackupsResponse, InstanceConfig,
    InstanceDisk, InstanceIp, InstanceIpAddressResponse, InstanceSnapshot, Invoice, InvoiceItem,
    Ipv6Range, LinodeKernel, LinodeType, LongviewClient, LongviewSubscription, NodeBalancer,
    NodeBalancerConfig, NodeBalancerNode, Notification, Region, Stackscript, Ticket, Volume,
};
use crate::resource::{Resource, Scope};
use crate::Result;

/// Builder for [`LinodeClient`].
#[derive(Clone)]
pub struct LinodeClientBuilder {
    config: LinodeConfig,
    http: Option<ClientConfig>,
    transport: Option<Arc<dyn Transport>>,
}

impl LinodeClientBuilder {
    /// Create a builder targeting the public API without a token.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(LinodeConfig::new())
    }

    /// Create a builder from an explicit configuration.
    #[must_use]
    pub fn from_config(config: LinodeConfig) -> Self {
        Self {
            config,
            http: None,
            transport: None,
        }
    }

    /// Create a builder from `LINODE_TOKEN` and `LINODE_DEBUG`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_config(LinodeConfig::from_env())
    }

    /// Set the personal access token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.config = self.config.with_token(token);
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config = self.config.with_user_agent(user_agent);
        self
    }

    /// Tune the HTTP client beyond what [`LinodeConfig`] describes.
    ///
    /// Pool and compression settings come from `config`. The request timeout always comes
    /// from [`LinodeConfig::request_timeout_secs`], and request logging stays on when
    /// [`LinodeConfig::debug`] is set.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.http = Some(config);
        self
    }

    /// Use a caller supplied transport instead of building an HTTP one.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client cannot be created.
    pub fn build(self) -> Result<LinodeClient> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let http = self.http_config();
                let builder =
                    HttpTransportBuilder::from_config(&self.config)?.with_http_config(http);
                Arc::new(builder.build()?) as Arc<dyn Transport>
            }
        };

        Ok(LinodeClient { transport })
    }

    fn http_config(&self) -> ClientConfig {
        let http = self.http.clone().unwrap_or_default();
        let enable_logging = http.enable_logging || self.config.debug;
        http.with_timeout(self.config.timeout())
            .with_logging(enable_logging)
    }
}

impl Default for LinodeClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LinodeClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinodeClientBuilder")
            .field("config", &self.config)
            .field("http", &self.http)
            .field("custom_transport", &self.transport.is_some())
            .finish()
    }
}

/// Asynchronous Linode API client.
///
/// Cheap to clone; clones share the underlying transport.
#[derive(Clone)]
pub struct LinodeClient {
    transport: Arc<dyn Transport>,
}

impl LinodeClient {
    /// Construct a client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: &LinodeConfig) -> Result<Self> {
        LinodeClientBuilder::from_config(config.clone()).build()
    }

    /// Construct a client from `LINODE_TOKEN` and `LINODE_DEBUG`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn from_env() -> Result<Self> {
        LinodeClientBuilder::from_env().build()
    }

    /// Construct a client over an existing transport.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Start building a client.
    #[must_use]
    pub fn builder() -> LinodeClientBuilder {
        LinodeClientBuilder::new()
    }

    /// Fetch a single entity of `resource` by ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if `scope` does not fit the resource, or any transport,
    /// API, decode or timestamp error.
    pub async fn get_entity<T>(
        &self,
        resource: Resource,
        scope: Scope,
        id: impl fmt::Display,
    ) -> Result<T>
    where
        T: DeserializeOwned + NormalizeDates,
    {
        let path = format!("{}/{id}", resource.resolve(scope)?);
        self.fetch(TransportRequest::get(path)).await
    }

    /// Fetch the single object served at the resource endpoint itself.
    ///
    /// Used for resources whose collection endpoint returns one object rather than pages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if `scope` does not fit the resource, or any transport,
    /// API, decode or timestamp error.
    pub async fn get_resource<T>(&self, resource: Resource, scope: Scope) -> Result<T>
    where
        T: DeserializeOwned + NormalizeDates,
    {
        let path = resource.resolve(scope)?;
        self.fetch(TransportRequest::get(path)).await
    }

    // Instances

    /// List all instances.
    pub async fn list_instances(&self, options: &ListOptions) -> Result<Vec<Instance>> {
        self.list_all(Resource::Instances, Scope::Root, options).await
    }

    /// Fetch a single instance.
    pub async fn get_instance(&self, id: InstanceId) -> Result<Instance> {
        self.get_entity(Resource::Instances, Scope::Root, id).await
    }

    /// List the disks of an instance.
    pub async fn list_instance_disks(
        &self,
        instance: InstanceId,
        options: &ListOptions,
    ) -> Result<Vec<InstanceDisk>> {
        self.list_all(Resource::InstanceDisks, Scope::Parent(instance.get()), options)
            .await
    }

    /// Fetch a single disk of an instance.
    pub async fn get_instance_disk(
        &self,
        instance: InstanceId,
        disk: DiskId,
    ) -> Result<InstanceDisk> {
        self.get_entity(Resource::InstanceDisks, Scope::Parent(instance.get()), disk)
            .await
    }

    /// List the configuration profiles of an instance.
    pub async fn list_instance_configs(
        &self,
        instance: InstanceId,
        options: &ListOptions,
    ) -> Result<Vec<InstanceConfig>> {
        self.list_all(Resource::InstanceConfigs, Scope::Parent(instance.get()), options)
            .await
    }

    /// Fetch a single configuration profile of an instance.
    pub async fn get_instance_config(
        &self,
        instance: InstanceId,
        config: ConfigId,
    ) -> Result<InstanceConfig> {
        self.get_entity(Resource::InstanceConfigs, Scope::Parent(instance.get()), config)
            .await
    }

    /// Fetch the automatic backups and manual snapshot of an instance.
    pub async fn get_instance_backups(
        &self,
        instance: InstanceId,
    ) -> Result<InstanceBackupsResponse> {
        self.get_resource(Resource::InstanceSnapshots, Scope::Parent(instance.get()))
            .await
    }

    /// Fetch a single backup or snapshot of an instance.
    pub async fn get_instance_snapshot(
        &self,
        instance: InstanceId,
        snapshot: SnapshotId,
    ) -> Result<InstanceSnapshot> {
        self.get_entity(Resource::InstanceSnapshots, Scope::Parent(instance.get()), snapshot)
            .await
    }

    /// Fetch every address assigned to an instance.
    pub async fn get_instance_ip_addresses(
        &self,
        instance: InstanceId,
    ) -> Result<InstanceIpAddressResponse> {
        self.get_resource(Resource::InstanceIps, Scope::Parent(instance.get()))
            .await
    }

    /// Fetch a single address assigned to an instance.
    pub async fn get_instance_ip_address(
        &self,
        instance: InstanceId,
        address: &str,
    ) -> Result<InstanceIp> {
        self.get_entity(Resource::InstanceIps, Scope::Parent(instance.get()), address)
            .await
    }

    /// List the volumes attached to an instance.
    pub async fn list_instance_volumes(
        &self,
        instance: InstanceId,
        options: &ListOptions,
    ) -> Result<Vec<Volume>> {
        self.list_all(Resource::InstanceVolumes, Scope::Parent(instance.get()), options)
            .await
    }

    // Networking

    /// List every IP address on the account.
    pub async fn list_ip_addresses(&self, options: &ListOptions) -> Result<Vec<InstanceIp>> {
        self.list_all(Resource::IpAddresses, Scope::Root, options).await
    }

    /// Fetch a single IP address.
    pub async fn get_ip_address(&self, address: &str) -> Result<InstanceIp> {
        self.get_entity(Resource::IpAddresses, Scope::Root, address).await
    }

    /// List IPv6 pools.
    pub async fn list_ipv6_pools(&self, options: &ListOptions) -> Result<Vec<Ipv6Range>> {
        self.list_all(Resource::Ipv6Pools, Scope::Root, options).await
    }

    /// List IPv6 ranges.
    pub async fn list_ipv6_ranges(&self, options: &ListOptions) -> Result<Vec<Ipv6Range>> {
        self.list_all(Resource::Ipv6Ranges, Scope::Root, options).await
    }

    /// Fetch a single IPv6 range.
    pub async fn get_ipv6_range(&self, range: &str) -> Result<Ipv6Range> {
        self.get_entity(Resource::Ipv6Ranges, Scope::Root, range).await
    }

    // Catalog

    /// List regions.
    pub async fn list_regions(&self, options: &ListOptions) -> Result<Vec<Region>> {
        self.list_all(Resource::Regions, Scope::Root, options).await
    }

    /// Fetch a single region.
    pub async fn get_region(&self, id: &str) -> Result<Region> {
        self.get_entity(Resource::Regions, Scope::Root, id).await
    }

    /// List kernels.
    pub async fn list_kernels(&self, options: &ListOptions) -> Result<Vec<LinodeKernel>> {
        self.list_all(Resource::Kernels, Scope::Root, options).await
    }

    /// Fetch a single kernel, e.g. `linode/latest-64bit`.
    pub async fn get_kernel(&self, id: &str) -> Result<LinodeKernel> {
        self.get_entity(Resource::Kernels, Scope::Root, id).await
    }

    /// List instance plans.
    pub async fn list_types(&self, options: &ListOptions) -> Result<Vec<LinodeType>> {
        self.list_all(Resource::Types, Scope::Root, options).await
    }

    /// Fetch a single instance plan.
    pub async fn get_type(&self, id: &str) -> Result<LinodeType> {
        self.get_entity(Resource::Types, Scope::Root, id).await
    }

    /// List images.
    pub async fn list_images(&self, options: &ListOptions) -> Result<Vec<Image>> {
        self.list_all(Resource::Images, Scope::Root, options).await
    }

    /// Fetch a single image, e.g. `linode/debian9`.
    pub async fn get_image(&self, id: &str) -> Result<Image> {
        self.get_entity(Resource::Images, Scope::Root, id).await
    }

    /// List StackScripts.
    pub async fn list_stackscripts(&self, options: &ListOptions) -> Result<Vec<Stackscript>> {
        self.list_all(Resource::Stackscripts, Scope::Root, options).await
    }

    /// Fetch a single StackScript.
    pub async fn get_stackscript(&self, id: StackscriptId) -> Result<Stackscript> {
        self.get_entity(Resource::Stackscripts, Scope::Root, id).await
    }

    // Volumes

    /// List volumes.
    pub async fn list_volumes(&self, options: &ListOptions) -> Result<Vec<Volume>> {
        self.list_all(Resource::Volumes, Scope::Root, options).await
    }

    /// Fetch a single volume.
    pub async fn get_volume(&self, id: VolumeId) -> Result<Volume> {
        self.get_entity(Resource::Volumes, Scope::Root, id).await
    }

    // Domains

    /// List domains.
    pub async fn list_domains(&self, options: &ListOptions) -> Result<Vec<Domain>> {
        self.list_all(Resource::Domains, Scope::Root, options).await
    }

    /// Fetch a single domain.
    pub async fn get_domain(&self, id: DomainId) -> Result<Domain> {
        self.get_entity(Resource::Domains, Scope::Root, id).await
    }

    /// List the records of a domain.
    pub async fn list_domain_records(
        &self,
        domain: DomainId,
        options: &ListOptions,
    ) -> Result<Vec<DomainRecord>> {
        self.list_all(Resource::DomainRecords, Scope::Parent(domain.get()), options)
            .await
    }

    /// Fetch a single record of a domain.
    pub async fn get_domain_record(
        &self,
        domain: DomainId,
        record: DomainRecordId,
    ) -> Result<DomainRecord> {
        self.get_entity(Resource::DomainRecords, Scope::Parent(domain.get()), record)
            .await
    }

    // NodeBalancers

    /// List NodeBalancers.
    pub async fn list_nodebalancers(&self, options: &ListOptions) -> Result<Vec<NodeBalancer>> {
        self.list_all(Resource::NodeBalancers, Scope::Root, options).await
    }

    /// Fetch a single NodeBalancer.
    pub async fn get_nodebalancer(&self, id: NodeBalancerId) -> Result<NodeBalancer> {
        self.get_entity(Resource::NodeBalancers, Scope::Root, id).await
    }

    /// List the port configurations of a NodeBalancer.
    pub async fn list_nodebalancer_configs(
        &self,
        nodebalancer: NodeBalancerId,
        options: &ListOptions,
    ) -> Result<Vec<NodeBalancerConfig>> {
        self.list_all(
            Resource::NodeBalancerConfigs,
            Scope::Parent(nodebalancer.get()),
            options,
        )
        .await
    }

    /// Fetch a single port configuration of a NodeBalancer.
    pub async fn get_nodebalancer_config(
        &self,
        nodebalancer: NodeBalancerId,
        config: NodeBalancerConfigId,
    ) -> Result<NodeBalancerConfig> {
        self.get_entity(
            Resource::NodeBalancerConfigs,
            Scope::Parent(nodebalancer.get()),
            config,
        )
        .await
    }

    /// List the backend nodes of a NodeBalancer port configuration.
    pub async fn list_nodebalancer_nodes(
        &self,
        nodebalancer: NodeBalancerId,
        config: NodeBalancerConfigId,
        options: &ListOptions,
    ) -> Result<Vec<NodeBalancerNode>> {
        self.list_all(
            Resource::NodeBalancerNodes,
            Scope::Nested(nodebalancer.get(), config.get()),
            options,
        )
        .await
    }

    /// Fetch a single backend node of a NodeBalancer port configuration.
    pub async fn get_nodebalancer_node(
        &self,
        nodebalancer: NodeBalancerId,
        config: NodeBalancerConfigId,
        node: NodeBalancerNodeId,
    ) -> Result<NodeBalancerNode> {
        self.get_entity(
            Resource::NodeBalancerNodes,
            Scope::Nested(nodebalancer.get(), config.get()),
            node,
        )
        .await
    }

    // Longview

    /// List Longview clients.
    pub async fn list_longview_clients(
        &self,
        options: &ListOptions,
    ) -> Result<Vec<LongviewClient>> {
        self.list_all(Resource::LongviewClients, Scope::Root, options).await
    }

    /// Fetch a single Longview client.
    pub async fn get_longview_client(&self, id: LongviewClientId) -> Result<LongviewClient> {
        self.get_entity(Resource::LongviewClients, Scope::Root, id).await
    }

    /// List Longview subscription tiers.
    pub async fn list_longview_subscriptions(
        &self,
        options: &ListOptions,
    ) -> Result<Vec<LongviewSubscription>> {
        self.list_all(Resource::LongviewSubscriptions, Scope::Root, options)
            .await
    }

    /// Fetch a single Longview subscription tier, e.g. `longview-10`.
    pub async fn get_longview_subscription(&self, id: &str) -> Result<LongviewSubscription> {
        self.get_entity(Resource::LongviewSubscriptions, Scope::Root, id).await
    }

    // Support

    /// List support tickets.
    pub async fn list_tickets(&self, options: &ListOptions) -> Result<Vec<Ticket>> {
        self.list_all(Resource::Tickets, Scope::Root, options).await
    }

    /// Fetch a single support ticket.
    pub async fn get_ticket(&self, id: TicketId) -> Result<Ticket> {
        self.get_entity(Resource::Tickets, Scope::Root, id).await
    }

    // Account

    /// Fetch the account details.
    pub async fn get_account(&self) -> Result<Account> {
        self.get_resource(Resource::Account, Scope::Root).await
    }

    /// List invoices.
    pub async fn list_invoices(&self, options: &ListOptions) -> Result<Vec<Invoice>> {
        self.list_all(Resource::Invoices, Scope::Root, options).await
    }

    /// Fetch a single invoice.
    pub async fn get_invoice(&self, id: InvoiceId) -> Result<Invoice> {
        self.get_entity(Resource::Invoices, Scope::Root, id).await
    }

    /// List the line items of an invoice.
    pub async fn list_invoice_items(
        &self,
        invoice: InvoiceId,
        options: &ListOptions,
    ) -> Result<Vec<InvoiceItem>> {
        self.list_all(Resource::InvoiceItems, Scope::Parent(invoice.get()), options)
            .await
    }

    /// List account notifications.
    pub async fn list_notifications(&self, options: &ListOptions) -> Result<Vec<Notification>> {
        self.list_all(Resource::Notifications, Scope::Root, options).await
    }

    /// Execute a request and return the body of a successful response.
    pub(crate) async fn send(&self, request: TransportRequest) -> Result<String> {
        let method = request.method.clone();
        let path = request.path.clone();

        let response = self.transport.execute(request).await?;
        if response.is_success() {
            return Ok(response.body);
        }

        let err = Error::from_api_response(response.status, &response.body);
        warn!(
            method = %method,
            path = %path,
            status = response.status,
            error = %err,
            "Linode API request failed"
        );
        Err(err)
    }

    /// Execute a request, decode the body and normalize its timestamps.
    pub(crate) async fn fetch<T>(&self, request: TransportRequest) -> Result<T>
    where
        T: DeserializeOwned + NormalizeDates,
    {
        let path = request.path.clone();
        let body = self.send(request).await?;

        let mut value: T = serde_json::from_str(&body).map_err(|err| {
            Error::DecodeError(format!("Failed to parse Linode response for `{path}`: {err}"))
        })?;
        value.normalize_dates()?;
        Ok(value)
    }
}

impl fmt::Debug for LinodeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinodeClient").finish_non_exhaustive()
    }
}
