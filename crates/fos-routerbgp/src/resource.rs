//! CRUD orchestration for the `router bgp` singleton.

use async_trait::async_trait;
use fos_client::{ContextParams, ObjectClient, ObjectPath};
use fos_objmap::{
    encode_attr_object, expand_object, flatten_object, retain_sensitive, FlattenOptions,
    ResourceDiff,
};
use tracing::{debug, info, instrument, warn};

use crate::error::{ResourceError, ResourceResult};
use crate::provider::ProviderDefaults;
use crate::schema::{ROUTER_BGP_FIELDS, ROUTER_BGP_PATH, ROUTER_BGP_SCHEMA};
use crate::types::{ResourceData, ATTR_DEVICE_NAME, ATTR_DEVICE_VDOM, CLIENT_RETRIES, ROUTER_BGP_ID};

/// A managed configuration object.
///
/// # Lifecycle
///
/// 1. `create()` or `import()`: the object enters management and gets an id
/// 2. `read()`: state is refreshed from the device after every write
/// 3. `update()`: only set or changed fields are sent
/// 4. `delete()`: the object leaves management and the id is cleared
///
/// A `read()` that finds no object clears the id without failing, so the
/// caller can recreate it.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Returns the type name of this resource (for logging).
    fn name(&self) -> &str;

    async fn create(&self, data: &mut ResourceData) -> ResourceResult<()>;

    async fn read(&self, data: &mut ResourceData) -> ResourceResult<()>;

    async fn update(&self, data: &mut ResourceData) -> ResourceResult<()>;

    async fn delete(&self, data: &mut ResourceData) -> ResourceResult<()>;

    /// Takes an existing object under management.
    async fn import(&self, id: &str, data: &mut ResourceData) -> ResourceResult<()>;
}

/// The `router bgp` resource.
pub struct RouterBgpResource<C: ObjectClient> {
    client: C,
    defaults: ProviderDefaults,
}

impl<C: ObjectClient> RouterBgpResource<C> {
    pub fn new(client: C, defaults: ProviderDefaults) -> Self {
        Self { client, defaults }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    fn pin_retries(&self) {
        self.client.set_retries(CLIENT_RETRIES);
        debug!(retries = self.client.retries(), "Client retries pinned");
    }

    /// Resolves device and VDOM: resource attribute, then provider default.
    ///
    /// Values taken from the provider are recorded on the resource.
    fn resolve_context(&self, data: &mut ResourceData) -> ResourceResult<ContextParams> {
        let device = match data.device_name() {
            Some(device) => device.to_string(),
            None => {
                let device = self
                    .defaults
                    .device_name
                    .clone()
                    .ok_or_else(|| ResourceError::missing_context(ATTR_DEVICE_NAME))?;
                data.set_device_name(device.clone());
                device
            }
        };

        let vdom = match data.device_vdom() {
            Some(vdom) => vdom.to_string(),
            None => {
                let vdom = self
                    .defaults
                    .device_vdom
                    .clone()
                    .ok_or_else(|| ResourceError::missing_context(ATTR_DEVICE_VDOM))?;
                data.set_device_vdom(vdom.clone());
                vdom
            }
        };

        Ok(ContextParams::new(device, vdom))
    }

    /// Sends set or changed fields, then refreshes state.
    async fn apply(&self, data: &mut ResourceData, op: &'static str) -> ResourceResult<()> {
        self.pin_retries();
        let ctx = self.resolve_context(data)?;

        let diff = ResourceDiff::new(data.config(), data.applied());
        debug!(changed = ?diff.changed_fields(), "Computed changes");
        let payload = expand_object(&ROUTER_BGP_SCHEMA, data.config(), &diff)?;
        debug!(fields = payload.len(), "Expanded payload");

        let id = data.id().unwrap_or(ROUTER_BGP_ID).to_string();
        self.client
            .update_object(&ObjectPath(ROUTER_BGP_PATH), &payload, &id, &ctx)
            .await?;

        data.set_id(ROUTER_BGP_ID);
        data.set_applied(data.config().clone());
        info!(ctx = %ctx, op, "Applied router bgp");

        self.read(data).await
    }
}

#[async_trait]
impl<C: ObjectClient> Resource for RouterBgpResource<C> {
    fn name(&self) -> &str {
        ROUTER_BGP_SCHEMA.name
    }

    #[instrument(skip(self, data))]
    async fn create(&self, data: &mut ResourceData) -> ResourceResult<()> {
        self.apply(data, "create").await
    }

    #[instrument(skip(self, data), fields(id = ?data.id(), import = data.is_import()))]
    async fn read(&self, data: &mut ResourceData) -> ResourceResult<()> {
        self.pin_retries();
        let ctx = self.resolve_context(data)?;
        let id = data.id().unwrap_or(ROUTER_BGP_ID).to_string();

        let Some(wire) = self
            .client
            .read_object(&ObjectPath(ROUTER_BGP_PATH), &id, &ctx)
            .await?
        else {
            warn!(ctx = %ctx, id = %id, "router bgp not found, removing from state");
            data.clear_id();
            return Ok(());
        };

        let opts = FlattenOptions {
            import: data.is_import(),
        };
        let mut state = flatten_object(&ROUTER_BGP_SCHEMA, &wire, &data.current(), &opts)?;
        retain_sensitive(ROUTER_BGP_FIELDS, &mut state, data.config());
        debug!(
            fields = state.len(),
            state = %encode_attr_object(&state),
            "Refreshed state"
        );
        data.set_state(state);

        Ok(())
    }

    #[instrument(skip(self, data), fields(id = ?data.id()))]
    async fn update(&self, data: &mut ResourceData) -> ResourceResult<()> {
        self.apply(data, "update").await
    }

    #[instrument(skip(self, data), fields(id = ?data.id()))]
    async fn delete(&self, data: &mut ResourceData) -> ResourceResult<()> {
        self.pin_retries();
        let ctx = self.resolve_context(data)?;
        let id = data.id().unwrap_or(ROUTER_BGP_ID).to_string();

        self.client
            .delete_object(&ObjectPath(ROUTER_BGP_PATH), &id, &ctx)
            .await?;

        data.clear_id();
        info!(ctx = %ctx, "Deleted router bgp");
        Ok(())
    }

    #[instrument(skip(self, data))]
    async fn import(&self, id: &str, data: &mut ResourceData) -> ResourceResult<()> {
        data.set_id(id);
        data.set_import(true);
        self.read(data).await?;
        if data.id().is_some() {
            info!(id, "Imported router bgp");
        }
        Ok(())
    }
}
