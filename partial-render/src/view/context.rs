//! Per-call render context.
//!
//! A view engine expects some host state around a render: who is calling, which
//! services are available, what temporary data is around. Outside of a request
//! none of that exists, so [`HostContext::synthetic`] builds the smallest value
//! that satisfies the engine. Everything here lives for exactly one render call.
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;
use tokio::io::AsyncWrite;
use uuid::Uuid;

use super::Error;

/// Type-keyed service container.
///
/// Services are registered once at startup and looked up by type.
#[derive(Default)]
pub struct Services {
    services: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Services {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service. An existing service of the same type is replaced.
    pub fn insert<T: Send + Sync + 'static>(&mut self, service: T) -> &mut Self {
        self.services.insert(TypeId::of::<T>(), Arc::new(service));
        self
    }

    /// Look up a service by type.
    pub fn get<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.services
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|service| service.downcast::<T>().ok())
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("len", &self.services.len())
            .finish()
    }
}

/// Host state a render runs in. Read-only once built.
#[derive(Debug, Clone)]
pub struct HostContext {
    trace_id: Uuid,
    services: Arc<Services>,
}

impl HostContext {
    /// Build a context that isn't tied to any real request.
    pub fn synthetic(services: Arc<Services>) -> Self {
        Self {
            trace_id: Uuid::new_v4(),
            services,
        }
    }

    /// Unique identifier of this render call. Shows up in logs.
    pub fn trace_id(&self) -> &Uuid {
        &self.trace_id
    }

    pub fn services(&self) -> &Services {
        &self.services
    }
}

/// Temporary data made available to views.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct TempData {
    values: HashMap<String, Value>,
}

impl TempData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: impl ToString, value: impl Into<Value>) -> &mut Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<HashMap<String, Value>> for TempData {
    fn from(values: HashMap<String, Value>) -> Self {
        Self { values }
    }
}

/// Source of temporary data for a render.
pub trait TempDataProvider: Send + Sync {
    fn load(&self, host: &HostContext) -> TempData;
}

/// No temporary data, ever.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTempData;

impl TempDataProvider for NoTempData {
    fn load(&self, _host: &HostContext) -> TempData {
        TempData::default()
    }
}

/// Temporary data kept in memory and handed out to every render.
#[derive(Debug, Default)]
pub struct MemoryTempData {
    values: Mutex<TempData>,
}

impl MemoryTempData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, key: impl ToString, value: impl Into<Value>) {
        self.values.lock().set(key, value);
    }

    pub fn clear(&self) {
        *self.values.lock() = TempData::default();
    }
}

impl TempDataProvider for MemoryTempData {
    fn load(&self, _host: &HostContext) -> TempData {
        self.values.lock().clone()
    }
}

/// The model passed to the view.
#[derive(Debug, Clone, Default)]
pub struct ViewData {
    model: Value,
}

impl ViewData {
    /// Serialize the model. `None` becomes `null`.
    pub fn new<T: Serialize + ?Sized>(model: Option<&T>) -> Result<Self, Error> {
        let model = match model {
            Some(model) => serde_json::to_value(model)?,
            None => Value::Null,
        };

        Ok(Self { model })
    }

    pub fn model(&self) -> &Value {
        &self.model
    }
}

/// Everything a view engine needs to execute one view.
pub struct RenderContext<'a> {
    host: HostContext,
    temp_data: TempData,
    view_data: ViewData,
    sink: &'a mut (dyn AsyncWrite + Unpin + Send),
}

impl<'a> RenderContext<'a> {
    pub fn new(
        host: HostContext,
        temp_data: TempData,
        view_data: ViewData,
        sink: &'a mut (dyn AsyncWrite + Unpin + Send),
    ) -> Self {
        Self {
            host,
            temp_data,
            view_data,
            sink,
        }
    }

    pub fn host(&self) -> &HostContext {
        &self.host
    }

    pub fn temp_data(&self) -> &TempData {
        &self.temp_data
    }

    pub fn model(&self) -> &Value {
        self.view_data.model()
    }

    /// Where the output goes.
    pub fn sink(&mut self) -> &mut (dyn AsyncWrite + Unpin + Send) {
        &mut *self.sink
    }
}

impl std::fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("host", &self.host)
            .field("temp_data", &self.temp_data)
            .field("view_data", &self.view_data)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    struct SiteName(&'static str);

    #[test]
    fn test_services() {
        let mut services = Services::new();
        services.insert(SiteName("partial"));

        assert_eq!(services.len(), 1);
        assert_eq!(
            services.get::<SiteName>().as_deref(),
            Some(&SiteName("partial"))
        );
        assert!(services.get::<String>().is_none());
    }

    #[test]
    fn test_synthetic_context() {
        let services = Arc::new(Services::new());
        let a = HostContext::synthetic(services.clone());
        let b = HostContext::synthetic(services);

        assert_ne!(a.trace_id(), b.trace_id());
        assert!(a.services().is_empty());
    }

    #[test]
    fn test_memory_temp_data() {
        let provider = MemoryTempData::new();
        let host = HostContext::synthetic(Arc::new(Services::new()));

        assert!(provider.load(&host).is_empty());

        provider.set("notice", "saved");
        assert_eq!(provider.load(&host).get("notice"), Some(&json!("saved")));

        provider.clear();
        assert!(provider.load(&host).is_empty());
        assert!(NoTempData.load(&host).is_empty());
    }

    #[test]
    fn test_view_data() -> Result<(), Error> {
        assert_eq!(ViewData::new(None::<&()>)?.model(), &Value::Null);
        assert_eq!(
            ViewData::new(Some(&[("name", "Lev")]))?.model(),
            &json!([["name", "Lev"]])
        );

        Ok(())
    }
}
