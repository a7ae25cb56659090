// src/api/capability.rs
//! Optional per-request-type behaviors, resolved once at startup.
//!
//! The vendor's request shapes agree on almost nothing: some take a
//! language hint, some page, some do neither. Rather than a `match` per
//! call site, every optional behavior is an adapter closure registered
//! per concrete type in a [`CapabilityRegistry`]. The generic engine
//! looks bindings up by `TypeId`; a capability a type does not support
//! is simply `None` and every apply call on it is a no-op.

use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::any::{Any, TypeId};
use std::sync::Arc;

type ReadHintFn = Arc<dyn Fn(&dyn Any) -> Option<String> + Send + Sync>;
type ApplyStrFn = Arc<dyn Fn(&mut dyn Any, &str) + Send + Sync>;
type ApplyPageSizeFn = Arc<dyn Fn(&mut dyn Any, u32) + Send + Sync>;
type ApplyTokenFn = Arc<dyn Fn(&mut dyn Any, Option<&str>) + Send + Sync>;

/// The optional behaviors one request/domain type pair supports.
///
/// Builder methods take plain typed functions and wrap them in
/// type-erased adapters; the downcast happens inside the adapter, so a
/// value of the wrong type degrades to a no-op instead of a panic.
#[derive(Clone, Default)]
pub struct CapabilityBinding {
    read_language_hint: Option<ReadHintFn>,
    set_language_hint: Option<ApplyStrFn>,
    set_page_size: Option<ApplyPageSizeFn>,
    set_page_token: Option<ApplyTokenFn>,
    set_parent_id: Option<ApplyStrFn>,
}

impl CapabilityBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the request's language hint, when the request type has one.
    pub fn language_hint_from<R: Any>(mut self, f: fn(&R) -> Option<String>) -> Self {
        self.read_language_hint = Some(Arc::new(move |request: &dyn Any| {
            request.downcast_ref::<R>().and_then(f)
        }));
        self
    }

    /// Writes a language hint onto a produced domain item.
    pub fn language_hint_into<D: Any>(mut self, f: fn(&mut D, &str)) -> Self {
        self.set_language_hint = Some(Arc::new(move |item: &mut dyn Any, hint: &str| {
            if let Some(item) = item.downcast_mut::<D>() {
                f(item, hint);
            }
        }));
        self
    }

    /// Sets the requested page size on the request.
    pub fn page_size_into<R: Any>(mut self, f: fn(&mut R, u32)) -> Self {
        self.set_page_size = Some(Arc::new(move |request: &mut dyn Any, size: u32| {
            if let Some(request) = request.downcast_mut::<R>() {
                f(request, size);
            }
        }));
        self
    }

    /// Sets or clears the page cursor on the request.
    pub fn page_token_into<R: Any>(mut self, f: fn(&mut R, Option<String>)) -> Self {
        self.set_page_token = Some(Arc::new(move |request: &mut dyn Any, token: Option<&str>| {
            if let Some(request) = request.downcast_mut::<R>() {
                f(request, token.map(str::to_owned));
            }
        }));
        self
    }

    /// Writes a request-wide parent identifier (the page etag) onto a
    /// produced domain item.
    pub fn parent_id_into<D: Any>(mut self, f: fn(&mut D, &str)) -> Self {
        self.set_parent_id = Some(Arc::new(move |item: &mut dyn Any, parent: &str| {
            if let Some(item) = item.downcast_mut::<D>() {
                f(item, parent);
            }
        }));
        self
    }

    // -- accessors used by the engine; all total, all no-ops when unsupported

    pub fn read_language_hint(&self, request: &dyn Any) -> Option<String> {
        self.read_language_hint.as_ref().and_then(|f| f(request))
    }

    /// Returns whether the capability existed and was applied.
    pub fn apply_language_hint(&self, item: &mut dyn Any, hint: &str) -> bool {
        match &self.set_language_hint {
            Some(f) => {
                f(item, hint);
                true
            }
            None => false,
        }
    }

    pub fn apply_page_size(&self, request: &mut dyn Any, size: u32) -> bool {
        match &self.set_page_size {
            Some(f) => {
                f(request, size);
                true
            }
            None => false,
        }
    }

    pub fn apply_page_token(&self, request: &mut dyn Any, token: Option<&str>) -> bool {
        match &self.set_page_token {
            Some(f) => {
                f(request, token);
                true
            }
            None => false,
        }
    }

    pub fn apply_parent_id(&self, item: &mut dyn Any, parent: &str) -> bool {
        match &self.set_parent_id {
            Some(f) => {
                f(item, parent);
                true
            }
            None => false,
        }
    }

    /// Whether this request type can advance a page cursor at all.
    pub fn supports_paging(&self) -> bool {
        self.set_page_token.is_some()
    }
}

static UNBOUND: Lazy<Arc<CapabilityBinding>> =
    Lazy::new(|| Arc::new(CapabilityBinding::default()));

/// Type-keyed table of capability bindings.
///
/// Populated once at startup, read-mostly afterwards; lookups are cheap
/// map reads safe under concurrent logical requests. An instance is
/// passed where needed rather than living in process-global state, so
/// tests can run against a fake registry.
#[derive(Default)]
pub struct CapabilityRegistry {
    bindings: DashMap<TypeId, Arc<CapabilityBinding>>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the binding for a concrete request type, replacing any
    /// previous registration.
    pub fn register<R: Any>(&self, binding: CapabilityBinding) {
        self.bindings.insert(TypeId::of::<R>(), Arc::new(binding));
    }

    /// Resolves the binding for a request type.
    ///
    /// An unregistered type resolves to the empty binding: every
    /// capability reads as unsupported, and the engine degrades to
    /// fetch-and-convert with no optional behavior.
    pub fn binding_for<R: Any>(&self) -> Arc<CapabilityBinding> {
        self.bindings
            .get(&TypeId::of::<R>())
            .map(|entry| Arc::clone(entry.value()))
            .unwrap_or_else(|| Arc::clone(&UNBOUND))
    }
}
