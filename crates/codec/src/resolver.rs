//! Two-tier type resolution.
//!
//! Encoded values carry a type descriptor (a short dotted name such as
//! `"orders.OrderCreated"`). Reconstructing the value means looking the
//! descriptor up in a [`TypeCatalog`]: first the designated module/plugin
//! boundary the record's producer belongs to, then the ambient catalog of
//! built-in descriptors. The fallback matters because a record may be
//! written by one module and read back in a process where that module is
//! loaded under a different isolation boundary; strict single-catalog
//! resolution would make such records permanently unreadable.
//!
//! A catalog miss is a `None`, not an error; only exhausting every catalog
//! is a resolution failure. The resolver never mutates catalogs.

use crate::object::{
    DESC_ARRAY, DESC_BOOL, DESC_BYTES, DESC_FLOAT, DESC_INT, DESC_NULL, DESC_STRING,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;
use txnlog_core::{Result as CoreResult, Value};

/// Decoder for one type descriptor: encoded body bytes in, value out.
pub type DecodeFn = Arc<dyn Fn(&[u8]) -> CoreResult<Value> + Send + Sync>;

/// One type-resolution boundary.
///
/// Implementations must be `Send + Sync`: a single resolver is shared by
/// codec instances invoked concurrently on independent buffers.
pub trait TypeCatalog: Send + Sync {
    /// Name of this boundary, for diagnostics.
    fn name(&self) -> &str;

    /// Look up a decoder for `descriptor`. `None` means "not mine", which
    /// sends the resolver to the next boundary in order.
    fn try_resolve(&self, descriptor: &str) -> Option<DecodeFn>;
}

/// Resolution failure after every catalog was consulted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// No catalog recognizes the descriptor.
    #[error("type descriptor not resolvable in any catalog: {0}")]
    UnknownDescriptor(String),
}

/// HashMap-backed catalog representing one plugin/module boundary.
pub struct ModuleCatalog {
    name: String,
    decoders: HashMap<String, DecodeFn>,
}

impl ModuleCatalog {
    /// Create an empty catalog for the named module boundary.
    pub fn new(name: impl Into<String>) -> Self {
        ModuleCatalog {
            name: name.into(),
            decoders: HashMap::new(),
        }
    }

    /// Register a decoder for a type descriptor. Replaces any previous
    /// registration for the same descriptor.
    pub fn register(
        &mut self,
        descriptor: impl Into<String>,
        decode: impl Fn(&[u8]) -> CoreResult<Value> + Send + Sync + 'static,
    ) {
        self.decoders.insert(descriptor.into(), Arc::new(decode));
    }

    /// Whether a descriptor is registered with this boundary.
    pub fn is_registered(&self, descriptor: &str) -> bool {
        self.decoders.contains_key(descriptor)
    }
}

impl TypeCatalog for ModuleCatalog {
    fn name(&self) -> &str {
        &self.name
    }

    fn try_resolve(&self, descriptor: &str) -> Option<DecodeFn> {
        self.decoders.get(descriptor).cloned()
    }
}

/// The ambient resolution context: built-in `core.*` descriptors whose
/// bodies are bincode-encoded primitive data.
pub struct AmbientCatalog;

impl TypeCatalog for AmbientCatalog {
    fn name(&self) -> &str {
        "ambient"
    }

    fn try_resolve(&self, descriptor: &str) -> Option<DecodeFn> {
        let decode: DecodeFn = match descriptor {
            DESC_NULL => Arc::new(|_body| Ok(Value::Null)),
            DESC_BOOL => Arc::new(|body| Ok(Value::Bool(bincode::deserialize(body)?))),
            DESC_INT => Arc::new(|body| Ok(Value::Int(bincode::deserialize(body)?))),
            DESC_FLOAT => Arc::new(|body| Ok(Value::Float(bincode::deserialize(body)?))),
            DESC_STRING => Arc::new(|body| Ok(Value::String(bincode::deserialize(body)?))),
            DESC_BYTES => Arc::new(|body| Ok(Value::Bytes(bincode::deserialize(body)?))),
            // Arrays are framed structurally by the object codec and never
            // reach catalog lookup.
            DESC_ARRAY => return None,
            _ => return None,
        };
        Some(decode)
    }
}

/// Ordered catalog chain: the producing module's boundary first, the
/// ambient context last.
#[derive(Clone)]
pub struct TypeResolver {
    catalogs: Vec<Arc<dyn TypeCatalog>>,
}

impl TypeResolver {
    /// Resolver with only the ambient context.
    pub fn ambient() -> Self {
        TypeResolver {
            catalogs: vec![Arc::new(AmbientCatalog)],
        }
    }

    /// Resolver that consults `module` first, then the ambient context.
    pub fn with_module(module: Arc<dyn TypeCatalog>) -> Self {
        TypeResolver {
            catalogs: vec![module, Arc::new(AmbientCatalog)],
        }
    }

    /// Resolve a descriptor to its decoder, trying each boundary in order.
    pub fn resolve(&self, descriptor: &str) -> Result<DecodeFn, ResolveError> {
        for (idx, catalog) in self.catalogs.iter().enumerate() {
            if let Some(decode) = catalog.try_resolve(descriptor) {
                if idx > 0 {
                    trace!(
                        descriptor,
                        catalog = catalog.name(),
                        "descriptor resolved by fallback catalog"
                    );
                }
                return Ok(decode);
            }
        }
        Err(ResolveError::UnknownDescriptor(descriptor.to_string()))
    }
}

impl Default for TypeResolver {
    fn default() -> Self {
        Self::ambient()
    }
}
