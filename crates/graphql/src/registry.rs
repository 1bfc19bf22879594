//! Registry of list sources served by the generic list query.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info, warn};

use scanql_core::ports::ListSource;
use scanql_core::services::PagerService;
use scanql_gmp::XmlNode;

/// Pager over any source that yields raw protocol nodes.
pub type XmlPager = PagerService<dyn ListSource<Node = XmlNode>>;

/// Pagers keyed by entity tag.
///
/// # Example
///
/// ```ignore
/// let mut registry = SourceRegistry::new();
/// registry.register(Arc::new(GmpListSource::for_entity(transport.clone(), "task")));
/// registry.register(Arc::new(GmpListSource::for_entity(transport.clone(), "report")));
///
/// let schema = build_schema(registry);
/// ```
#[derive(Default, Clone)]
pub struct SourceRegistry {
    pagers: BTreeMap<String, XmlPager>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source under its entity tag.
    ///
    /// A later registration for the same tag replaces the earlier one.
    pub fn register(&mut self, source: Arc<dyn ListSource<Node = XmlNode>>) {
        let entity = source.entity().to_string();
        info!(entity = %entity, "📦 Registering list source");

        if self
            .pagers
            .insert(entity.clone(), PagerService::new(source))
            .is_some()
        {
            warn!(entity = %entity, "List source replaced");
        }
    }

    pub fn get(&self, entity: &str) -> Option<&XmlPager> {
        self.pagers.get(entity)
    }

    /// Registered entity tags, sorted.
    pub fn entities(&self) -> Vec<String> {
        self.pagers.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.pagers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pagers.is_empty()
    }
}
