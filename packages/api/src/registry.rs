//! Memoized resolution of symbolic API names to callable paths.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Location and version range of one API, as reported by the discovery
/// endpoint (`SYNO.API.Info`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiDescriptor {
    /// Path relative to the `webapi/` gateway prefix, e.g. `entry.cgi`.
    pub path: String,
    #[serde(rename = "minVersion")]
    pub min_version: u32,
    #[serde(rename = "maxVersion")]
    pub max_version: u32,
}

/// Name -> descriptor cache with single-flight discovery.
///
/// Descriptors never expire: a live session is treated as authoritative
/// for its duration, so a name is discovered at most once per client.
/// Each name has its own slot; the slot's lock is held across the
/// discovery fetch, so concurrent first-time resolutions of one name
/// collapse into a single remote call and all callers observe the same
/// descriptor. Resolutions of distinct names do not serialize against
/// each other.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    slots: Mutex<HashMap<String, Arc<Mutex<Option<ApiDescriptor>>>>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Resolve `name`, calling `fetch` for the discovery round trip if the
    /// name has not been resolved before.
    pub(crate) fn resolve_with<F>(&self, name: &str, fetch: F) -> Result<ApiDescriptor, Error>
    where
        F: FnOnce(&str) -> Result<HashMap<String, ApiDescriptor>, Error>,
    {
        let slot = {
            let mut slots = self.slots.lock().expect("registry lock poisoned");
            Arc::clone(slots.entry(name.to_string()).or_default())
        };

        let mut entry = slot.lock().expect("registry slot poisoned");
        if let Some(descriptor) = entry.as_ref() {
            return Ok(descriptor.clone());
        }

        let mut descriptors = fetch(name)?;
        let descriptor = descriptors
            .remove(name)
            .ok_or_else(|| Error::UnknownApi {
                name: name.to_string(),
            })?;
        *entry = Some(descriptor.clone());
        Ok(descriptor)
    }
}
