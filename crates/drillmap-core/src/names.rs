//! Region name lookup.

use std::collections::HashMap;
use std::sync::Arc;

use drillmap_model::RegionCode;

/// Resolves a (possibly zero-padded) region code to a display name.
///
/// Lookups never fail: unknown codes resolve to an empty or placeholder name.
pub trait RegionNameResolver: Send + Sync {
    fn lookup_name(&self, code: &RegionCode) -> String;
}

impl<T: RegionNameResolver + ?Sized> RegionNameResolver for &T {
    fn lookup_name(&self, code: &RegionCode) -> String {
        (**self).lookup_name(code)
    }
}

impl<T: RegionNameResolver + ?Sized> RegionNameResolver for Arc<T> {
    fn lookup_name(&self, code: &RegionCode) -> String {
        (**self).lookup_name(code)
    }
}

/// Resolver that knows no names.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNames;

impl RegionNameResolver for NoNames {
    fn lookup_name(&self, _code: &RegionCode) -> String {
        String::new()
    }
}

/// In-memory code to name table.
#[derive(Debug, Clone, Default)]
pub struct RegionNameTable {
    names: HashMap<RegionCode, String>,
    placeholder: Option<String>,
}

impl RegionNameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name returned for codes missing from the table (empty when unset).
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Add a name. The first name registered for a code wins; returns false
    /// if the code already had one.
    pub fn insert(&mut self, code: RegionCode, name: impl Into<String>) -> bool {
        match self.names.entry(code) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(name.into());
                true
            }
        }
    }

    pub fn get(&self, code: &RegionCode) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl RegionNameResolver for RegionNameTable {
    fn lookup_name(&self, code: &RegionCode) -> String {
        match self.get(code) {
            Some(name) => name.to_string(),
            None => self.placeholder.clone().unwrap_or_default(),
        }
    }
}

impl<S: Into<String>> FromIterator<(RegionCode, S)> for RegionNameTable {
    fn from_iter<I: IntoIterator<Item = (RegionCode, S)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (code, name) in iter {
            table.insert(code, name);
        }
        table
    }
}
