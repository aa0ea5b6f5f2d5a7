//! Store Hash data structure

use ahash::AHashMap;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StoreHash {
    fields: AHashMap<String, String>,
}

impl StoreHash {
    pub fn new() -> Self {
        StoreHash {
            fields: AHashMap::new(),
        }
    }

    /// Returns true if the field was created, false if it was overwritten.
    pub fn set(&mut self, field: String, value: String) -> bool {
        self.fields.insert(field, value).is_none()
    }

    pub fn get(&self, field: &str) -> Option<&String> {
        self.fields.get(field)
    }

    pub fn delete(&mut self, field: &str) -> bool {
        self.fields.remove(field).is_some()
    }

    pub fn exists(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }

    pub fn values(&self) -> Vec<String> {
        self.fields.values().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.fields.iter()
    }
}
