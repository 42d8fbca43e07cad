use std::collections::BTreeMap;
use std::sync::RwLock;

use siteledger_core::Entity;

use super::{StoreError, Table};

/// In-memory table for tests/dev.
#[derive(Debug)]
pub struct InMemoryTable<V: Entity> {
    inner: RwLock<BTreeMap<V::Id, V>>,
}

impl<V: Entity> InMemoryTable<V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<V: Entity> Default for InMemoryTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Table<V> for InMemoryTable<V>
where
    V: Entity + Clone + Send + Sync + 'static,
    V::Id: Send + Sync,
{
    fn insert(&self, row: V) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned(V::NAME))?;
        let id = *row.id();
        if map.contains_key(&id) {
            return Err(StoreError::duplicate::<V>(&id));
        }
        map.insert(id, row);
        Ok(())
    }

    fn get(&self, id: &V::Id) -> Result<Option<V>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned(V::NAME))?;
        Ok(map.get(id).cloned())
    }

    fn update(&self, row: V) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned(V::NAME))?;
        match map.get_mut(row.id()) {
            Some(slot) => {
                *slot = row;
                Ok(())
            }
            None => Err(StoreError::missing::<V>(row.id())),
        }
    }

    fn delete(&self, id: &V::Id) -> Result<V, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned(V::NAME))?;
        map.remove(id).ok_or_else(|| StoreError::missing::<V>(id))
    }

    fn list(&self) -> Result<Vec<V>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned(V::NAME))?;
        Ok(map.values().cloned().collect())
    }

    fn find(&self, predicate: &dyn Fn(&V) -> bool) -> Result<Vec<V>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned(V::NAME))?;
        Ok(map.values().filter(|row| predicate(row)).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use siteledger_inventory::Material;

    fn material(name: &str) -> Material {
        Material::new(name, "un", Some(dec!(1))).unwrap()
    }

    #[test]
    fn insert_rejects_duplicates() {
        let table = InMemoryTable::new();
        let m = material("Brick");
        table.insert(m.clone()).unwrap();
        let err = table.insert(m).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { entity: "material", .. }));
    }

    #[test]
    fn update_and_delete_require_existing_rows() {
        let table: InMemoryTable<Material> = InMemoryTable::new();
        let m = material("Sand");
        assert!(matches!(table.update(m.clone()), Err(StoreError::Missing { .. })));
        assert!(matches!(table.delete(&m.id), Err(StoreError::Missing { .. })));

        table.insert(m.clone()).unwrap();
        let mut renamed = m.clone();
        renamed.name = "Fine sand".into();
        table.update(renamed).unwrap();
        assert_eq!(table.get(&m.id).unwrap().unwrap().name, "Fine sand");

        let removed = table.delete(&m.id).unwrap();
        assert_eq!(removed.id, m.id);
        assert!(table.get(&m.id).unwrap().is_none());
    }

    #[test]
    fn find_filters_rows() {
        let table = InMemoryTable::new();
        table.insert(material("Cement")).unwrap();
        table.insert(material("Gravel")).unwrap();
        let found = table.find(&|m: &Material| m.name.starts_with('G')).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(table.list().unwrap().len(), 2);
    }
}
