use anyhow::Result;
use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, Weak};

use crate::core::descriptor::{PropertyDescriptor, PropertySlot};
use crate::core::error::ObjectError;
use crate::core::key::PropertyKey;
use crate::core::value::Value;

#[derive(Default)]
struct ObjectData {
    properties: Vec<(PropertyKey, PropertyDescriptor)>,
    prototype: Option<ObjectRef>,
}

impl ObjectData {
    fn position(&self, key: &PropertyKey) -> Option<usize> {
        self.properties.iter().position(|(k, _)| k == key)
    }

    fn find(&self, key: &PropertyKey) -> Option<&PropertyDescriptor> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, desc)| desc)
    }
}

/// Shared handle to a mutable object
///
/// Clones point at the same object. No lock is held while getters, setters
/// or methods run, so user code is free to touch the object it lives on.
#[derive(Clone, Default)]
pub struct ObjectRef(Arc<RwLock<ObjectData>>);

impl ObjectRef {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an object whose lookups fall back to `prototype`
    pub fn with_prototype(prototype: &ObjectRef) -> Self {
        let obj = Self::new();
        obj.0.write().prototype = Some(prototype.clone());
        obj
    }

    /// Builds an object from writable, enumerable, configurable data properties
    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<PropertyKey>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let obj = Self::new();
        {
            let mut data = obj.0.write();
            for (key, value) in entries {
                let key = key.into();
                let desc = PropertyDescriptor::data(value);
                match data.position(&key) {
                    Some(idx) => data.properties[idx].1 = desc,
                    None => data.properties.push((key, desc)),
                }
            }
        }
        obj
    }

    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Non-owning handle to this object
    pub fn downgrade(&self) -> WeakObjectRef {
        WeakObjectRef(Arc::downgrade(&self.0))
    }

    pub fn prototype(&self) -> Option<ObjectRef> {
        self.0.read().prototype.clone()
    }

    /// True only for properties defined on this object itself
    pub fn has_own(&self, key: impl Into<PropertyKey>) -> bool {
        let key = key.into();
        self.0.read().find(&key).is_some()
    }

    /// True for own or inherited properties
    pub fn has(&self, key: impl Into<PropertyKey>) -> bool {
        self.lookup(&key.into()).is_some()
    }

    pub fn get_own_descriptor(&self, key: impl Into<PropertyKey>) -> Option<PropertyDescriptor> {
        let key = key.into();
        self.0.read().find(&key).cloned()
    }

    /// Own keys: array indices ascending, then other strings and symbols
    /// in insertion order.
    pub fn own_keys(&self) -> Vec<PropertyKey> {
        let data = self.0.read();
        let mut indices: Vec<(u32, PropertyKey)> = Vec::new();
        let mut strings = Vec::new();
        let mut symbols = Vec::new();
        for (key, _) in &data.properties {
            if let Some(idx) = key.array_index() {
                indices.push((idx, key.clone()));
            } else if key.is_symbol() {
                symbols.push(key.clone());
            } else {
                strings.push(key.clone());
            }
        }
        indices.sort_by_key(|(idx, _)| *idx);
        indices
            .into_iter()
            .map(|(_, key)| key)
            .chain(strings)
            .chain(symbols)
            .collect()
    }

    /// Own enumerable string keys, in own-key order
    pub fn keys(&self) -> Vec<PropertyKey> {
        self.own_descriptors()
            .into_iter()
            .filter(|(key, desc)| desc.enumerable && !key.is_symbol())
            .map(|(key, _)| key)
            .collect()
    }

    /// Snapshot of every own property with its descriptor, in own-key order
    pub fn own_descriptors(&self) -> Vec<(PropertyKey, PropertyDescriptor)> {
        let keys = self.own_keys();
        let data = self.0.read();
        keys.into_iter()
            .filter_map(|key| data.find(&key).cloned().map(|desc| (key, desc)))
            .collect()
    }

    /// Reads a property through the prototype chain, running getters
    /// with this object as receiver.
    pub fn get(&self, key: impl Into<PropertyKey>) -> Result<Value, ObjectError> {
        let key = key.into();
        match self.lookup(&key) {
            None => Ok(Value::Undefined),
            Some(PropertyDescriptor {
                slot: PropertySlot::Data { value, .. },
                ..
            }) => Ok(value),
            Some(PropertyDescriptor {
                slot: PropertySlot::Accessor { get, .. },
                ..
            }) => match get {
                None => Ok(Value::Undefined),
                Some(getter) => getter
                    .call(&Value::from(self), &[])
                    .map_err(|source| ObjectError::Accessor { key, source }),
            },
        }
    }

    /// Assignment: honours own and inherited read-only properties and setters.
    pub fn set(&self, key: impl Into<PropertyKey>, value: impl Into<Value>) -> Result<(), ObjectError> {
        let key = key.into();
        let value = value.into();
        match self.lookup(&key) {
            Some(PropertyDescriptor {
                slot: PropertySlot::Data {
                    writable: false, ..
                },
                ..
            }) => Err(ObjectError::ReadOnly(key)),
            Some(PropertyDescriptor {
                slot: PropertySlot::Accessor { set, .. },
                ..
            }) => match set {
                None => Err(ObjectError::ReadOnly(key)),
                Some(setter) => setter
                    .call(&Value::from(self), &[value])
                    .map(|_| ())
                    .map_err(|source| ObjectError::Accessor { key, source }),
            },
            _ => {
                let mut data = self.0.write();
                match data.position(&key) {
                    Some(idx) => match &mut data.properties[idx].1.slot {
                        PropertySlot::Data {
                            value: current,
                            writable: true,
                        } => {
                            *current = value;
                            Ok(())
                        }
                        // Redefined between lookup and write lock
                        _ => Err(ObjectError::ReadOnly(key)),
                    },
                    None => {
                        data.properties
                            .push((key, PropertyDescriptor::data(value)));
                        Ok(())
                    }
                }
            }
        }
    }

    /// Defines an own property from a full descriptor. Inherited properties
    /// are shadowed regardless of their writability.
    pub fn define_property(
        &self,
        key: impl Into<PropertyKey>,
        descriptor: PropertyDescriptor,
    ) -> Result<(), ObjectError> {
        let key = key.into();
        let mut data = self.0.write();
        match data.position(&key) {
            Some(idx) => {
                if !data.properties[idx].1.permits_redefinition(&descriptor) {
                    return Err(ObjectError::NotConfigurable(key));
                }
                data.properties[idx].1 = descriptor;
            }
            None => data.properties.push((key, descriptor)),
        }
        Ok(())
    }

    /// Copies every own property of `source` (enumerable or not, accessors
    /// included) onto this object by descriptor. Returns the number of
    /// properties defined. Stops at the first rejected definition.
    pub fn define_properties_from(&self, source: &ObjectRef) -> Result<usize, ObjectError> {
        let descriptors = source.own_descriptors();
        let count = descriptors.len();
        for (key, desc) in descriptors {
            tracing::trace!("Defining property {key}");
            self.define_property(key, desc)?;
        }
        Ok(count)
    }

    /// Looks up `key` and calls it with this object as `this`
    pub fn call_method(&self, key: impl Into<PropertyKey>, args: &[Value]) -> Result<Value> {
        let key = key.into();
        match self.get(key.clone())? {
            Value::Function(method) => method.call(&Value::from(self), args),
            _ => Err(ObjectError::NotCallable(key).into()),
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value, ObjectError> {
        Value::from(self).to_json()
    }

    pub(crate) fn json_repr(&self, seen: &mut Vec<*const ()>) -> Result<serde_json::Value, ObjectError> {
        let id = Arc::as_ptr(&self.0) as *const ();
        if seen.contains(&id) {
            return Err(ObjectError::CircularStructure);
        }
        seen.push(id);

        let mut map = serde_json::Map::new();
        for (key, desc) in self.own_descriptors() {
            if !desc.enumerable {
                continue;
            }
            let (PropertyKey::String(name), PropertySlot::Data { value, .. }) = (key, desc.slot)
            else {
                continue;
            };
            if let Some(json) = value.json_repr(seen)? {
                map.insert(name.to_string(), json);
            }
        }

        seen.pop();
        Ok(serde_json::Value::Object(map))
    }

    fn lookup(&self, key: &PropertyKey) -> Option<PropertyDescriptor> {
        let mut cursor = Some(self.clone());
        while let Some(obj) = cursor {
            let data = obj.0.read();
            if let Some(desc) = data.find(key) {
                return Some(desc.clone());
            }
            cursor = data.prototype.clone();
        }
        None
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.own_keys().iter().map(ToString::to_string).collect();
        f.debug_struct("ObjectRef").field("keys", &keys).finish()
    }
}

/// Weak counterpart of [`ObjectRef`]
///
/// A method installed on an object must not own that object, or the two keep
/// each other alive forever. Closures capture a `WeakObjectRef` instead and
/// upgrade it on each call.
#[derive(Clone, Default)]
pub struct WeakObjectRef(Weak<RwLock<ObjectData>>);

impl WeakObjectRef {
    /// The object, if any strong handle to it is still alive
    pub fn upgrade(&self) -> Option<ObjectRef> {
        self.0.upgrade().map(ObjectRef)
    }
}

impl fmt::Debug for WeakObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(obj) => f.debug_tuple("WeakObjectRef").field(&obj).finish(),
            None => f.write_str("WeakObjectRef(dropped)"),
        }
    }
}
