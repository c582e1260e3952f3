use crate::core::value::{Method, Value};

/// Storage part of a property: a plain value or a getter/setter pair
#[derive(Clone, Debug)]
pub enum PropertySlot {
    Data { value: Value, writable: bool },
    Accessor {
        get: Option<Method>,
        set: Option<Method>,
    },
}

/// Full description of an own property
#[derive(Clone, Debug)]
pub struct PropertyDescriptor {
    pub slot: PropertySlot,
    pub enumerable: bool,
    pub configurable: bool,
}

impl PropertyDescriptor {
    /// Writable, enumerable, configurable data property (what plain assignment creates)
    pub fn data(value: impl Into<Value>) -> Self {
        Self {
            slot: PropertySlot::Data {
                value: value.into(),
                writable: true,
            },
            enumerable: true,
            configurable: true,
        }
    }

    /// Shape used for mixed-in methods: writable and configurable but hidden
    /// from enumeration and serialization.
    pub fn method(method: Method) -> Self {
        Self::data(method).enumerable(false)
    }

    pub fn accessor(get: Option<Method>, set: Option<Method>) -> Self {
        Self {
            slot: PropertySlot::Accessor { get, set },
            enumerable: true,
            configurable: true,
        }
    }

    pub fn enumerable(mut self, enumerable: bool) -> Self {
        self.enumerable = enumerable;
        self
    }

    pub fn configurable(mut self, configurable: bool) -> Self {
        self.configurable = configurable;
        self
    }

    /// No effect on accessor properties.
    pub fn writable(mut self, writable: bool) -> Self {
        if let PropertySlot::Data { writable: w, .. } = &mut self.slot {
            *w = writable;
        }
        self
    }

    pub fn value(&self) -> Option<&Value> {
        match &self.slot {
            PropertySlot::Data { value, .. } => Some(value),
            PropertySlot::Accessor { .. } => None,
        }
    }

    pub fn getter(&self) -> Option<&Method> {
        match &self.slot {
            PropertySlot::Accessor { get, .. } => get.as_ref(),
            PropertySlot::Data { .. } => None,
        }
    }

    pub fn setter(&self) -> Option<&Method> {
        match &self.slot {
            PropertySlot::Accessor { set, .. } => set.as_ref(),
            PropertySlot::Data { .. } => None,
        }
    }

    pub fn is_accessor(&self) -> bool {
        matches!(self.slot, PropertySlot::Accessor { .. })
    }

    /// False for accessors, which have no writability of their own.
    pub fn is_writable(&self) -> bool {
        matches!(self.slot, PropertySlot::Data { writable: true, .. })
    }

    /// Checks whether `next` may replace `self` on a non-configurable property.
    pub(crate) fn permits_redefinition(&self, next: &PropertyDescriptor) -> bool {
        if self.configurable {
            return true;
        }
        if next.configurable || next.enumerable != self.enumerable {
            return false;
        }
        match (&self.slot, &next.slot) {
            (PropertySlot::Data { writable: true, .. }, PropertySlot::Data { .. }) => true,
            (
                PropertySlot::Data {
                    value: current,
                    writable: false,
                },
                PropertySlot::Data { value, writable },
            ) => !*writable && current.same_value(value),
            (
                PropertySlot::Accessor { get: g1, set: s1 },
                PropertySlot::Accessor { get: g2, set: s2 },
            ) => same_method(g1, g2) && same_method(s1, s2),
            _ => false,
        }
    }
}

fn same_method(a: &Option<Method>, b: &Option<Method>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.ptr_eq(b),
        _ => false,
    }
}
