//! Tests for mixin providers

use crate::core::descriptor::PropertyDescriptor;
use crate::core::error::{MixinError, ObjectError};
use crate::core::key::{PropertyKey, Symbol};
use crate::core::object::ObjectRef;
use crate::core::value::{Method, Value};
use crate::mixin::{MixConfig, Mixin};
use parking_lot::Mutex;
use std::sync::Arc;

/// Method returning a fixed number
pub fn constant(n: i32) -> Method {
    Method::new(move |_, _| Ok(Value::from(n)))
}

/// Producer closing over a private counter exposed as `getX`/`updateX`
pub fn counter_mixin() -> Mixin {
    Mixin::new(|_, _| {
        let x = Arc::new(Mutex::new(0));
        let read = x.clone();
        Ok(Value::from(ObjectRef::from_entries([
            (
                "getX",
                Method::new(move |_, _| Ok(Value::from(*read.lock()))),
            ),
            (
                "updateX",
                Method::new(move |_, _| {
                    *x.lock() += 1;
                    Ok(Value::Undefined)
                }),
            ),
        ])))
    })
}

/// Producer returning a single method under `key`
pub fn single_method_mixin(key: PropertyKey) -> Mixin {
    Mixin::new(move |_, _| {
        let bag = ObjectRef::new();
        bag.set(key.clone(), constant(1))?;
        Ok(Value::from(bag))
    })
}

pub fn number(value: Value) -> f64 {
    value.as_number().unwrap_or(f64::NAN)
}

mod seeding;
