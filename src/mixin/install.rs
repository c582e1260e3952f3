use tracing::trace;

use crate::core::descriptor::PropertyDescriptor;
use crate::core::error::MixinError;
use crate::core::key::PropertyKey;
use crate::core::object::ObjectRef;
use crate::core::value::Value;

/// Installs `keys` from the methods bag onto `target`, in order.
///
/// Append-only: a key the target already owns is a conflict. Keys installed
/// before a failure stay installed.
pub(crate) fn install_methods(
    keys: &[PropertyKey],
    target: &ObjectRef,
    bag: &Value,
) -> Result<(), MixinError> {
    for key in keys {
        if target.has_own(key) {
            return Err(MixinError::Conflict(key.clone()));
        }

        // A bag that is not an object has no properties
        let method = match bag {
            Value::Object(methods) => methods.get(key)?,
            _ => Value::Undefined,
        };
        let Value::Function(method) = method else {
            return Err(MixinError::validation("mixin method must be a function"));
        };

        target.define_property(key, PropertyDescriptor::method(method))?;
        trace!("Installed method {key}");
    }
    Ok(())
}
