//! Tests for `define` seeding through context initializers

use super::*;

fn seed_with_descriptors() -> Value {
    let seed = ObjectRef::from_entries([("x", 1)]);
    seed.define_property("y", PropertyDescriptor::accessor(Some(constant(1)), None))
        .unwrap();
    seed.define_property("z", PropertyDescriptor::data(3).enumerable(false))
        .unwrap();
    Value::from(seed)
}

#[test]
fn test_public_seed_preserves_descriptors() {
    let mixin = counter_mixin().with_public_context_initializer(|_, _| Ok(seed_with_descriptors()));
    let context = ObjectRef::new();

    mixin
        .mix(
            &MixConfig::new()
                .with_public_context(&context)
                .with_define(true),
        )
        .unwrap();

    let x = context.get_own_descriptor("x").unwrap();
    assert_eq!(x.value(), Some(&Value::from(1)));
    assert!(x.enumerable && x.is_writable() && x.configurable);

    let y = context.get_own_descriptor("y").unwrap();
    assert!(y.is_accessor());
    assert!(y.enumerable);
    assert_eq!(context.get("y").unwrap(), Value::from(1));

    let z = context.get_own_descriptor("z").unwrap();
    assert!(!z.enumerable);
    assert_eq!(z.value(), Some(&Value::from(3)));
}

#[test]
fn test_define_false_skips_initializers() {
    let mixin = counter_mixin()
        .with_public_context_initializer(|_, _| Err(anyhow::anyhow!("should not run")));
    let context = ObjectRef::new();

    mixin
        .mix(&MixConfig::new().with_public_context(&context))
        .unwrap();
    assert!(context.own_keys().is_empty());
}

#[test]
fn test_define_without_initializers_is_noop() {
    let mix = counter_mixin()
        .mix(&MixConfig::new().with_define(true))
        .unwrap();
    assert!(mix.own_keys().is_empty());
}

#[test]
fn test_public_initializer_requires_object_context() {
    let mixin = counter_mixin()
        .with_public_context_initializer(|_, _| Ok(Value::from(ObjectRef::new())));

    let err = mixin
        .mix(&MixConfig::new().with_define(true))
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(
        err.to_string(),
        "public_context must be an object when with_public_context_initializer is provided"
    );
}

#[test]
fn test_shared_initializer_requires_object_context() {
    let mixin = counter_mixin()
        .with_shared_context_initializer(|_, _| Ok(Value::from(ObjectRef::new())));

    let err = mixin
        .mix(
            &MixConfig::new()
                .with_shared_context(Value::Null)
                .with_define(true),
        )
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "shared_context must be an object when with_shared_context_initializer is provided"
    );
}

#[test]
fn test_shared_initializer_must_return_object() {
    let mixin = counter_mixin().with_shared_context_initializer(|_, _| Ok(Value::from("state")));

    let err = mixin
        .mix(
            &MixConfig::new()
                .with_shared_context(ObjectRef::new())
                .with_define(true),
        )
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.to_string(), "shared context initializer must return an object");
}

#[test]
fn test_initializers_receive_both_contexts() {
    let public = ObjectRef::from_entries([("a", 1)]);
    let shared = ObjectRef::from_entries([("b", 2)]);

    let mixin = counter_mixin().with_shared_context_initializer(|public, shared| {
        let a = number(public.as_object().unwrap().get("a")?);
        let b = number(shared.as_object().unwrap().get("b")?);
        Ok(Value::from(ObjectRef::from_entries([("sum", a + b)])))
    });

    mixin
        .mix(
            &MixConfig::new()
                .with_public_context(&public)
                .with_shared_context(&shared)
                .with_define(true),
        )
        .unwrap();

    assert_eq!(shared.get("sum").unwrap(), Value::from(3));
    assert!(!public.has_own("sum"));
}

#[test]
fn test_seeding_redefines_existing_properties() {
    let context = ObjectRef::from_entries([("x", 100)]);
    let mixin = counter_mixin().with_public_context_initializer(|_, _| Ok(seed_with_descriptors()));

    mixin
        .mix(
            &MixConfig::new()
                .with_public_context(&context)
                .with_define(true),
        )
        .unwrap();

    assert_eq!(context.get("x").unwrap(), Value::from(1));
}

#[test]
fn test_seeding_cannot_redefine_non_configurable() {
    let context = ObjectRef::new();
    context
        .define_property("x", PropertyDescriptor::data(100).configurable(false))
        .unwrap();
    let mixin = counter_mixin().with_public_context_initializer(|_, _| Ok(seed_with_descriptors()));

    let err = mixin
        .mix(
            &MixConfig::new()
                .with_public_context(&context)
                .with_define(true),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        MixinError::Object(ObjectError::NotConfigurable(_))
    ));
    assert_eq!(context.get("x").unwrap(), Value::from(100));
}

#[test]
fn test_seeding_runs_before_installation() {
    let mixin = counter_mixin().with_public_context_initializer(|_, _| {
        Ok(Value::from(ObjectRef::from_entries([("getX", 0)])))
    });
    let context = ObjectRef::new();

    let err = mixin
        .mix(
            &MixConfig::new()
                .with_public_context(&context)
                .with_public_methods(["getX"])
                .with_define(true),
        )
        .unwrap_err();

    assert!(err.is_conflict());
    assert_eq!(err.to_string(), "getX was already mixed in.");
}

#[test]
fn test_seeded_shared_state_visible_to_methods() {
    let mixin = Mixin::new(|_, shared| {
        let shared = shared.clone();
        Ok(Value::from(ObjectRef::from_entries([(
            "limit",
            Method::new(move |_, _| Ok(shared.as_object().unwrap().get("limit")?)),
        )])))
    })
    .with_shared_context_initializer(|_, _| {
        Ok(Value::from(ObjectRef::from_entries([("limit", 10)])))
    });
    let shared = ObjectRef::new();

    let mix = mixin
        .mix(
            &MixConfig::new()
                .with_shared_context(&shared)
                .with_mix_methods(["limit"])
                .with_define(true),
        )
        .unwrap();

    assert_eq!(mix.call_method("limit", &[]).unwrap(), Value::from(10));
}

#[test]
fn test_builder_returns_new_provider() {
    let base = counter_mixin();
    let seeded = base
        .clone()
        .with_public_context_initializer(|_, _| Ok(seed_with_descriptors()));

    assert!(!base.has_public_context_initializer());
    assert!(seeded.has_public_context_initializer());

    let context = ObjectRef::new();
    base.mix(
        &MixConfig::new()
            .with_public_context(&context)
            .with_define(true),
    )
    .unwrap();
    assert!(context.own_keys().is_empty());
}

#[test]
fn test_arrays_are_not_contexts() {
    let mixin = counter_mixin()
        .with_public_context_initializer(|_, _| Ok(Value::from(Vec::<Value>::new())));

    let err = mixin
        .mix(
            &MixConfig::new()
                .with_public_context(vec![Value::from(1)])
                .with_define(true),
        )
        .unwrap_err();
    assert!(err.is_validation());

    let err = mixin
        .mix(
            &MixConfig::new()
                .with_public_context(ObjectRef::new())
                .with_define(true),
        )
        .unwrap_err();
    assert_eq!(err.to_string(), "public context initializer must return an object");
}
