use anyhow::Result;
use puzzlekit::cache::{Scope, discover_global_functions, global_function_names};
use puzzlekit::{Cache, Value};

fn triple(args: &[Value]) -> Result<Value> {
    let x = args
        .first()
        .and_then(Value::as_int)
        .ok_or_else(|| anyhow::anyhow!("triple expects an int"))?;
    Ok(Value::Int(x * 3))
}

puzzlekit::cacheable!("test_triple", triple);

#[test]
fn declared_functions_are_discovered() -> Result<()> {
    let names = global_function_names()?;

    assert!(names.contains(&"calorie_counting"));
    assert!(names.contains(&"tuning_trouble"));
    assert!(names.contains(&"test_triple"));
    assert_eq!(discover_global_functions()?, names.len());
    Ok(())
}

#[test]
fn global_functions_resolve_on_every_instance() -> Result<()> {
    let first = Cache::new();
    let second = Cache::new();

    assert_eq!(first.resolve("test_triple")?.scope(), Scope::Global);
    assert_eq!(*first.invoke("test_triple", &[Value::Int(5)])?, Value::Int(15));
    assert_eq!(*second.invoke("test_triple", &[Value::Int(5)])?, Value::Int(15));
    Ok(())
}

#[test]
fn instances_keep_separate_stores_for_global_functions() -> Result<()> {
    let first = Cache::new();
    let second = Cache::new();

    first.invoke("test_triple", &[Value::Int(2)])?;
    assert!(first.cached("test_triple", &[Value::Int(2)]).is_some());
    assert!(second.cached("test_triple", &[Value::Int(2)]).is_none());
    Ok(())
}

#[test]
fn instance_registration_shadows_a_global_name() -> Result<()> {
    let cache = Cache::new();
    cache.register_typed("test_triple", |(x,): (i64,)| Ok(x * 30))?;

    assert_eq!(cache.resolve("test_triple")?.scope(), Scope::Instance);
    assert_eq!(*cache.invoke("test_triple", &[Value::Int(1)])?, Value::Int(30));

    // a fresh instance still sees the declaration
    let fresh = Cache::new();
    assert_eq!(*fresh.invoke("test_triple", &[Value::Int(1)])?, Value::Int(3));
    Ok(())
}
