use mini_service_utils::{extract_groups, group_schema, Error, Function, Value};

fn noop() -> Function {
    Function::new("() => {}")
}

fn group(name: &str, init: &Function) -> Value {
    Value::object([("name", Value::from(name)), ("init", Value::from(init.clone()))])
}

#[test]
fn test_group_from_parameters() {
    let init = noop();
    let opts = group("test", &init);

    let extracted = extract_groups(&opts).expect("groups");

    assert_eq!(extracted.groups.len(), 1);
    assert_eq!(extracted.groups[0].name, "test");
    assert_eq!(extracted.groups[0].init, init);
    assert_eq!(extracted.groups[0].to_value(), opts);
    assert_eq!(extracted.group_opts.len(), 1);
    assert_eq!(extracted.group_opts.get("test"), Some(&opts));
}

#[test]
fn test_single_group_keeps_extra_fields() {
    let init = noop();
    let opts = Value::object([
        ("name", Value::from("calc")),
        ("init", Value::from(init)),
        ("timeout", Value::from(100)),
    ]);

    let extracted = extract_groups(&opts).expect("groups");

    assert_eq!(extracted.groups[0].fields.get("timeout"), Some(&Value::from(100)));
}

#[test]
fn test_groups_from_property() {
    let init = noop();
    let opts = Value::object([(
        "groups",
        Value::from(vec![group("test1", &init), group("test1", &init)]),
    )]);

    let extracted = extract_groups(&opts).expect("groups");

    assert_eq!(extracted.groups.len(), 2);
    assert!(extracted.groups.iter().all(|g| g.name == "test1" && g.init == init));
    assert!(extracted.group_opts.is_empty());
}

#[test]
fn test_group_options_from_property() {
    let init = noop();
    let group_opts = Value::object([
        ("test1", Value::object([("name", Value::from("test1"))])),
        ("test2", Value::object([("name", Value::from("test2"))])),
    ]);
    let opts = Value::object([
        ("groups", Value::from(vec![group("test1", &init), group("test2", &init)])),
        ("groupOpts", group_opts.clone()),
    ]);

    let extracted = extract_groups(&opts).expect("groups");

    assert_eq!(Value::Object(extracted.group_opts), group_opts);
}

#[test]
fn test_non_object_group_options_are_ignored() {
    let init = noop();
    let opts = Value::object([
        ("groups", Value::from(vec![group("a", &init)])),
        ("groupOpts", Value::from("nope")),
    ]);

    assert!(extract_groups(&opts).expect("groups").group_opts.is_empty());
}

#[test]
fn test_fails_if_no_group_found() {
    let opts = Value::object([("name", Value::from("test"))]);
    let err = extract_groups(&opts).expect_err("no init");
    assert!(matches!(err, Error::NoGroupsDefined));
    assert_eq!(err.to_string(), "No APIs nor APIs groups defined");

    assert!(matches!(extract_groups(&Value::Undefined), Err(Error::NoGroupsDefined)));
    assert!(matches!(
        extract_groups(&Value::object([("groups", Value::from("x"))])),
        Err(Error::NoGroupsDefined)
    ));
}

#[test]
fn test_fails_on_invalid_group() {
    let opts = Value::object([("groups", Value::from(vec![Value::from("not a group")]))]);
    let err = extract_groups(&opts).expect_err("invalid group");
    assert!(matches!(err, Error::GroupDefinitionInvalid(_)));
    assert_eq!(
        err.to_string(),
        "Group definition at position 0 fails because [\"0\" must be an object]"
    );
}

#[test]
fn test_fails_on_first_invalid_position() {
    let init = noop();
    let opts = Value::object([(
        "groups",
        Value::from(vec![
            group("ok", &init),
            Value::object([("name", Value::from("broken"))]),
        ]),
    )]);

    let err = extract_groups(&opts).expect_err("missing init");
    assert_eq!(
        err.to_string(),
        "Group definition at position 1 fails because [child \"init\" fails because [\"init\" is required]]"
    );
}

#[test]
fn test_group_schema() {
    let schema = group_schema();
    assert!(schema.validate(&group("a", &noop())).is_ok());
    assert_eq!(
        schema
            .validate(&Value::object([("name", Value::from("")), ("init", Value::from(noop()))]))
            .expect_err("empty name")
            .message,
        "child \"name\" fails because [\"name\" is not allowed to be empty]"
    );
}
