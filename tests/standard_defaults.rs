use user_defaults::{
    get_boolean, get_integer, get_string, get_value, remove, set, UserDefaults, Value,
};

// Every test goes through here first, so the standard instance is always the
// in-memory one and never the user's real store.
fn setup() {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = UserDefaults::install(UserDefaults::in_memory());
}

#[test]
fn set_then_get_value() {
    setup();
    set("standard.value", 99);
    assert_eq!(get_value("standard.value"), Some(Value::Integer(99)));
}

#[test]
fn remove_then_get_value_is_absent() {
    setup();
    set("standard.removed", "soon gone");
    remove("standard.removed");
    assert_eq!(get_value("standard.removed"), None);

    remove("standard.never-set");
    assert_eq!(get_value("standard.never-set"), None);
}

#[test]
fn missing_keys_read_as_zero_values() {
    setup();
    assert_eq!(get_string("standard.missing"), "");
    assert_eq!(get_integer("standard.missing"), 0);
    assert!(!get_boolean("standard.missing"));
}

#[test]
fn typed_reads() {
    setup();
    set("standard.a", "hello");
    set("standard.n", 42);
    set("standard.f", true);

    assert_eq!(get_string("standard.a"), "hello");
    assert_eq!(get_integer("standard.n"), 42);
    assert!(get_boolean("standard.f"));
}

#[test]
fn overwrite_keeps_last_write() {
    setup();
    set("standard.k", "x");
    set("standard.k", "y");
    assert_eq!(get_value("standard.k"), Some(Value::from("y")));
}

#[test]
fn free_functions_and_standard_handle_agree() {
    setup();
    UserDefaults::standard().set("standard.shared", 5);
    assert_eq!(get_integer("standard.shared"), 5);

    set("standard.shared", 6);
    assert_eq!(UserDefaults::standard().get_integer("standard.shared"), 6);
}

#[test]
fn install_after_first_use_is_refused() {
    setup();
    let _ = UserDefaults::standard();
    assert!(UserDefaults::install(UserDefaults::in_memory()).is_err());
}
