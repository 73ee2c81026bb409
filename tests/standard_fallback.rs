use std::env;
use user_defaults::config::settings::BACKEND_VAR;
use user_defaults::{get_integer, get_string, get_value, remove, set, UserDefaults};

// Single test: the standard instance and the environment are process-wide.
#[test]
fn unusable_configuration_falls_back_to_memory() {
    let _ = env_logger::builder().is_test(true).try_init();
    env::set_var(BACKEND_VAR, "bogus");

    set("fallback.greeting", "hello");
    set("fallback.count", 3);

    assert_eq!(get_string("fallback.greeting"), "hello");
    assert_eq!(get_integer("fallback.count"), 3);

    remove("fallback.greeting");
    assert_eq!(get_value("fallback.greeting"), None);

    assert_eq!(
        UserDefaults::standard().keys_with_prefix("fallback."),
        vec!["fallback.count"]
    );
}
