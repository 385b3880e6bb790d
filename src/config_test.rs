use super::*;
use std::sync::Mutex;

// Tests touching GAMESTACK_* share process env; serialize them.
static ENV_LOCK: Mutex<()> = Mutex::new(());

const VARS: [&str; 5] = [
    "GAMESTACK_API_URL",
    "GAMESTACK_SESSION_FILE",
    "GAMESTACK_REQUEST_TIMEOUT_SECS",
    "GAMESTACK_CONNECT_TIMEOUT_SECS",
    "GAMESTACK_SEND_USER_ID",
];

/// # Safety
/// Callers hold `ENV_LOCK`.
unsafe fn clear_env() {
    for var in VARS {
        unsafe { std::env::remove_var(var) };
    }
}

// =============================================================================
// from_env
// =============================================================================

#[test]
fn from_env_defaults() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe { clear_env() };

    let cfg = ClientConfig::from_env();
    assert_eq!(cfg.api_url, DEFAULT_API_URL);
    assert_eq!(cfg.timeouts, HttpTimeouts::default());
    assert!(cfg.send_user_id);
    assert!(cfg.session_file.ends_with(".gamestack/session.json"));
}

#[test]
fn from_env_parses_overrides() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_env();
        std::env::set_var("GAMESTACK_API_URL", "https://gw.example.test/api/");
        std::env::set_var("GAMESTACK_SESSION_FILE", "/tmp/gs/session.json");
        std::env::set_var("GAMESTACK_REQUEST_TIMEOUT_SECS", "42");
        std::env::set_var("GAMESTACK_CONNECT_TIMEOUT_SECS", "7");
        std::env::set_var("GAMESTACK_SEND_USER_ID", "off");
    }

    let cfg = ClientConfig::from_env();
    assert_eq!(cfg.api_url, "https://gw.example.test/api");
    assert_eq!(cfg.session_file, PathBuf::from("/tmp/gs/session.json"));
    assert_eq!(cfg.timeouts, HttpTimeouts { request_secs: 42, connect_secs: 7 });
    assert!(!cfg.send_user_id);

    unsafe { clear_env() };
}

#[test]
fn from_env_ignores_unparseable_values() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_env();
        std::env::set_var("GAMESTACK_REQUEST_TIMEOUT_SECS", "soon");
        std::env::set_var("GAMESTACK_SEND_USER_ID", "maybe");
        std::env::set_var("GAMESTACK_API_URL", "   ");
    }

    let cfg = ClientConfig::from_env();
    assert_eq!(cfg.timeouts.request_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    assert!(cfg.send_user_id);
    assert_eq!(cfg.api_url, DEFAULT_API_URL);

    unsafe { clear_env() };
}

// =============================================================================
// env_bool: unique var names, no lock needed.
// =============================================================================

#[test]
fn env_bool_true_and_false_variants() {
    for (i, (val, expected)) in [("1", true), ("TRUE", true), (" yes ", true), ("On", true), ("0", false), ("off", false)]
        .iter()
        .enumerate()
    {
        let key = format!("__GS_TEST_BOOL_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(*expected), "value {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_unset_is_none() {
    assert_eq!(env_bool("__GS_TEST_BOOL_SURELY_UNSET__"), None);
}

// =============================================================================
// builders
// =============================================================================

#[test]
fn with_api_url_trims_trailing_slashes() {
    let cfg = ClientConfig::default().with_api_url(" http://gw:8083// ");
    assert_eq!(cfg.api_url, "http://gw:8083");
}

#[test]
fn with_session_file_replaces_path() {
    let cfg = ClientConfig::default().with_session_file("/var/tmp/s.json");
    assert_eq!(cfg.session_file, PathBuf::from("/var/tmp/s.json"));
}
