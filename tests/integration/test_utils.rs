//! Shared test utilities for integration tests

use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes environment variable access across tests running in parallel
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const TRACKED_VARS: &[&str] = &[
    "HOME",
    "XDG_CONFIG_HOME",
    "LAYERTREE__LOGGING__LEVEL",
    "LAYERTREE__LAYERS",
];

/// Environment variable state to restore after test
struct EnvState(Vec<(&'static str, Option<String>)>);

impl EnvState {
    fn capture() -> Self {
        Self(
            TRACKED_VARS
                .iter()
                .map(|name| (*name, std::env::var(name).ok()))
                .collect(),
        )
    }

    fn restore(self) {
        for (name, value) in self.0 {
            match value {
                Some(orig) => std::env::set_var(name, orig),
                None => std::env::remove_var(name),
            }
        }
    }
}

/// Run `f` with HOME and XDG_CONFIG_HOME pointing inside `test_dir` and every
/// `LAYERTREE__*` variable used by the tests cleared.
pub fn with_config_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_home = test_dir.path().join("home");
    std::fs::create_dir_all(&test_home).unwrap();

    std::env::set_var("HOME", test_home.to_str().unwrap());
    std::env::set_var("XDG_CONFIG_HOME", test_dir.path().to_str().unwrap());
    std::env::remove_var("LAYERTREE__LOGGING__LEVEL");
    std::env::remove_var("LAYERTREE__LAYERS");

    let result = f();

    env_state.restore();

    result
}
