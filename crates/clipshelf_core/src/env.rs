//! Environment mutation helpers for tests that exercise [`crate::Config`].

use std::sync::{Mutex, OnceLock};

/// Return the global lock used to serialize environment mutations in tests.
pub fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

#[allow(unused_unsafe)]
fn write_var(key: &str, value: Option<&str>) {
    // SAFETY: callers hold `env_lock` while tests mutate the environment.
    unsafe {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}

/// Overrides one environment variable and restores the prior value on drop.
pub struct EnvGuard {
    key: String,
    previous: Option<String>,
}

impl EnvGuard {
    /// Set `key=value` for the lifetime of the guard.
    pub fn set(key: &str, value: &str) -> Self {
        Self::apply(key, Some(value))
    }

    /// Unset `key` for the lifetime of the guard.
    pub fn remove(key: &str) -> Self {
        Self::apply(key, None)
    }

    fn apply(key: &str, value: Option<&str>) -> Self {
        let previous = std::env::var(key).ok();
        write_var(key, value);
        Self {
            key: key.to_string(),
            previous,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        write_var(self.key.as_str(), self.previous.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::{env_lock, EnvGuard};

    #[test]
    fn nested_guards_unwind_in_order() {
        let _lock = env_lock().lock().expect("env lock");
        let key = "CLIPSHELF_TEST_ENV_GUARD_NESTED";
        let _outer = EnvGuard::set(key, "outer");
        {
            let _inner = EnvGuard::set(key, "inner");
            assert_eq!(std::env::var(key).ok().as_deref(), Some("inner"));
            {
                let _gone = EnvGuard::remove(key);
                assert!(std::env::var(key).is_err());
            }
            assert_eq!(std::env::var(key).ok().as_deref(), Some("inner"));
        }
        assert_eq!(std::env::var(key).ok().as_deref(), Some("outer"));
    }

    #[test]
    fn guard_on_missing_key_leaves_it_missing() {
        let _lock = env_lock().lock().expect("env lock");
        let key = "CLIPSHELF_TEST_ENV_GUARD_MISSING";
        {
            let _set = EnvGuard::set(key, "temporary");
        }
        assert!(std::env::var(key).is_err());
    }
}
