//! Environment variable access, injectable for tests.

use std::collections::HashMap;

/// Values accepted as "on" for boolean environment overrides.
pub const TRUTHY: [&str; 3] = ["1", "true", "yes"];

pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<E: EnvSource + ?Sized> EnvSource for &E {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

pub fn is_truthy(env: &impl EnvSource, key: &str) -> bool {
    env.var(key).is_some_and(|v| TRUTHY.contains(&v.as_str()))
}

/// An explicit flag wins; otherwise fall back to a truthy environment variable.
pub fn flag_or_env(flag: bool, key: &str, env: &impl EnvSource) -> bool {
    flag || is_truthy(env, key)
}
