//! Property-test run profile shared by every sylva proptest suite.
//!
//! CI raises case counts and enables forking through the environment; local
//! runs fall back to the defaults each suite passes in.

use std::env;

/// Environment variable overriding the number of cases per property.
pub const PROPTEST_CASES_ENV_KEY: &str = "PROPTEST_CASES";
/// Environment variable toggling forked proptest execution.
pub const SYLVA_PBT_FORK_ENV_KEY: &str = "SYLVA_PBT_FORK";

/// Case count and fork mode resolved for a property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Resolves the profile from the environment, keeping `default_cases`
    /// and `default_fork` when a variable is unset or malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sylva_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(32, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: resolve(PROPTEST_CASES_ENV_KEY, default_cases),
            fork: resolve(SYLVA_PBT_FORK_ENV_KEY, default_fork),
        }
    }

    #[rustfmt::skip]
    #[must_use]
    pub fn cases(&self) -> u32 { self.cases }

    #[rustfmt::skip]
    #[must_use]
    pub fn fork(&self) -> bool { self.fork }
}

/// Values that may be overridden through an environment variable.
trait Override: Sized + Copy {
    fn parse_override(raw: &str) -> Result<Self, String>;
}

impl Override for u32 {
    fn parse_override(raw: &str) -> Result<Self, String> {
        match raw.trim().parse::<u32>() {
            Ok(0) => Err("case count must be positive".to_owned()),
            Ok(cases) => Ok(cases),
            Err(error) => Err(format!("not a case count: {error}")),
        }
    }
}

impl Override for bool {
    fn parse_override(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(format!("`{other}` is not a boolean switch")),
        }
    }
}

fn resolve<T: Override>(key: &'static str, default: T) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    T::parse_override(&raw).unwrap_or_else(|reason| {
        tracing::warn!(
            env = key,
            raw = %raw,
            reason = %reason,
            "ignoring malformed property-test override",
        );
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::{Mutex, MutexGuard};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Holds the environment lock and restores both keys on drop.
    struct ScopedEnv {
        saved: Vec<(&'static str, Option<String>)>,
        _lock: MutexGuard<'static, ()>,
    }

    impl ScopedEnv {
        fn new(cases: Option<&str>, fork: Option<&str>) -> Self {
            let lock = ENV_LOCK
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            let mut saved = Vec::new();
            for (key, value) in [(PROPTEST_CASES_ENV_KEY, cases), (SYLVA_PBT_FORK_ENV_KEY, fork)] {
                saved.push((key, env::var(key).ok()));
                apply(key, value);
            }
            Self { saved, _lock: lock }
        }
    }

    fn apply(key: &str, value: Option<&str>) {
        // SAFETY: every caller holds ENV_LOCK.
        unsafe {
            match value {
                Some(value) => env::set_var(key, value),
                None => env::remove_var(key),
            }
        }
    }

    impl Drop for ScopedEnv {
        fn drop(&mut self) {
            for (key, value) in self.saved.drain(..) {
                apply(key, value.as_deref());
            }
        }
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let _env = ScopedEnv::new(None, None);
        assert_eq!(
            ProptestRunProfile::load(48, true),
            ProptestRunProfile { cases: 48, fork: true }
        );
    }

    #[rstest]
    #[case("1", 1)]
    #[case(" 512 ", 512)]
    #[case("40000", 40_000)]
    fn case_overrides_are_honoured(#[case] raw: &str, #[case] expected: u32) {
        let _env = ScopedEnv::new(Some(raw), None);
        assert_eq!(ProptestRunProfile::load(48, false).cases(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-3")]
    #[case("many")]
    #[case("")]
    fn malformed_case_overrides_fall_back(#[case] raw: &str) {
        let _env = ScopedEnv::new(Some(raw), None);
        assert_eq!(ProptestRunProfile::load(48, false).cases(), 48);
    }

    #[rstest]
    #[case("on", true)]
    #[case("Yes", true)]
    #[case("1", true)]
    #[case("TRUE", true)]
    #[case("off", false)]
    #[case("no", false)]
    #[case("0", false)]
    #[case("False", false)]
    fn fork_overrides_are_honoured(#[case] raw: &str, #[case] expected: bool) {
        let _env = ScopedEnv::new(None, Some(raw));
        assert_eq!(ProptestRunProfile::load(48, !expected).fork(), expected);
    }

    #[rstest]
    #[case("sometimes")]
    #[case("2")]
    fn malformed_fork_overrides_fall_back(#[case] raw: &str) {
        let _env = ScopedEnv::new(None, Some(raw));
        assert!(ProptestRunProfile::load(48, true).fork());
        assert!(!ProptestRunProfile::load(48, false).fork());
    }
}
