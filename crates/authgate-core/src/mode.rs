// Mode gate — demo vs production.
//
// Demo mode short-circuits the entire decision pipeline before any external
// read happens, so a demo deployment works with no session provider and no
// user store wired up at all.

use serde::{Deserialize, Serialize};

/// Operating mode of the deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Every evaluation succeeds with a synthetic demo identity.
    #[default]
    Demo,
    /// Full pipeline: session resolution, user lookup, derivation.
    Production,
}

impl Mode {
    pub fn is_demo(&self) -> bool {
        matches!(self, Self::Demo)
    }
}

/// Source of the current mode, read once per evaluation.
pub trait ModeStore: Send + Sync {
    fn get(&self) -> Mode;

    /// Request a runtime override. Implementations may refuse.
    fn set(&self, mode: Mode);
}

/// Default `ModeStore`: an environment-pinned base with an optional runtime
/// override.
///
/// A production base is absolute. When the environment says production, the
/// switch reports production no matter what override was requested; `set`
/// becomes a warned no-op. Only a demo base can be toggled at runtime.
#[derive(Debug)]
pub struct ModeSwitch {
    base: Mode,
    overridden: std::sync::RwLock<Option<Mode>>,
}

impl ModeSwitch {
    pub fn new(base: Mode) -> Self {
        Self {
            base,
            overridden: std::sync::RwLock::new(None),
        }
    }

    /// Build from `AUTHGATE_DEMO_MODE`: `"false"` or `"0"` pins a production
    /// base, anything else (including unset) starts in demo.
    pub fn from_env() -> Self {
        let base = match std::env::var("AUTHGATE_DEMO_MODE").as_deref() {
            Ok("false") | Ok("0") => Mode::Production,
            _ => Mode::Demo,
        };
        Self::new(base)
    }

    pub fn base(&self) -> Mode {
        self.base
    }
}

impl Default for ModeSwitch {
    fn default() -> Self {
        Self::new(Mode::Demo)
    }
}

impl ModeStore for ModeSwitch {
    fn get(&self) -> Mode {
        if self.base == Mode::Production {
            return Mode::Production;
        }
        self.overridden
            .read()
            .map(|guard| guard.unwrap_or(Mode::Demo))
            .unwrap_or(Mode::Demo)
    }

    fn set(&self, mode: Mode) {
        if self.base == Mode::Production {
            tracing::warn!(
                requested = ?mode,
                "mode override ignored: deployment is pinned to production"
            );
            return;
        }
        if let Ok(mut guard) = self.overridden.write() {
            *guard = Some(mode);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_demo() {
        assert_eq!(Mode::default(), Mode::Demo);
        assert!(Mode::Demo.is_demo());
        assert!(!Mode::Production.is_demo());
    }

    #[test]
    fn test_demo_base_can_be_overridden() {
        let switch = ModeSwitch::new(Mode::Demo);
        assert_eq!(switch.get(), Mode::Demo);
        switch.set(Mode::Production);
        assert_eq!(switch.get(), Mode::Production);
        switch.set(Mode::Demo);
        assert_eq!(switch.get(), Mode::Demo);
    }

    #[test]
    fn test_production_base_ignores_override() {
        let switch = ModeSwitch::new(Mode::Production);
        switch.set(Mode::Demo);
        assert_eq!(switch.get(), Mode::Production);
    }

    #[test]
    fn test_mode_wire_format() {
        assert_eq!(
            serde_json::to_value(Mode::Production).unwrap(),
            serde_json::json!("production")
        );
        assert_eq!(
            serde_json::from_str::<Mode>("\"demo\"").unwrap(),
            Mode::Demo
        );
    }
}
