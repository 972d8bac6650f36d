//! Process-wide threshold routing.
//!
//! Splits every known channel into two tiers: the application's own
//! namespaces follow the requested level, everything else is quieted.

use std::collections::BTreeSet;

use crate::engine::Engine;
use crate::fields::{self, CORE_NAMESPACES, NOISY_PACKAGES};
use crate::level::Level;

/// Who counts as "own" and which thresholds each tier gets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingRule {
    pub own_package_prefixes: BTreeSet<String>,
    pub external_threshold: Level,
    pub app_threshold: Level,
}

impl RoutingRule {
    /// A rule with no own packages and the default external threshold.
    pub fn new(app_threshold: Level) -> Self {
        Self {
            own_package_prefixes: BTreeSet::new(),
            external_threshold: Level::WARNING,
            app_threshold,
        }
    }

    pub fn with_own_package(mut self, prefix: impl Into<String>) -> Self {
        self.own_package_prefixes.insert(prefix.into());
        self
    }

    /// `true` if `name` belongs to the application or to this crate.
    ///
    /// Matching is by dotted namespace, see [`fields::in_namespace`].
    pub fn is_own(&self, name: &str) -> bool {
        fields::in_any_namespace(name, self.own_package_prefixes.iter().map(String::as_str))
            || fields::in_any_namespace(name, CORE_NAMESPACES.iter().copied())
    }
}

/// Applies [`RoutingRule`]s to an [`Engine`].
#[derive(Debug, Clone)]
pub struct LevelRouter {
    noisy: Vec<String>,
}

impl Default for LevelRouter {
    fn default() -> Self {
        Self::new(std::iter::empty())
    }
}

impl LevelRouter {
    /// A router that pins the built-in noisy packages plus `extra_noisy`.
    pub fn new<I>(extra_noisy: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut noisy: Vec<String> = NOISY_PACKAGES.iter().map(ToString::to_string).collect();
        for name in extra_noisy {
            if !noisy.contains(&name) {
                noisy.push(name);
            }
        }
        Self { noisy }
    }

    pub fn noisy_packages(&self) -> &[String] {
        &self.noisy
    }

    /// Re-tune every channel and sink of `engine`.
    ///
    /// 1. Noisy packages are created if needed and set to WARNING.
    /// 2. The root channel and every sink take the app threshold.
    /// 3. Every other concrete channel takes the app threshold if it is
    ///    own, the external threshold otherwise. Placeholders are skipped.
    ///
    /// Noisy packages stay at WARNING even when listed as own or when the
    /// external threshold differs; their children are routed normally.
    ///
    /// Not atomic with respect to concurrent log calls.
    pub fn apply_global_threshold(&self, engine: &Engine, rule: &RoutingRule) {
        for name in &self.noisy {
            engine
                .channel(name, Level::WARNING)
                .set_threshold(Level::WARNING);
        }

        engine.set_sink_thresholds(rule.app_threshold);
        engine.root().set_threshold(rule.app_threshold);

        for (name, node) in engine.entries() {
            let Some(channel) = node.channel() else {
                continue;
            };
            if self.noisy.contains(&name) {
                continue;
            }
            if rule.is_own(&name) {
                channel.set_threshold(rule.app_threshold);
            } else {
                channel.set_threshold(rule.external_threshold);
            }
        }
    }
}
