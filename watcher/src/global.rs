use std::sync::LazyLock;

use crate::Watcher;

/// A structured value: a mapping of field names to JSON values
pub type Object = serde_json::Map<String, serde_json::Value>;

static GLOBAL: LazyLock<Watcher<String, Object>> = LazyLock::new(Watcher::new);

/// The process-wide registry, created on first use.
///
/// Every caller in the process shares it; code that needs isolation (tests, for one)
/// should construct its own [`Watcher`] instead.
pub fn global() -> &'static Watcher<String, Object> { &GLOBAL }
