use std::str::FromStr;
use std::sync::{Arc, Mutex};

use obj_watcher::Object;
use serde_json::json;
use tracing::Level;

// Initialize tracing for tests
#[ctor::ctor]
unsafe fn init_tracing() {
    let level = std::env::var("LOG_LEVEL").ok().and_then(|level| Level::from_str(&level).ok()).unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).with_test_writer().init();
}

#[allow(unused)]
pub fn status(online: bool) -> Object {
    match json!({ "online": online }) {
        serde_json::Value::Object(object) => object,
        _ => unreachable!(),
    }
}

/// Returns a listener recording every (old, new) pair it is called with,
/// and a closure draining what was recorded so far
#[allow(unused)]
pub fn change_watcher<V: Clone + Send + Sync + 'static>()
-> (impl Fn(&V, &V) + Send + Sync + 'static, impl Fn() -> Vec<(V, V)> + Send + Sync + 'static) {
    let changes = Arc::new(Mutex::new(Vec::new()));
    let watcher = {
        let changes = changes.clone();
        move |old: &V, new: &V| {
            changes.lock().unwrap().push((old.clone(), new.clone()));
        }
    };

    let check = move || {
        let changes: Vec<(V, V)> = changes.lock().unwrap().drain(..).collect();
        changes
    };

    (watcher, check)
}

/// Runs `f` on another thread and fails the test if it does not finish in time
#[allow(unused)]
pub fn within(timeout: std::time::Duration, f: impl FnOnce() + Send + 'static) {
    let (done, finished) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        f();
        let _ = done.send(());
    });
    assert!(finished.recv_timeout(timeout).is_ok(), "did not finish within {timeout:?}");
}
