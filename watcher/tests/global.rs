#![cfg(feature = "json")]
mod common;
use common::{change_watcher, status};
use obj_watcher::*;

// A single test, since every test in this binary would share the registry
#[test]
fn test_global_watcher() {
    let (listener, check) = change_watcher::<Object>();
    global().watch("status", &status(false)).unwrap();
    global().on_change("status", listener).unwrap();

    // the same registry is reachable from another thread
    std::thread::spawn(|| global().set("status", &status(true)).unwrap()).join().unwrap();
    assert_eq!(check(), [(status(false), status(true))]);
    assert_eq!(global().get("status").unwrap(), status(true));
    assert_eq!(global().watch("status", &status(true)).unwrap_err().name(), "ObjectAlreadyWatched");

    global().reset();
    assert!(global().is_empty());
    assert_eq!(global().unwatch("status").unwrap_err().name(), "ObjectNotWatched");
}
