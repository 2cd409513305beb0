/*!
Watch named objects and get told when they change.

A [`Watcher`] keeps a copy of every object registered with it under a caller-chosen id.
Reads hand out copies and writes store copies, so the only way to change a watched object
is [`Watcher::set`], which calls the object's change listener with the old and the new value.

# Design requirements:
- One listener per object. Registering a listener replaces the previous one.
- Callers never hold a reference into the registry.
- Listeners run synchronously, inside `set`, with the registry unlocked.
- Listeners that reach back into their own registry hold a [`WeakWatcher`].

# Basic usage

```rust
use obj_watcher::*;
use serde_json::json;
use std::sync::{Arc, Mutex};

let watcher: Watcher<String, serde_json::Value> = Watcher::new();
watcher.watch("status", &json!({ "online": false })).unwrap();

let seen = Arc::new(Mutex::new(Vec::new()));
{
    let seen = seen.clone();
    watcher
        .on_change("status", move |old: &serde_json::Value, new: &serde_json::Value| {
            seen.lock().unwrap().push(format!("{old} -> {new}"))
        })
        .unwrap();
}

watcher.set("status", &json!({ "online": true })).unwrap();
assert_eq!(*seen.lock().unwrap(), [r#"{"online":false} -> {"online":true}"#]);
assert_eq!(watcher.get("status").unwrap(), json!({ "online": true }));

// unknown ids are an error
let err = watcher.unwatch("battery").unwrap_err();
assert_eq!(err.name(), "ObjectNotWatched");
assert_eq!(err.to_string(), "Not watching Object with name battery");
```

# Process-wide registry

```rust
# #[cfg(feature = "json")] {
use obj_watcher::{global, Object};

let mut status = Object::new();
status.insert("online".into(), true.into());
global().watch("status", &status).unwrap();
assert_eq!(global().get("status").unwrap(), status);
global().reset();
# }
```
*/

mod error;
mod listener;
mod watcher;

#[cfg(feature = "json")]
mod global;

pub use error::*;
pub use listener::{ChangeListener, IntoChangeListener};
pub use watcher::*;

#[cfg(feature = "json")]
pub use global::*;
