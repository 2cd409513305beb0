use thiserror::Error;

/// Error type for every fallible [`Watcher`](crate::Watcher) operation.
///
/// The offending id is rendered into the error when it is raised so the error
/// type does not need to carry the registry's key type around.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WatchError {
    /// The operation referenced an id with no active entry
    #[error("Not watching Object with name {0}")]
    ObjectNotWatched(String),

    /// `watch` was called with an id that already has an active entry
    #[error("Already watching Object with name {0}")]
    ObjectAlreadyWatched(String),

    /// `on_change` was handed something that does not resolve to a listener
    #[error("Provided callback for Object with name {0} is not a function")]
    CallbackNotAFunction(String),
}

impl WatchError {
    pub(crate) fn not_watched(id: &(impl std::fmt::Display + ?Sized)) -> Self { Self::ObjectNotWatched(id.to_string()) }

    pub(crate) fn already_watched(id: &(impl std::fmt::Display + ?Sized)) -> Self { Self::ObjectAlreadyWatched(id.to_string()) }

    pub(crate) fn not_a_function(id: &(impl std::fmt::Display + ?Sized)) -> Self { Self::CallbackNotAFunction(id.to_string()) }

    /// Discriminator naming the kind of error, stable across releases
    pub fn name(&self) -> &'static str {
        match self {
            Self::ObjectNotWatched(_) => "ObjectNotWatched",
            Self::ObjectAlreadyWatched(_) => "ObjectAlreadyWatched",
            Self::CallbackNotAFunction(_) => "CallbackNotAFunction",
        }
    }

    /// The rendered id of the object that caused the error
    pub fn id(&self) -> &str {
        match self {
            Self::ObjectNotWatched(id) | Self::ObjectAlreadyWatched(id) | Self::CallbackNotAFunction(id) => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_interpolate_the_id() {
        assert_eq!(WatchError::not_watched("status").to_string(), "Not watching Object with name status");
        assert_eq!(WatchError::already_watched(&7).to_string(), "Already watching Object with name 7");
        assert_eq!(
            WatchError::not_a_function("status").to_string(),
            "Provided callback for Object with name status is not a function"
        );
    }

    #[test]
    fn name_and_id() {
        let err = WatchError::already_watched("status");
        assert_eq!(err.name(), "ObjectAlreadyWatched");
        assert_eq!(err.id(), "status");
        assert_eq!(WatchError::not_watched(&1u8).name(), "ObjectNotWatched");
        assert_eq!(WatchError::not_a_function("x").name(), "CallbackNotAFunction");
    }
}
