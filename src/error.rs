//! Error types.
//!
//! Every failure except re-initialization is surfaced as one of these, both
//! through the returned `Result` and through the manager's report list.

use std::io;

use thiserror::Error;

use crate::types::ComponentId;

/// Invalid tree configuration, detected before any lifecycle hook runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("There is an empty slot {slot} in the children of {name} ({parent})")]
    EmptyChildSlot {
        parent: ComponentId,
        name: &'static str,
        slot: usize,
    },
    #[error("Component {0} is not part of the tree")]
    UnknownComponent(ComponentId),
    #[error("Component {name} ({id}) is listed among its own descendants")]
    CyclicChildren { id: ComponentId, name: &'static str },
}

/// A dependency watch that could not be registered or read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WatchError {
    #[error("Tried to watch `{member}` on an absent target. Ensure dependencies are wired before mount")]
    MissingTarget { member: String },
    #[error("`{member}` is neither a field nor a property of {type_name}")]
    UnresolvedMember {
        member: String,
        type_name: &'static str,
    },
    #[error("Target of the watch on `{member}` was dropped while still watched")]
    TargetReleased { member: String },
    #[error("Target of the watch on `{member}` is mutably borrowed")]
    TargetBusy { member: String },
}

/// An entry in the manager's report list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{name} ({component}): {source}")]
    Watch {
        component: ComponentId,
        name: &'static str,
        source: WatchError,
    },
}

/// One or more roots failed to initialize.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} root(s) failed to initialize", .failures.len())]
pub struct InitializeError {
    pub failures: Vec<ConfigError>,
}

/// Errors from the terminal host.
#[derive(Error, Debug)]
pub enum HostError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Initialize(#[from] InitializeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_component() {
        let err = ConfigError::EmptyChildSlot {
            parent: ComponentId(2),
            name: "Panel",
            slot: 1,
        };
        assert_eq!(
            err.to_string(),
            "There is an empty slot 1 in the children of Panel (#2)"
        );

        let err = EngineError::Watch {
            component: ComponentId(0),
            name: "Label",
            source: WatchError::MissingTarget {
                member: "score".into(),
            },
        };
        assert!(err.to_string().starts_with("Label (#0): Tried to watch `score`"));
    }

    #[test]
    fn test_initialize_error_counts_failures() {
        let err = InitializeError {
            failures: vec![ConfigError::UnknownComponent(ComponentId(9))],
        };
        assert_eq!(err.to_string(), "1 root(s) failed to initialize");
    }
}
