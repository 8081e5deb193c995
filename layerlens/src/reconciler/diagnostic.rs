//! Non-fatal problems found during a reconciliation cycle

use std::fmt;

use crate::surface::SurfaceCommand;

/// Step of the cycle a diagnostic was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Hide,
    Show,
    Update,
    Replay,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Hide => write!(f, "hide"),
            Phase::Show => write!(f, "show"),
            Phase::Update => write!(f, "update"),
            Phase::Replay => write!(f, "replay"),
        }
    }
}

/// A problem that is logged and skipped; the rest of the cycle still runs.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// The id is not in the catalog
    UnknownLayer { id: String, phase: Phase },
    /// No handler is registered for the layer's type
    UnregisteredType {
        id: String,
        layer_type: String,
        phase: Phase,
    },
    /// Two mutually exclusive layers are active together; both are rendered
    ExclusivityViolation { first: String, second: String },
    /// A command for the compare surface arrived before it was ready
    SecondaryNotReady {
        command: SurfaceCommand,
        phase: Phase,
    },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::UnknownLayer { id, phase } => {
                write!(f, "{}: layer '{}' is not in the catalog", phase, id)
            }
            ConfigurationError::UnregisteredType {
                id,
                layer_type,
                phase,
            } => write!(
                f,
                "{}: no handler registered for type '{}' of layer '{}'",
                phase, layer_type, id
            ),
            ConfigurationError::ExclusivityViolation { first, second } => write!(
                f,
                "layers '{}' and '{}' are mutually exclusive but both active",
                first, second
            ),
            ConfigurationError::SecondaryNotReady { command, phase } => write!(
                f,
                "{}: compare surface not ready, dropped '{}'",
                phase, command
            ),
        }
    }
}

impl std::error::Error for ConfigurationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let e = ConfigurationError::UnregisteredType {
            id: "roads".to_string(),
            layer_type: "vector".to_string(),
            phase: Phase::Show,
        };
        assert_eq!(
            e.to_string(),
            "show: no handler registered for type 'vector' of layer 'roads'"
        );
    }
}
