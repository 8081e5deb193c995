//! Surface mutation commands produced by layer handlers

use std::fmt;

use super::SurfaceRole;
use crate::catalog::SourceKind;

/// A single mutation of a surface's sources or layers.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCommand {
    /// Register a tile source
    AddSource {
        id: String,
        kind: SourceKind,
        tiles: Vec<String>,
    },
    /// Replace the tile URLs of an existing source
    SetSourceTiles { id: String, tiles: Vec<String> },
    RemoveSource { id: String },
    /// Add a layer drawing `source`
    AddLayer {
        id: String,
        source: String,
        visible: bool,
    },
    SetLayerVisibility { id: String, visible: bool },
    RemoveLayer { id: String },
}

impl SurfaceCommand {
    /// Id of the source or layer the command touches.
    pub fn target_id(&self) -> &str {
        match self {
            SurfaceCommand::AddSource { id, .. }
            | SurfaceCommand::SetSourceTiles { id, .. }
            | SurfaceCommand::RemoveSource { id }
            | SurfaceCommand::AddLayer { id, .. }
            | SurfaceCommand::SetLayerVisibility { id, .. }
            | SurfaceCommand::RemoveLayer { id } => id,
        }
    }

    /// Show or hide command for a layer.
    pub fn visibility(id: impl Into<String>, visible: bool) -> Self {
        SurfaceCommand::SetLayerVisibility {
            id: id.into(),
            visible,
        }
    }
}

impl fmt::Display for SurfaceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceCommand::AddSource { id, kind, tiles } => {
                write!(f, "add-source {} ({}, {} tile urls)", id, kind, tiles.len())
            }
            SurfaceCommand::SetSourceTiles { id, tiles } => {
                write!(f, "set-tiles {} [{}]", id, tiles.join(", "))
            }
            SurfaceCommand::RemoveSource { id } => write!(f, "remove-source {}", id),
            SurfaceCommand::AddLayer {
                id,
                source,
                visible,
            } => write!(f, "add-layer {} <- {} visible={}", id, source, visible),
            SurfaceCommand::SetLayerVisibility { id, visible } => {
                write!(f, "visibility {} {}", id, if *visible { "on" } else { "off" })
            }
            SurfaceCommand::RemoveLayer { id } => write!(f, "remove-layer {}", id),
        }
    }
}

/// A command addressed to one of the view's surfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetedCommand {
    pub target: SurfaceRole,
    pub command: SurfaceCommand,
}

impl TargetedCommand {
    pub fn primary(command: SurfaceCommand) -> Self {
        Self {
            target: SurfaceRole::Primary,
            command,
        }
    }

    pub fn secondary(command: SurfaceCommand) -> Self {
        Self {
            target: SurfaceRole::Secondary,
            command,
        }
    }

    pub fn on(target: SurfaceRole, command: SurfaceCommand) -> Self {
        Self { target, command }
    }
}

impl fmt::Display for TargetedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.target, self.command)
    }
}
