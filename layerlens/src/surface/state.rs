//! Bookkeeping of what a surface currently renders

use std::collections::BTreeMap;

use super::{ControlSpec, SurfaceCommand, SurfaceError};
use crate::catalog::SourceKind;

/// A registered tile source.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSource {
    pub kind: SourceKind,
    pub tiles: Vec<String>,
}

/// A layer in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLayer {
    pub id: String,
    pub source: String,
    pub visible: bool,
}

/// What a surface renders, as seen by the adapter.
///
/// Handlers read this to decide which commands are needed; the adapter
/// validates each command against it before forwarding to the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceState {
    loaded: bool,
    sources: BTreeMap<String, RenderedSource>,
    layers: Vec<RenderedLayer>,
    controls: Vec<ControlSpec>,
}

impl SurfaceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the surface has fired its first load.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn source(&self, id: &str) -> Option<&RenderedSource> {
        self.sources.get(id)
    }

    pub fn has_source(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    pub fn layer(&self, id: &str) -> Option<&RenderedLayer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn has_layer(&self, id: &str) -> bool {
        self.layer(id).is_some()
    }

    /// Whether `id` exists and is visible.
    pub fn is_visible(&self, id: &str) -> bool {
        self.layer(id).is_some_and(|l| l.visible)
    }

    /// Layers in draw order.
    pub fn layers(&self) -> &[RenderedLayer] {
        &self.layers
    }

    /// Ids of visible layers in draw order.
    pub fn visible_layers(&self) -> Vec<&str> {
        self.layers
            .iter()
            .filter(|l| l.visible)
            .map(|l| l.id.as_str())
            .collect()
    }

    pub fn controls(&self) -> &[ControlSpec] {
        &self.controls
    }

    pub(crate) fn mark_loaded(&mut self) {
        self.loaded = true;
    }

    pub(crate) fn push_control(&mut self, control: ControlSpec) {
        self.controls.push(control);
    }

    /// Check that `command` is valid against the current state.
    pub fn check(&self, command: &SurfaceCommand) -> Result<(), SurfaceError> {
        match command {
            SurfaceCommand::AddSource { id, .. } => {
                if self.has_source(id) {
                    return Err(SurfaceError::DuplicateSource(id.clone()));
                }
            }
            SurfaceCommand::SetSourceTiles { id, .. } => {
                if !self.has_source(id) {
                    return Err(SurfaceError::MissingSource(id.clone()));
                }
            }
            SurfaceCommand::RemoveSource { id } => {
                if !self.has_source(id) {
                    return Err(SurfaceError::MissingSource(id.clone()));
                }
                if let Some(layer) = self.layers.iter().find(|l| &l.source == id) {
                    return Err(SurfaceError::SourceInUse {
                        source_id: id.clone(),
                        layer: layer.id.clone(),
                    });
                }
            }
            SurfaceCommand::AddLayer { id, source, .. } => {
                if self.has_layer(id) {
                    return Err(SurfaceError::DuplicateLayer(id.clone()));
                }
                if !self.has_source(source) {
                    return Err(SurfaceError::MissingSource(source.clone()));
                }
            }
            SurfaceCommand::SetLayerVisibility { id, .. } | SurfaceCommand::RemoveLayer { id } => {
                if !self.has_layer(id) {
                    return Err(SurfaceError::MissingLayer(id.clone()));
                }
            }
        }
        Ok(())
    }

    /// Record a command that the engine accepted. Must follow a successful
    /// [`check`](Self::check).
    pub(crate) fn commit(&mut self, command: &SurfaceCommand) {
        match command {
            SurfaceCommand::AddSource { id, kind, tiles } => {
                self.sources.insert(
                    id.clone(),
                    RenderedSource {
                        kind: *kind,
                        tiles: tiles.clone(),
                    },
                );
            }
            SurfaceCommand::SetSourceTiles { id, tiles } => {
                if let Some(source) = self.sources.get_mut(id) {
                    source.tiles = tiles.clone();
                }
            }
            SurfaceCommand::RemoveSource { id } => {
                self.sources.remove(id);
            }
            SurfaceCommand::AddLayer {
                id,
                source,
                visible,
            } => self.layers.push(RenderedLayer {
                id: id.clone(),
                source: source.clone(),
                visible: *visible,
            }),
            SurfaceCommand::SetLayerVisibility { id, visible } => {
                if let Some(layer) = self.layers.iter_mut().find(|l| &l.id == id) {
                    layer.visible = *visible;
                }
            }
            SurfaceCommand::RemoveLayer { id } => self.layers.retain(|l| &l.id != id),
        }
    }

    /// Check and commit in one step, for callers without an engine.
    pub fn apply(&mut self, command: &SurfaceCommand) -> Result<(), SurfaceError> {
        self.check(command)?;
        self.commit(command);
        Ok(())
    }
}
