//! Static raster layers

use super::template::{resolve_source, ResolvedSource, TileVariant};
use super::{LayerHandler, SurfaceContext};
use crate::catalog::LayerDescriptor;
use crate::state::ExternalState;
use crate::surface::{SurfaceCommand, SurfaceRole, SurfaceState, TargetedCommand};

/// Handler for `raster` layers: no time dimension, no update capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterHandler;

impl RasterHandler {
    pub const TYPE: &'static str = "raster";
}

impl LayerHandler for RasterHandler {
    fn show(
        &self,
        ctx: &SurfaceContext<'_>,
        layer: &LayerDescriptor,
        _prev: &ExternalState,
    ) -> Vec<TargetedCommand> {
        show_everywhere(ctx, layer)
    }

    fn hide(
        &self,
        ctx: &SurfaceContext<'_>,
        layer: &LayerDescriptor,
        _prev: &ExternalState,
    ) -> Vec<TargetedCommand> {
        hide_everywhere(ctx, &layer.id)
    }
}

/// Show `layer` on the primary surface, and its compare variant on the
/// secondary when one is available and the layer supports comparing.
pub(super) fn show_everywhere(
    ctx: &SurfaceContext<'_>,
    layer: &LayerDescriptor,
) -> Vec<TargetedCommand> {
    let mut commands = Vec::new();
    if let Some(source) = resolve_source(layer, ctx.state, TileVariant::Primary) {
        commands.extend(show_on(SurfaceRole::Primary, ctx.primary, &layer.id, &source));
    }
    if let Some(secondary) = ctx.secondary {
        if let Some(source) = resolve_source(layer, ctx.state, TileVariant::Compare) {
            commands.extend(show_on(SurfaceRole::Secondary, secondary, &layer.id, &source));
        }
    }
    commands
}

/// Make `layer_id` visible on one surface.
///
/// An existing layer is re-shown and its tiles brought up to date; a missing
/// one is added along with its source.
pub(super) fn show_on(
    role: SurfaceRole,
    surface: &SurfaceState,
    layer_id: &str,
    source: &ResolvedSource,
) -> Vec<TargetedCommand> {
    let mut commands = Vec::new();
    match surface.layer(layer_id) {
        Some(existing) => {
            commands.extend(sync_tiles(role, surface, layer_id, source));
            if !existing.visible {
                commands.push(TargetedCommand::on(
                    role,
                    SurfaceCommand::visibility(layer_id, true),
                ));
            }
        }
        None => {
            match surface.source(layer_id) {
                None => commands.push(TargetedCommand::on(
                    role,
                    SurfaceCommand::AddSource {
                        id: layer_id.to_string(),
                        kind: source.kind,
                        tiles: source.tiles.clone(),
                    },
                )),
                Some(_) => commands.extend(sync_tiles(role, surface, layer_id, source)),
            }
            commands.push(TargetedCommand::on(
                role,
                SurfaceCommand::AddLayer {
                    id: layer_id.to_string(),
                    source: layer_id.to_string(),
                    visible: true,
                },
            ));
        }
    }
    commands
}

/// Hide `layer_id` on every surface where it is visible.
pub(super) fn hide_everywhere(ctx: &SurfaceContext<'_>, layer_id: &str) -> Vec<TargetedCommand> {
    ctx.surfaces()
        .filter(|(_, surface)| surface.is_visible(layer_id))
        .map(|(role, _)| TargetedCommand::on(role, SurfaceCommand::visibility(layer_id, false)))
        .collect()
}

/// Replace the tiles of the `layer_id` source when they differ from `source`.
pub(super) fn sync_tiles(
    role: SurfaceRole,
    surface: &SurfaceState,
    layer_id: &str,
    source: &ResolvedSource,
) -> Option<TargetedCommand> {
    let current = surface.source(layer_id)?;
    if current.tiles == source.tiles {
        return None;
    }
    Some(TargetedCommand::on(
        role,
        SurfaceCommand::SetSourceTiles {
            id: layer_id.to_string(),
            tiles: source.tiles.clone(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn catalog() -> Catalog {
        Catalog::from_json(include_str!("../../data/catalog.json"), Some("https://api")).unwrap()
    }

    fn apply(surface: &mut SurfaceState, commands: &[TargetedCommand]) {
        for c in commands {
            surface.apply(&c.command).unwrap();
        }
    }

    #[test]
    fn test_show_adds_source_and_layer() {
        let catalog = catalog();
        let pop = catalog.get("population").unwrap();
        let state = ExternalState::new().with_active(["population"]);
        let primary = SurfaceState::new();
        let ctx = SurfaceContext {
            state: &state,
            primary: &primary,
            secondary: None,
        };

        let commands = RasterHandler.show(&ctx, pop, &ExternalState::new());
        assert_eq!(commands.len(), 2);
        assert!(matches!(
            commands[0].command,
            SurfaceCommand::AddSource { .. }
        ));
        assert!(matches!(commands[1].command, SurfaceCommand::AddLayer { .. }));
        assert!(commands.iter().all(|c| c.target == SurfaceRole::Primary));
    }

    #[test]
    fn test_show_again_is_noop() {
        let catalog = catalog();
        let pop = catalog.get("population").unwrap();
        let state = ExternalState::new();
        let mut primary = SurfaceState::new();
        let first = RasterHandler.show(
            &SurfaceContext {
                state: &state,
                primary: &primary,
                secondary: None,
            },
            pop,
            &state,
        );
        apply(&mut primary, &first);

        let second = RasterHandler.show(
            &SurfaceContext {
                state: &state,
                primary: &primary,
                secondary: None,
            },
            pop,
            &state,
        );
        assert!(second.is_empty());
    }

    #[test]
    fn test_hide_then_show_toggles_visibility() {
        let catalog = catalog();
        let pop = catalog.get("population").unwrap();
        let state = ExternalState::new();
        let mut primary = SurfaceState::new();
        let ctx = |p: &SurfaceState| -> Vec<TargetedCommand> {
            RasterHandler.hide(
                &SurfaceContext {
                    state: &state,
                    primary: p,
                    secondary: None,
                },
                pop,
                &state,
            )
        };

        let shown = RasterHandler.show(
            &SurfaceContext {
                state: &state,
                primary: &primary,
                secondary: None,
            },
            pop,
            &state,
        );
        apply(&mut primary, &shown);
        let hidden = ctx(&primary);
        assert_eq!(
            hidden,
            vec![TargetedCommand::primary(SurfaceCommand::visibility(
                "population",
                false
            ))]
        );
        apply(&mut primary, &hidden);
        assert!(ctx(&primary).is_empty());

        let reshown = RasterHandler.show(
            &SurfaceContext {
                state: &state,
                primary: &primary,
                secondary: None,
            },
            pop,
            &state,
        );
        assert_eq!(
            reshown,
            vec![TargetedCommand::primary(SurfaceCommand::visibility(
                "population",
                true
            ))]
        );
    }

    #[test]
    fn test_no_update_capability() {
        let catalog = catalog();
        let pop = catalog.get("population").unwrap();
        let state = ExternalState::new();
        let primary = SurfaceState::new();
        let ctx = SurfaceContext {
            state: &state,
            primary: &primary,
            secondary: None,
        };
        assert!(RasterHandler.update(&ctx, pop, &state).is_none());
    }
}
