//! Time-indexed raster layers

use super::raster::{hide_everywhere, show_everywhere, show_on, sync_tiles};
use super::template::{resolve_source, TileVariant};
use super::{LayerHandler, SurfaceContext};
use crate::catalog::LayerDescriptor;
use crate::state::ExternalState;
use crate::surface::{SurfaceRole, TargetedCommand};

/// Handler for `raster-timeseries` layers.
///
/// Tile URLs depend on the selected date, spotlight and gamma, so `update`
/// re-resolves them every cycle and replaces the source tiles only when they
/// changed. While comparing, the compare variant is kept on the secondary
/// surface, added there if the surface was created after the layer was shown.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterTimeseriesHandler;

impl RasterTimeseriesHandler {
    pub const TYPE: &'static str = "raster-timeseries";
}

impl LayerHandler for RasterTimeseriesHandler {
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

    fn update(
        &self,
        ctx: &SurfaceContext<'_>,
        layer: &LayerDescriptor,
        _prev: &ExternalState,
    ) -> Option<Vec<TargetedCommand>> {
        let mut commands = Vec::new();

        if let Some(source) = resolve_source(layer, ctx.state, TileVariant::Primary) {
            commands.extend(sync_tiles(SurfaceRole::Primary, ctx.primary, &layer.id, &source));
        }

        if let Some(secondary) = ctx.secondary {
            if let Some(source) = resolve_source(layer, ctx.state, TileVariant::Compare) {
                if secondary.has_layer(&layer.id) {
                    commands.extend(sync_tiles(
                        SurfaceRole::Secondary,
                        secondary,
                        &layer.id,
                        &source,
                    ));
                } else {
                    commands.extend(show_on(SurfaceRole::Secondary, secondary, &layer.id, &source));
                }
            }
        }

        Some(commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::surface::{SurfaceCommand, SurfaceState};
    use chrono::NaiveDate;

    fn catalog() -> Catalog {
        Catalog::from_json(include_str!("../../data/catalog.json"), Some("https://api")).unwrap()
    }

    fn apply(primary: &mut SurfaceState, secondary: &mut SurfaceState, cmds: &[TargetedCommand]) {
        for c in cmds {
            match c.target {
                SurfaceRole::Primary => primary.apply(&c.command).unwrap(),
                SurfaceRole::Secondary => secondary.apply(&c.command).unwrap(),
            }
        }
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, m, d).unwrap()
    }

    #[test]
    fn test_update_without_change_is_empty() {
        let catalog = catalog();
        let co2 = catalog.get("co2").unwrap();
        let state = ExternalState::new().with_active(["co2"]).with_date(date(3, 1));
        let mut primary = SurfaceState::new();
        let mut secondary = SurfaceState::new();

        let shown = RasterTimeseriesHandler.show(
            &SurfaceContext {
                state: &state,
                primary: &primary,
                secondary: None,
            },
            co2,
            &state,
        );
        apply(&mut primary, &mut secondary, &shown);

        let updated = RasterTimeseriesHandler
            .update(
                &SurfaceContext {
                    state: &state,
                    primary: &primary,
                    secondary: None,
                },
                co2,
                &state,
            )
            .unwrap();
        assert!(updated.is_empty());
    }

    #[test]
    fn test_date_change_replaces_tiles() {
        let catalog = catalog();
        let co2 = catalog.get("co2").unwrap();
        let before = ExternalState::new().with_active(["co2"]).with_date(date(3, 1));
        let after = before.clone().with_date(date(3, 2));
        let mut primary = SurfaceState::new();
        let mut secondary = SurfaceState::new();

        let shown = RasterTimeseriesHandler.show(
            &SurfaceContext {
                state: &before,
                primary: &primary,
                secondary: None,
            },
            co2,
            &before,
        );
        apply(&mut primary, &mut secondary, &shown);

        let updated = RasterTimeseriesHandler
            .update(
                &SurfaceContext {
                    state: &after,
                    primary: &primary,
                    secondary: None,
                },
                co2,
                &before,
            )
            .unwrap();
        assert_eq!(updated.len(), 1);
        match &updated[0].command {
            SurfaceCommand::SetSourceTiles { id, tiles } => {
                assert_eq!(id, "co2");
                assert!(tiles[0].contains("2020_03_02"));
            }
            other => panic!("unexpected command: {other}"),
        }
    }

    #[test]
    fn test_update_adds_compare_layer_to_secondary() {
        let catalog = catalog();
        let co2 = catalog.get("co2").unwrap();
        let state = ExternalState::new()
            .with_active(["co2"])
            .with_comparing(true);
        let mut primary = SurfaceState::new();
        let mut secondary = SurfaceState::new();

        let shown = RasterTimeseriesHandler.show(
            &SurfaceContext {
                state: &state,
                primary: &primary,
                secondary: None,
            },
            co2,
            &state,
        );
        apply(&mut primary, &mut secondary, &shown);

        let updated = RasterTimeseriesHandler
            .update(
                &SurfaceContext {
                    state: &state,
                    primary: &primary,
                    secondary: Some(&secondary),
                },
                co2,
                &state,
            )
            .unwrap();
        assert!(updated.iter().all(|c| c.target == SurfaceRole::Secondary));
        apply(&mut primary, &mut secondary, &updated);

        assert!(secondary.is_visible("co2"));
        let tiles = &secondary.source("co2").unwrap().tiles;
        assert!(tiles[0].contains("xco2_15day_base"));
    }

    #[test]
    fn test_layer_without_compare_stays_off_secondary() {
        let catalog = catalog();
        let diff = catalog.get("co2-diff").unwrap();
        let state = ExternalState::new()
            .with_active(["co2-diff"])
            .with_comparing(true);
        let primary = SurfaceState::new();
        let secondary = SurfaceState::new();
        let ctx = SurfaceContext {
            state: &state,
            primary: &primary,
            secondary: Some(&secondary),
        };

        let shown = RasterTimeseriesHandler.show(&ctx, diff, &state);
        assert!(shown.iter().all(|c| c.target == SurfaceRole::Primary));
    }

    #[test]
    fn test_hide_covers_both_surfaces() {
        let catalog = catalog();
        let co2 = catalog.get("co2").unwrap();
        let state = ExternalState::new().with_comparing(true);
        let mut primary = SurfaceState::new();
        let mut secondary = SurfaceState::new();

        let shown = RasterTimeseriesHandler.show(
            &SurfaceContext {
                state: &state,
                primary: &primary,
                secondary: Some(&secondary),
            },
            co2,
            &state,
        );
        apply(&mut primary, &mut secondary, &shown);

        let hidden = RasterTimeseriesHandler.hide(
            &SurfaceContext {
                state: &state,
                primary: &primary,
                secondary: Some(&secondary),
            },
            co2,
            &state,
        );
        assert_eq!(
            hidden,
            vec![
                TargetedCommand::primary(SurfaceCommand::visibility("co2", false)),
                TargetedCommand::secondary(SurfaceCommand::visibility("co2", false)),
            ]
        );
    }
}
