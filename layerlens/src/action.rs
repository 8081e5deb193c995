//! Actions the map view dispatches to its state holder.

use tokio::sync::mpsc;

use crate::aoi::AoiAction;

/// Action emitted by the map view.
#[derive(Debug, Clone, PartialEq)]
pub enum MapAction {
    /// The primary map finished its first load
    MapLoaded,
    /// Forwarded from the AOI drawing toolkit
    Aoi(AoiAction),
}

impl MapAction {
    /// Wire name of the action.
    pub fn name(&self) -> &'static str {
        match self {
            MapAction::MapLoaded => "map.loaded",
            MapAction::Aoi(action) => action.name(),
        }
    }
}

/// Sending half of the action channel.
pub type ActionDispatcher = mpsc::UnboundedSender<MapAction>;

/// Receiving half of the action channel.
pub type ActionReceiver = mpsc::UnboundedReceiver<MapAction>;

/// Create an action channel.
pub fn action_channel() -> (ActionDispatcher, ActionReceiver) {
    mpsc::unbounded_channel()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_names() {
        assert_eq!(MapAction::MapLoaded.name(), "map.loaded");
        assert_eq!(MapAction::Aoi(AoiAction::Cleared).name(), "aoi.clear");
    }

    #[test]
    fn test_channel_delivers_in_order() {
        let (tx, mut rx) = action_channel();
        tx.send(MapAction::MapLoaded).unwrap();
        tx.send(MapAction::Aoi(AoiAction::Cleared)).unwrap();
        assert_eq!(rx.try_recv().unwrap(), MapAction::MapLoaded);
        assert_eq!(rx.try_recv().unwrap(), MapAction::Aoi(AoiAction::Cleared));
        assert!(rx.try_recv().is_err());
    }
}
