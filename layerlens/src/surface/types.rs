//! Surface options and control declarations

use std::collections::BTreeSet;
use std::fmt;

use crate::config::MapConfig;
use crate::coord::{Camera, ZoomBounds};

/// Which canvas a surface renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SurfaceRole {
    /// The always-present map
    Primary,
    /// The compare map shown while comparing
    Secondary,
}

impl fmt::Display for SurfaceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceRole::Primary => write!(f, "primary"),
            SurfaceRole::Secondary => write!(f, "secondary"),
        }
    }
}

/// Map controls a surface can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ControlKind {
    /// Zoom buttons
    Navigation,
    /// Data attribution
    Attribution,
    /// Bearing reset button, part of the navigation control in most engines
    Compass,
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlKind::Navigation => write!(f, "navigation"),
            ControlKind::Attribution => write!(f, "attribution"),
            ControlKind::Compass => write!(f, "compass"),
        }
    }
}

/// Corner a control or the logo is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl fmt::Display for ControlPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlPosition::TopLeft => write!(f, "top-left"),
            ControlPosition::TopRight => write!(f, "top-right"),
            ControlPosition::BottomLeft => write!(f, "bottom-left"),
            ControlPosition::BottomRight => write!(f, "bottom-right"),
        }
    }
}

/// A control to attach to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlSpec {
    pub kind: ControlKind,
    pub position: ControlPosition,
    /// Collapsed rendering, used for attribution
    pub compact: bool,
}

impl ControlSpec {
    /// Zoom controls, top-left.
    pub fn navigation() -> Self {
        Self {
            kind: ControlKind::Navigation,
            position: ControlPosition::TopLeft,
            compact: false,
        }
    }

    /// Compact attribution in the default corner.
    pub fn compact_attribution() -> Self {
        Self {
            kind: ControlKind::Attribution,
            position: ControlPosition::default(),
            compact: true,
        }
    }
}

/// User interactions enabled on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interactions {
    /// Right-click drag rotation
    pub drag_rotate: bool,
    /// Pitch while rotating
    pub pitch_with_rotate: bool,
    /// Two-finger touch rotation; touch zoom stays enabled either way
    pub touch_rotate: bool,
}

impl Interactions {
    /// Pan and zoom only.
    pub const NO_ROTATION: Self = Self {
        drag_rotate: false,
        pitch_with_rotate: false,
        touch_rotate: false,
    };
}

/// Everything the engine needs to create a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceOptions {
    /// Container element the surface renders into
    pub container: String,
    pub camera: Camera,
    pub zoom_bounds: ZoomBounds,
    pub style_url: String,
    pub access_token: Option<String>,
    /// Engine default attribution; replaced by an explicit control
    pub attribution_control: bool,
    pub logo_position: ControlPosition,
    pub interactions: Interactions,
    /// Controls the engine must not render, even as part of another control
    pub hidden_controls: BTreeSet<ControlKind>,
}

impl SurfaceOptions {
    /// Options for the primary surface.
    pub fn primary(config: &MapConfig, container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            camera: config.camera(),
            zoom_bounds: config.zoom_bounds(),
            style_url: config.style_url().to_string(),
            access_token: config.access_token().map(str::to_string),
            attribution_control: false,
            logo_position: ControlPosition::BottomLeft,
            interactions: Interactions::NO_ROTATION,
            hidden_controls: BTreeSet::from([ControlKind::Compass]),
        }
    }

    /// Options for a compare surface: same bounds, style and token, starting
    /// from `camera`.
    pub fn for_secondary(&self, camera: Camera, container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            camera: camera.clamped(&self.zoom_bounds),
            ..self.clone()
        }
    }

    /// Whether `kind` may be attached.
    pub fn allows(&self, kind: ControlKind) -> bool {
        !self.hidden_controls.contains(&kind)
    }
}
