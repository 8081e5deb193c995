//! Per-cycle report

use std::fmt;

use super::{ConfigurationError, Transition};
use crate::compare::CompareTransition;

/// What one reconciliation cycle did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    pub transition: Transition,
    /// Set when the compare flag flipped
    pub compare: Option<CompareTransition>,
    /// Ids whose `hide` ran, in call order
    pub hidden: Vec<String>,
    /// Ids whose `show` ran, in call order
    pub shown: Vec<String>,
    /// Ids whose `update` ran, in call order; an id shown this cycle appears
    /// twice
    pub updates: Vec<String>,
    pub commands_applied: usize,
    pub commands_dropped: usize,
    pub aoi_updated: bool,
    pub diagnostics: Vec<ConfigurationError>,
}

impl CycleReport {
    pub(crate) fn new(transition: Transition) -> Self {
        Self {
            transition,
            ..Self::default()
        }
    }

    /// Whether the cycle changed anything on a surface.
    pub fn changed_surfaces(&self) -> bool {
        self.commands_applied > 0 || self.compare.is_some()
    }
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "hide {:?} add {:?} keep {:?}",
            self.transition.to_hide, self.transition.to_add, self.transition.still_active
        )?;
        if let Some(compare) = self.compare {
            writeln!(f, "compare {:?}", compare)?;
        }
        write!(
            f,
            "{} commands applied, {} dropped",
            self.commands_applied, self.commands_dropped
        )?;
        if self.aoi_updated {
            write!(f, ", aoi updated")?;
        }
        for d in &self.diagnostics {
            write!(f, "\n  ! {}", d)?;
        }
        Ok(())
    }
}
