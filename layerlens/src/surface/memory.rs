//! In-memory rendering engine.
//!
//! Keeps every surface, control, command and swipe control in a shared
//! journal. Load notifications are fired manually with
//! [`MemoryEngine::fire_load`], which makes the asynchronous parts of the
//! map lifecycle deterministic. Used by the tests and by the CLI replay.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::oneshot;

use super::{
    ControlKind, ControlSpec, EngineError, EngineSurface, MapEngine, MapSurface, SurfaceCommand,
    SurfaceOptions, SwipeControl,
};
use crate::coord::Camera;

/// One recorded engine event.
#[derive(Debug, Clone, PartialEq)]
pub enum JournalEntry {
    SurfaceCreated { surface: String, camera: Camera },
    ControlAdded { surface: String, kind: ControlKind },
    Command { surface: String, command: SurfaceCommand },
    CameraSet { surface: String, camera: Camera },
    Resized { surface: String },
    LoadFired { surface: String },
    SurfaceRemoved { surface: String },
    SwipeCreated { primary: String, secondary: String },
    SwipeRemoved { primary: String, secondary: String },
}

impl fmt::Display for JournalEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JournalEntry::SurfaceCreated { surface, camera } => {
                write!(f, "{surface}: created at {} z{}", camera.center, camera.zoom)
            }
            JournalEntry::ControlAdded { surface, kind } => {
                write!(f, "{surface}: control {kind}")
            }
            JournalEntry::Command { surface, command } => write!(f, "{surface}: {command}"),
            JournalEntry::CameraSet { surface, camera } => {
                write!(f, "{surface}: camera {} z{}", camera.center, camera.zoom)
            }
            JournalEntry::Resized { surface } => write!(f, "{surface}: resized"),
            JournalEntry::LoadFired { surface } => write!(f, "{surface}: loaded"),
            JournalEntry::SurfaceRemoved { surface } => write!(f, "{surface}: removed"),
            JournalEntry::SwipeCreated { primary, secondary } => {
                write!(f, "swipe {primary} | {secondary}: created")
            }
            JournalEntry::SwipeRemoved { primary, secondary } => {
                write!(f, "swipe {primary} | {secondary}: removed")
            }
        }
    }
}

#[derive(Debug)]
struct SurfaceRecord {
    options: SurfaceOptions,
    camera: Camera,
    controls: Vec<ControlKind>,
    commands: Vec<SurfaceCommand>,
}

#[derive(Debug, Default)]
struct Inner {
    next_surface: u64,
    next_swipe: u64,
    surfaces: BTreeMap<String, SurfaceRecord>,
    loads: HashMap<String, oneshot::Sender<()>>,
    swipes: BTreeMap<u64, (String, String)>,
    journal: Vec<JournalEntry>,
    reject_commands: bool,
    fail_swipe: bool,
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    match inner.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Engine double. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryEngine {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the load notification of `surface`.
    ///
    /// Returns false when the surface does not exist or already fired.
    pub fn fire_load(&self, surface: &str) -> bool {
        let mut inner = lock(&self.inner);
        let Some(tx) = inner.loads.remove(surface) else {
            return false;
        };
        inner.journal.push(JournalEntry::LoadFired {
            surface: surface.to_string(),
        });
        // A dropped receiver means the adapter was destroyed; the load still
        // happened as far as the engine is concerned.
        let _ = tx.send(());
        true
    }

    /// Fire every outstanding load notification, oldest surface first.
    pub fn fire_all_loads(&self) -> usize {
        let pending: Vec<String> = {
            let inner = lock(&self.inner);
            inner.loads.keys().cloned().collect()
        };
        let mut pending: Vec<(u64, String)> =
            pending.into_iter().map(|id| (surface_seq(&id), id)).collect();
        pending.sort();
        pending.iter().filter(|(_, id)| self.fire_load(id)).count()
    }

    /// Make every subsequent command fail (or succeed again).
    pub fn set_reject_commands(&self, reject: bool) {
        lock(&self.inner).reject_commands = reject;
    }

    /// Make swipe control creation fail.
    pub fn set_fail_swipe(&self, fail: bool) {
        lock(&self.inner).fail_swipe = fail;
    }

    /// Move a surface's camera as a user pan/zoom would.
    pub fn move_camera(&self, surface: &str, camera: Camera) -> bool {
        let mut inner = lock(&self.inner);
        match inner.surfaces.get_mut(surface) {
            Some(record) => {
                record.camera = camera;
                true
            }
            None => false,
        }
    }

    pub fn journal(&self) -> Vec<JournalEntry> {
        lock(&self.inner).journal.clone()
    }

    /// Take the journal, leaving it empty.
    pub fn drain_journal(&self) -> Vec<JournalEntry> {
        std::mem::take(&mut lock(&self.inner).journal)
    }

    /// Ids of surfaces that have not been removed, in creation order.
    pub fn live_surfaces(&self) -> Vec<String> {
        let inner = lock(&self.inner);
        let mut ids: Vec<(u64, String)> = inner
            .surfaces
            .keys()
            .map(|id| (surface_seq(id), id.clone()))
            .collect();
        ids.sort();
        ids.into_iter().map(|(_, id)| id).collect()
    }

    pub fn active_swipes(&self) -> usize {
        lock(&self.inner).swipes.len()
    }

    /// Commands a live surface has accepted.
    pub fn commands(&self, surface: &str) -> Vec<SurfaceCommand> {
        lock(&self.inner)
            .surfaces
            .get(surface)
            .map(|r| r.commands.clone())
            .unwrap_or_default()
    }

    pub fn controls(&self, surface: &str) -> Vec<ControlKind> {
        lock(&self.inner)
            .surfaces
            .get(surface)
            .map(|r| r.controls.clone())
            .unwrap_or_default()
    }

    pub fn camera(&self, surface: &str) -> Option<Camera> {
        lock(&self.inner).surfaces.get(surface).map(|r| r.camera)
    }

    /// Options a live surface was created with.
    pub fn options(&self, surface: &str) -> Option<SurfaceOptions> {
        lock(&self.inner)
            .surfaces
            .get(surface)
            .map(|r| r.options.clone())
    }
}

/// Surface ids are `<container>#<seq>`.
fn surface_seq(id: &str) -> u64 {
    id.rsplit('#')
        .next()
        .and_then(|n| n.parse().ok())
        .unwrap_or(u64::MAX)
}

impl MapEngine for MemoryEngine {
    fn create_surface(&self, options: &SurfaceOptions) -> Result<EngineSurface, EngineError> {
        if options.container.is_empty() {
            return Err(EngineError::SurfaceCreation {
                container: String::new(),
                reason: "empty container id".to_string(),
            });
        }

        let mut inner = lock(&self.inner);
        inner.next_surface += 1;
        let id = format!("{}#{}", options.container, inner.next_surface);
        let (tx, rx) = oneshot::channel();

        inner.surfaces.insert(
            id.clone(),
            SurfaceRecord {
                options: options.clone(),
                camera: options.camera,
                controls: Vec::new(),
                commands: Vec::new(),
            },
        );
        inner.loads.insert(id.clone(), tx);
        inner.journal.push(JournalEntry::SurfaceCreated {
            surface: id.clone(),
            camera: options.camera,
        });

        Ok(EngineSurface {
            surface: Box::new(MemorySurface {
                id,
                last_camera: options.camera,
                inner: Arc::clone(&self.inner),
            }),
            loaded: rx,
        })
    }

    fn create_swipe(
        &self,
        primary: &str,
        secondary: &str,
        _container: &str,
    ) -> Result<Box<dyn SwipeControl>, EngineError> {
        let mut inner = lock(&self.inner);
        if inner.fail_swipe {
            return Err(EngineError::SwipeCreation("swipe disabled".to_string()));
        }
        for id in [primary, secondary] {
            if !inner.surfaces.contains_key(id) {
                return Err(EngineError::UnknownSurface(id.to_string()));
            }
        }

        inner.next_swipe += 1;
        let key = inner.next_swipe;
        inner
            .swipes
            .insert(key, (primary.to_string(), secondary.to_string()));
        inner.journal.push(JournalEntry::SwipeCreated {
            primary: primary.to_string(),
            secondary: secondary.to_string(),
        });

        Ok(Box::new(MemorySwipe {
            key,
            inner: Arc::clone(&self.inner),
        }))
    }
}

struct MemorySurface {
    id: String,
    last_camera: Camera,
    inner: Arc<Mutex<Inner>>,
}

impl MemorySurface {
    fn unknown(&self) -> EngineError {
        EngineError::UnknownSurface(self.id.clone())
    }
}

impl MapSurface for MemorySurface {
    fn id(&self) -> &str {
        &self.id
    }

    fn add_control(&mut self, control: &ControlSpec) -> Result<(), EngineError> {
        let mut inner = lock(&self.inner);
        let record = inner.surfaces.get_mut(&self.id).ok_or_else(|| self.unknown())?;
        record.controls.push(control.kind);
        inner.journal.push(JournalEntry::ControlAdded {
            surface: self.id.clone(),
            kind: control.kind,
        });
        Ok(())
    }

    fn apply(&mut self, command: &SurfaceCommand) -> Result<(), EngineError> {
        let mut inner = lock(&self.inner);
        if inner.reject_commands {
            return Err(EngineError::CommandRejected {
                surface: self.id.clone(),
                reason: format!("rejected {}", command),
            });
        }
        let record = inner.surfaces.get_mut(&self.id).ok_or_else(|| self.unknown())?;
        record.commands.push(command.clone());
        inner.journal.push(JournalEntry::Command {
            surface: self.id.clone(),
            command: command.clone(),
        });
        Ok(())
    }

    fn camera(&self) -> Camera {
        lock(&self.inner)
            .surfaces
            .get(&self.id)
            .map(|r| r.camera)
            .unwrap_or(self.last_camera)
    }

    fn set_camera(&mut self, camera: Camera) -> Result<(), EngineError> {
        let mut inner = lock(&self.inner);
        let record = inner.surfaces.get_mut(&self.id).ok_or_else(|| self.unknown())?;
        record.camera = camera;
        inner.journal.push(JournalEntry::CameraSet {
            surface: self.id.clone(),
            camera,
        });
        self.last_camera = camera;
        Ok(())
    }

    fn resize(&mut self) {
        let mut inner = lock(&self.inner);
        if inner.surfaces.contains_key(&self.id) {
            inner.journal.push(JournalEntry::Resized {
                surface: self.id.clone(),
            });
        }
    }

    fn remove(&mut self) {
        let mut inner = lock(&self.inner);
        if let Some(record) = inner.surfaces.remove(&self.id) {
            self.last_camera = record.camera;
            inner.loads.remove(&self.id);
            inner.journal.push(JournalEntry::SurfaceRemoved {
                surface: self.id.clone(),
            });
        }
    }
}

struct MemorySwipe {
    key: u64,
    inner: Arc<Mutex<Inner>>,
}

impl SwipeControl for MemorySwipe {
    fn remove(&mut self) {
        let mut inner = lock(&self.inner);
        if let Some((primary, secondary)) = inner.swipes.remove(&self.key) {
            inner
                .journal
                .push(JournalEntry::SwipeRemoved { primary, secondary });
        }
    }
}
