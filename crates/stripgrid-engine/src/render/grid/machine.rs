use stripgrid_mesh::{
    GridDimensions, GridMesh, GridMeshBuilder, LogObserver, MeshObserver, MeshResult,
};

use crate::render::backend::StripBackend;

use super::strategy::{strategy_for, DrawStrategy};
use super::RenderMode;

/// Owns the mesh and the active draw strategy, and sequences transitions.
///
/// The machine starts inactive; the first [`draw`](Self::draw) (or an explicit
/// [`activate`](Self::activate)) enters the initial strategy. Every later
/// transition exits the current strategy before the next one is entered, and
/// a mesh is only dropped after the strategy using it has exited.
pub struct ModeMachine {
    mesh: GridMesh,
    strategy: Box<dyn DrawStrategy>,
    active: bool,
    observer: Box<dyn MeshObserver>,
}

impl ModeMachine {
    pub fn new(mesh: GridMesh, mode: RenderMode) -> Self {
        Self {
            mesh,
            strategy: strategy_for(mode),
            active: false,
            observer: Box::new(LogObserver::default()),
        }
    }

    /// Replaces the observer notified when [`resize`](Self::resize) builds a mesh.
    pub fn with_observer(mut self, observer: Box<dyn MeshObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn mode(&self) -> RenderMode {
        self.strategy.mode()
    }

    pub fn mesh(&self) -> &GridMesh {
        &self.mesh
    }

    pub fn dims(&self) -> GridDimensions {
        self.mesh.dims()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enters the current strategy if it has not been entered yet.
    pub fn activate(&mut self, backend: &mut dyn StripBackend) {
        if self.active {
            return;
        }
        log::debug!("enter {}", self.mode());
        self.strategy.enter(backend, &self.mesh);
        self.active = true;
    }

    /// Exits the current strategy, releasing whatever it holds on `backend`.
    pub fn deactivate(&mut self, backend: &mut dyn StripBackend) {
        if !self.active {
            return;
        }
        log::debug!("exit {}", self.mode());
        self.strategy.exit(backend);
        self.active = false;
    }

    /// Switches to `mode`. Returns `false` if it was already current.
    pub fn set_mode(&mut self, mode: RenderMode, backend: &mut dyn StripBackend) -> bool {
        let from = self.mode();
        if from == mode {
            return false;
        }

        let was_active = self.active;
        self.deactivate(backend);
        self.strategy = strategy_for(mode);
        if was_active {
            self.activate(backend);
        }

        log::info!("render mode: {from} -> {mode}");
        true
    }

    /// Advances to the next mode (wrapping) and returns it.
    pub fn cycle(&mut self, backend: &mut dyn StripBackend) -> RenderMode {
        let next = self.mode().next();
        self.set_mode(next, backend);
        next
    }

    /// Rebuilds the mesh for `dims` and re-enters the current strategy with it.
    ///
    /// The new mesh is built before anything is torn down: on error the
    /// machine keeps its old mesh and stays in its current state.
    pub fn resize(
        &mut self,
        dims: GridDimensions,
        backend: &mut dyn StripBackend,
    ) -> MeshResult<()> {
        if dims == self.dims() {
            return Ok(());
        }

        let mesh = GridMeshBuilder::new(dims)
            .observer(self.observer.as_mut())
            .build()?;

        let was_active = self.active;
        self.deactivate(backend);
        self.mesh = mesh;
        if was_active {
            self.activate(backend);
        }

        log::info!("grid resized to {}x{}", dims.rows(), dims.cols());
        Ok(())
    }

    /// Validates `rows`/`cols` and calls [`resize`](Self::resize).
    pub fn rebuild(
        &mut self,
        rows: u32,
        cols: u32,
        backend: &mut dyn StripBackend,
    ) -> MeshResult<()> {
        self.resize(GridDimensions::new(rows, cols)?, backend)
    }

    /// Draws one frame with the active strategy, entering it first if needed.
    pub fn draw(&mut self, backend: &mut dyn StripBackend) {
        self.activate(backend);
        self.strategy.draw(backend, &self.mesh);
    }
}
