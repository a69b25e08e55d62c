//! Asynchronous model loading.
//!
//! Requests are queued as futures on a single-threaded pool and only make
//! progress when [`AssetServer::poll`] runs, so a load never completes inside
//! the call that issued it. Finished loads come back over a channel and are
//! spliced into the scene on the polling thread.

mod gltf;

pub use self::gltf::GltfSource;

use std::path::{Path, PathBuf};
use std::rc::Rc;

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::executor::{LocalPool, LocalSpawner};
use futures::task::LocalSpawnExt;
use glam::Vec3;
use thiserror::Error;

use crate::scene::{NodeId, Prefab, Scene, TextureSet, Transform};

/// Parses a model file into a detached subtree
pub trait ModelSource {
    fn load(&self, path: &Path) -> anyhow::Result<Prefab>;
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("could not parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl LoadError {
    fn from_source(path: &Path, err: anyhow::Error) -> Self {
        let missing = err
            .chain()
            .filter_map(|cause| cause.downcast_ref::<std::io::Error>())
            .any(|io| io.kind() == std::io::ErrorKind::NotFound);
        if missing {
            LoadError::NotFound(path.to_path_buf())
        } else {
            LoadError::Parse {
                path: path.to_path_buf(),
                source: err.into(),
            }
        }
    }
}

/// Where a loaded model root is placed once it arrives
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    /// `None` keeps whatever rotation the file authored
    pub rotation: Option<Vec3>,
    pub scale: Vec3,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: None,
            scale: Vec3::ONE,
        }
    }
}

impl Placement {
    fn apply(&self, transform: &mut Transform) {
        transform.position = self.position;
        if let Some(rotation) = self.rotation {
            transform.rotation = rotation;
        }
        transform.scale = self.scale;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadRequest {
    /// Human-readable name used for the spliced root and in diagnostics
    pub label: String,
    pub path: PathBuf,
    pub placement: Placement,
    /// Maps bound to every mesh on arrival, with material overrides
    pub textures: Option<TextureSet>,
}

impl LoadRequest {
    pub fn new(label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
            placement: Placement::default(),
            textures: None,
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.placement.position = position;
        self
    }

    pub fn rotated(mut self, rotation: Vec3) -> Self {
        self.placement.rotation = Some(rotation);
        self
    }

    pub fn scaled(mut self, scale: Vec3) -> Self {
        self.placement.scale = scale;
        self
    }

    pub fn textured(mut self, textures: TextureSet) -> Self {
        self.textures = Some(textures);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadId(u64);

#[derive(Debug)]
pub struct LoadOutcome {
    pub id: LoadId,
    pub label: String,
    pub result: Result<NodeId, LoadError>,
}

impl LoadOutcome {
    pub fn node(&self) -> Option<NodeId> {
        self.result.as_ref().ok().copied()
    }
}

struct Completion {
    id: LoadId,
    request: LoadRequest,
    result: Result<Prefab, LoadError>,
}

pub struct AssetServer {
    source: Rc<dyn ModelSource>,
    root: PathBuf,
    pool: LocalPool,
    spawner: LocalSpawner,
    sender: UnboundedSender<Completion>,
    receiver: UnboundedReceiver<Completion>,
    next_id: u64,
    in_flight: usize,
}

impl AssetServer {
    pub fn new(source: impl ModelSource + 'static, root: impl Into<PathBuf>) -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        let (sender, receiver) = mpsc::unbounded();
        Self {
            source: Rc::new(source),
            root: root.into(),
            pool,
            spawner,
            sender,
            receiver,
            next_id: 0,
            in_flight: 0,
        }
    }

    /// glTF loader rooted at `root`
    pub fn gltf(root: impl Into<PathBuf>) -> Self {
        Self::new(GltfSource, root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Loads still queued or running
    pub fn pending(&self) -> usize {
        self.in_flight
    }

    /// Queue a load. The result is delivered by a later [`AssetServer::poll`].
    pub fn load(&mut self, request: LoadRequest) -> LoadId {
        let id = LoadId(self.next_id);
        self.next_id += 1;

        let path = self.resolve(&request.path);
        let source = Rc::clone(&self.source);
        let sender = self.sender.clone();
        log::debug!("queued {} model from {}", request.label, path.display());

        let task = async move {
            let result = source.load(&path).map_err(|err| LoadError::from_source(&path, err));
            // The receiver lives as long as the server that owns this pool
            let _ = sender.unbounded_send(Completion { id, request, result });
        };

        match self.spawner.spawn_local(task) {
            Ok(()) => self.in_flight += 1,
            Err(err) => log::error!("could not queue model load: {err}"),
        }
        id
    }

    /// Run queued loads and splice every finished one into `scene`.
    ///
    /// Failures are logged and reported; nothing already in the scene is touched.
    pub fn poll(&mut self, scene: &mut Scene) -> Vec<LoadOutcome> {
        self.pool.run_until_stalled();

        let mut outcomes = Vec::new();
        while let Ok(Some(done)) = self.receiver.try_next() {
            self.in_flight = self.in_flight.saturating_sub(1);
            outcomes.push(self.finish(scene, done));
        }
        outcomes
    }

    fn finish(&self, scene: &mut Scene, done: Completion) -> LoadOutcome {
        let Completion { id, request, result } = done;
        let result = result.map(|mut prefab| {
            prefab.name = Some(request.label.clone());
            request.placement.apply(&mut prefab.transform);
            if let Some(textures) = &request.textures {
                prefab.bind_textures(&textures.resolved(&self.root));
            }
            let meshes = prefab.mesh_count();
            let node = scene.add_prefab(prefab);
            log::debug!("{} model ready: {meshes} meshes", request.label);
            node
        });
        if let Err(err) = &result {
            log::error!("Error loading {} model: {err}", request.label);
        }
        LoadOutcome {
            id,
            label: request.label,
            result,
        }
    }
}
