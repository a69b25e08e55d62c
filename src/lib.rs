pub mod app;
pub mod assets;
pub mod camera;
pub mod cli;
pub mod config;
pub mod controls;
pub mod core;
pub mod frame;
pub mod math;
pub mod renderer;
pub mod scene;
pub mod scenes;
pub mod tween;

pub use app::{AppContext, Application, ResizePolicy, SceneSetup};
pub use assets::{AssetServer, LoadError, LoadOutcome, LoadRequest, ModelSource};
pub use camera::PerspectiveCamera;
pub use scene::{NodeId, Scene};
pub use scenes::SceneKind;
pub use tween::{Timeline, Tween};
