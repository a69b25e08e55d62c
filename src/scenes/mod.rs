//! The five hard-coded scenes and the assembly helpers they share.

mod aquarium;
mod classroom;
pub mod common;
mod cube;
mod shadows;
mod street;

pub use aquarium::Aquarium;
pub use classroom::Classroom;
pub use cube::Cube;
pub use shadows::Shadows;
pub use street::Street;

use crate::app::SceneSetup;

/// Selects which scene the window runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SceneKind {
    Street,
    Classroom,
    Aquarium,
    Shadows,
    Cube,
}

impl SceneKind {
    pub const ALL: [SceneKind; 5] = [
        SceneKind::Street,
        SceneKind::Classroom,
        SceneKind::Aquarium,
        SceneKind::Shadows,
        SceneKind::Cube,
    ];
}

pub fn setup(kind: SceneKind) -> Box<dyn SceneSetup> {
    match kind {
        SceneKind::Street => Box::new(Street::new()),
        SceneKind::Classroom => Box::new(Classroom::new()),
        SceneKind::Aquarium => Box::new(Aquarium::new()),
        SceneKind::Shadows => Box::new(Shadows::new()),
        SceneKind::Cube => Box::new(Cube::new()),
    }
}
