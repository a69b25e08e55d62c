// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::scenes::SceneKind;

#[derive(Parser, Debug, Clone)]
#[command(name = "scene-sketches")]
#[command(about = "Small 3D scenes on a shared render loop", long_about = None)]
pub struct Cli {
    /// Scene to open
    #[arg(long, value_enum, env = "SCENE", default_value_t = SceneKind::Cube)]
    pub scene: SceneKind,

    /// Directory models and textures are resolved against
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// JSON settings file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Window width, overriding the scene's preferred size
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height, overriding the scene's preferred size
    #[arg(long)]
    pub height: Option<u32>,

    /// Do not log frame rate
    #[arg(long = "no-fps", default_value = "false")]
    pub no_fps: bool,
}
