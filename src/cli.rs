// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use flatrast::config::{
    RenderConfig, AMBIENT_LIGHT, CANVAS_HEIGHT, CANVAS_MARGIN, CANVAS_WIDTH, ROTATION_STEP_DEGREES,
};

#[derive(Parser, Debug, Clone)]
#[command(name = "flatrast")]
#[command(about = "Flat-shaded software triangle renderer", long_about = None)]
pub struct Cli {
    /// Scene file: a light direction line followed by one triangle per line
    pub scene: PathBuf,

    /// Canvas width in pixels
    #[arg(long, default_value_t = CANVAS_WIDTH)]
    pub width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = CANVAS_HEIGHT)]
    pub height: u32,

    /// Ambient light level added to every triangle
    #[arg(long, default_value_t = AMBIENT_LIGHT)]
    pub ambient: f32,

    /// Pixels between the canvas origin and the scene's top-left corner
    #[arg(long, default_value_t = CANVAS_MARGIN)]
    pub margin: i32,

    /// Degrees per rotation command
    #[arg(long = "rotation-step", default_value_t = ROTATION_STEP_DEGREES)]
    pub rotation_step: f32,

    /// Keys to replay before rendering (w/s/a/d rotate, i/k/j/l/n/m move the light)
    #[arg(long, default_value = "")]
    pub commands: String,

    /// Directory the output image is written to
    #[arg(long = "out-dir", default_value = ".")]
    pub out_dir: PathBuf,
}

impl Cli {
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            width: self.width,
            height: self.height,
            margin: self.margin,
            ambient: self.ambient,
            rotation_step: self.rotation_step,
            ..RenderConfig::default()
        }
    }
}
