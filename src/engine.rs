//! Core rendering engine.
//!
//! The [`Engine`] struct is the main entry point for the renderer. It owns
//! the scene, the render settings and the pixel grids, and runs the
//! pipeline: canvas fit, interactive commands, and the per-frame render
//! pass.
//!
//! A render pass is all-or-nothing from the caller's side: after any
//! command that changes the scene or the light, the frame is marked stale
//! until [`Engine::render`] has run again.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::command::{self, Command, Transition};
use crate::config::RenderConfig;
use crate::render::{Rasterizer, Renderer, ScanlineRasterizer};
use crate::scene::{Scene, SceneError};
use crate::transform::Transform;

/// Suffix appended to the scene's file stem to name the output image.
pub const OUTPUT_SUFFIX: &str = "Output.png";

#[derive(Debug)]
pub enum RenderError {
    Scene(SceneError),
    Image(image::ImageError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Scene(e) => write!(f, "{}", e),
            RenderError::Image(e) => write!(f, "failed to write image: {}", e),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Scene(e) => Some(e),
            RenderError::Image(e) => Some(e),
        }
    }
}

impl From<SceneError> for RenderError {
    fn from(e: SceneError) -> Self {
        RenderError::Scene(e)
    }
}

impl From<image::ImageError> for RenderError {
    fn from(e: image::ImageError) -> Self {
        RenderError::Image(e)
    }
}

/// Counters from one render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Front-facing triangles shaded and rasterized.
    pub drawn: usize,
    /// Back-facing triangles skipped.
    pub culled: usize,
    /// Pixel writes that passed the depth test.
    pub pixels: usize,
}

pub struct Engine {
    config: RenderConfig,
    scene: Scene,
    scene_name: Option<String>,
    renderer: Renderer,
    rasterizer: ScanlineRasterizer,
    frame_current: bool,
}

impl Engine {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            renderer: Renderer::new(config.width, config.height),
            rasterizer: ScanlineRasterizer::new(),
            scene: Scene::default(),
            scene_name: None,
            config,
            frame_current: false,
        }
    }

    /// Creates an engine around an already-built scene and fits it to the canvas.
    pub fn with_scene(config: RenderConfig, scene: Scene) -> Self {
        let mut engine = Self::new(config);
        engine.set_scene(scene);
        engine
    }

    /// Replaces the whole scene and fits it to the canvas.
    pub fn set_scene(&mut self, scene: Scene) {
        self.scene = scene;
        self.fit_to_canvas();
        self.frame_current = false;
    }

    /// Loads a scene file, replacing the current scene on success.
    ///
    /// The file is parsed completely before anything is replaced, so a
    /// failed load leaves the previous scene untouched.
    pub fn load_scene(&mut self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let path = path.as_ref();
        let scene = Scene::load(path, self.config.ambient)?;
        info!("loaded {} triangles from {:?}", scene.len(), path);

        self.scene_name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned());
        self.set_scene(scene);
        Ok(())
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Whether the pixel grids reflect the current scene and light.
    pub fn is_frame_current(&self) -> bool {
        self.frame_current
    }

    /// Changes the canvas size. The scene is refitted and the frame goes stale.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width;
        self.config.height = height;
        self.renderer.resize(width, height);
        self.fit_to_canvas();
        self.frame_current = false;
    }

    /// Translates the scene so its top-left corner sits `margin` pixels
    /// from the canvas origin. Does nothing for an empty scene.
    pub fn fit_to_canvas(&mut self) {
        let Some((left, top)) = self.scene.min_corner() else {
            return;
        };
        // Same half-up rounding as the pixel bounds, without saturating.
        let left = (left + 0.5).floor();
        let top = (top + 0.5).floor();
        let margin = self.config.margin as f32;
        let fit = Transform::translation(margin - left, margin - top, 0.0);
        self.scene.apply(&fit);
        debug!("fit scene from ({}, {}) to margin {}", left, top, margin);
    }

    pub fn handle_command(&mut self, command: Command) {
        match command::transition(command, &self.config) {
            Transition::Rotate(rotation) => {
                self.scene.apply(&rotation);
                self.fit_to_canvas();
            }
            Transition::MoveLight(delta) => {
                self.scene.light_mut().nudge(delta);
            }
        }
        debug!("{:?}: light now {}", command, self.scene.light().direction);
        self.frame_current = false;
    }

    /// Handles a key press. Returns `false` for keys with no command.
    pub fn handle_key(&mut self, key: char) -> bool {
        match Command::from_key(key) {
            Some(command) => {
                self.handle_command(command);
                true
            }
            None => false,
        }
    }

    /// Runs a full render pass into the owned pixel grids.
    ///
    /// Both grids are reset first. Back-facing triangles are skipped before
    /// any shading or scan conversion.
    pub fn render(&mut self) -> RenderStats {
        self.renderer.clear(self.config.background);

        let light = *self.scene.light();
        let mut stats = RenderStats::default();
        let mut fb = self.renderer.as_framebuffer();

        for polygon in self.scene.polygons_mut() {
            if !polygon.facing() {
                stats.culled += 1;
                continue;
            }
            let color = polygon.shading(light.direction, light.ambient_intensity);
            stats.pixels += self
                .rasterizer
                .fill_polygon(polygon, &mut fb, color.to_argb());
            stats.drawn += 1;
        }

        self.frame_current = true;
        debug!(
            "rendered {} triangles ({} culled), {} pixels written",
            stats.drawn, stats.culled, stats.pixels
        );
        stats
    }

    /// `<dir>/<scene stem>Output.png`, or `scene` as the stem when no file
    /// has been loaded.
    pub fn output_path(&self, dir: impl AsRef<Path>) -> PathBuf {
        let stem = self.scene_name.as_deref().unwrap_or("scene");
        dir.as_ref().join(format!("{}{}", stem, OUTPUT_SUFFIX))
    }

    /// Encodes the current frame as PNG, rendering first if it is stale.
    ///
    /// An encoding failure is returned to the caller; the in-memory frame
    /// is kept as is.
    pub fn save_png(&mut self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        if !self.frame_current {
            self.render();
        }
        let path = path.as_ref();
        self.renderer
            .to_image()
            .save_with_format(path, image::ImageFormat::Png)?;
        info!("saved {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{self, Rgb};
    use crate::light::DirectionalLight;
    use crate::math::vec3::Vec3;
    use crate::polygon::Polygon;
    use approx::assert_relative_eq;

    fn small_config() -> RenderConfig {
        RenderConfig {
            width: 120,
            height: 100,
            margin: 10,
            ..RenderConfig::default()
        }
    }

    /// Front-facing right triangle with legs of `size` at depth `z`.
    fn facing_triangle(x: f32, y: f32, z: f32, size: f32, color: Rgb) -> Polygon {
        Polygon::new(
            [
                Vec3::new(x, y, z),
                Vec3::new(x, y + size, z),
                Vec3::new(x + size, y, z),
            ],
            color,
        )
        .unwrap()
    }

    fn lit(polygons: Vec<Polygon>) -> Scene {
        Scene::new(polygons, DirectionalLight::new(Vec3::BACK, 0.1))
    }

    #[test]
    fn single_triangle_scenario() {
        let scene = lit(vec![facing_triangle(0.0, 0.0, 0.0, 10.0, Rgb::gray(200))]);
        let mut engine = Engine::with_scene(small_config(), scene);
        let stats = engine.render();

        assert_eq!(stats.drawn, 1);
        assert_eq!(stats.culled, 0);
        assert_eq!(stats.pixels, 66);

        let shaded = engine.scene().polygons()[0].color();
        assert_eq!(shaded, Rgb::gray(220));
        // Fitted to the margin.
        assert_eq!(engine.renderer().pixel(10, 10), Some(shaded));
        assert_eq!(engine.renderer().pixel(20, 10), Some(shaded));
        assert_eq!(engine.renderer().pixel(9, 10), Some(colors::BACKGROUND));
        assert_eq!(engine.renderer().depth(10, 10), Some(0));
    }

    #[test]
    fn fit_moves_top_left_to_margin() {
        let scene = lit(vec![
            facing_triangle(-40.5, 300.0, 0.0, 10.0, Rgb::gray(1)),
            facing_triangle(-20.0, 280.2, 5.0, 10.0, Rgb::gray(2)),
        ]);
        let mut engine = Engine::with_scene(small_config(), scene);
        // -40.5 rounds up to -40, so x lands at 9.5, which rounds to 10.
        assert_eq!(engine.scene().top_left(), Some((10, 10)));
        assert_eq!(engine.scene().polygons()[0].vertices()[0].x, 9.5);
        assert_relative_eq!(engine.scene().polygons()[1].vertices()[0].y, 10.2, epsilon = 1e-3);

        // Fitting an already fitted scene moves nothing.
        let before = engine.scene().clone();
        engine.fit_to_canvas();
        assert_eq!(engine.scene(), &before);
        engine.resize(150, 90);
        assert_eq!(engine.scene(), &before);
    }

    #[test]
    fn fit_handles_coordinates_beyond_pixel_range() {
        let scene = lit(vec![facing_triangle(-3.0e9, 0.0, 0.0, 1000.0, Rgb::gray(1))]);
        let engine = Engine::with_scene(small_config(), scene);
        assert_eq!(engine.scene().len(), 1);
        // Lands within f32 precision (256 at this magnitude) of the margin.
        let (left, top) = engine.scene().top_left().unwrap();
        assert!((-300..=300).contains(&left));
        assert_eq!(top, 10);
    }

    #[test]
    fn back_facing_triangles_are_not_shaded_or_drawn() {
        let back = Polygon::new(
            [
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(10.0, 0.0, 0.0),
                Vec3::new(0.0, 10.0, 0.0),
            ],
            Rgb::gray(200),
        )
        .unwrap();
        let mut engine = Engine::with_scene(small_config(), lit(vec![back]));
        let stats = engine.render();

        assert_eq!(stats, RenderStats { drawn: 0, culled: 1, pixels: 0 });
        // Never shaded: color is still the raw reflectivity.
        assert_eq!(engine.scene().polygons()[0].color(), Rgb::gray(200));
        assert!(engine
            .renderer()
            .color_buffer()
            .iter()
            .all(|&c| c == colors::BACKGROUND.to_argb()));
    }

    #[test]
    fn nearer_triangle_wins_in_either_order() {
        let near = facing_triangle(0.0, 0.0, 1.0, 20.0, Rgb::new(255, 0, 0));
        let far = facing_triangle(5.0, 5.0, 9.0, 20.0, Rgb::new(0, 0, 255));

        let mut forward = Engine::with_scene(small_config(), lit(vec![near.clone(), far.clone()]));
        let mut reverse = Engine::with_scene(small_config(), lit(vec![far, near]));
        forward.render();
        reverse.render();

        // (17, 17) is inside both triangles after the fit moves them by +10.
        let red = Rgb::new(255, 0, 0).scaled(1.1);
        assert_eq!(forward.renderer().pixel(17, 17), Some(red));
        assert_eq!(reverse.renderer().pixel(17, 17), Some(red));
        assert_eq!(forward.renderer().color_buffer(), reverse.renderer().color_buffer());
        assert_eq!(forward.renderer().depth_buffer(), reverse.renderer().depth_buffer());
    }

    #[test]
    fn compositing_is_independent_of_triangle_order() {
        let triangles = vec![
            facing_triangle(0.0, 0.0, 4.0, 30.0, Rgb::new(200, 10, 10)),
            facing_triangle(8.0, 3.0, 2.0, 25.0, Rgb::new(10, 200, 10)),
            facing_triangle(15.0, 12.0, 7.0, 40.0, Rgb::new(10, 10, 200)),
            facing_triangle(2.0, 20.0, -3.0, 12.0, Rgb::new(90, 90, 0)),
        ];
        let orders: [[usize; 4]; 4] = [[0, 1, 2, 3], [3, 2, 1, 0], [1, 3, 0, 2], [2, 0, 3, 1]];

        let frames: Vec<Vec<u32>> = orders
            .iter()
            .map(|order| {
                let polygons = order.iter().map(|&i| triangles[i].clone()).collect();
                let mut engine = Engine::with_scene(small_config(), lit(polygons));
                engine.render();
                engine.renderer().color_buffer().to_vec()
            })
            .collect();

        for frame in &frames[1..] {
            assert_eq!(frame, &frames[0]);
        }
    }

    #[test]
    fn rotation_refits_and_marks_frame_stale() {
        let scene = lit(vec![facing_triangle(0.0, 0.0, 0.0, 10.0, Rgb::gray(200))]);
        let mut engine = Engine::with_scene(small_config(), scene);
        engine.render();
        assert!(engine.is_frame_current());

        assert!(engine.handle_key('w'));
        assert!(!engine.is_frame_current());
        assert_eq!(engine.scene().top_left(), Some((10, 10)));

        // 18 steps of 10 degrees make half a turn and show the back face.
        for _ in 0..17 {
            engine.handle_command(Command::RotateYPos);
        }
        assert!(!engine.scene().polygons()[0].facing());
        assert_eq!(engine.scene().top_left(), Some((10, 10)));
        assert_eq!(engine.render().culled, 1);
    }

    #[test]
    fn light_commands_only_move_the_light() {
        let scene = lit(vec![facing_triangle(0.0, 0.0, 0.0, 10.0, Rgb::gray(200))]);
        let mut engine = Engine::with_scene(small_config(), scene);
        let vertices = *engine.scene().polygons()[0].vertices();

        for key in "ijjnq".chars() {
            engine.handle_key(key);
        }
        assert_eq!(engine.scene().light().direction, Vec3::new(2.0, 1.0, -1.5));
        assert_eq!(*engine.scene().polygons()[0].vertices(), vertices);
        assert!(!engine.handle_key('q'));
    }

    #[test]
    fn light_moved_behind_leaves_ambient_only() {
        let scene = lit(vec![facing_triangle(0.0, 0.0, 0.0, 10.0, Rgb::gray(200))]);
        let mut engine = Engine::with_scene(small_config(), scene);
        for _ in 0..4 {
            engine.handle_command(Command::LightFar);
        }
        // Light now points along +z, away from the triangle's front.
        engine.render();
        assert_eq!(engine.renderer().pixel(10, 10), Some(Rgb::gray(20)));
    }

    #[test]
    fn empty_scene_renders_background() {
        let mut engine = Engine::new(small_config());
        let stats = engine.render();
        assert_eq!(stats, RenderStats::default());
        assert_eq!(engine.renderer().pixel(0, 0), Some(colors::BACKGROUND));
    }

    #[test]
    fn failed_load_keeps_previous_scene() {
        let scene = lit(vec![facing_triangle(0.0, 0.0, 0.0, 10.0, Rgb::gray(200))]);
        let mut engine = Engine::with_scene(small_config(), scene);

        let path = std::env::temp_dir().join("flatrast_engine_bad_scene.txt");
        std::fs::write(&path, "0 0 -1\n1 2 3\n").unwrap();
        let result = engine.load_scene(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(RenderError::Scene(_))));
        assert_eq!(engine.scene().len(), 1);
        assert_eq!(engine.output_path("out"), Path::new("out").join("sceneOutput.png"));
    }

    #[test]
    fn load_and_save_png() {
        let dir = std::env::temp_dir().join("flatrast_engine_save_test");
        std::fs::create_dir_all(&dir).unwrap();
        let scene_path = dir.join("cube.txt");
        std::fs::write(&scene_path, "0 0 -1\n0 0 0 0 10 0 10 0 0 200 200 200\n").unwrap();

        let mut engine = Engine::new(small_config());
        engine.load_scene(&scene_path).unwrap();
        let out = engine.output_path(&dir);
        assert_eq!(out, dir.join("cubeOutput.png"));

        engine.save_png(&out).unwrap();
        assert!(engine.is_frame_current());
        let img = image::open(&out).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (120, 100));
        assert_eq!(img.get_pixel(10, 10).0, [220, 220, 220]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn save_failure_is_reported_and_frame_survives() {
        let scene = lit(vec![facing_triangle(0.0, 0.0, 0.0, 10.0, Rgb::gray(200))]);
        let mut engine = Engine::with_scene(small_config(), scene);
        engine.render();

        let bad = std::env::temp_dir()
            .join("flatrast_missing_dir")
            .join("nested")
            .join("out.png");
        assert!(matches!(engine.save_png(&bad), Err(RenderError::Image(_))));
        assert_eq!(engine.renderer().pixel(10, 10), Some(Rgb::gray(220)));
    }

    #[test]
    fn resize_reallocates_grids() {
        let mut engine = Engine::new(small_config());
        engine.resize(40, 30);
        assert_eq!(engine.config().width, 40);
        assert_eq!(engine.renderer().color_buffer().len(), 1200);
        assert!(!engine.is_frame_current());
    }
}
