//! Application context and the per-frame tick.

use crate::assets::{AssetServer, LoadOutcome};
use crate::camera::PerspectiveCamera;
use crate::controls::{CameraRig, ClickToggle, InputEvent};
use crate::frame::{FrameInfo, FrameIterator};
use crate::renderer::FrameRenderer;
use crate::scene::Scene;
use crate::tween::Timeline;

/// How the camera reacts when the surface changes size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizePolicy {
    /// Keep the camera aspect in step with the surface
    #[default]
    Track,
    /// Leave the camera aspect as it was built
    Ignore,
}

/// Everything a scene owns for the lifetime of the window
pub struct AppContext {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub timeline: Timeline,
    pub assets: AssetServer,
    pub rig: CameraRig,
    pub picker: Option<ClickToggle>,
    pub resize_policy: ResizePolicy,
    surface: (u32, u32),
}

impl AppContext {
    pub fn new(assets: AssetServer, width: u32, height: u32) -> Self {
        let mut camera = PerspectiveCamera::default();
        camera.set_aspect(width, height);
        Self {
            scene: Scene::new(),
            camera,
            timeline: Timeline::new(),
            assets,
            rig: CameraRig::Fixed,
            picker: None,
            resize_policy: ResizePolicy::Track,
            surface: (width, height),
        }
    }

    pub fn surface_size(&self) -> (u32, u32) {
        self.surface
    }

    pub fn aspect(&self) -> f32 {
        let (w, h) = self.surface;
        w as f32 / h.max(1) as f32
    }
}

/// One of the hard-coded scenes: builds content, reacts to loads, and
/// optionally does per-frame work of its own.
pub trait SceneSetup {
    fn name(&self) -> &'static str;

    /// Window size the scene wants; `None` accepts the default
    fn preferred_size(&self) -> Option<(u32, u32)> {
        None
    }

    fn build(&mut self, ctx: &mut AppContext);

    fn on_asset(&mut self, _ctx: &mut AppContext, _outcome: &LoadOutcome) {}

    fn update(&mut self, _ctx: &mut AppContext, _frame: &FrameInfo) {}
}

pub struct Application {
    ctx: AppContext,
    setup: Box<dyn SceneSetup>,
    frames: FrameIterator,
}

impl Application {
    /// Build the scene synchronously; model loads splice in on later ticks
    pub fn new(mut setup: Box<dyn SceneSetup>, assets: AssetServer, width: u32, height: u32) -> Self {
        let mut ctx = AppContext::new(assets, width, height);
        setup.build(&mut ctx);
        log::info!(
            "{} scene ready: {} nodes, {} tweens, {} loads pending",
            setup.name(),
            ctx.scene.node_count(),
            ctx.timeline.len(),
            ctx.assets.pending()
        );
        Self {
            ctx,
            setup,
            frames: FrameIterator::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.setup.name()
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut AppContext {
        &mut self.ctx
    }

    pub fn handle_input(&mut self, event: &InputEvent) {
        if let InputEvent::Resize { width, height } = *event {
            self.resize(width, height);
        }
        let ctx = &mut self.ctx;
        ctx.rig.handle(event, &mut ctx.camera);
        if let Some(picker) = ctx.picker.as_mut() {
            picker.handle(event, &ctx.camera, &mut ctx.scene);
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.ctx.surface = (width, height);
        if self.ctx.resize_policy == ResizePolicy::Track {
            self.ctx.camera.set_aspect(width, height);
        }
    }

    /// Advance loads, tweens and controls, then draw exactly once
    pub fn tick(&mut self, renderer: &mut impl FrameRenderer) -> anyhow::Result<FrameInfo> {
        let frame = self.frames.advance();
        let ctx = &mut self.ctx;

        for outcome in ctx.assets.poll(&mut ctx.scene) {
            self.setup.on_asset(ctx, &outcome);
        }
        ctx.timeline.update(&mut ctx.scene);
        ctx.rig.update(&mut ctx.camera);
        self.setup.update(ctx, &frame);

        renderer.render(&ctx.scene, &ctx.camera)?;
        Ok(frame)
    }
}
