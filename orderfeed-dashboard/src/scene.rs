use derive_more::Constructor;
use orderfeed::{
    error::FeedError,
    shutdown::{AsyncShutdown, Shutdown},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::{
    sync::oneshot,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info};

/// Pixel dimensions of the surface a [`Scene`] renders onto.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize, Constructor)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height.max(1))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

/// Static placement of the widget panel in scene space.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize, Serialize)]
pub struct WidgetPlacement {
    pub scale: f64,
    pub position: [f64; 3],
}

impl Default for WidgetPlacement {
    fn default() -> Self {
        Self {
            scale: 0.002,
            position: [0.0, 0.5, -0.95],
        }
    }
}

/// Rendering collaborator that displays the widget markup. Owns no feed state.
pub trait Scene {
    fn mount(&mut self, widget_html: &str, placement: WidgetPlacement);
    fn resize(&mut self, viewport: Viewport);
    fn render_frame(&mut self);
}

/// [`Scene`] that records every call instead of drawing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlessScene {
    pub widget: Option<(String, WidgetPlacement)>,
    pub viewport: Viewport,
    pub frames: u64,
}

impl Scene for HeadlessScene {
    fn mount(&mut self, widget_html: &str, placement: WidgetPlacement) {
        self.widget = Some((widget_html.to_string(), placement));
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn render_frame(&mut self) {
        self.frames += 1;
    }
}

/// Highest frame rate a [`FrameLoop`] renders at, larger requests are clamped.
pub const FPS_MAX: u32 = 1_000;

/// Drives [`Scene::render_frame`] at a fixed cadence on its own task.
#[derive(Debug)]
pub struct FrameLoop;

impl FrameLoop {
    /// Spawn the frame loop, rendering `fps` frames per second until shut down.
    ///
    /// `fps` is clamped to `[1, FPS_MAX]`.
    pub fn spawn<S>(scene: S, fps: u32) -> FrameLoopHandle<S>
    where
        S: Scene + Send + 'static,
    {
        let frame_interval = Self::frame_interval(fps);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(run(scene, frame_interval, shutdown_rx));

        FrameLoopHandle { shutdown_tx, task }
    }

    pub fn frame_interval(fps: u32) -> Duration {
        Duration::from_secs(1) / fps.clamp(1, FPS_MAX)
    }
}

/// Handle to a running [`FrameLoop`] task. Shutting down returns the [`Scene`].
#[derive(Debug)]
pub struct FrameLoopHandle<S> {
    shutdown_tx: oneshot::Sender<Shutdown>,
    task: JoinHandle<S>,
}

impl<S> FrameLoopHandle<S> {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl<S> AsyncShutdown for FrameLoopHandle<S> {
    type Result = Result<S, FeedError>;

    async fn shutdown(self) -> Self::Result {
        let _ = self.shutdown_tx.send(Shutdown);
        Ok(self.task.await?)
    }
}

async fn run<S>(
    mut scene: S,
    frame_interval: Duration,
    mut shutdown_rx: oneshot::Receiver<Shutdown>,
) -> S
where
    S: Scene,
{
    info!(?frame_interval, "FrameLoop running");

    let mut interval = time::interval(frame_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // First tick completes immediately, so frames begin one interval after spawning
    interval.tick().await;

    let mut frames = 0_u64;
    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown_rx => break,
            _ = interval.tick() => {
                scene.render_frame();
                frames += 1;
            }
        }
    }

    debug!(frames, "FrameLoop rendered frames");
    info!("FrameLoop stopped");

    scene
}
