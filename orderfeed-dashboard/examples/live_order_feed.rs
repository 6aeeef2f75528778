use orderfeed::{config::FeedConfig, shutdown::AsyncShutdown, simulator::OrderFeedSimulator};
use orderfeed_dashboard::{
    Dashboard,
    display::print_dashboard,
    scene::{FrameLoop, HeadlessScene, Scene, Viewport, WidgetPlacement},
    sparkline::SparklineConfig,
    surface::HtmlSurface,
};
use serde::Deserialize;
use std::{fs::File, io::BufReader, time::Duration};
use tracing::info;

const FILE_PATH_FEED_CONFIG: &str = "orderfeed-dashboard/examples/config/feed_config.json";
const RUN_DURATION: Duration = Duration::from_secs(5);

#[derive(Deserialize)]
struct Config {
    feed: FeedConfig,
    sparkline: SparklineConfig,
    fps: u32,
}

#[tokio::main]
async fn main() {
    // Initialise Tracing
    orderfeed::logging::init_logging();

    let Config {
        feed,
        sparkline,
        fps,
    } = load_config();

    // Construct the simulator from the seeded aggregate
    let simulator = OrderFeedSimulator::new(feed).unwrap();

    // Initial full render of the widget
    let mut dashboard = Dashboard::new(HtmlSurface::default(), sparkline);
    dashboard.render_widget(simulator.aggregate());

    // Mount the widget into a headless scene and start rendering frames
    let mut scene = HeadlessScene::default();
    scene.resize(Viewport::new(1920, 1080));
    scene.mount(&dashboard.surface().to_html(), WidgetPlacement::default());
    let frame_loop = FrameLoop::spawn(scene, fps);

    // Run the live feed
    let simulator = simulator.spawn(dashboard);
    tokio::time::sleep(RUN_DURATION).await;

    let (simulator, dashboard) = simulator.shutdown().await.unwrap();
    let scene = frame_loop.shutdown().await.unwrap();

    info!(
        orders = simulator.sequence().value(),
        frames = scene.frames,
        "live order feed finished"
    );

    print_dashboard(simulator.aggregate(), &sparkline);
    println!("{}", dashboard.into_surface().to_html());
}

fn load_config() -> Config {
    let file = File::open(FILE_PATH_FEED_CONFIG).unwrap();
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).unwrap()
}
