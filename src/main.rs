use anyhow::Context;
use canvas_snake::config::Config;
use canvas_snake::draw::Frame;
use canvas_snake::input;
use canvas_snake::session::{Event as GameEvent, Session};
use pixels::{Pixels, SurfaceTexture};
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use winit::dpi::LogicalSize;
use winit::event::{Event, VirtualKeyCode};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};
use winit_input_helper::WinitInputHelper;

const TITLE: &str = "Snake";

fn update_title(window: &Window, session: &Session) {
    window.set_title(&format!("{TITLE} - {}", session.status_line()));
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    info!(?config, board = ?config.board(), "starting");
    let (width, height) = (config.canvas_width, config.canvas_height);

    let event_loop = EventLoop::new();
    let mut input = WinitInputHelper::new();

    let window = WindowBuilder::new()
        .with_title(TITLE)
        .with_inner_size(LogicalSize::new(width, height))
        .with_resizable(false)
        .build(&event_loop)
        .context("creating window")?;

    let mut pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        Pixels::new(width, height, surface_texture).context("creating pixel surface")?
    };

    let mut session = Session::new(config);
    session.redraw(&mut Frame::new(pixels.frame_mut(), width, height));
    update_title(&window, &session);

    event_loop.run(move |event, _, control_flow| {
        if let Event::RedrawRequested(_) = event {
            if let Err(err) = pixels.render() {
                error!(%err, "render failed");
                *control_flow = ControlFlow::Exit;
                return;
            }
        }

        if input.update(&event) {
            if input.key_pressed(VirtualKeyCode::Escape) || input.close_requested() || input.destroyed() {
                *control_flow = ControlFlow::Exit;
                return;
            }

            let now = Instant::now();
            let mut frame = Frame::new(pixels.frame_mut(), width, height);
            let mut events: Vec<GameEvent> = input::pressed_keys(&input)
                .into_iter()
                .filter_map(|key| session.handle_key(key, now, &mut frame))
                .collect();
            events.extend(session.advance(now, &mut frame));

            // Score, clock and game-over text all live in the title bar.
            if !events.is_empty() {
                update_title(&window, &session);
            }

            *control_flow = match session.next_deadline() {
                Some(deadline) => ControlFlow::WaitUntil(deadline),
                None => ControlFlow::Wait,
            };
            window.request_redraw();
        }
    });
}
