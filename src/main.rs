mod backend;
mod control;
mod player;
mod render;
mod world;

use std::sync::Arc;
use std::time::{Duration, Instant};

use glam::Vec2;
use pollster::block_on;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{KeyEvent, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey, PhysicalKey};
use winit::window::{Window, WindowId};

use backend::Canvas;
use control::ControllerSettings;
use player::camera::Camera;
use player::Player;
use render::FrameRenderer;
use world::TileMap;

const FPS_CAP: u32 = 60;
const CANVAS_WIDTH: u32 = 384;
const CANVAS_HEIGHT: u32 = 216;
const WINDOW_SCALE: u32 = 2;
/// Simulation step the held inputs are integrated at.
const UPDATE_TIMESTEP: f32 = 0.016;

pub struct State {
    canvas: Option<Canvas>,
    controls: ControllerSettings,

    map: TileMap,
    player: Player,

    delta_accumulator: f32,
    time_per_frame: Duration,
    now: Instant,
}

impl State {
    pub fn new() -> Self {
        let map = TileMap::new(world::MAPDATA).unwrap();
        let camera = Camera::new(
            Vec2::new(2.0, 2.0),
            Vec2::new(-1.0, 0.1),
            Vec2::new(0.0, 0.66),
            CANVAS_WIDTH,
            CANVAS_HEIGHT,
        );

        Self {
            canvas: None,
            controls: ControllerSettings::init(),

            map,
            player: Player::new(camera),

            delta_accumulator: 0.0,
            time_per_frame: Duration::from_secs_f64(1.0 / FPS_CAP as f64),
            now: Instant::now(),
        }
    }

    fn update(&mut self, delta: f32) {
        self.delta_accumulator += delta;
        while self.delta_accumulator >= UPDATE_TIMESTEP {
            self.player.update(&self.map, UPDATE_TIMESTEP);
            self.delta_accumulator -= UPDATE_TIMESTEP;
        }
    }
}

impl ApplicationHandler for State {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let attributes = Window::default_attributes()
            .with_title("Raycasting")
            .with_inner_size(PhysicalSize::new(
                CANVAS_WIDTH * WINDOW_SCALE,
                CANVAS_HEIGHT * WINDOW_SCALE,
            ));
        let window = Arc::new(event_loop.create_window(attributes).unwrap());

        log::info!("initializing canvas");
        self.canvas =
            Some(block_on(Canvas::init(window, CANVAS_WIDTH, CANVAS_HEIGHT)).unwrap());
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(game_input) = self.controls.get_input_binding(&key) {
                        let is_pressed = event.state.is_pressed();
                        for input in game_input.iter() {
                            self.player.process_input(*input, is_pressed)
                        }
                    }
                }
            }
            WindowEvent::Resized(new_size) => {
                let canvas = self.canvas.as_mut().unwrap();
                canvas.resize(new_size);
                canvas.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                let canvas = self.canvas.as_mut().unwrap();

                // Every pixel gets overwritten, no buffer clear needed
                FrameRenderer::new(self.player.camera(), &self.map)
                    .render_par(canvas.buffer_mut());

                match canvas.render() {
                    Ok(_) => (),
                    Err(wgpu::SurfaceError::Lost) => canvas.on_surface_lost(),
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("out of gpu memory, exiting");
                        event_loop.exit()
                    }
                    // Outdated and Timeout resolve themselves by the next frame
                    Err(e) => log::warn!("surface error: {:?}", e),
                }
            }
            _ => (),
        }
    }

    fn new_events(&mut self, _: &ActiveEventLoop, _: StartCause) {
        let elapsed = self.now.elapsed();

        if elapsed >= self.time_per_frame {
            self.now = Instant::now();

            if let Some(canvas) = self.canvas.as_ref() {
                canvas.request_redraw();
            }
            self.update(elapsed.as_secs_f32());
        }
    }

    fn exiting(&mut self, _: &ActiveEventLoop) {
        log::info!("exiting");
    }
}

fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "error");
    }
    env_logger::init();

    let event_loop = EventLoop::new().unwrap();
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut state = State::new();
    event_loop.run_app(&mut state).unwrap();
}
