//! Graphical front-end: a winit window rendering the grid through wgpu, with
//! an egui status overlay. Clicks toggle cells; Space runs and pauses; the
//! arrow keys change how many generations run per frame.

mod input;
mod render;
mod state;

use crate::state::State;

use std::sync::Arc;
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::Window,
};

// Constants
const GRID_WIDTH: u32 = 40;
const GRID_HEIGHT: u32 = 40;
const CELL_PIXELS: u32 = 16;

async fn run(event_loop: EventLoop<()>, window: Arc<Window>) {
    let mut state = State::new(window).await;

    event_loop
        .run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { window_id, ref event }
                    if window_id == state.window.id() =>
                {
                    // Pass window-specific events to egui_winit FIRST
                    let response = state.egui_winit_state.on_window_event(&state.window, event);
                    if response.repaint {
                        state.window.request_redraw();
                    }

                    // If egui consumed the event, skip further processing,
                    // except for resizes which the surface must see anyway.
                    let consumed_by_egui =
                        response.consumed && !matches!(event, WindowEvent::Resized(_));

                    if !consumed_by_egui {
                        match event {
                            WindowEvent::CloseRequested => {
                                window_target.exit();
                            }
                            WindowEvent::Resized(new_size) => {
                                state.resize(*new_size);
                            }
                            WindowEvent::KeyboardInput { event: key_event, .. } => {
                                input::handle_key(&mut state, key_event);
                            }
                            WindowEvent::MouseInput { state: element_state, button, .. } => {
                                input::handle_mouse_input(&mut state, *button, *element_state);
                            }
                            WindowEvent::CursorMoved { position, .. } => {
                                input::handle_cursor_move(&mut state, *position);
                            }
                            WindowEvent::CursorLeft { .. } => {
                                input::handle_cursor_left(&mut state);
                            }
                            WindowEvent::RedrawRequested => {
                                match state.update_and_render() {
                                    Ok(frame) => state.render_overlay(frame),
                                    Err(err) => {
                                        // Lost surfaces were reconfigured in
                                        // update_and_render; skip this frame.
                                        log::warn!("Skipping frame due to surface {err:?}");
                                        state.window.request_redraw();
                                    }
                                }
                            }
                            _ => (),
                        }
                    }

                    if state.quit_requested {
                        window_target.exit();
                    }
                }
                Event::AboutToWait => {
                    state.window.request_redraw();
                }
                _ => (),
            }
        })
        .unwrap();
}

fn main() {
    env_logger::init();
    let event_loop = EventLoop::new().unwrap();

    let initial_size = winit::dpi::LogicalSize::new(
        (GRID_WIDTH * CELL_PIXELS) as f64,
        (GRID_HEIGHT * CELL_PIXELS) as f64,
    );

    let window = Arc::new(
        winit::window::WindowBuilder::new()
            .with_title("Game of Life")
            .with_inner_size(initial_size)
            .build(&event_loop)
            .unwrap(),
    );

    pollster::block_on(run(event_loop, window));
}
