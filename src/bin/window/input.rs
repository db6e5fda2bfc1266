use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, MouseButton},
    keyboard::{Key, NamedKey},
};

use crate::state::{State, MAX_TICKS_PER_FRAME};

pub fn handle_key(state: &mut State, event: &KeyEvent) {
    if event.state != ElementState::Pressed {
        return;
    }

    match &event.logical_key {
        Key::Named(NamedKey::Space) => {
            state.running = !state.running;
            log::info!(
                "simulation {}",
                if state.running { "running" } else { "paused" }
            );
        }
        Key::Named(NamedKey::ArrowUp) => {
            state.ticks_per_frame = (state.ticks_per_frame + 1).min(MAX_TICKS_PER_FRAME);
            log::info!("ticks per frame: {}", state.ticks_per_frame);
        }
        Key::Named(NamedKey::ArrowDown) => {
            state.ticks_per_frame = state.ticks_per_frame.saturating_sub(1).max(1);
            log::info!("ticks per frame: {}", state.ticks_per_frame);
        }
        Key::Named(NamedKey::Escape) => state.quit_requested = true,
        Key::Character(c) if c.as_str() == "q" => state.quit_requested = true,
        _ => (),
    }
}

pub fn handle_mouse_input(state: &mut State, button: MouseButton, element_state: ElementState) {
    if button == MouseButton::Left && element_state == ElementState::Pressed {
        if let Some(pos) = state.cursor_pos {
            state.toggle_cell_at(pos);
        }
    }
}

pub fn handle_cursor_move(state: &mut State, position: PhysicalPosition<f64>) {
    state.cursor_pos = Some(position);
}

pub fn handle_cursor_left(state: &mut State) {
    state.cursor_pos = None;
}
