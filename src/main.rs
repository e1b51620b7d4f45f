use anyhow::Result;
use log::info;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

use rusted_grove::engine::game_loop::GameLoop;
use rusted_grove::engine::input::{Action, InputManager};
use rusted_grove::game::player::PLAYER_TUNABLES;
use rusted_grove::game::Arena;

/// Starting health of the player
const PLAYER_MAX_HEALTH: i32 = 4;

/// A small walled room with a single hazard in the corner
fn build_arena() -> Result<Arena> {
    let mut arena = Arena::new();
    arena.add_wall(0.0, -100.0, 320.0, 8.0);
    arena.add_wall(0.0, 100.0, 320.0, 8.0);
    arena.add_wall(-160.0, 0.0, 8.0, 200.0);
    arena.add_wall(160.0, 0.0, 8.0, 200.0);
    arena.add_hitbox(100.0, 60.0, 8.0, 8.0, 1);
    arena.spawn_player(0.0, 0.0, PLAYER_TUNABLES, PLAYER_MAX_HEALTH)?;
    Ok(arena)
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Rusted Grove...");

    let mut arena = build_arena()?;
    let mut input = InputManager::new();
    let mut game_loop = GameLoop::new();
    let mut last_state = arena.player().map(|player| player.state());

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Rusted Grove")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    // Main event loop
    event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                input.process_keyboard_event(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::MouseInput { state, button, .. },
                ..
            } => {
                input.process_mouse_button(button, state);
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                let pause_pressed = input.player().just_pressed(Action::Pause);
                if pause_pressed {
                    game_loop.toggle_pause();
                }

                let steps = game_loop.begin_frame();
                arena.run_ticks(steps, game_loop.fixed_timestep(), &mut input);

                let state = arena.player().map(|player| player.state());
                if state != last_state {
                    info!("Player state: {:?} -> {:?}", last_state, state);
                    last_state = state;
                }

                if !arena.has_player() {
                    info!("Player removed, shutting down...");
                    elwt.exit();
                }

                // Ticks consume edges themselves; otherwise they wait for one
                if steps == 0 && (pause_pressed || game_loop.is_paused()) {
                    input.update();
                }
            }
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        }
    }).map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
