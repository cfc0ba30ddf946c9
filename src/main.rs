// main.rs — window, event loop and wiring between winit and the viewer

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // no console window in release builds

use panorama_tour::camera::{Point, WHEEL_UNITS_PER_LINE};
use panorama_tour::i18n::{self, tr, tr_with};
use panorama_tour::renderer::Renderer;
use panorama_tour::ui::{draw_ui, UiActions, UiModel};
use panorama_tour::{
    DirectorySource, ImageSource, InputEvent, KeyAction, Viewer, ViewerConfig, ViewerError,
};

use winit::{
    dpi::LogicalSize,
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::{Fullscreen, Icon, Window, WindowBuilder},
};

use std::path::Path;
use std::sync::Arc;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = ViewerConfig::from_env().unwrap_or_else(|e| fatal(&e.to_string()));
    i18n::init(config.lang.clone());

    let source = open_source(&mut config).unwrap_or_else(|e| {
        fatal(&tr_with(
            "error.no_directory",
            &[
                ("dir", config.image_dir.display().to_string()),
                ("err", e.to_string()),
            ],
        ))
    });

    let event_loop = EventLoop::new();
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(tr("app.title"))
            .with_inner_size(LogicalSize::new(1600, 900))
            .with_window_icon(load_icon(Path::new("icon.png")))
            .build(&event_loop)
            .unwrap_or_else(|e| fatal(&e.to_string())),
    );

    let mut renderer = pollster::block_on(Renderer::new(window.clone()))
        .unwrap_or_else(|e| fatal(&tr_with("error.gpu", &[("err", e.to_string())])));

    let image_dir = config.image_dir.clone();
    let mut viewer = Viewer::new(source, &config);
    if viewer.is_empty() {
        log::warn!("no .jpg or .png panoramas in {}", image_dir.display());
    }
    if let Err(e) = viewer.start(&mut renderer) {
        log::warn!("cannot show the first panorama: {e}");
    }

    let mut cursor = Point::new(0.0, 0.0);
    let mut pointer_down = false;
    let mut fullscreen = false;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent { event, .. } => {
                let response = renderer.on_ui_event(&event);
                if response.repaint {
                    window.request_redraw();
                }
                // A release over the UI still has to end a drag.
                let is_release = matches!(
                    event,
                    WindowEvent::MouseInput { state: ElementState::Released, button: MouseButton::Left, .. }
                );
                if response.consumed && !is_release {
                    return;
                }

                match event {
                    WindowEvent::CloseRequested => {
                        *control_flow = ControlFlow::Exit;
                    }

                    WindowEvent::Resized(new_size) => {
                        renderer.resize(new_size);
                        window.request_redraw();
                    }

                    WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                        renderer.resize(*new_inner_size);
                        window.request_redraw();
                    }

                    WindowEvent::KeyboardInput { input, .. } => {
                        if input.state == ElementState::Pressed {
                            match input.virtual_keycode {
                                Some(VirtualKeyCode::F11) => toggle_fullscreen(&window, &mut fullscreen),
                                Some(code) => {
                                    if let Some(action) = key_action(code) {
                                        viewer.push_event(InputEvent::Key(action));
                                        window.request_redraw();
                                    }
                                }
                                None => {}
                            }
                        }
                    }

                    WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                        pointer_down = state == ElementState::Pressed;
                        viewer.push_event(if pointer_down {
                            InputEvent::PointerPressed(cursor)
                        } else {
                            InputEvent::PointerReleased
                        });
                    }

                    WindowEvent::CursorMoved { position, .. } => {
                        cursor = Point::new(position.x as f32, position.y as f32);
                        if pointer_down {
                            viewer.push_event(InputEvent::PointerMoved(cursor));
                            window.request_redraw();
                        }
                    }

                    WindowEvent::MouseWheel { delta, .. } => {
                        let lines = match delta {
                            MouseScrollDelta::LineDelta(_, y) => y,
                            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 20.0,
                        };
                        viewer.push_event(InputEvent::Wheel(lines * WHEEL_UNITS_PER_LINE));
                        window.request_redraw();
                    }

                    _ => {}
                }
            }

            Event::RedrawRequested(_) => {
                let animating = viewer.frame(&mut renderer);

                let model = UiModel {
                    view: viewer.view(),
                    index: viewer.current_index(),
                    count: viewer.source().handles().len(),
                    image_name: viewer.current_handle().map(|h| h.name()),
                    transition_progress: viewer.transition().progress(),
                    image_dir: &image_dir,
                    fullscreen,
                };
                let mut actions = UiActions::default();
                let render_result =
                    renderer.render(&viewer.view(), &window, |ctx| draw_ui(ctx, &model, &mut actions));

                let more_input = !actions.events.is_empty();
                for e in actions.events {
                    viewer.push_event(e);
                }
                if actions.toggle_fullscreen {
                    toggle_fullscreen(&window, &mut fullscreen);
                }
                if let Some(lang) = actions.language {
                    i18n::init(lang);
                    window.set_title(&tr("app.title"));
                }
                if animating || more_input {
                    window.request_redraw();
                }

                match render_result {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => renderer.resize(renderer.size),
                    Err(wgpu::SurfaceError::OutOfMemory) => *control_flow = ControlFlow::Exit,
                    Err(e) => log::error!("render error: {e:?}"),
                }
            }

            _ => {}
        }
    });
}

fn key_action(code: VirtualKeyCode) -> Option<KeyAction> {
    match code {
        VirtualKeyCode::Left => Some(KeyAction::YawLeft),
        VirtualKeyCode::Right => Some(KeyAction::YawRight),
        VirtualKeyCode::Up => Some(KeyAction::NextImage),
        VirtualKeyCode::Down => Some(KeyAction::PreviousImage),
        VirtualKeyCode::Home => Some(KeyAction::ResetView),
        _ => None,
    }
}

fn toggle_fullscreen(window: &Window, fullscreen: &mut bool) {
    *fullscreen = !*fullscreen;
    if *fullscreen {
        window.set_fullscreen(Some(Fullscreen::Borderless(None)));
    } else {
        window.set_fullscreen(None);
    }
}

/// Opens the configured directory. If it was only the built-in default and
/// does not exist, the user may pick another folder first.
fn open_source(config: &mut ViewerConfig) -> Result<DirectorySource, ViewerError> {
    if !config.image_dir_explicit && !config.image_dir.is_dir() {
        log::info!("{} not found, asking for a folder", config.image_dir.display());
        if let Some(dir) = rfd::FileDialog::new()
            .set_title(tr("dialog.pick_folder").as_str())
            .pick_folder()
        {
            config.image_dir = dir;
        }
    }
    DirectorySource::open(&config.image_dir)
}

fn load_icon(path: &Path) -> Option<Icon> {
    let img = match image::open(path) {
        Ok(img) => img.to_rgba8(),
        Err(e) => {
            log::debug!("no window icon from {}: {e}", path.display());
            return None;
        }
    };
    let (w, h) = img.dimensions();
    Icon::from_rgba(img.into_raw(), w, h)
        .map_err(|e| log::warn!("invalid window icon {}: {e}", path.display()))
        .ok()
}

fn fatal(message: &str) -> ! {
    log::error!("{message}");
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title(tr("error.title").as_str())
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
    std::process::exit(1);
}
