// viewer.rs — one viewing session: image set, camera, transitions, input queue

use crate::camera::{CameraController, ViewState};
use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::input::{InputEvent, InputRouter};
use crate::source::{ImageHandle, ImageSource};
use crate::texture::TextureBuffer;
use crate::transition::{Step, TransitionController};

/// What the controllers need from the renderer.
pub trait RenderTarget {
    /// Replaces the displayed panorama.
    fn set_texture(&mut self, buffer: &TextureBuffer);

    /// Rebuilds the projection for a new vertical fov, keeping the aspect ratio.
    fn set_fov(&mut self, fov: f32);
}

pub struct Viewer<S> {
    source: S,
    camera: CameraController,
    transition: TransitionController,
    router: InputRouter,
}

impl<S: ImageSource> Viewer<S> {
    pub fn new(source: S, config: &ViewerConfig) -> Self {
        Self {
            source,
            camera: CameraController::new(config.drag_sensitivity, config.wheel_sensitivity),
            transition: TransitionController::new(config.transition_frames),
            router: InputRouter::new(config.key_yaw_step),
        }
    }

    /// Shows the first panorama and sets the initial fov. An empty set only
    /// sets the fov.
    pub fn start<T>(&mut self, target: &mut T) -> Result<(), ViewerError>
    where
        T: RenderTarget + ?Sized,
    {
        target.set_fov(self.camera.view().fov);
        match self.source.decode_index(self.transition.current_index()) {
            Some(buffer) => {
                target.set_texture(&buffer?);
                log::info!("current image index: {}", self.transition.current_index());
                Ok(())
            }
            None => Ok(()),
        }
    }

    pub fn push_event(&mut self, event: InputEvent) {
        self.router.push(event);
    }

    /// Runs once per redraw: applies queued input, then pushes the next
    /// transition frame. Returns true while another frame is needed.
    pub fn frame<T>(&mut self, target: &mut T) -> bool
    where
        T: RenderTarget + ?Sized,
    {
        self.router.drain(
            &mut self.camera,
            &mut self.transition,
            &self.source,
            target,
        );
        if let Step::Completed { index } = self.transition.advance(target) {
            if let Some(handle) = self.source.handles().get(index) {
                log::info!("showing {}", handle.name());
            }
        }
        self.transition.is_active()
    }

    pub fn view(&self) -> ViewState {
        self.camera.view()
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn transition(&self) -> &TransitionController {
        &self.transition
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn current_index(&self) -> usize {
        self.transition.current_index()
    }

    pub fn current_handle(&self) -> Option<&ImageHandle> {
        self.source.handles().get(self.current_index())
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}
