// input.rs — platform-neutral input events and their dispatch

use crate::camera::{CameraController, Point};
use crate::error::TransitionError;
use crate::source::ImageSource;
use crate::transition::TransitionController;
use crate::viewer::RenderTarget;
use std::collections::VecDeque;

pub const DEFAULT_KEY_YAW_STEP: f32 = 10.0;

/// Logical key actions; the host decides which physical keys map to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    YawLeft,
    YawRight,
    NextImage,
    PreviousImage,
    ResetView,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed at a surface position in pixels.
    PointerPressed(Point),
    PointerReleased,
    PointerMoved(Point),
    /// Vertical wheel delta in wheel angle units (120 per notch).
    Wheel(f32),
    Key(KeyAction),
}

/// Queues host events and applies them to the controllers once per frame.
#[derive(Debug)]
pub struct InputRouter {
    queue: VecDeque<InputEvent>,
    key_yaw_step: f32,
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_YAW_STEP)
    }
}

impl InputRouter {
    pub fn new(key_yaw_step: f32) -> Self {
        Self {
            queue: VecDeque::new(),
            key_yaw_step,
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Dispatches every queued event in arrival order. Returns true if any of
    /// them changed what should be on screen.
    pub fn drain<S, T>(
        &mut self,
        camera: &mut CameraController,
        transition: &mut TransitionController,
        source: &S,
        target: &mut T,
    ) -> bool
    where
        S: ImageSource + ?Sized,
        T: RenderTarget + ?Sized,
    {
        let mut redraw = false;
        while let Some(event) = self.queue.pop_front() {
            redraw |= self.dispatch(event, camera, transition, source, target);
        }
        redraw
    }

    fn dispatch<S, T>(
        &self,
        event: InputEvent,
        camera: &mut CameraController,
        transition: &mut TransitionController,
        source: &S,
        target: &mut T,
    ) -> bool
    where
        S: ImageSource + ?Sized,
        T: RenderTarget + ?Sized,
    {
        match event {
            InputEvent::PointerPressed(pos) => {
                camera.on_drag_start(pos);
                false
            }
            InputEvent::PointerReleased => {
                camera.on_drag_end();
                false
            }
            InputEvent::PointerMoved(pos) => camera.on_drag_move(pos),
            InputEvent::Wheel(delta) => {
                let changed = camera.on_wheel(delta);
                if changed {
                    target.set_fov(camera.view().fov);
                }
                changed
            }
            InputEvent::Key(KeyAction::YawLeft) => {
                camera.on_key_yaw(self.key_yaw_step);
                true
            }
            InputEvent::Key(KeyAction::YawRight) => {
                camera.on_key_yaw(-self.key_yaw_step);
                true
            }
            InputEvent::Key(KeyAction::ResetView) => {
                if camera.reset() {
                    target.set_fov(camera.view().fov);
                }
                true
            }
            InputEvent::Key(KeyAction::NextImage) => navigate(transition, 1, source),
            InputEvent::Key(KeyAction::PreviousImage) => navigate(transition, -1, source),
        }
    }
}

fn navigate<S>(transition: &mut TransitionController, step: isize, source: &S) -> bool
where
    S: ImageSource + ?Sized,
{
    match transition.request_change(step, source) {
        Ok(()) => true,
        Err(e @ (TransitionError::OutOfRange { .. } | TransitionError::Busy)) => {
            log::debug!("navigation ignored: {e}");
            false
        }
        Err(e) => {
            log::warn!("navigation aborted: {e}");
            false
        }
    }
}
