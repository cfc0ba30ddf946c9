//! Cross-fade between panoramas.
//!
//! A request decodes the current and the target image up front, then each
//! [`TransitionController::advance`] call pushes one frame to the render
//! target. With `total_frames = n` the sequence is `n` blended frames at
//! progress `0, 1/n, .. (n-1)/n`, followed by the decoded target itself so the
//! last frame carries no rounding from the blend. The host calls `advance`
//! once per redraw, which keeps every intermediate frame on screen for one
//! frame and leaves the event loop free between steps.
//!
//! Only one transition runs at a time; requests made while blending are
//! refused with [`TransitionError::Busy`].

use crate::error::TransitionError;
use crate::source::ImageSource;
use crate::texture::{blend, TextureBuffer};
use crate::viewer::RenderTarget;

pub const DEFAULT_TOTAL_FRAMES: u32 = 3;

#[derive(Debug)]
pub struct Blend {
    from: TextureBuffer,
    to: TextureBuffer,
    target_index: usize,
    frame_index: u32,
    total_frames: u32,
}

impl Blend {
    pub fn target_index(&self) -> usize {
        self.target_index
    }

    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    pub fn total_frames(&self) -> u32 {
        self.total_frames
    }
}

#[derive(Debug, Default)]
pub enum TransitionState {
    #[default]
    Idle,
    Blending(Blend),
}

/// Outcome of one [`TransitionController::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// No transition in flight; nothing was pushed.
    Idle,
    /// An intermediate blend was pushed.
    Frame { frame_index: u32, total_frames: u32 },
    /// The target image was pushed and is now current.
    Completed { index: usize },
}

#[derive(Debug)]
pub struct TransitionController {
    current_index: usize,
    total_frames: u32,
    state: TransitionState,
}

impl Default for TransitionController {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_FRAMES)
    }
}

impl TransitionController {
    /// `total_frames = 0` makes changes instant: the next `advance` shows the target.
    pub fn new(total_frames: u32) -> Self {
        Self {
            current_index: 0,
            total_frames,
            state: TransitionState::Idle,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_frames(&self) -> u32 {
        self.total_frames
    }

    pub fn state(&self) -> &TransitionState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, TransitionState::Blending(_))
    }

    /// Fraction of the transition already shown, if one is running.
    pub fn progress(&self) -> Option<f32> {
        match &self.state {
            TransitionState::Idle => None,
            TransitionState::Blending(b) if b.total_frames == 0 => Some(0.0),
            TransitionState::Blending(b) => Some(b.frame_index as f32 / b.total_frames as f32),
        }
    }

    /// Starts a transition to `current_index + step`.
    ///
    /// Out-of-range targets, a transition already in flight, or a decode
    /// failure all leave the controller exactly as it was.
    pub fn request_change<S>(&mut self, step: isize, source: &S) -> Result<(), TransitionError>
    where
        S: ImageSource + ?Sized,
    {
        if self.is_active() {
            return Err(TransitionError::Busy);
        }

        let count = source.len();
        let target = self.current_index as isize + step;
        if target < 0 || target as usize >= count {
            return Err(TransitionError::OutOfRange { target, count });
        }
        let target_index = target as usize;

        let handles = source.handles();
        let to = source.decode(&handles[target_index])?;
        let from = if self.total_frames == 0 {
            to.clone()
        } else {
            source.decode(&handles[self.current_index])?
        };

        log::debug!(
            "transition {} -> {} over {} frame(s)",
            self.current_index,
            target_index,
            self.total_frames
        );
        self.state = TransitionState::Blending(Blend {
            from,
            to,
            target_index,
            frame_index: 0,
            total_frames: self.total_frames,
        });
        Ok(())
    }

    /// Pushes the next frame of the running transition to `target`.
    pub fn advance<T>(&mut self, target: &mut T) -> Step
    where
        T: RenderTarget + ?Sized,
    {
        let TransitionState::Blending(b) = &mut self.state else {
            return Step::Idle;
        };

        if b.frame_index < b.total_frames {
            let progress = b.frame_index as f32 / b.total_frames as f32;
            target.set_texture(&blend(&b.from, &b.to, progress));
            let step = Step::Frame {
                frame_index: b.frame_index,
                total_frames: b.total_frames,
            };
            b.frame_index += 1;
            return step;
        }

        let TransitionState::Blending(done) = std::mem::take(&mut self.state) else {
            return Step::Idle;
        };
        target.set_texture(&done.to);
        self.current_index = done.target_index;
        log::info!("current image index: {}", self.current_index);
        Step::Completed {
            index: self.current_index,
        }
    }
}
