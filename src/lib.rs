//! 360° panorama viewer.
//!
//! Equirectangular images are mapped onto the inside of a sphere and viewed
//! from its centre. Dragging turns the camera, the wheel zooms, and the
//! arrow keys step through the panoramas of one directory with a short
//! cross-fade.
//!
//! The viewing core ([`camera`], [`transition`], [`input`], [`viewer`]) only
//! talks to the GPU through [`viewer::RenderTarget`]; [`renderer`] is the
//! wgpu implementation.

pub mod camera;
pub mod config;
pub mod error;
pub mod i18n;
pub mod input;
pub mod mesh;
pub mod projection;
pub mod renderer;
pub mod source;
pub mod texture;
pub mod transition;
pub mod ui;
pub mod viewer;

pub use camera::{CameraController, Point, ViewState};
pub use config::ViewerConfig;
pub use error::{TransitionError, ViewerError};
pub use input::{InputEvent, KeyAction};
pub use source::{DirectorySource, ImageHandle, ImageSource};
pub use texture::TextureBuffer;
pub use viewer::{RenderTarget, Viewer};
