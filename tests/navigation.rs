use panorama_tour::{
    ImageHandle, ImageSource, InputEvent, KeyAction, RenderTarget, TextureBuffer, Viewer,
    ViewerConfig, ViewerError,
};

struct Gallery {
    handles: Vec<ImageHandle>,
    images: Vec<TextureBuffer>,
}

impl Gallery {
    /// Three distinct 8x4 panoramas named A, B and C.
    fn abc() -> Self {
        let images = [[200, 10, 10], [10, 200, 10], [10, 10, 200]]
            .into_iter()
            .map(|rgb| TextureBuffer::filled(8, 4, rgb))
            .collect();
        Self {
            handles: ["A.jpg", "B.jpg", "C.jpg"].into_iter().map(ImageHandle::new).collect(),
            images,
        }
    }
}

impl ImageSource for Gallery {
    fn handles(&self) -> &[ImageHandle] {
        &self.handles
    }

    fn decode(&self, handle: &ImageHandle) -> Result<TextureBuffer, ViewerError> {
        let i = self.handles.iter().position(|h| h == handle).expect("known handle");
        Ok(self.images[i].clone())
    }
}

#[derive(Default)]
struct Screen {
    shown: Vec<TextureBuffer>,
    fov: Option<f32>,
}

impl Screen {
    fn current(&self) -> &TextureBuffer {
        self.shown.last().expect("something displayed")
    }
}

impl RenderTarget for Screen {
    fn set_texture(&mut self, buffer: &TextureBuffer) {
        self.shown.push(buffer.clone());
    }

    fn set_fov(&mut self, fov: f32) {
        self.fov = Some(fov);
    }
}

fn press(viewer: &mut Viewer<Gallery>, screen: &mut Screen, action: KeyAction) -> usize {
    viewer.push_event(InputEvent::Key(action));
    let mut frames = 1;
    while viewer.frame(screen) {
        frames += 1;
    }
    frames
}

fn start() -> (Viewer<Gallery>, Screen) {
    let mut viewer = Viewer::new(Gallery::abc(), &ViewerConfig::default());
    let mut screen = Screen::default();
    viewer.start(&mut screen).unwrap();
    (viewer, screen)
}

#[test]
fn start_shows_first_image_at_default_fov() {
    let (viewer, screen) = start();
    assert_eq!(viewer.current_index(), 0);
    assert_eq!(screen.current(), &Gallery::abc().images[0]);
    assert_eq!(screen.fov, Some(90.0));
}

#[test]
fn next_twice_then_rejected_at_end() {
    let (mut viewer, mut screen) = start();
    let c = Gallery::abc().images[2].clone();

    press(&mut viewer, &mut screen, KeyAction::NextImage);
    assert_eq!(viewer.current_index(), 1);
    press(&mut viewer, &mut screen, KeyAction::NextImage);
    assert_eq!(viewer.current_index(), 2);
    assert_eq!(screen.current(), &c);
    assert_eq!(viewer.current_handle().map(|h| h.name()), Some("C.jpg".to_string()));

    let uploads = screen.shown.len();
    press(&mut viewer, &mut screen, KeyAction::NextImage);
    assert_eq!(viewer.current_index(), 2);
    assert_eq!(screen.shown.len(), uploads);
    assert_eq!(screen.current(), &c);
}

#[test]
fn each_intermediate_frame_is_its_own_redraw() {
    let (mut viewer, mut screen) = start();
    let before = screen.shown.len();

    // three blends plus the exact target
    let frames = press(&mut viewer, &mut screen, KeyAction::NextImage);
    assert_eq!(frames, 4);
    assert_eq!(screen.shown.len() - before, 4);
    assert_eq!(screen.shown[before], Gallery::abc().images[0]);
}

#[test]
fn previous_at_start_changes_nothing() {
    let (mut viewer, mut screen) = start();
    let uploads = screen.shown.len();

    press(&mut viewer, &mut screen, KeyAction::PreviousImage);
    assert_eq!(viewer.current_index(), 0);
    assert_eq!(screen.shown.len(), uploads);
}

#[test]
fn camera_input_survives_navigation() {
    let (mut viewer, mut screen) = start();
    viewer.push_event(InputEvent::Wheel(240.0));
    viewer.push_event(InputEvent::Key(KeyAction::YawRight));
    press(&mut viewer, &mut screen, KeyAction::NextImage);

    let view = viewer.view();
    assert!((view.fov - 66.0).abs() < 1e-4);
    assert!((view.yaw - -10.0).abs() < 1e-4);
    assert_eq!(screen.fov, Some(view.fov));
}

#[test]
fn empty_gallery_starts_without_texture() {
    let empty = Gallery {
        handles: Vec::new(),
        images: Vec::new(),
    };
    let mut viewer = Viewer::new(empty, &ViewerConfig::default());
    let mut screen = Screen::default();
    viewer.start(&mut screen).unwrap();
    assert!(viewer.is_empty());
    assert!(screen.shown.is_empty());

    viewer.push_event(InputEvent::Key(KeyAction::NextImage));
    assert!(!viewer.frame(&mut screen));
    assert!(screen.shown.is_empty());
}
