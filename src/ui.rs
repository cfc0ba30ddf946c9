// ui.rs — egui menu, status bar and empty-state overlay

use crate::camera::ViewState;
use crate::i18n::{self, tr, tr_with};
use crate::input::{InputEvent, KeyAction};
use std::path::{Path, PathBuf};

/// Snapshot of viewer state the overlay displays.
#[derive(Debug, Clone)]
pub struct UiModel<'a> {
    pub view: ViewState,
    pub index: usize,
    pub count: usize,
    pub image_name: Option<String>,
    pub transition_progress: Option<f32>,
    pub image_dir: &'a Path,
    pub fullscreen: bool,
}

/// What the user asked for through the overlay this frame.
#[derive(Debug, Default)]
pub struct UiActions {
    pub events: Vec<InputEvent>,
    pub toggle_fullscreen: bool,
    pub language: Option<String>,
}

pub fn draw_ui(ctx: &egui::Context, model: &UiModel<'_>, actions: &mut UiActions) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button(tr("menu.view"), |ui| {
                if ui.button(tr("view.reset")).clicked() {
                    actions.events.push(InputEvent::Key(KeyAction::ResetView));
                    ui.close_menu();
                }
                ui.separator();
                let can_step = model.count > 1 && model.transition_progress.is_none();
                if ui
                    .add_enabled(can_step && model.index + 1 < model.count, egui::Button::new(tr("view.next")))
                    .clicked()
                {
                    actions.events.push(InputEvent::Key(KeyAction::NextImage));
                    ui.close_menu();
                }
                if ui
                    .add_enabled(can_step && model.index > 0, egui::Button::new(tr("view.previous")))
                    .clicked()
                {
                    actions.events.push(InputEvent::Key(KeyAction::PreviousImage));
                    ui.close_menu();
                }
                ui.separator();
                let label = if model.fullscreen {
                    tr("view.fullscreen.exit")
                } else {
                    tr("view.fullscreen.enter")
                };
                if ui.button(label).clicked() {
                    actions.toggle_fullscreen = true;
                    ui.close_menu();
                }
            });

            ui.menu_button(tr("menu.language"), |ui| {
                let current = i18n::current_lang();
                for (code, name) in i18n::LANGUAGES {
                    if ui.radio(current == code, name).clicked() {
                        actions.language = Some(code.to_string());
                        ui.close_menu();
                    }
                }
            });
        });
    });

    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if model.count > 0 {
                ui.label(tr_with(
                    "status.image",
                    &[
                        ("index", (model.index + 1).to_string()),
                        ("count", model.count.to_string()),
                    ],
                ));
                if let Some(name) = &model.image_name {
                    ui.label(name.as_str());
                }
                ui.label("|");
            }

            ui.label(format!("FOV: {:.1}°", model.view.fov));
            ui.label("|");
            ui.label(format!("Yaw: {:.1}°", model.view.yaw));
            ui.label("|");
            ui.label(format!("Pitch: {:.1}°", model.view.pitch));

            if let Some(progress) = model.transition_progress {
                ui.label("|");
                ui.label(
                    egui::RichText::new(tr_with(
                        "status.transition",
                        &[("percent", format!("{:.0}", progress * 100.0))],
                    ))
                    .color(egui::Color32::YELLOW),
                );
            }
        });
    });

    if model.count == 0 {
        egui::Window::new(tr("empty.title"))
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(tr_with(
                    "empty.detail",
                    &[("dir", model.image_dir.display().to_string())],
                ));
            });
    }
}

/// Registers the first usable system CJK font as a fallback so the Korean
/// and Chinese tables render. Latin text keeps egui's built-in fonts.
pub fn setup_fonts(ctx: &egui::Context) {
    let Some((path, bytes)) = font_candidates()
        .into_iter()
        .find_map(|p| load_font(&p).map(|bytes| (p, bytes)))
    else {
        log::info!("no CJK font found; non-Latin UI text may not render");
        return;
    };
    log::debug!("using UI fallback font {}", path.display());

    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert("cjk".to_owned(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        if let Some(list) = fonts.families.get_mut(&family) {
            list.push("cjk".to_owned());
        }
    }
    ctx.set_fonts(fonts);
}

fn load_font(path: &Path) -> Option<Vec<u8>> {
    let bytes = std::fs::read(path).ok()?;
    // ab_glyph rejects collections it cannot parse; those are skipped
    ab_glyph::FontArc::try_from_vec(bytes.clone()).ok()?;
    Some(bytes)
}

fn font_candidates() -> Vec<PathBuf> {
    let system: &[&str] = if cfg!(windows) {
        &[
            r"C:\Windows\Fonts\malgun.ttf",
            r"C:\Windows\Fonts\msyh.ttf",
            r"C:\Windows\Fonts\simhei.ttf",
        ]
    } else if cfg!(target_os = "macos") {
        &[
            "/System/Library/Fonts/AppleSDGothicNeo.ttc",
            "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
            "/System/Library/Fonts/Hiragino Sans GB.ttc",
        ]
    } else {
        &[
            "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
            "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
        ]
    };

    let bundled = ["NotoSansKR-Regular.otf", "NotoSansSC-Regular.otf", "NotoSansCJK-Regular.ttc"];
    let exe_assets = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|d| d.join("assets")));

    system
        .iter()
        .map(PathBuf::from)
        .chain(bundled.iter().filter_map(|f| exe_assets.as_ref().map(|d| d.join(f))))
        .chain(bundled.iter().map(|f| Path::new("assets").join(f)))
        .collect()
}
