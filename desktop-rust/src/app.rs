use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

use anyhow::Result;
use eframe::egui::{self, Color32, RichText};
use image::ImageReader;
use parts_lookup_common::{
    filter_view, selector_choices, FilterEvent, FilterField, PartRecord,
};

use crate::io::{load_inventory, resolve_images_dir};
use crate::model::AppState;

const ROW_HEIGHT: f32 = 68.0;
const THUMB_SIZE: f32 = 60.0;
const NO_IMAGE: &str = "❌";
const ANY_VALUE: &str = "(any)";

pub struct DesktopApp {
    state: AppState,
    status: String,
    thumbs: ThumbCache,
}

struct ThumbData {
    path: PathBuf,
    size: [usize; 2],
    pixels: Vec<u8>,
}

enum Thumb<'a> {
    Ready(&'a egui::TextureHandle),
    Loading,
    Missing,
}

/// Decodes row images off the UI thread; missing or unreadable files are remembered.
struct ThumbCache {
    textures: HashMap<PathBuf, egui::TextureHandle>,
    missing: HashSet<PathBuf>,
    inflight: HashSet<PathBuf>,
    pending: Vec<ThumbData>,
    tx: Sender<ThumbData>,
    rx: Receiver<ThumbData>,
}

impl Default for ThumbCache {
    fn default() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            textures: HashMap::new(),
            missing: HashSet::new(),
            inflight: HashSet::new(),
            pending: Vec::new(),
            tx,
            rx,
        }
    }
}

impl ThumbCache {
    fn busy(&self) -> bool {
        !self.inflight.is_empty() || !self.pending.is_empty()
    }

    fn clear(&mut self) {
        self.textures.clear();
        self.missing.clear();
        self.inflight.clear();
        self.pending.clear();
    }

    fn thumbnail(&mut self, path: &Path) -> Thumb<'_> {
        if self.missing.contains(path) {
            return Thumb::Missing;
        }
        if !self.textures.contains_key(path) {
            self.request(path);
            return if self.missing.contains(path) { Thumb::Missing } else { Thumb::Loading };
        }
        match self.textures.get(path) {
            Some(texture) => Thumb::Ready(texture),
            None => Thumb::Loading,
        }
    }

    fn request(&mut self, path: &Path) {
        if self.inflight.contains(path) {
            return;
        }
        if !path.is_file() {
            log::debug!("image not found: {}", path.display());
            self.missing.insert(path.to_path_buf());
            return;
        }
        self.inflight.insert(path.to_path_buf());
        let sender = self.tx.clone();
        let path_owned = path.to_path_buf();

        std::thread::spawn(move || {
            let image = ImageReader::open(&path_owned).ok().and_then(|r| r.decode().ok());
            let message = match image {
                Some(image) => {
                    let thumb = image.thumbnail(THUMB_SIZE as u32 * 2, THUMB_SIZE as u32 * 2);
                    ThumbData {
                        path: path_owned,
                        size: [thumb.width() as usize, thumb.height() as usize],
                        pixels: thumb.to_rgba8().into_raw(),
                    }
                }
                None => ThumbData {
                    path: path_owned,
                    size: [0, 0],
                    pixels: Vec::new(),
                },
            };
            let _ = sender.send(message);
        });
    }

    fn poll(&mut self, ctx: &egui::Context) {
        while let Ok(msg) = self.rx.try_recv() {
            self.inflight.remove(&msg.path);
            self.pending.push(msg);
        }

        for msg in std::mem::take(&mut self.pending) {
            if msg.size[0] == 0 || msg.size[1] == 0 {
                log::warn!("could not decode image: {}", msg.path.display());
                self.missing.insert(msg.path);
                continue;
            }
            let color_image = egui::ColorImage::from_rgba_unmultiplied(msg.size, &msg.pixels);
            let texture = ctx.load_texture(
                msg.path.display().to_string(),
                color_image,
                egui::TextureOptions::default(),
            );
            self.textures.insert(msg.path, texture);
        }
    }
}

impl DesktopApp {
    fn open_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Spreadsheet", &["xlsx", "xlsm", "xls", "xlsb", "ods"])
            .pick_file()
        {
            self.open_path(&path);
        }
    }

    pub fn open_path(&mut self, path: &Path) {
        match self.load_from_path(path) {
            Ok(_) => {
                self.status = format!("Loaded {} parts from {}", self.state.dataset.len(), path.display())
            }
            Err(err) => {
                log::error!("load failed: {err:#}");
                self.status = format!("Load failed: {err:#}");
            }
        }
    }

    fn reload(&mut self) {
        let Some(path) = self.state.source_path.clone() else {
            self.status = "No source file loaded".to_string();
            return;
        };
        self.open_path(&path);
    }

    fn load_from_path(&mut self, path: &Path) -> Result<()> {
        let dataset = load_inventory(path)?;
        self.state.dataset = dataset;
        self.state.filters.reset_all();
        self.state.source_path = Some(path.to_path_buf());
        self.state.images_dir = resolve_images_dir(path);
        self.thumbs.clear();
        Ok(())
    }
}

impl Default for DesktopApp {
    fn default() -> Self {
        Self {
            state: AppState {
                images_dir: PathBuf::from("images"),
                ..Default::default()
            },
            status: String::new(),
            thumbs: ThumbCache::default(),
        }
    }
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.thumbs.busy() {
            ctx.request_repaint();
        }
        self.thumbs.poll(ctx);

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Spreadsheet").clicked() {
                        self.open_file();
                        ui.close_menu();
                    }
                    if ui.button("Reload").clicked() {
                        self.reload();
                        ui.close_menu();
                    }
                });
                ui.separator();
                if !self.status.is_empty() {
                    ui.label(RichText::new(&self.status).color(Color32::from_gray(170)));
                }
            });
        });

        // 選択肢は前回の状態から
        let options: Vec<Vec<String>> = {
            let view = filter_view(&self.state.dataset, &self.state.filters);
            FilterField::ALL
                .iter()
                .map(|field| view.options(*field).to_vec())
                .collect()
        };

        let mut events = Vec::new();
        egui::SidePanel::left("filters").resizable(true).show(ctx, |ui| {
            ui.heading("🔍 Smart Filters");
            if ui.button("🔄 Clear All Filters").clicked() {
                events.push(FilterEvent::ClearAll);
            }
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                for (field, field_options) in FilterField::ALL.into_iter().zip(&options) {
                    let entry = self.state.filters.get(field);

                    ui.label(format!("{field} contains..."));
                    let mut keyword = entry.keyword.clone();
                    if ui.text_edit_singleline(&mut keyword).changed() {
                        events.push(FilterEvent::SetKeyword(field, keyword));
                    }

                    let mut selected = entry.selected.clone();
                    let shown = if selected.is_empty() { ANY_VALUE } else { selected.as_str() };
                    egui::ComboBox::from_id_source(("select", field.label()))
                        .selected_text(shown)
                        .width(ui.available_width())
                        .show_ui(ui, |ui| {
                            for choice in selector_choices(field_options) {
                                let label = if choice.is_empty() { ANY_VALUE.to_string() } else { choice.clone() };
                                ui.selectable_value(&mut selected, choice, label);
                            }
                        });
                    if selected != entry.selected {
                        events.push(FilterEvent::Select(field, selected));
                    }
                    ui.add_space(8.0);
                }
            });
        });

        if !events.is_empty() {
            for event in events {
                log::debug!("event: {event:?}");
                self.state.filters.handle(event);
            }
            ctx.request_repaint();
        }

        let view = filter_view(&self.state.dataset, &self.state.filters);
        let total = self.state.dataset.len();
        let images_dir = &self.state.images_dir;
        let thumbs = &mut self.thumbs;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("🧱 Inventory Lookup");
            ui.label(
                RichText::new("Type keywords or pick exact matches. Tap 'Clear All Filters' to reset.")
                    .color(Color32::from_gray(170)),
            );
            ui.label(format!("{} of {} parts", view.len(), total));
            ui.separator();

            if view.is_empty() {
                ui.label("No matching parts.");
                return;
            }

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show_rows(ui, ROW_HEIGHT, view.len(), |ui, range| {
                    for index in range {
                        if let Some(record) = view.rows.get(index) {
                            render_row(ui, record, images_dir, thumbs);
                        }
                    }
                });
        });
    }
}

fn render_row(ui: &mut egui::Ui, record: &PartRecord, images_dir: &Path, thumbs: &mut ThumbCache) {
    ui.horizontal(|ui| {
        ui.set_min_height(ROW_HEIGHT - 8.0);
        let size = egui::vec2(THUMB_SIZE, THUMB_SIZE);
        let path = record.image_path(images_dir);
        match thumbs.thumbnail(&path) {
            Thumb::Ready(texture) => {
                ui.add(egui::Image::new(texture).fit_to_exact_size(size));
            }
            Thumb::Loading => {
                ui.allocate_ui_with_layout(size, egui::Layout::centered_and_justified(egui::Direction::LeftToRight), |ui| {
                    ui.label("Loading...");
                });
            }
            Thumb::Missing => {
                ui.allocate_ui_with_layout(size, egui::Layout::centered_and_justified(egui::Direction::LeftToRight), |ui| {
                    ui.label(NO_IMAGE);
                });
            }
        }

        ui.add_sized([80.0, 20.0], egui::Label::new(RichText::new(record.design_id()).strong()));
        ui.add_sized([90.0, 20.0], egui::Label::new(RichText::new(record.element_id()).monospace()));
        ui.add_sized([140.0, 20.0], egui::Label::new(RichText::new(record.color().unwrap_or("-")).monospace()));
        ui.add_sized([280.0, 20.0], egui::Label::new(record.element_name().unwrap_or("-")));
        ui.add_sized([70.0, 20.0], egui::Label::new(RichText::new(record.category().as_str()).monospace()));
        ui.add_sized([80.0, 20.0], egui::Label::new(RichText::new(record.dimensions()).monospace()));
    });
    ui.separator();
}
