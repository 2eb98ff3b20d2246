use std::path::Path;
use std::time::Duration;

use eframe::egui::{self, Color32, Pos2, Sense};
use egui_plot::{Bar, BarChart, Plot};
use formation_calc::config::embedded_preset;
use formation_calc::session::{STEPS, STEP_PERCENT};
use formation_calc::{
    load_preset, Attribute, ClipboardError, ClipboardSink, FormationPreset, Marker, Nature,
    SessionState,
};
use log::{error, info, warn};

const DOT_RADIUS: f32 = 6.0;
const DOT_SPACING: f32 = 16.0;

const DOT_ON: Color32 = Color32::from_rgb(236, 180, 64);
const DOT_OFF: Color32 = Color32::from_gray(60);
const BOOSTED: Color32 = Color32::from_rgb(214, 93, 69);
const LOWERED: Color32 = Color32::from_rgb(70, 140, 210);

/// Hands text to egui, which forwards it to the platform clipboard after the frame.
struct EguiClipboard {
    ctx: egui::Context,
}

impl ClipboardSink for EguiClipboard {
    fn name(&self) -> &'static str {
        "egui"
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.ctx.output_mut(|o| o.copied_text = text.to_owned());
        Ok(())
    }
}

struct FormationApp {
    session: SessionState,
    points_text: String,
    base_text: [String; Attribute::COUNT],
}

impl FormationApp {
    fn new(session: SessionState) -> Self {
        let points_text = session.points.to_string();
        let base_text = Attribute::ALL.map(|attr| session.base[attr].to_string());
        Self {
            session,
            points_text,
            base_text,
        }
    }

    fn draw_points(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Points:");
            let response =
                ui.add(egui::TextEdit::singleline(&mut self.points_text).desired_width(90.0));
            if response.changed() {
                self.session.set_points(&self.points_text);
            }
            if response.lost_focus() {
                self.points_text = self.session.points.to_string();
            }
            ui.separator();
            ui.label(format!("Total: {}%", self.session.raw_total()));
        });
    }

    fn draw_strips(&mut self, ui: &mut egui::Ui, now: f64) {
        egui::Grid::new("weight_strips")
            .num_columns(3)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                for attr in Attribute::ALL {
                    ui.label(attr.label());
                    if let Some(step) = self.draw_dot_strip(ui, attr) {
                        // Rejections surface through the session notice.
                        let _ = self.session.toggle_step(attr, step, now);
                    }
                    ui.label(format!("{}%", self.session.weights.get(attr)));
                    ui.end_row();
                }
            });
    }

    /// Paints one strip and returns the clicked step, if any.
    fn draw_dot_strip(&self, ui: &mut egui::Ui, attr: Attribute) -> Option<u32> {
        let active = self.session.active_steps(attr);
        let size = egui::vec2(DOT_SPACING * STEPS as f32, DOT_SPACING);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());
        let painter = ui.painter();
        for step in 1..=STEPS {
            let center = Pos2::new(
                rect.left() + DOT_SPACING * (step as f32 - 0.5),
                rect.center().y,
            );
            let color = if step <= active { DOT_ON } else { DOT_OFF };
            painter.circle_filled(center, DOT_RADIUS, color);
        }
        let response = response.on_hover_text(format!(
            "{} in {}% steps",
            attr.display_name(),
            STEP_PERCENT
        ));
        if !response.clicked() {
            return None;
        }
        let pos = response.interact_pointer_pos()?;
        let step = ((pos.x - rect.left()) / DOT_SPACING).floor() as u32 + 1;
        Some(step.clamp(1, STEPS))
    }

    fn draw_base_inputs(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            for attr in Attribute::ALL {
                let idx = attr.index();
                ui.label(format!("{}:", attr.label()));
                let response = ui
                    .add(egui::TextEdit::singleline(&mut self.base_text[idx]).desired_width(60.0));
                if response.changed() {
                    self.session.set_base(attr, &self.base_text[idx]);
                }
                if response.lost_focus() {
                    self.base_text[idx] = self.session.base[attr].to_string();
                }
            }
        });
    }

    fn draw_nature_picker(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Nature:");
            let mut selected = self.session.nature;
            egui::ComboBox::from_id_source("nature")
                .selected_text(selected.caption())
                .width(220.0)
                .show_ui(ui, |ui| {
                    for nature in Nature::ALL {
                        ui.selectable_value(&mut selected, nature, nature.caption());
                    }
                });
            if selected != self.session.nature {
                self.session.select_nature(selected.name());
            }
        });
    }

    fn draw_preview(&self, ui: &mut egui::Ui) {
        let formation = self.session.snapshot();

        let bars: Vec<Bar> = Attribute::ALL
            .iter()
            .map(|attr| {
                Bar::new(attr.index() as f64, f64::from(formation.added[*attr]))
                    .name(attr.label())
                    .width(0.6)
            })
            .collect();
        Plot::new("added_points")
            .height(140.0)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .show_x(false)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(DOT_ON).name("Added"))
            });

        egui::Grid::new("preview")
            .num_columns(3)
            .spacing([16.0, 4.0])
            .show(ui, |ui| {
                for attr in Attribute::ALL {
                    let label = format!("• {}", attr.display_name());
                    match formation.marker_for(attr) {
                        Marker::Boosted => ui.colored_label(BOOSTED, label),
                        Marker::Lowered => ui.colored_label(LOWERED, label),
                        Marker::None => ui.label(label),
                    };
                    ui.strong(formation.totals[attr].to_string());
                    ui.weak(format!("+{}", formation.added[attr]));
                    ui.end_row();
                }
            });
    }
}

impl eframe::App for FormationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Point Formation");
            self.draw_points(ui);
            ui.separator();
            self.draw_strips(ui, now);
            ui.separator();
            ui.label("Base values:");
            self.draw_base_inputs(ui);
            self.draw_nature_picker(ui);
            ui.separator();
            self.draw_preview(ui);
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Copy formation").clicked() {
                    let mut sink = EguiClipboard { ctx: ctx.clone() };
                    self.session.export_to(&mut sink, now);
                }
                if let Some(notice) = self.session.visible_notice(now) {
                    ui.label(&notice.message);
                }
            });
        });

        if self.session.visible_notice(now).is_some() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

fn load_startup_preset() -> FormationPreset {
    let loaded = match std::env::args().nth(1) {
        Some(path) => load_preset(Path::new(&path)),
        None => embedded_preset(),
    };
    match loaded {
        Ok(preset) => preset,
        Err(err) => {
            warn!("Failed to load preset ({err}); starting empty");
            FormationPreset::default()
        }
    }
}

fn startup_session() -> SessionState {
    match SessionState::from_preset(&load_startup_preset()) {
        Ok(session) => session,
        Err(err) => {
            warn!("Preset rejected ({err}); starting empty");
            SessionState::new()
        }
    }
}

fn print_headless(session: &SessionState) {
    print!("{}", session.snapshot().export_text());
}

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let session = startup_session();
    let lacks_display = cfg!(target_family = "unix")
        && !cfg!(target_os = "macos")
        && std::env::var("DISPLAY").is_err()
        && std::env::var("WAYLAND_DISPLAY").is_err();

    if lacks_display {
        info!("No GUI display detected (missing DISPLAY/WAYLAND_DISPLAY); printing formation.");
        print_headless(&session);
        return Ok(());
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(egui::vec2(520.0, 720.0))
            .with_min_inner_size(egui::vec2(420.0, 560.0)),
        ..Default::default()
    };

    let app_session = session.clone();
    match eframe::run_native(
        "Point Formation",
        native_options,
        Box::new(move |_| Ok(Box::new(FormationApp::new(app_session)))),
    ) {
        Ok(()) => Ok(()),
        Err(err) => {
            error!("Failed to start GUI ({err}); printing formation instead.");
            print_headless(&session);
            Ok(())
        }
    }
}
