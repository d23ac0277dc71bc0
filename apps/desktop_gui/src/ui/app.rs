use client_core::{LoadState, PostListState};
use crossbeam_channel::{Receiver, Sender};
use shared::domain::Post;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiAction, UiEvent},
    orchestration::dispatch_backend_command,
    reducer::{fail_pending_load, reduce_action, reduce_event, start_initial_load},
};

const MAX_EVENTS_PER_FRAME: usize = 64;

pub struct PostsApp {
    state: PostListState,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    status: String,
}

impl PostsApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let mut app = Self {
            state: PostListState::new(),
            cmd_tx,
            ui_rx,
            status: String::new(),
        };
        if let Some(cmd) = start_initial_load(&mut app.state) {
            app.submit(cmd);
        }
        app
    }

    fn submit(&mut self, cmd: BackendCommand) {
        let is_load = cmd == BackendCommand::LoadPosts;
        if !dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) && is_load {
            fail_pending_load(&mut self.state, &self.status);
        }
    }

    fn process_ui_events(&mut self) {
        for event in self.ui_rx.try_iter().take(MAX_EVENTS_PER_FRAME) {
            reduce_event(&mut self.state, event, &mut self.status);
        }
    }

    fn handle_action(&mut self, action: UiAction) {
        if let Some(cmd) = reduce_action(&mut self.state, action) {
            self.submit(cmd);
        }
    }

    fn show_add_row(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        ui.horizontal(|ui| {
            let input = egui::TextEdit::singleline(self.state.new_title_mut())
                .hint_text("Enter new title")
                .desired_width(ui.available_width() - 60.0);
            let response = ui.add(input);
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Add").clicked() || submitted {
                actions.push(UiAction::Add);
            }
        });
    }

    fn show_post_row(&mut self, ui: &mut egui::Ui, post: &Post, actions: &mut Vec<UiAction>) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            if self.state.is_editing(post.id) {
                ui.horizontal(|ui| {
                    if let Some(draft) = self.state.edit_title_mut() {
                        ui.add(
                            egui::TextEdit::singleline(draft)
                                .desired_width(ui.available_width() - 130.0),
                        );
                    }
                    if ui.button("Save").clicked() {
                        actions.push(UiAction::SaveEdit);
                    }
                    if ui.button("Cancel").clicked() {
                        actions.push(UiAction::CancelEdit);
                    }
                });
            } else {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&post.title).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Delete").clicked() {
                            actions.push(UiAction::Delete(post.id));
                        }
                        if ui.button("Edit").clicked() {
                            actions.push(UiAction::BeginEdit(post.id));
                        }
                    });
                });
            }
        });
    }

    fn show_post_list(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        self.show_add_row(ui, actions);
        ui.add_space(8.0);

        let posts = self.state.posts().to_vec();
        egui::ScrollArea::vertical().show(ui, |ui| {
            for post in &posts {
                self.show_post_row(ui, post, actions);
                ui.add_space(4.0);
            }
        });
    }
}

impl eframe::App for PostsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let mut actions = Vec::new();
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(self.status.as_str());
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Posts");
            });
            ui.add_space(12.0);

            match self.state.load_state() {
                LoadState::Idle | LoadState::Loading => {
                    ui.vertical_centered(|ui| {
                        ui.spinner();
                        ui.label("Loading...");
                    });
                }
                LoadState::Errored(_) => {
                    ui.vertical_centered(|ui| {
                        ui.colored_label(egui::Color32::LIGHT_RED, "Error fetching posts!");
                        if ui.button("Reload").clicked() {
                            actions.push(UiAction::Reload);
                        }
                    });
                }
                LoadState::Loaded => self.show_post_list(ui, &mut actions),
            }
        });

        for action in actions {
            self.handle_action(action);
        }

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
