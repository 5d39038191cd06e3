use eframe::egui::{
    self,
    DragValue,
    Frame,
    Margin,
    RichText,
    TextEdit,
    Ui,
};
use egui_extras::{
    Column,
    TableBuilder,
    TableRow,
};

use super::{
    actions::{
        ActionQueue,
        UiAction,
    },
    app::KarteiApp,
};
use crate::{
    core::Flashcard,
    settings::TABLE_COLUMNS,
};

const ROW_HEIGHT: f32 = 24.0;
const HEADER_HEIGHT: f32 = 24.0;

/// The card table with its controls row. Row closures push `UiAction`s
/// into a queue that is drained once the frame's widgets are done, so
/// none of them needs mutable access to the whole app.
pub fn card_table(ctx: &egui::Context, app: &mut KarteiApp) {
    let mut actions = ActionQueue::new();

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.add_space(4.0);
        ui_controls_row(ui, app, &mut actions);
        ui.add_space(6.0);

        if app.rows.is_empty() {
            ui_empty_state(ui, app);
        } else {
            ui_card_rows(ui, app, &mut actions);
        }
    });

    let had_actions = !actions.is_empty();
    execute_actions(app, &mut actions);

    if had_actions {
        ctx.request_repaint();
    }
}

fn ui_controls_row(ui: &mut Ui, app: &KarteiApp, actions: &mut ActionQueue) {
    Frame::group(ui.style()).inner_margin(Margin::symmetric(8, 4)).show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 8.0;

            let mut search = app.search.clone();
            let response = ui.add_sized(
                [200.0, ui.spacing().interact_size.y],
                TextEdit::singleline(&mut search).hint_text("Search lesson, front or back…"),
            );
            if response.changed() {
                actions.push(UiAction::SetSearch(search));
            }

            ui.separator();

            if ui.selectable_label(!app.show_selected_only, "Show all").clicked() {
                actions.push(UiAction::SetShowSelectedOnly(false));
            }
            if ui.selectable_label(app.show_selected_only, "Show selected").clicked() {
                actions.push(UiAction::SetShowSelectedOnly(true));
            }

            ui.separator();

            if ui.button("Select visible").clicked() {
                actions.push(UiAction::SelectVisible);
            }
            if ui.button("Unselect all").clicked() {
                actions.push(UiAction::UnselectAll);
            }
            if ui
                .button("Select unprinted")
                .on_hover_text("Replaces the selection with every card that was never printed")
                .clicked()
            {
                actions.push(UiAction::SelectUnprinted);
            }

            ui.separator();

            if ui.button("Delete selected").clicked() {
                actions.push(UiAction::ConfirmDeleteSelected);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(RichText::new("Print selected…").strong()).clicked() {
                    actions.push(UiAction::PrintSelected);
                }
            });
        });
    });
}

fn ui_empty_state(ui: &mut Ui, app: &KarteiApp) {
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);

        if app.total_count == 0 {
            ui.label(
                RichText::new("No cards yet").size(24.0).color(ui.visuals().weak_text_color()),
            );
            ui.add_space(4.0);
            ui.label("Add your first card below, or import a CSV file from the File menu.");
        } else {
            ui.label(
                RichText::new("No cards match the current filter")
                    .size(18.0)
                    .color(ui.visuals().weak_text_color()),
            );
        }
    });
}

fn ui_card_rows(ui: &mut Ui, app: &mut KarteiApp, actions: &mut ActionQueue) {
    let widths: Vec<f32> =
        TABLE_COLUMNS.iter().map(|(name, _)| app.settings.column_width(name)).collect();

    let mut builder = TableBuilder::new(ui)
        .striped(true)
        .resizable(false)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center));

    for width in &widths {
        builder = builder.column(Column::exact(*width));
    }

    if let Some(id) = app.pending_scroll.take() {
        if let Some(index) = app.rows.iter().position(|card| card.id == id) {
            builder = builder.scroll_to_row(index, Some(egui::Align::Center));
        }
    }

    let last_added = app.last_added;
    let row_count = app.rows.len();

    builder
        .header(HEADER_HEIGHT, |mut header| {
            for (index, (name, _)) in TABLE_COLUMNS.iter().enumerate() {
                let width = widths[index];
                header.col(|ui| {
                    if *name != "delete" {
                        ui_header_cell(ui, column_title(name), name, width, actions);
                    }
                });
            }
        })
        .body(|body| {
            let rows = &mut app.rows;

            body.rows(ROW_HEIGHT, row_count, |mut row| {
                let index = row.index();
                let card = &mut rows[index];

                row.set_selected(last_added == Some(card.id));

                ui_col_select(&mut row, card, actions);

                let id = card.id;
                ui_col_text_edit(&mut row, &mut card.lesson, actions, |value| {
                    UiAction::SetLesson { id, value }
                });
                ui_col_text_edit(&mut row, &mut card.front, actions, |value| {
                    UiAction::SetFront { id, value }
                });
                ui_col_text_edit(&mut row, &mut card.back, actions, |value| {
                    UiAction::SetBack { id, value }
                });

                ui_col_copies(&mut row, card, actions);

                row.col(|ui| {
                    ui.label(card.printed_count.to_string());
                });
                row.col(|ui| {
                    ui.label(card.last_printed.as_deref().unwrap_or(""));
                });

                row.col(|ui| {
                    if ui.button("Delete").clicked() {
                        actions.push(UiAction::DeleteCard(card.id));
                    }
                });
            });
        });
}

fn column_title(name: &str) -> &'static str {
    match name {
        "select" => "Select",
        "lesson" => "Lesson",
        "front" => "Front",
        "back" => "Back",
        "copies" => "Copies",
        "printed" => "Printed",
        "last_printed" => "Last printed",
        _ => "",
    }
}

/// Header label plus a drag strip along the cell's right edge. Dragging
/// resizes the column live; the width is persisted when the drag ends.
fn ui_header_cell(
    ui: &mut Ui,
    title: &str,
    column: &'static str,
    width: f32,
    actions: &mut ActionQueue,
) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(title).strong());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let (rect, response) = ui
                .allocate_exact_size(egui::vec2(8.0, ui.available_height()), egui::Sense::drag());

            let stroke = if response.hovered() || response.dragged() {
                ui.visuals().widgets.active.fg_stroke
            } else {
                ui.visuals().widgets.noninteractive.bg_stroke
            };
            ui.painter().vline(rect.center().x, rect.y_range(), stroke);

            let response = response.on_hover_cursor(egui::CursorIcon::ResizeHorizontal);

            if response.dragged() {
                let delta = response.drag_delta().x;
                if delta != 0.0 {
                    actions.push(UiAction::SetColumnWidth { column, width: width + delta });
                }
            }
            if response.drag_stopped() {
                actions.push(UiAction::SaveColumnWidths);
            }
        });
    });
}

fn ui_col_select(row: &mut TableRow<'_, '_>, card: &mut Flashcard, actions: &mut ActionQueue) {
    row.col(|ui| {
        if ui.checkbox(&mut card.selected, "").changed() {
            actions.push(UiAction::SetSelected { id: card.id, selected: card.selected });
        }
    });
}

fn ui_col_text_edit(
    row: &mut TableRow<'_, '_>,
    text: &mut String,
    actions: &mut ActionQueue,
    make_action: impl FnOnce(String) -> UiAction,
) {
    row.col(|ui| {
        let response =
            ui.add(TextEdit::singleline(text).frame(false).desired_width(f32::INFINITY));
        if response.changed() {
            actions.push(make_action(text.clone()));
        }
    });
}

fn ui_col_copies(row: &mut TableRow<'_, '_>, card: &mut Flashcard, actions: &mut ActionQueue) {
    row.col(|ui| {
        let response = ui.add(DragValue::new(&mut card.copies).speed(0.1).range(1..=99));
        if response.changed() {
            actions.push(UiAction::SetCopies { id: card.id, value: card.copies });
        }
    });
}

// Queued work happens here, after every widget for the frame is built.
fn execute_actions(app: &mut KarteiApp, actions: &mut ActionQueue) {
    for action in actions.drain() {
        match action {
            UiAction::SetLesson { id, value } => {
                if let Err(err) = app.store.set_lesson(id, &value) {
                    app.report_store_error("update the lesson", err);
                }
            }
            UiAction::SetFront { id, value } => {
                if let Err(err) = app.store.set_front(id, &value) {
                    app.report_store_error("update the front text", err);
                }
            }
            UiAction::SetBack { id, value } => {
                if let Err(err) = app.store.set_back(id, &value) {
                    app.report_store_error("update the back text", err);
                }
            }
            UiAction::SetCopies { id, value } => {
                if let Err(err) = app.store.set_copies(id, value) {
                    app.report_store_error("update the copy count", err);
                }
            }
            UiAction::SetSelected { id, selected } => {
                match app.store.set_selected(id, selected) {
                    Ok(()) => {
                        app.refresh_counts();
                        if app.show_selected_only {
                            app.reload();
                        }
                    }
                    Err(err) => app.report_store_error("update the selection", err),
                }
            }
            UiAction::SelectVisible => {
                let ids: Vec<i64> = app.rows.iter().map(|card| card.id).collect();
                match app.store.select_many(&ids) {
                    Ok(()) => app.reload(),
                    Err(err) => app.report_store_error("select the visible cards", err),
                }
            }
            UiAction::UnselectAll => match app.store.unselect_all() {
                Ok(()) => app.reload(),
                Err(err) => app.report_store_error("clear the selection", err),
            },
            UiAction::SelectUnprinted => match app.store.select_unprinted() {
                Ok(()) => app.reload(),
                Err(err) => app.report_store_error("select the unprinted cards", err),
            },
            UiAction::DeleteCard(id) => app.confirm_delete_card(id),
            UiAction::ConfirmDeleteSelected => app.confirm_delete_selected(),
            UiAction::PrintSelected => app.print_selected(),
            UiAction::SetSearch(text) => {
                app.search = text;
                app.reload();
            }
            UiAction::SetShowSelectedOnly(value) => {
                app.show_selected_only = value;
                app.reload();
            }
            UiAction::SetColumnWidth { column, width } => {
                app.settings.set_column_width(column, width);
            }
            UiAction::SaveColumnWidths => app.save_settings(),
        }
    }
}
