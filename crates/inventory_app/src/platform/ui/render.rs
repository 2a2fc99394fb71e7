use std::fmt::Write;

use inventory_core::{
    AppViewModel, DetailStatus, DetailView, Field, FormMode, FormView, ItemCard, ListStatus,
    ListView, ResultDialog, ScreenView, SortKey,
};

const RULE: &str = "----------------------------------------";

/// Renders the whole screen as plain text, footer included.
pub fn render(view: &AppViewModel, year: i32) -> String {
    let mut out = String::new();
    out.push_str("Inventory | list | new\n");
    out.push_str(RULE);
    out.push('\n');

    match &view.screen {
        ScreenView::List(list) => render_list(&mut out, list),
        ScreenView::Create(form) => {
            out.push_str("Create New Service Item\n\n");
            render_form(&mut out, form);
            render_dialog(&mut out, form.dialog.as_ref());
        }
        ScreenView::Detail(detail) => render_detail(&mut out, detail),
    }

    out.push_str(RULE);
    out.push('\n');
    let _ = writeln!(out, "\u{a9} {year} Inventory");
    out
}

fn render_list(out: &mut String, list: &ListView) {
    out.push_str("Service Items\n");
    let _ = writeln!(
        out,
        "Search: {:?}   Sort by: {} ({})",
        list.search_term,
        list.sort_key.label(),
        sort_choices(list.sort_key)
    );
    out.push('\n');

    match &list.status {
        ListStatus::Loading => out.push_str("Loading items...\n"),
        ListStatus::Failed { details } => {
            out.push_str("Failed to load items.\n");
            let _ = writeln!(out, "  {details}");
            out.push_str("  Type `reload` to try again.\n");
        }
        ListStatus::Empty => {
            out.push_str("No service items found yet.\n");
            out.push_str("Go to the \"Create\" page to add your first item!\n");
        }
        ListStatus::Ready => {
            for card in &list.cards {
                render_card(out, card);
            }
        }
    }

    if list.show_pagination {
        let _ = writeln!(out, "\nPage {} of {}", list.current_page, list.total_pages);
    }
}

fn sort_choices(current: SortKey) -> String {
    SortKey::ALL
        .iter()
        .map(|key| {
            if *key == current {
                format!("[{}]", key.as_str())
            } else {
                key.as_str().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_card(out: &mut String, card: &ItemCard) {
    let _ = writeln!(out, "#{:<4} {}  ${}", card.id, card.title, card.price);
    let _ = writeln!(out, "      {}", description_or_placeholder(&card.description));
}

fn description_or_placeholder(description: &str) -> &str {
    if description.trim().is_empty() {
        "No description provided."
    } else {
        description
    }
}

fn render_form(out: &mut String, form: &FormView) {
    let fields = [
        (Field::Name, "Item Name", &form.name),
        (Field::Description, "Description", &form.description),
        (Field::Price, "Price (in USD)", &form.price),
    ];
    for (field, label, value) in fields {
        let _ = writeln!(out, "{label}: {value}");
        if let Some((_, message)) = form.field_errors.iter().find(|(f, _)| *f == field) {
            let _ = writeln!(out, "  ! {message}");
        }
    }

    let action = match form.mode {
        FormMode::Create => "Create Item",
        FormMode::Edit(_) => "Update Item",
    };
    if form.submitting {
        out.push_str("\nSubmitting...\n");
    } else if form.submit_enabled {
        let _ = writeln!(out, "\n[submit] {action}");
    }
}

fn render_detail(out: &mut String, detail: &DetailView) {
    match &detail.status {
        DetailStatus::Loading => out.push_str("Loading item details...\n"),
        DetailStatus::NotFound => out.push_str("Item not found.\n"),
        DetailStatus::Failed { details } => {
            out.push_str("Failed to load item.\n");
            let _ = writeln!(out, "  {details}");
        }
        DetailStatus::Ready {
            card,
            editor,
            confirm_delete,
            deleting,
            dialog,
        } => {
            let _ = writeln!(out, "{}", card.title);
            let _ = writeln!(out, "{}", description_or_placeholder(&card.description));
            let _ = writeln!(out, "Price: ${}", card.price);

            if let Some(form) = editor {
                let _ = writeln!(out, "\nUpdate Item: {}\n", card.title);
                render_form(out, form);
                out.push_str("[cancel] Close editor\n");
            } else if let Some(prompt) = confirm_delete {
                out.push_str("\nConfirm Deletion\n");
                let _ = writeln!(out, "{prompt}");
                out.push_str("[confirm] Delete   [cancel] Keep\n");
            } else if *deleting {
                out.push_str("\nDeleting...\n");
            } else if dialog.is_none() {
                out.push_str("\n[edit] Update   [delete] Delete\n");
            }
            render_dialog(out, dialog.as_ref());
        }
    }
}

fn render_dialog(out: &mut String, dialog: Option<&ResultDialog>) {
    if let Some(dialog) = dialog {
        let _ = writeln!(out, "\n== {} ==", dialog.title);
        let _ = writeln!(out, "{}", dialog.message);
        out.push_str("[ok] Close\n");
    }
}
