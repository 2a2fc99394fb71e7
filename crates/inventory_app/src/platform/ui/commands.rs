//! Line commands typed at the prompt, translated into core messages.

use inventory_core::{Field, Msg, Route, SortKey};

pub const HELP: &str = "\
Commands:
  list | back              show the item list
  new                      open the create form
  open <id>                show one item
  search [text]            filter the list by name (empty clears)
  sort <a-z|price-desc|price-asc>
  page <n>                 jump to a list page
  reload                   fetch the list again
  set <name|description|price> [value]
  submit                   save the create form or the open editor
  edit                     open the update editor
  delete                   ask to delete the shown item
  confirm | cancel         answer the delete prompt, or close the editor
  ok                       close the result dialog
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dispatch(Msg),
    Help,
    Quit,
    Invalid(String),
}

pub fn parse(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "list" | "back" | "home" => Command::Dispatch(Msg::Navigate(Route::List)),
        "new" | "create" => Command::Dispatch(Msg::Navigate(Route::Create)),
        "open" | "show" => match rest.parse() {
            Ok(item_id) => Command::Dispatch(Msg::Navigate(Route::Item(item_id))),
            Err(_) => Command::Invalid(format!("open needs an item id, got {rest:?}")),
        },
        "search" => Command::Dispatch(Msg::SearchChanged(rest.to_string())),
        "sort" => match SortKey::parse(rest) {
            Some(key) => Command::Dispatch(Msg::SortChanged(key)),
            None => Command::Invalid(format!(
                "unknown sort {rest:?}; use a-z, price-desc or price-asc"
            )),
        },
        "page" => match rest.parse::<usize>() {
            Ok(page) if page >= 1 => Command::Dispatch(Msg::PageChanged(page)),
            _ => Command::Invalid(format!("page needs a number from 1, got {rest:?}")),
        },
        "reload" | "refresh" => Command::Dispatch(Msg::ReloadClicked),
        "set" => parse_set(rest),
        "submit" | "save" => Command::Dispatch(Msg::SubmitClicked),
        "edit" => Command::Dispatch(Msg::EditClicked),
        "delete" => Command::Dispatch(Msg::DeleteClicked),
        "confirm" | "yes" => Command::Dispatch(Msg::DeleteConfirmed),
        "cancel" | "no" => Command::Dispatch(Msg::CancelClicked),
        "ok" | "close" => Command::Dispatch(Msg::DialogClosed),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Invalid(format!("unknown command {other:?}; type help")),
    };
    Some(command)
}

fn parse_set(rest: &str) -> Command {
    let (name, value) = match rest.split_once(char::is_whitespace) {
        Some((name, value)) => (name, value.trim_start()),
        None => (rest, ""),
    };
    match Field::parse(name) {
        Some(field) => Command::Dispatch(Msg::FieldEdited {
            field,
            value: value.to_string(),
        }),
        None => Command::Invalid(format!(
            "unknown field {name:?}; use name, description or price"
        )),
    }
}
