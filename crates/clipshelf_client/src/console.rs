//! Line-oriented console driver for the clip history.
//!
//! Stdin is read on its own thread and forwarded over a channel; the driver
//! loop ticks the app between lines and reprints the screen when it changes.

use crate::app::render::ScreenView;
use crate::app::ClipShelfApp;
use crate::backend::ClipAction;
use clipshelf_core::models::{Category, CategoryFilter, ClipId, ThemeMode};
use clipshelf_core::{AppError, MemoryGateway};
use crossbeam_channel::{select, unbounded};
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

const CONSOLE_TICK: Duration = Duration::from_millis(50);

const HELP: &str = "\
commands:
  all | cat <category>          show everything / one category
  search [text]                 search (empty text clears)
  open <id> | reveal <id>       preview a clip / reveal a masked one
  edit | text <content> | save | cancel | close
  pin <id> | fav <id> | copy <id> | delete <id>
  yes | no                      answer a confirmation
  unlock <passkey> | lock | setup <passkey>
  add <category> <text>         store a snippet
  capture <category> on|off     enable or disable capture
  simulate <category> <text>    pretend the clipboard captured text
  cleanup | export | export-file | refresh
  theme light|dark|toggle | style <name>
  help | quit";

/// One parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Help,
    Quit,
    Select(CategoryFilter),
    Search(String),
    Open(ClipId),
    Reveal(ClipId),
    Edit,
    EditText(String),
    Save,
    Cancel,
    Close,
    Action(ClipId, ClipAction),
    Confirm,
    Dismiss,
    Unlock(String),
    Lock,
    SetupPasskey(String),
    AddSnippet(Category, String),
    SetCapture(Category, bool),
    Simulate(Category, String),
    Cleanup,
    Export,
    ExportFile,
    Refresh,
    ThemeMode(ThemeMode),
    ToggleTheme,
    ThemeStyle(String),
}

fn parse_id(arg: &str) -> Result<ClipId, String> {
    arg.trim()
        .trim_start_matches('#')
        .parse()
        .map_err(|_| format!("not a clip id: {:?}", arg))
}

fn parse_category(arg: &str) -> Result<Category, String> {
    Category::parse(arg).ok_or_else(|| format!("unknown category: {:?}", arg))
}

/// Splits `"<category> <text>"`.
fn category_and_text(rest: &str) -> Result<(Category, String), String> {
    let (category, text) = rest
        .trim()
        .split_once(char::is_whitespace)
        .ok_or_else(|| "expected <category> <text>".to_string())?;
    Ok((parse_category(category)?, text.trim().to_string()))
}

/// Parses one input line.
///
/// # Errors
/// Returns a user-facing message for unknown commands or bad arguments.
pub fn parse_command(line: &str) -> Result<ConsoleCommand, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    let command = match word.to_ascii_lowercase().as_str() {
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        "all" => ConsoleCommand::Select(CategoryFilter::All),
        "cat" | "category" => ConsoleCommand::Select(
            CategoryFilter::parse(rest).ok_or_else(|| format!("unknown category: {:?}", rest))?,
        ),
        "search" => ConsoleCommand::Search(rest.to_string()),
        "open" => ConsoleCommand::Open(parse_id(rest)?),
        "reveal" => ConsoleCommand::Reveal(parse_id(rest)?),
        "edit" => ConsoleCommand::Edit,
        "text" => ConsoleCommand::EditText(rest.replace("\\n", "\n")),
        "save" => ConsoleCommand::Save,
        "cancel" => ConsoleCommand::Cancel,
        "close" => ConsoleCommand::Close,
        "pin" => ConsoleCommand::Action(parse_id(rest)?, ClipAction::TogglePin),
        "fav" | "favorite" => ConsoleCommand::Action(parse_id(rest)?, ClipAction::ToggleFavorite),
        "copy" => ConsoleCommand::Action(parse_id(rest)?, ClipAction::Copy),
        "delete" | "rm" => ConsoleCommand::Action(parse_id(rest)?, ClipAction::Delete),
        "yes" | "y" => ConsoleCommand::Confirm,
        "no" | "n" => ConsoleCommand::Dismiss,
        "unlock" => ConsoleCommand::Unlock(rest.to_string()),
        "lock" => ConsoleCommand::Lock,
        "setup" => ConsoleCommand::SetupPasskey(rest.to_string()),
        "add" => {
            let (category, text) = category_and_text(rest)?;
            ConsoleCommand::AddSnippet(category, text)
        }
        "simulate" => {
            let (category, text) = category_and_text(rest)?;
            ConsoleCommand::Simulate(category, text)
        }
        "capture" => {
            let (category, state) = category_and_text(rest)?;
            let enabled = match state.to_ascii_lowercase().as_str() {
                "on" | "true" | "yes" => true,
                "off" | "false" | "no" => false,
                other => return Err(format!("expected on/off, got {:?}", other)),
            };
            ConsoleCommand::SetCapture(category, enabled)
        }
        "cleanup" => ConsoleCommand::Cleanup,
        "export" => ConsoleCommand::Export,
        "export-file" => ConsoleCommand::ExportFile,
        "refresh" => ConsoleCommand::Refresh,
        "theme" => match rest.trim().to_ascii_lowercase().as_str() {
            "toggle" => ConsoleCommand::ToggleTheme,
            mode => ConsoleCommand::ThemeMode(
                ThemeMode::parse(mode).ok_or_else(|| format!("unknown theme mode: {:?}", mode))?,
            ),
        },
        "style" => ConsoleCommand::ThemeStyle(rest.trim().to_string()),
        other => return Err(format!("unknown command: {:?} (try 'help')", other)),
    };
    Ok(command)
}

/// Applies a parsed command to the app.
///
/// `gateway` is only used by `simulate`, which stands in for the capture
/// service writing to the backend behind the client's back.
pub fn apply_command(app: &mut ClipShelfApp, gateway: &MemoryGateway, command: ConsoleCommand) {
    match command {
        ConsoleCommand::Help | ConsoleCommand::Quit => {}
        ConsoleCommand::Select(filter) => app.select_category(filter),
        ConsoleCommand::Search(text) => app.set_search_query(text),
        ConsoleCommand::Open(id) => {
            app.activate_card(id);
        }
        ConsoleCommand::Reveal(id) => app.reveal_clip(id),
        ConsoleCommand::Edit => app.begin_edit(),
        ConsoleCommand::EditText(text) => app.set_edit_text(text),
        ConsoleCommand::Save => app.save_edit(),
        ConsoleCommand::Cancel => app.cancel_edit(),
        ConsoleCommand::Close => {
            app.close_preview();
            app.close_unlock_dialog();
        }
        ConsoleCommand::Action(id, action) => app.request_action(id, action),
        ConsoleCommand::Confirm => app.confirm_pending(),
        ConsoleCommand::Dismiss => app.cancel_pending(),
        ConsoleCommand::Unlock(passkey) => {
            app.open_unlock_dialog();
            app.submit_passkey(passkey);
        }
        ConsoleCommand::Lock => app.lock_passwords(),
        ConsoleCommand::SetupPasskey(passkey) => app.setup_passkey(passkey),
        ConsoleCommand::AddSnippet(category, text) => app.add_snippet(&text, category),
        ConsoleCommand::SetCapture(category, enabled) => {
            app.set_category_capture(category, enabled)
        }
        ConsoleCommand::Simulate(category, text) => match gateway.capture(&text, category) {
            Some(id) => debug!(id, "simulated capture stored"),
            None => debug!("simulated capture skipped"),
        },
        ConsoleCommand::Cleanup => app.request_cleanup(),
        ConsoleCommand::Export => app.export_clips(),
        ConsoleCommand::ExportFile => app.export_clips_to_file(),
        ConsoleCommand::Refresh => app.request_refresh(),
        ConsoleCommand::ThemeMode(mode) => app.switch_theme_mode(mode),
        ConsoleCommand::ToggleTheme => app.toggle_theme_mode(),
        ConsoleCommand::ThemeStyle(style) => app.select_theme_style(&style),
    }
}

/// Runs the console loop until `quit` or end of input.
///
/// # Errors
/// Returns an error when the stdin reader cannot be spawned or stdout fails.
pub fn run_console(mut app: ClipShelfApp, gateway: MemoryGateway) -> Result<(), AppError> {
    let (line_tx, line_rx) = unbounded::<String>();
    thread::Builder::new()
        .name("clipshelf-stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if line_tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        warn!("stdin read failed: {}", err);
                        break;
                    }
                }
            }
        })?;

    let mut stdout = io::stdout();
    writeln!(stdout, "{}", HELP)?;
    let mut last_screen: Option<ScreenView> = None;
    loop {
        let incoming = select! {
            recv(line_rx) -> line => Some(line),
            default(CONSOLE_TICK) => None,
        };
        match incoming {
            // Stdin closed.
            Some(Err(_)) => break,
            Some(Ok(line)) if !line.trim().is_empty() => match parse_command(&line) {
                Ok(ConsoleCommand::Quit) => break,
                Ok(ConsoleCommand::Help) => writeln!(stdout, "{}", HELP)?,
                Ok(command) => apply_command(&mut app, &gateway, command),
                Err(message) => writeln!(stdout, "{}", message)?,
            },
            Some(Ok(_)) | None => {}
        }
        app.tick();
        let screen = app.render();
        if last_screen.as_ref() != Some(&screen) {
            write!(stdout, "\n{}", screen)?;
            stdout.flush()?;
            // The editor hint is shown once; re-render without it so the
            // next tick does not reprint.
            last_screen = Some(if app.take_editor_focus() {
                app.render()
            } else {
                screen
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_navigation_and_actions() {
        assert_eq!(
            parse_command("cat Password"),
            Ok(ConsoleCommand::Select(CategoryFilter::Only(Category::Password)))
        );
        assert_eq!(
            parse_command("all"),
            Ok(ConsoleCommand::Select(CategoryFilter::All))
        );
        assert_eq!(
            parse_command("pin #12"),
            Ok(ConsoleCommand::Action(12, ClipAction::TogglePin))
        );
        assert_eq!(
            parse_command("search  rust  "),
            Ok(ConsoleCommand::Search(" rust".to_string()))
        );
        assert_eq!(parse_command("search"), Ok(ConsoleCommand::Search(String::new())));
    }

    #[test]
    fn parses_text_arguments() {
        assert_eq!(
            parse_command("add code fn main() {}"),
            Ok(ConsoleCommand::AddSnippet(
                Category::Code,
                "fn main() {}".to_string()
            ))
        );
        assert_eq!(
            parse_command("text line one\\nline two"),
            Ok(ConsoleCommand::EditText("line one\nline two".to_string()))
        );
        assert_eq!(
            parse_command("capture phone off"),
            Ok(ConsoleCommand::SetCapture(Category::Phone, false))
        );
        assert_eq!(parse_command("theme toggle"), Ok(ConsoleCommand::ToggleTheme));
        assert_eq!(
            parse_command("theme dark"),
            Ok(ConsoleCommand::ThemeMode(ThemeMode::Dark))
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_command("pin abc").is_err());
        assert!(parse_command("cat images").is_err());
        assert!(parse_command("add code").is_err());
        assert!(parse_command("capture url maybe").is_err());
        assert!(parse_command("frobnicate").is_err());
    }
}
