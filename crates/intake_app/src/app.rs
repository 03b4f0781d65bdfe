use std::ffi::OsStr;
use std::fs;
use std::io::{self, BufRead};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use intake_core::{update, AppState, AppViewModel, DocumentType, Msg, Phase, SelectedFile};

use crate::config::AppConfig;
use crate::effects::EffectRunner;
use crate::presenter;

/// Messages flowing into the driver loop: state-machine stimuli from the
/// terminal and the client event thread, plus driver-local actions.
#[derive(Debug, Clone, PartialEq)]
pub enum AppMsg {
    Core(Msg),
    Show,
    Quit,
}

pub fn run_app(config: AppConfig) -> io::Result<()> {
    let (msg_tx, msg_rx) = mpsc::channel::<AppMsg>();
    let mut runner = EffectRunner::new(msg_tx.clone(), config.service_settings())?;

    let input_config = config.clone();
    thread::spawn(move || input_loop(msg_tx, input_config));

    println!("docintake — type `help` for commands");
    let mut state = AppState::new();
    while let Ok(app_msg) = msg_rx.recv() {
        match app_msg {
            AppMsg::Quit => break,
            AppMsg::Show => render(&state.view(), &runner),
            AppMsg::Core(msg) => {
                let (next, effects) = update(std::mem::take(&mut state), msg);
                state = next;
                runner.enqueue(effects);
                if let (Some(preview), Some(file)) = (state.preview(), state.selected_file()) {
                    runner.materialize_preview(preview, file);
                }
                if state.consume_dirty() {
                    render(&state.view(), &runner);
                }
            }
        }
    }
    Ok(())
}

fn input_loop(msg_tx: mpsc::Sender<AppMsg>, config: AppConfig) {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "help" {
            print_help();
            continue;
        }
        match parse_command(line, &config) {
            Ok(msg) => {
                let quit = msg == AppMsg::Quit;
                if msg_tx.send(msg).is_err() || quit {
                    return;
                }
            }
            Err(message) => println!("{message}"),
        }
    }
    // Stdin closed; shut the loop down.
    let _ = msg_tx.send(AppMsg::Quit);
}

fn parse_command(line: &str, config: &AppConfig) -> Result<AppMsg, String> {
    let (command, rest) = match line.split_once(' ') {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    match command {
        "open" if !rest.is_empty() => Ok(AppMsg::Core(Msg::FileChosen(load_file(rest, config)?))),
        "open" => Err("usage: open <path>".to_string()),
        "type" => {
            let document_type = DocumentType::from_wire_name(rest).ok_or_else(|| {
                format!("unknown document type {rest:?}; one of: {}", type_names())
            })?;
            Ok(AppMsg::Core(Msg::DocumentTypeChosen(document_type)))
        }
        "edit" => {
            let (key, value) = rest
                .split_once(' ')
                .ok_or_else(|| "usage: edit <key> <value>".to_string())?;
            Ok(AppMsg::Core(Msg::FieldEdited {
                key: key.to_string(),
                value: value.trim().to_string(),
            }))
        }
        "parse" => Ok(AppMsg::Core(Msg::ParseRequested)),
        "finalize" => Ok(AppMsg::Core(Msg::FinalizeRequested)),
        "dismiss" => Ok(AppMsg::Core(Msg::NotificationDismissed)),
        "show" => Ok(AppMsg::Show),
        "quit" | "exit" => Ok(AppMsg::Quit),
        other => Err(format!("unknown command {other:?}; type `help`")),
    }
}

fn load_file(path_text: &str, config: &AppConfig) -> Result<SelectedFile, String> {
    let path = Path::new(path_text);
    let accepted = config.accepted_extensions.join(" ");
    let extension = extension_of(path)
        .ok_or_else(|| format!("{path_text:?} has no file extension; accepted: {accepted}"))?;
    if !config.accepts(&extension) {
        return Err(format!(".{extension} files are not accepted; accepted: {accepted}"));
    }
    let bytes =
        fs::read(path).map_err(|err| format!("could not read {}: {}", path.display(), err))?;
    let name = path
        .file_name()
        .and_then(OsStr::to_str)
        .unwrap_or(path_text)
        .to_string();
    Ok(SelectedFile {
        name,
        media_type: media_type_for(&extension).to_string(),
        bytes,
    })
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase)
}

fn media_type_for(extension: &str) -> &'static str {
    match extension {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "png" => "image/png",
        "csv" => "text/csv",
        _ => "application/octet-stream",
    }
}

fn type_names() -> String {
    DocumentType::ALL
        .iter()
        .map(|document_type| document_type.wire_name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn render(view: &AppViewModel, runner: &EffectRunner) {
    println!();
    println!(
        "[{}] document type: {}",
        phase_label(view.phase),
        view.document_type.wire_name()
    );
    if let Some(name) = &view.file_name {
        match view.preview.and_then(|preview| runner.preview_path(preview)) {
            Some(path) => println!("file: {} (preview: {})", name, path.display()),
            None => println!("file: {name}"),
        }
    }
    if !view.fields.is_empty() {
        println!("fields:");
        for field in &view.fields {
            println!("  {} = {}", field.key, field.value);
        }
    }
    if view.busy {
        println!("(request in flight)");
    }
    if let Some(text) = presenter::render(view.notification.as_ref()) {
        println!("{text}");
    }
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::FileSelected => "file selected",
        Phase::Parsing => "parsing",
        Phase::Parsed => "parsed",
        Phase::Finalizing => "finalizing",
        Phase::Finalized => "finalized",
    }
}

fn print_help() {
    println!("commands:");
    println!("  open <path>        select a document file");
    println!("  type <name>        choose the document type ({})", type_names());
    println!("  parse              submit the selection for parsing");
    println!("  edit <key> <value> change one extracted field");
    println!("  finalize           commit the reviewed fields");
    println!("  dismiss            close the current notification");
    println!("  show               re-print the current state");
    println!("  quit               exit");
}
