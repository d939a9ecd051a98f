// src/bin/main.rs
//
// Terminal shell for the typing core: maps key events to characters,
// routes them through the composer or straight to the engine, and renders
// the engine's per-character judgements.

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::{cursor, execute, terminal};
use std::error::Error;
use std::fs::File;
use std::io::{stdout, Write};
use std::path::PathBuf;
use std::time::Duration;
use typing_core::passage::{BuiltinPassages, PassageFile, PassageSource};
use typing_core::{CharState, HangulComposer, TypingEngine};

#[derive(Parser, Debug)]
#[command(name = "typing_trainer")]
#[command(about = "Hangul typing practice in the terminal")]
struct Args {
    /// Passage library file (.txt with blank-line-separated passages, or .json)
    #[arg(short, long)]
    passage: Option<String>,
}

fn get_log_path() -> PathBuf {
    let mut path = PathBuf::from("target");
    path.push("typing_trainer.log");
    path
}

fn log(message: &str) {
    if let Ok(mut file) = File::options().create(true).append(true).open(get_log_path()) {
        let _ = writeln!(file, "{}", message);
    }
}

fn default_library_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push("hangul-typing-trainer");
    path.push("passages.txt");
    Some(path)
}

/// Picks the passage source: explicit file, then the user library, then
/// the built-in samples.
fn open_source(args: &Args) -> Box<dyn PassageSource> {
    if let Some(path) = &args.passage {
        match PassageFile::load(PathBuf::from(path).as_path()) {
            Ok(file) => {
                log(&format!(
                    "loaded {} passages from {}",
                    file.passage_count(),
                    path
                ));
                return Box::new(file);
            }
            Err(e) => {
                log(&format!("failed to load {}: {} (using builtin)", path, e));
            }
        }
    }
    if let Some(path) = default_library_path() {
        if path.exists() {
            if let Ok(file) = PassageFile::load(&path) {
                log(&format!("loaded user library {}", path.display()));
                return Box::new(file);
            }
        }
    }
    Box::new(BuiltinPassages::new())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    log("--- typing trainer session start ---");

    let mut source = open_source(&args);
    let mut engine = TypingEngine::new();
    let mut composer = HangulComposer::new();
    engine.load_passage(source.next_passage());

    terminal::enable_raw_mode()?;
    let outcome = run(&mut engine, &mut composer);
    terminal::disable_raw_mode()?;
    outcome?;

    let stats = engine.calculate_results();
    let (total, matched) = engine.keystroke_counts();
    println!();
    println!(
        "CPM {:.0}  |  WPM {:.0}  |  Accuracy {:.1}%",
        stats.cpm, stats.wpm, stats.accuracy
    );
    log(&format!(
        "session end: cpm={:.0} wpm={:.0} acc={:.1} keystrokes={}/{}",
        stats.cpm, stats.wpm, stats.accuracy, matched, total
    ));
    Ok(())
}

fn run(engine: &mut TypingEngine, composer: &mut HangulComposer) -> Result<(), Box<dyn Error>> {
    loop {
        render(engine, composer)?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            _ => continue,
        };
        if is_exit(&key) {
            return Ok(());
        }

        match key.code {
            KeyCode::Backspace => {
                // The open composition absorbs the backspace first.
                if !composer.handle_backspace() {
                    engine.handle_backspace();
                }
            }
            KeyCode::Enter => {
                let flushed = composer.flush();
                apply_committed(engine, &flushed);
                if engine.advance_line() && engine.is_complete() {
                    render(engine, composer)?;
                    return Ok(());
                }
            }
            KeyCode::Char(c) if is_plain(&key) => {
                engine.ensure_timing_started();
                if engine.is_current_target_hangul() && HangulComposer::is_mappable(c) {
                    let committed = composer.process_key(c);
                    apply_committed(engine, &committed);
                } else {
                    let flushed = composer.flush();
                    apply_committed(engine, &flushed);
                    engine.try_apply_text(c);
                }
            }
            _ => {}
        }
    }
}

fn apply_committed(engine: &mut TypingEngine, text: &str) {
    for ch in text.chars() {
        engine.try_apply_text(ch);
    }
}

fn is_exit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
        KeyCode::Esc => true,
        _ => false,
    }
}

fn is_plain(key: &KeyEvent) -> bool {
    !key.modifiers.contains(KeyModifiers::CONTROL) && !key.modifiers.contains(KeyModifiers::ALT)
}

fn render(engine: &TypingEngine, composer: &HangulComposer) -> Result<(), Box<dyn Error>> {
    let mut stdout = stdout();
    execute!(
        stdout,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0),
        SetForegroundColor(Color::Cyan),
        Print(format!(
            "Line {}/{}",
            (engine.current_line_index() + 1).min(engine.line_count()),
            engine.line_count()
        )),
        ResetColor,
        Print("\r\n\r\n")
    )?;

    for cell in engine.build_render_line() {
        let color = match cell.state {
            CharState::Correct => Color::Green,
            CharState::Incorrect => Color::Red,
            CharState::Pending => Color::DarkGrey,
        };
        execute!(stdout, SetForegroundColor(color), Print(cell.target), ResetColor)?;
    }

    let preview = composer.composition_text();
    if !preview.is_empty() {
        execute!(
            stdout,
            SetForegroundColor(Color::Yellow),
            Print(format!("  [{}]", preview)),
            ResetColor
        )?;
    }
    execute!(stdout, Print("\r\n"))?;

    let next = engine.next_line_text();
    if !next.is_empty() {
        execute!(
            stdout,
            SetForegroundColor(Color::DarkGrey),
            Print(next),
            ResetColor,
            Print("\r\n")
        )?;
    }

    let stats = engine.calculate_results();
    execute!(
        stdout,
        Print("\r\n"),
        Print(format!(
            "CPM {:.0}  |  WPM {:.0}  |  Accuracy {:.1}%",
            stats.cpm, stats.wpm, stats.accuracy
        )),
        Print("\r\n\r\n"),
        SetForegroundColor(Color::DarkGrey),
        Print("ENTER submit line  |  BACKSPACE delete  |  ESC quit"),
        ResetColor,
        Print("\r\n")
    )?;
    stdout.flush()?;
    Ok(())
}
