// cstepper: step through small C teaching examples line by line

use std::fs::File;
use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use rustc_hash::FxHashMap;

use cstepper::catalog::{self, CodeExample, CustomExampleDefinition, ExampleError};
use cstepper::config::Cli;
use cstepper::player::TracePlayer;
use cstepper::trace::InputField;
use cstepper::ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // The terminal belongs to the UI, so logs only go to a file
    if let Some(path) = &cli.log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::from(cli.log_level))
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    if cli.list {
        for example in catalog::all_examples() {
            println!(
                "{:<20} {:<13} {}",
                example.id,
                example.difficulty.to_string(),
                example.title
            );
            println!("{:<20} {}", "", example.description);
        }
        return Ok(());
    }

    let example = match load_example(&cli) {
        Ok(example) => example,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut provided = cli.provided_inputs();
    if !cli.no_prompt && !cli.dump_trace && io::stdin().is_terminal() {
        prompt_missing_inputs(&example.inputs, &mut provided)?;
    }

    let inputs = match example.resolve_inputs(&provided) {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let trace = example.build_trace(&inputs);

    if cli.dump_trace {
        println!("{}", serde_json::to_string_pretty(&trace)?);
        return Ok(());
    }

    let player = match TracePlayer::new(trace, cli.speed) {
        Ok(player) => player,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(example, player);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn load_example(cli: &Cli) -> Result<CodeExample, ExampleError> {
    match &cli.custom {
        Some(path) => CustomExampleDefinition::from_json_file(path)?.build(),
        None => catalog::example_by_id(&cli.example)
            .ok_or_else(|| ExampleError::UnknownExample(cli.example.clone())),
    }
}

/// Ask on stdin for every field not already given with --input.
/// An empty answer keeps the default.
fn prompt_missing_inputs(
    fields: &[InputField],
    provided: &mut FxHashMap<String, String>,
) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for field in fields {
        if provided.contains_key(&field.key) {
            continue;
        }
        if let Some(help) = &field.helper_text {
            println!("  ({})", help);
        }
        match &field.default_value {
            Some(default) => print!("{} [{}]: ", field.label, default),
            None => print!("{}: ", field.label),
        }
        stdout.flush()?;

        let mut answer = String::new();
        if stdin.lock().read_line(&mut answer)? == 0 {
            break; // EOF
        }
        let answer = answer.trim();
        if !answer.is_empty() {
            provided.insert(field.key.clone(), answer.to_string());
        }
    }
    Ok(())
}
