#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod render;
mod script;

use anyhow::Context;
use clap::{Command, arg};

use chessboard_interaction::board::Chessboard;
use chessboard_interaction::config::BoardConfig;
use chessboard_interaction::event::EventLog;
use script::Script;


fn read_file(filename: &str) -> anyhow::Result<String> {
    std::fs::read_to_string(filename).with_context(|| format!("Reading {filename}"))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let matches = Command::new("Board console")
        .version(clap::crate_version!())
        .about("Feeds a scripted sequence of inputs to an interactive chessboard")
        .arg(arg!(<config_file> "Path to the board configuration: yaml-serialized BoardConfig."))
        .arg(arg!(<script_file> "Path to the input script: yaml-serialized list of steps."))
        .arg(arg!(--"no-color" "Print the board without colors."))
        .get_matches();

    if matches.get_flag("no-color") {
        console::set_colors_enabled(false);
    }
    let config_file = matches.get_one::<String>("config_file").context("Missing config file")?;
    let script_file = matches.get_one::<String>("script_file").context("Missing script file")?;

    let config = BoardConfig::from_yaml(&read_file(config_file)?)
        .with_context(|| format!("Parsing {config_file}"))?;
    let script = Script::from_yaml(&read_file(script_file)?)?;

    let events = EventLog::new();
    let mut board = Chessboard::from_config(&config, Box::new(events.clone()))
        .with_context(|| format!("Validating {config_file}"))?;
    board.set_bounds(script.bounds);
    for (idx, step) in script.steps.iter().enumerate() {
        script::run_step(&mut board, step).with_context(|| format!("Step {}: {step:?}", idx + 1))?;
    }

    print!("{}", render::render_board(board.context()));
    println!();
    print!("{}", render::render_status(board.context()));
    println!("Events:");
    for event in events.events() {
        println!("  {}", render::render_event(&event));
    }
    Ok(())
}
