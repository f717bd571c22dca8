//! # Wisp
//!
//! This binary drives the Wisp interpreter: either over a single script file,
//! or interactively as a REPL that keeps one global environment across lines.
extern crate wisp_lang;

mod cli;

use cli::*;

use std::error::Error;
use std::io::{self, Write};

use log::{error, info};
use wisp_lang::config::Config;
use wisp_lang::globals::new_global_environment;
use wisp_lang::run_in;

fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::init();
    simple_logger::init_with_level((&args.verbosity).into()).unwrap();

    let config = Config::load().unwrap_or_else(|err| {
        error!("failed to load .wisp.toml, using defaults: {}", err);
        Config::default()
    });

    match args.file {
        Some(path) => run_file(&path, &config),
        None => run_repl(),
    }
}

fn run_file(path: &std::path::Path, config: &Config) -> Result<(), Box<dyn Error>> {
    let resolved = config.resolve_run_path(&path.to_string_lossy());
    info!("running {}", resolved);

    let text = std::fs::read_to_string(&resolved)?;
    let (_, err) = wisp_lang::run_with_config(&resolved, &text, &std::rc::Rc::new(config.clone()));

    if let Some(diagnostic) = err {
        error!("{}", diagnostic.render());
        std::process::exit(1);
    }

    Ok(())
}

fn run_repl() -> Result<(), Box<dyn Error>> {
    let global_env = new_global_environment();
    let mut line = String::new();

    loop {
        print!("wisp> ");
        io::stdout().flush()?;
        line.clear();

        if io::stdin().read_line(&mut line)? == 0 {
            println!();
            break;
        }

        let text = line.trim_end();
        if text.is_empty() {
            continue;
        }

        match run_in("<stdin>", text, &global_env) {
            (Some(value), None) => println!("{}", value.to_repr_string()),
            (None, None) => {}
            (_, Some(diagnostic)) => error!("{}", diagnostic.render()),
        }
    }

    Ok(())
}
