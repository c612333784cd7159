use rusty_stang::frontend::errors::ParserError;
use rusty_stang::frontend::parse_program;
use rusty_stang::interpreter::{Cancellation, Interpreter, Object};

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;
use std::{fs, process};

const PROMPT: &str = ">> ";

const EXIT_USAGE: i32 = 64;
const EXIT_SYNTAX: i32 = 65;
const EXIT_RUNTIME: i32 = 70;
const EXIT_IO: i32 = 74;

static TRACING_INIT: Once = Once::new();

/// Runs a Stang script, or starts a prompt when no script is given.
#[derive(Parser, Debug)]
#[clap(name = "stang", version, about, long_about = None)]
struct Args {
    /// Script to run.
    script: Option<PathBuf>,

    /// Deadline for running a script, in milliseconds.
    #[clap(long, default_value_t = 3000)]
    timeout_ms: u64,

    /// Let scripts run without a deadline.
    #[clap(long)]
    no_timeout: bool,
}

fn main() {
    init_tracing();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            process::exit(EXIT_USAGE);
        }
        Err(e) => e.exit(),
    };

    match &args.script {
        Some(path) => {
            let timeout = (!args.no_timeout).then(|| Duration::from_millis(args.timeout_ms));
            run_file(path, timeout)
        }
        None => run_prompt(),
    }
}

/// Installs a log subscriber, but only when RUST_LOG asks for one.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_writer(io::stderr))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

fn run_prompt() {
    println!("Welcome to Stang!");
    println!("Type code at the prompt, or pass a script path to run a file.");
    println!();

    let mut interpreter = Interpreter::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{}", PROMPT);
        if io::stdout().flush().is_err() {
            return;
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("Failed to read input: {}", e);
                return;
            }
            None => return,
        };
        if line.trim().eq_ignore_ascii_case("exit") {
            println!("bye");
            return;
        }

        let (program, errors) = parse_program(&line);
        if !errors.is_empty() {
            report_syntax_errors(&errors);
            continue;
        }

        let result = interpreter.eval_program(&program);
        println!("{}", result);
    }
}

fn run_file(path: &Path, timeout: Option<Duration>) {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Failed to read {}: {}", path.display(), e);
            process::exit(EXIT_IO);
        }
    };

    let (program, errors) = parse_program(&source);
    if !errors.is_empty() {
        report_syntax_errors(&errors);
        process::exit(EXIT_SYNTAX);
    }

    let mut interpreter = Interpreter::new();
    if let Some(timeout) = timeout {
        interpreter.set_cancellation(Cancellation::with_timeout(timeout));
    }

    let result = interpreter.eval_program(&program);
    println!("{}", result);
    if let Object::Error(_) = result {
        process::exit(EXIT_RUNTIME);
    }
}

fn report_syntax_errors(errors: &[ParserError]) {
    for error in errors {
        println!("Error: {}", error);
    }
}
