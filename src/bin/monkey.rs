use std::env;
use std::error;
use std::fs;
use std::io::{self, stdin, BufRead, Write};
use std::result;

use program::perror;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use monkey::{run, Environment};

type Error = Box<dyn error::Error>;
type Result<T> = result::Result<T, Error>;

const PROMPT: &str = ">> ";

/// Logs go to stderr and only when `RUST_LOG` is set, so the prompt's own
/// output is never interleaved with them by default.
fn init_tracing() {
    if env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn print_parser_errors(out: &mut impl Write, errors: &[String]) -> io::Result<()> {
    writeln!(out, "Woops! We ran into some errors!")?;
    writeln!(out, "parser errors:")?;
    for message in errors {
        writeln!(out, "\t{}", message)?;
    }

    Ok(())
}

fn eval(source: &str, env: &mut Environment, out: &mut impl Write) -> Result<()> {
    let (value, errors) = run(source, env);

    if errors.is_empty() {
        writeln!(out, "{}", value)?;
    } else {
        print_parser_errors(out, &errors)?;
    }

    Ok(())
}

fn run_prompt() -> Result<()> {
    let stdin = stdin();
    let stdout = io::stdout();
    let mut env = Environment::new();

    let user = env::var("USER").unwrap_or_else(|_| "there".to_owned());
    println!("Hello {}! This is the Monkey programming language!", user);
    println!("Feel free to type in commands");

    loop {
        let mut out = stdout.lock();
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let mut buf = String::with_capacity(1024);
        if stdin.lock().read_line(&mut buf)? == 0 {
            return Ok(());
        }

        eval(&buf, &mut env, &mut out)?;
    }
}

fn run_file(path: &str) -> Result<()> {
    let source = fs::read_to_string(path)?;
    let mut env = Environment::new();

    eval(&source, &mut env, &mut io::stdout().lock())
}

fn fail_if_err(r: Result<()>) {
    if let Err(e) = r {
        perror(e)
    }
}

fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    match args.as_slice() {
        [_] => fail_if_err(run_prompt()),
        [_, path] => fail_if_err(run_file(path)),
        _ => perror("usage: monkey [script]".to_owned()),
    }
}
