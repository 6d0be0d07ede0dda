use std::{
    fs,
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use log::LevelFilter;
use nixi::{
    codegen::core::GenerateOptions, compile_source, get_result,
    interpreter::evaluator::core::Context,
};

/// nixi evaluates, or compiles to JavaScript, programs that mix a small
/// functional language with markup, style and script blocks.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The program to run. Without it an interactive session starts.
    file: Option<PathBuf>,

    /// Print the generated JavaScript instead of evaluating the program.
    #[arg(short, long)]
    compile: bool,

    /// Leave the runtime prelude out of the generated JavaScript.
    #[arg(long)]
    no_runtime: bool,

    /// Emit embedded script blocks as executable code when compiling.
    #[arg(long)]
    embed_scripts: bool,

    /// Verbose mode (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn enable_log(verbose: u8) {
    let mut builder = env_logger::Builder::from_default_env();
    match verbose {
        0 => {},
        1 => {
            builder.filter_level(LevelFilter::Info);
        },
        2 => {
            builder.filter_level(LevelFilter::Debug);
        },
        _ => {
            builder.filter_level(LevelFilter::Trace);
        },
    }
    builder.init();
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        },
    };
    enable_log(args.verbose);

    let Some(path) = &args.file else {
        if args.compile {
            eprintln!("--compile needs a file to compile.");
            return ExitCode::FAILURE;
        }
        return repl();
    };

    let Ok(source) = fs::read_to_string(path) else {
        eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                  path.display());
        return ExitCode::FAILURE;
    };
    let unit = path.display().to_string();

    if args.compile {
        let options = GenerateOptions { include_runtime: !args.no_runtime,
                                        embed_scripts:   args.embed_scripts, };
        return match compile_source(&source, &unit, options) {
            Ok(compilation) => {
                print!("{}", compilation.code);
                ExitCode::SUCCESS
            },
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            },
        };
    }

    match get_result(&mut Context::new(), &source, &unit) {
        Ok(value) => {
            println!("{value}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}

/// Reads lines from standard input and evaluates each one in a shared
/// context until `exit` or end of input.
fn repl() -> ExitCode {
    let mut context = Context::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("nixi> ");
        let _ = io::stdout().flush();

        let Some(Ok(line)) = lines.next() else {
            println!();
            return ExitCode::SUCCESS;
        };
        let line = line.trim();
        if line == "exit" {
            return ExitCode::SUCCESS;
        }
        if line.is_empty() {
            continue;
        }

        match get_result(&mut context, line, "<repl>") {
            Ok(value) => println!("{value}"),
            Err(e) => eprintln!("{e}"),
        }
    }
}
