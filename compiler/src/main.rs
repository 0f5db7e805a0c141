//! aaa CLI
//!
//! Main entry point for the `aaa` command.

use clap::{Parser, Subcommand};
use miette::Result;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use aaa::config::Config;
use aaa::repl::Repl;

#[derive(Parser)]
#[command(name = "aaa")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Evaluator for the aaa expression language", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (TOML)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the expression in a source file
    Run {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Evaluate an expression given on the command line
    Eval {
        /// Expression source
        #[arg(value_name = "EXPR")]
        expr: String,
    },

    /// Lex and parse a source file without evaluating it
    Check {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Show the token stream
        #[arg(long)]
        show_tokens: bool,

        /// Show the parsed AST
        #[arg(long)]
        show_ast: bool,
    },

    /// Start the interactive REPL (default)
    Repl,

    /// Show information about the interpreter
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    let config = Config::load_or_default(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Run { input } => run(&input, &config),
        Commands::Eval { expr } => eval(&expr, &config),
        Commands::Check {
            input,
            show_tokens,
            show_ast,
        } => check(&input, show_tokens, show_ast),
        Commands::Repl => Repl::new(&config).run(),
        Commands::Info => info(),
    }
}

fn read_source(input: &Path) -> Result<String> {
    std::fs::read_to_string(input)
        .map_err(|e| miette::miette!("Failed to read input file: {}", e))
}

fn run(input: &Path, config: &Config) -> Result<()> {
    tracing::info!("Running {:?}", input);

    let source = read_source(input)?;
    let globals = config.globals_table();
    let value = aaa::run(&input.to_string_lossy(), &source, &globals)?;
    println!("{}", value);
    Ok(())
}

fn eval(expr: &str, config: &Config) -> Result<()> {
    let globals = config.globals_table();
    let value = aaa::run("<arg>", expr, &globals)?;
    println!("{}", value);
    Ok(())
}

fn check(input: &Path, show_tokens: bool, show_ast: bool) -> Result<()> {
    tracing::info!("Checking {:?}", input);

    let source = read_source(input)?;
    let name = input.to_string_lossy();

    // 1. Lex
    let tokens = aaa::tokenize(&name, &source)?;
    tracing::debug!("Lexed {} tokens", tokens.len());

    if show_tokens {
        println!("=== Tokens ===");
        for tok in &tokens {
            println!("  {} {:?} @ {}", tok.kind, tok.text, tok.span);
        }
        println!();
    }

    // 2. Parse
    let file = aaa::SourceFile::new(name.to_string(), source.as_str());
    let ast = aaa::parser::parse(&tokens, &file)?;

    if show_ast {
        println!("=== AST ===");
        let json = serde_json::to_string_pretty(&ast)
            .map_err(|e| miette::miette!("Failed to serialize AST: {}", e))?;
        println!("{}", json);
        println!();
    }

    println!("Syntax OK: {}", input.display());
    Ok(())
}

fn info() -> Result<()> {
    println!("aaa expression language");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Features:");
    println!("  - Integer and float arithmetic: + - * /");
    println!("  - Right-associative exponentiation: ^");
    println!("  - Unary plus and minus");
    println!("  - Global variables: set x = expr");
    Ok(())
}
