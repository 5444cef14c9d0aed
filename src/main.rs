use clap::{Parser as ClapParser, Subcommand};
use miniquery::cli::{self, CheckOptions, CheckResult, CliError, FormatOptions};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "mq")]
#[command(about = "mq - validate, format and combine miniquery filter expressions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a query, optionally dumping its tree
    Check {
        /// The query (reads from stdin if not provided)
        query: Option<String>,

        /// Print the parsed tree as JSON
        #[arg(long)]
        ast: bool,

        /// Pretty-print the JSON tree
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print a query in canonical form
    Format {
        /// The query (reads from stdin if not provided)
        query: Option<String>,

        /// Use symbolic operators (>=, !=, &&, ||)
        #[arg(short, long)]
        symbols: bool,
    },

    /// Combine several queries with `and`
    Join {
        queries: Vec<String>,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { query, ast, pretty } => run_check(query, ast, pretty),
        Commands::Format { query, symbols } => run_format(query, symbols),
        Commands::Join { queries } => {
            println!("{}", miniquery::join(&queries));
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// Uses the argument if given, otherwise piped stdin.
fn read_query(query: Option<String>) -> Result<String, CliError> {
    match query {
        Some(q) => Ok(q),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
        None => Err(CliError::NoInput),
    }
}

fn run_check(query: Option<String>, ast: bool, pretty: bool) -> Result<(), CliError> {
    let options = CheckOptions {
        query: read_query(query)?,
        ast,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Ast(tree) => {
            let json = if pretty {
                serde_json::to_string_pretty(&tree)
            } else {
                serde_json::to_string(&tree)
            }?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn run_format(query: Option<String>, symbols: bool) -> Result<(), CliError> {
    let options = FormatOptions {
        query: read_query(query)?,
        symbols,
    };
    println!("{}", cli::execute_format(&options)?);
    Ok(())
}
