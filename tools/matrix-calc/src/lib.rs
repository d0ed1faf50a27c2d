//! A command line calculator for small matrices.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod observability;

use crate::{config::Config, observability::TracingConsumer};
use anyhow::{Context, Error};
use clap::{Parser, ValueEnum};
use matrix_calculator::{parse_matrix, CalculatorSession, Operand};
use matrix_engine::{MatrixEngine, MatrixResult, OperationType};
use std::path::PathBuf;
use tracing::debug;

/// How the result is printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// A fixed-decimal grid headed by the operation.
    Text,

    /// The result as JSON.
    Json,
}

#[derive(Parser)]
#[clap(version, about = "Adds, subtracts, multiplies and divides matrices of up to 10x10 elements.")]
struct Cli {
    /// The operation: addition, subtraction, multiplication or division (or add, sub, mul, div).
    ///
    /// Division computes matrix 1 times the inverse of matrix 2, it is not element-wise.
    operation: OperationType,

    /// Matrix 1, rows separated by `;` and cells by `,`, e.g. `1,2;3,4`. Blank cells are zero.
    #[clap(allow_hyphen_values = true)]
    left: String,

    /// Matrix 2, in the same format as matrix 1.
    #[clap(allow_hyphen_values = true)]
    right: String,

    /// Number of decimals printed for each cell. Overrides the configured precision.
    #[clap(short, long)]
    precision: Option<usize>,

    /// The output format.
    #[clap(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Path to a YAML configuration file.
    #[clap(short, long)]
    config: Option<PathBuf>,
}

fn print_result(result: &MatrixResult, format: OutputFormat, precision: usize) -> Result<(), Error> {
    match format {
        OutputFormat::Text => println!("{}", result.render(precision)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), Error> {
    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    let _tracing = TracingConsumer::new(&config.tracing)?;

    let left = parse_matrix(&cli.left).context("invalid matrix 1")?;
    let right = parse_matrix(&cli.right).context("invalid matrix 2")?;

    debug!("Using singularity epsilon {}", config.engine.singularity_epsilon);
    let mut session = CalculatorSession::new(MatrixEngine::new(config.engine));
    session.set_matrix(Operand::Left, left);
    session.set_matrix(Operand::Right, right);
    session.set_operation(cli.operation);

    let result = session.calculate().with_context(|| format!("{} failed", cli.operation))?;
    let precision = cli.precision.unwrap_or(config.output.precision);
    print_result(result, cli.format, precision)
}

/// The driver function that parses the arguments and runs the calculation.
pub fn driver() -> Result<(), Error> {
    run(Cli::parse())
}
