//! Command-line argument parsing and dispatch classification.
//!
//! The positional surface mirrors the original tool: a single `.svg`
//! argument reads a file, anything else builds one.

use crate::document::{DEFAULT_SCALE, timestamp_now};
use clap::Parser;
use std::path::PathBuf;

const AFTER_HELP: &str = "\
Examples:
  laveqed \"F=ma\"              Create an SVG named after the current time
  laveqed \"F=ma\" Newton.svg   Create Newton.svg
  laveqed \"F=ma\" Newton 10    Create Newton.svg with scale 10
  laveqed Newton.svg           Read Newton.svg; print \"F=ma\"";

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "laveqed")]
#[command(about = "LaTeX vectorial equation editor: compile equations to SVG and read them back")]
#[command(version, after_help = AFTER_HELP)]
pub struct Args {
    /// Equation text to build, or an .svg file to read
    pub input: Option<String>,

    /// Base name for the produced files (defaults to the current timestamp)
    pub name: Option<String>,

    /// Output magnification passed to the SVG converter
    pub scale: Option<u32>,

    /// Delete intermediate build artifacts (0/1/true/false)
    #[arg(value_parser = parse_cleanup)]
    pub cleanup: Option<bool>,

    /// Directory for all build/load artifacts
    #[arg(long, default_value = ".", help = "Working directory for artifacts")]
    pub output_dir: PathBuf,

    /// Log level
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Legacy coercion: the fourth positional arrives as a bare digit.
fn parse_cleanup(value: &str) -> Result<bool, String> {
    match value {
        "0" | "false" => Ok(false),
        "1" | "true" => Ok(true),
        other => Err(format!("expected 0/1/true/false, got {other:?}")),
    }
}

/// What the positional arguments ask for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// No input given: print usage
    Help,
    /// Read an existing SVG and print its equation
    Read { filename: String },
    /// Build an equation into an SVG
    Build {
        equation: String,
        name: String,
        scale: u32,
        cleanup: bool,
    },
}

/// Combined configuration from the command line
#[derive(Debug, Clone)]
pub struct Config {
    pub command: Command,
    pub output_dir: PathBuf,
    pub log_level: String,
}

impl Config {
    /// Parse the process arguments
    pub fn from_env() -> Self {
        Self::from_args(Args::parse())
    }

    /// Build configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Self {
        let command = match args.input {
            None => Command::Help,
            // One argument ending in .svg, nothing else: read mode
            Some(input) if input.ends_with(".svg") && args.name.is_none() => {
                Command::Read { filename: input }
            }
            Some(equation) => Command::Build {
                equation,
                name: args.name.unwrap_or_else(timestamp_now),
                scale: args.scale.unwrap_or(DEFAULT_SCALE),
                cleanup: args.cleanup.unwrap_or(true),
            },
        };

        Config {
            command,
            output_dir: args.output_dir,
            log_level: args.log_level,
        }
    }
}
