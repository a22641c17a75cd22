/*!
Schema Builder generates JSON Schema documents, one per model, from exported model and route metadata. Each schema describes the model's columns and associations, and carries hypermedia links for the model's routes.
*/

#![warn(noop_method_call)]
#![warn(single_use_lifetimes)]
#![warn(unused_lifetimes)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_crate_dependencies)]
#![warn(meta_variable_misuse)]
#![warn(unused_macro_rules)]
#![warn(unused_qualifications)]
#![warn(unused_results)] // Map inserts are the usual offenders, silence them with a `_ = ` pattern assignment.
#![warn(variant_size_differences)]

use clap::Parser;

pub(crate) mod errors;
pub(crate) mod commands;
pub(crate) mod config;
pub(crate) mod metadata;
pub(crate) mod routes;
pub(crate) mod schema;
pub(crate) mod generator;
pub(crate) mod writer;
pub(crate) mod utils;
pub(crate) mod progress;

use errors::ProgramError;

use commands::SchemaBuilder;
use commands::Task;
use progress::ConsoleProgressBar;

/**
Runs Schema Builder with arbitrary arguments. The first item in the arguments will be ignored. All output will be printed to Stdout or Stderr.
*/
fn run<Arg, Args>(args: &mut Args) -> Result<(),ProgramError>
where
    Arg: Clone + Into<std::ffi::OsString>,
    Args: Iterator<Item = Arg>
{
    let mut progress = ConsoleProgressBar::new();
    let command = SchemaBuilder::try_parse_from(args)?;
    command.run(&mut progress)?;
    Ok(())
}

fn main() -> std::process::ExitCode {
    let mut args = std::env::args();
    // returning a Result from main formats the error with Debug, not Display
    match run(&mut args) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}",err);
            std::process::ExitCode::FAILURE
        }
    }
}
