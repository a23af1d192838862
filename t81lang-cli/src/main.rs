//! Entrypoint for CLI
use std::{fs, path::PathBuf, process};

use clap::Parser;
use log::{error, info};
use t81lang::{
    artifact::{module_name, write_artifacts},
    compile_str,
    config::{CompileOptions, Strictness},
    error::T81Result,
    lex::{dump_tokens, tokenize},
};

/// T81Lang compiler, source to TISC and `.cweb` module descriptor.
#[derive(Parser, Debug)]
#[command(name = "t81c", version, long_about = None)]
struct Cli {
    /// Path to a .t81 source file
    #[arg(long, value_name = "FILE")]
    input: PathBuf,

    /// Also emit the .cweb module descriptor
    #[arg(long)]
    emit_cweb: bool,

    /// Output folder
    #[arg(long, value_name = "DIR", default_value = "out/")]
    out: PathBuf,

    /// Reject unrecognized input instead of skipping it
    #[arg(long)]
    strict: bool,

    /// YAML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Version written into the module descriptor
    #[arg(long, value_name = "VERSION")]
    module_version: Option<String>,

    /// Print the token table before compiling (for debugging)
    #[arg(long)]
    dump_tokens: bool,
}

impl Cli {
    /// Configuration file, overridden by command line flags.
    fn options(&self) -> T81Result<CompileOptions> {
        let mut options = match &self.config {
            Some(path) => CompileOptions::from_file(path)?,
            None => CompileOptions::default(),
        };

        if self.strict {
            options.strictness = Strictness::Strict;
        }
        if let Some(version) = &self.module_version {
            options.module_version = version.clone();
        }

        Ok(options)
    }
}

fn run(cli: &Cli, source: &str) -> T81Result<()> {
    let options = cli.options()?;
    let module = module_name(&cli.input)?;

    if cli.dump_tokens {
        let mut table = String::new();
        dump_tokens(&tokenize(source, options.strictness)?, &mut table)?;
        print!("{table}");
    }

    let compilation = compile_str(source, &options)?;
    let written = write_artifacts(&cli.out, &module, &compilation, &options, cli.emit_cweb)?;

    for path in &written {
        info!("wrote {}", path.display());
    }
    println!(
        "Compiled '{}' -> {}",
        cli.input.display(),
        cli.out.display()
    );

    Ok(())
}

fn main() {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .env()
        .init()
        .unwrap();

    let cli = Cli::parse();

    let source = match fs::read_to_string(&cli.input) {
        Ok(source) => source,
        Err(err) => {
            error!("failed to read {}: {err}", cli.input.display());
            process::exit(1)
        }
    };

    if let Err(err) = run(&cli, &source) {
        error!("{}\n{}", cli.input.display(), err.report(&source));
        process::exit(1)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "t81c",
            "--input",
            "a.t81",
            "--strict",
            "--module-version",
            "1.2.3",
        ]);
        let options = cli.options().unwrap();

        assert_eq!(options.strictness, Strictness::Strict);
        assert_eq!(options.module_version, "1.2.3");
        assert_eq!(cli.out, PathBuf::from("out/"));
        assert!(!cli.emit_cweb);
    }
}
