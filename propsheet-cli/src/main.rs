mod scan;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use propsheet::{CsvSheet, Error, LanguageSet, export_all, import_all};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Flatten matching .properties files into one CSV sheet.
    Export {
        /// Directory to scan for property files
        #[arg(short, long)]
        working_dir: PathBuf,

        /// The CSV sheet to write
        #[arg(short, long)]
        output: PathBuf,

        /// Regex matched against file names, e.g. '.*\.properties$'
        #[arg(short, long)]
        filter: String,

        /// Language codes in column order, e.g. 'de,hu'
        #[arg(short, long, value_delimiter = ',', num_args = 0..)]
        languages: Vec<String>,
    },

    /// Rebuild per-language .properties files from a CSV sheet.
    Import {
        /// Directory to write the property files into
        #[arg(short, long)]
        working_dir: PathBuf,

        /// The CSV sheet to read
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn run_export(
    working_dir: PathBuf,
    output: PathBuf,
    filter: String,
    languages: Vec<String>,
) -> Result<(), Error> {
    scan::validate_working_dir(&working_dir)?;
    if output.as_os_str().is_empty() {
        return Err(Error::validation_error("the output file name is empty"));
    }
    let filter = scan::compile_filter(&filter)?;
    let languages = LanguageSet::new(languages)?;

    let files = scan::scan_files(&working_dir, &filter)?;
    let mut sheet = CsvSheet::create(&output, languages.codes());
    export_all(&files, &working_dir, &languages, &mut sheet)?;

    println!("exported {} files to {}", files.len(), output.display());
    Ok(())
}

fn run_import(working_dir: PathBuf, input: PathBuf) -> Result<(), Error> {
    scan::validate_working_dir(&working_dir)?;
    if input.as_os_str().is_empty() {
        return Err(Error::validation_error("the input file name is empty"));
    }

    let mut sheet = CsvSheet::open(&input)?;
    let rows = import_all(&mut sheet, &working_dir)?;

    println!("imported {rows} rows into {}", working_dir.display());
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.commands {
        Commands::Export {
            working_dir,
            output,
            filter,
            languages,
        } => run_export(working_dir, output, filter, languages),
        Commands::Import { working_dir, input } => run_import(working_dir, input),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
