//! notedown CLI - batch-convert Markdown folders into the note.com dialect

mod discover;

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use notedown::{ConversionWarning, Converter, Report, DISPLAY_CAP};

#[derive(Parser)]
#[command(name = "notedown")]
#[command(version)]
#[command(about = "Convert Markdown files into the note.com dialect", long_about = None)]
struct Cli {
    /// Folder containing the .md files to convert
    #[arg(value_name = "FOLDER")]
    input_folder: PathBuf,

    /// Preview the conversions without writing any files
    #[arg(long)]
    dry_run: bool,

    /// Show info-level diagnostics in addition to warnings
    #[arg(short, long)]
    verbose: bool,

    /// Skip files whose path contains any of these substrings
    #[arg(long, value_name = "PATTERN", num_args = 1..)]
    exclude: Vec<String>,

    /// Print diagnostics as JSON instead of the grouped report
    #[arg(long)]
    json: bool,
}

/// What happened to one input file.
struct FileOutcome {
    input: PathBuf,
    output: PathBuf,
    warnings: Vec<ConversionWarning>,
    error: Option<String>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> notedown::Result<()> {
    let files = discover::markdown_files(&cli.input_folder, &cli.exclude)?;
    if files.is_empty() {
        println!(
            "{} no convertible .md files found under {}",
            "Warning:".yellow(),
            cli.input_folder.display()
        );
        return Ok(());
    }

    println!("Found {} Markdown file(s)", files.len());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    // Conversions are fully independent per document, so the batch runs
    // in parallel with one shared read-only converter.
    let converter = Converter::new().verbose(cli.verbose);
    let outcomes: Vec<FileOutcome> = files
        .par_iter()
        .map(|path| {
            let outcome = convert_one(&converter, path, cli.dry_run);
            pb.inc(1);
            outcome
        })
        .collect();
    pb.finish_and_clear();

    let mut converted = 0;
    for outcome in &outcomes {
        match &outcome.error {
            Some(message) => {
                println!(
                    "{} {} - {}",
                    "✗".red(),
                    outcome.input.display(),
                    message
                );
            }
            None if cli.dry_run => {
                println!(
                    "{} {} → {}",
                    "[DRY-RUN]".yellow(),
                    file_name(&outcome.input),
                    file_name(&outcome.output)
                );
            }
            None => {
                println!(
                    "{} {} → {}",
                    "✓".green(),
                    file_name(&outcome.input),
                    file_name(&outcome.output)
                );
                converted += 1;
            }
        }
    }

    let warnings: Vec<ConversionWarning> = outcomes
        .into_iter()
        .flat_map(|o| o.warnings)
        .collect();

    if cli.json {
        let json = serde_json::to_string_pretty(&warnings)
            .map_err(|e| notedown::Error::Other(e.to_string()))?;
        println!("{}", json);
    } else {
        print_report(&warnings, cli.verbose);
    }

    let prefix = if cli.dry_run { "[DRY-RUN] " } else { "" };
    println!("\n{}converted {}/{} file(s)", prefix, converted, files.len());

    Ok(())
}

/// Convert one file; any read or write failure becomes a per-file
/// outcome so the rest of the batch keeps going.
fn convert_one(converter: &Converter, input: &Path, dry_run: bool) -> FileOutcome {
    let output = discover::output_path(input);
    let source = input.to_string_lossy();

    let text = match fs::read_to_string(input) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("skipping {}: {}", source, e);
            return FileOutcome {
                input: input.to_path_buf(),
                output,
                warnings: Vec::new(),
                error: Some(e.to_string()),
            };
        }
    };

    let result = converter.convert(&text, &source);

    let error = if dry_run {
        None
    } else {
        fs::write(&output, &result.text).err().map(|e| e.to_string())
    };

    FileOutcome {
        input: input.to_path_buf(),
        output,
        warnings: result.warnings,
        error,
    }
}

fn print_report(warnings: &[ConversionWarning], verbose: bool) {
    let report = Report::new(warnings);
    if report.format(verbose).is_none() {
        return;
    }

    println!("\n{}", "=== Conversion report ===".bold());
    print_group(
        format!("Errors ({}):", report.errors().len()).red().bold(),
        report.errors(),
    );
    print_group(
        format!("Warnings ({}):", report.warnings().len())
            .yellow()
            .bold(),
        report.warnings(),
    );
    if verbose {
        print_group(
            format!("Info ({}):", report.infos().len()).cyan().bold(),
            report.infos(),
        );
    }
}

fn print_group(title: ColoredString, entries: &[&ConversionWarning]) {
    if entries.is_empty() {
        return;
    }
    println!("\n{}", title);
    for warning in entries.iter().take(DISPLAY_CAP) {
        println!("  {}:{} - {}", warning.file, warning.line, warning.message);
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end_conversion_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("article.md");
        fs::write(&input, "# Title\n\nInline $x^2$ math.").unwrap();

        let converter = Converter::new();
        let outcome = convert_one(&converter, &input, false);

        assert!(outcome.error.is_none());
        let written = fs::read_to_string(outcome.output).unwrap();
        assert_eq!(written, "## Title\n\nInline $${x^2}$$ math.");
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("article.md");
        fs::write(&input, "# Title").unwrap();

        let outcome = convert_one(&Converter::new(), &input, true);

        assert!(outcome.error.is_none());
        assert!(!outcome.output.exists());
    }

    #[test]
    fn test_unreadable_file_reported_not_fatal() {
        let outcome = convert_one(
            &Converter::new(),
            Path::new("/no/such/file.md"),
            false,
        );
        assert!(outcome.error.is_some());
        assert!(outcome.warnings.is_empty());
    }
}
