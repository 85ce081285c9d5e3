use anyhow::Result;
use clap::{CommandFactory, Parser};
use console::style;
use std::process::ExitCode;
use std::time::Instant;

use exif_remover::cli::Args;
use exif_remover::utils::{
    error_println, expand_patterns, format_duration, validate_inputs, verbose_println,
};
use exif_remover::{JsonMessage, StripEngine};

fn print_usage() {
    println!("{}", Args::command().render_usage());
    println!("Examples:");
    println!("  exif-remover image.jpg");
    println!("  exif-remover '*.jpg'");
    println!("  exif-remover image1.png image2.jpg");
}

fn main() -> Result<ExitCode> {
    let start_time = Instant::now();
    let args = Args::parse();

    if args.inputs.is_empty() {
        print_usage();
        return Ok(ExitCode::FAILURE);
    }

    validate_inputs(&args)?;

    let files = expand_patterns(&args.inputs);
    if files.is_empty() {
        error_println("No image files to process");
        return Ok(ExitCode::FAILURE);
    }

    let engine = StripEngine::new(args.strip_config());
    let json = engine.config().json;

    if !json {
        verbose_println(
            args.verbose,
            &format!(
                "{} pattern(s) expanded to {} file(s)",
                args.inputs.len(),
                files.len()
            ),
        );
        if args.dry_run {
            println!("{}", style("Dry run: no files will be created").yellow());
        }
        println!("Processing {} file(s)...", files.len());
        println!("{}", "-".repeat(50));
    }

    let summary = engine.process_files(&files);
    let total_time = start_time.elapsed();

    if json {
        JsonMessage::summary(&summary, total_time.as_secs_f64()).emit();
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "-".repeat(50));
    let line = format!(
        "{}/{} files processed successfully",
        summary.succeeded, summary.total
    );
    if summary.succeeded == summary.total {
        println!("{}", style(line).bold().green());
    } else {
        println!("{}", style(line).bold().yellow());
    }

    if summary.skipped > 0 {
        println!(
            "  Skipped (already exist): {}",
            style(summary.skipped).bold().yellow()
        );
    }
    if summary.failed > 0 {
        println!("  Failed: {}", style(summary.failed).bold().red());
    }
    verbose_println(
        args.verbose,
        &format!("Total processing time: {}", format_duration(total_time)),
    );

    Ok(ExitCode::SUCCESS)
}
