//! Command-line entry point: question bank in, printable PDF out.

use std::env;
use std::path::Path;
use std::process::ExitCode;

use quizsheet::load_records;
use quizsheet_pdf::PdfSurface;
use quizsheet_render::{LayoutConfig, LayoutEngine};

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        // Wrong arity is not an error: print usage and generate nothing.
        eprintln!("Usage: quizsheet <bank.md>");
        return ExitCode::SUCCESS;
    }

    match run(&args[1]) {
        Ok(output) => {
            println!("PDF generated: {output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(input: &str) -> Result<String, String> {
    // Read the bank before any surface exists; an unreadable input is the
    // one fatal error and must leave no output file behind.
    let records = load_records(input).map_err(|e| e.to_string())?;

    let output = Path::new(input).with_extension("pdf");
    let cfg = LayoutConfig::default();
    let mut surface = PdfSurface::new(&output, cfg.page_width, cfg.page_height);
    let summary = LayoutEngine::new(cfg)
        .compose(&records, &mut surface)
        .map_err(|e| e.to_string())?;

    log::info!(
        "laid out {} question(s) across {} page(s)",
        summary.question_count,
        summary.page_count
    );
    Ok(output.display().to_string())
}
