use crate::config::ConverterConfig;
use crate::converter::SpreadsheetToJsonConverter;
use crate::error::ConvertResult;
use colored::Colorize;
use std::path::PathBuf;

/// Command-line overrides, layered on top of an optional config file
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub input: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub designated_sheet: Option<String>,
    pub designated_output: Option<String>,
    pub pattern: Option<String>,
    pub dry_run: bool,
    pub verbose: bool,
}

/// Build the effective config: defaults < config file < flags
pub fn resolve_config(options: &ConvertOptions) -> ConvertResult<ConverterConfig> {
    let mut config = match &options.config_file {
        Some(path) => ConverterConfig::from_file(path)?,
        None => ConverterConfig::default(),
    };

    if let Some(ref input) = options.input {
        config.input_path = input.clone();
    }
    if let Some(ref dir) = options.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(ref sheet) = options.designated_sheet {
        config.designated_sheet_name = sheet.clone();
    }
    if let Some(ref output) = options.designated_output {
        config.designated_output_name = output.clone();
    }
    if let Some(ref pattern) = options.pattern {
        config.output_pattern = pattern.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Execute the convert command
pub fn convert(options: ConvertOptions) -> ConvertResult<()> {
    let config = resolve_config(&options)?;

    println!("{}", "📄 xlsx2json - Converting workbook".bold().green());
    println!("   Input:  {}", config.input_path.display());
    println!("   Output: {}", config.output_dir.display());
    if options.verbose {
        println!(
            "   Designated sheet: {} → {}",
            config.designated_sheet_name.bright_yellow(),
            config.designated_output_name
        );
        println!("   Pattern: {}", config.output_pattern);
    }
    println!();

    let converter = SpreadsheetToJsonConverter::new(config);

    if options.dry_run {
        println!(
            "{}",
            "📋 DRY RUN MODE - No files will be written\n".yellow()
        );
        let plan = converter.plan()?;
        for output in &plan {
            let marker = if output.designated { "★" } else { " " };
            println!(
                "   {} {} → {}",
                marker,
                output.sheet_name.bright_blue().bold(),
                output.output_path.display()
            );
        }
        println!();
        println!(
            "{}",
            format!("📋 Dry run complete - {} files planned", plan.len()).yellow()
        );
        return Ok(());
    }

    let report = converter.convert()?;

    for sheet in &report.sheets {
        if options.verbose {
            println!(
                "   📊 {} → {} ({} columns, {} rows)",
                sheet.sheet_name.bright_blue().bold(),
                sheet.output_path.display(),
                sheet.columns,
                sheet.rows
            );
        } else {
            println!(
                "   📊 {} → {}",
                sheet.sheet_name.bright_blue().bold(),
                sheet.output_path.display()
            );
        }
    }
    println!();
    println!(
        "{}",
        format!("✅ Wrote {} JSON files", report.sheets.len())
            .bold()
            .green()
    );

    Ok(())
}
