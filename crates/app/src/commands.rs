use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use ledgerlens_core::ParsedStatement;
use ledgerlens_export::{validate_files, write_statement, ValidationReport};
use ledgerlens_ocr::{ExtractionResult, VisionClient};
use ledgerlens_parse::{DocumentParser, LayoutProfile, OcrTextParser, VisionJsonParser};

/// Built-in profile for the supported BDO statement layout.
const DEFAULT_PROFILE: &str = include_str!("../profiles/bdo.toml");

// ── extract ───────────────────────────────────────────────────────────────────

#[derive(Args)]
pub struct ExtractArgs {
    /// Statement image (JPEG/PNG)
    #[arg(required_unless_present = "from_text")]
    pub image: Option<PathBuf>,

    /// Parse pre-extracted OCR text instead of running OCR on an image
    #[arg(long, value_name = "FILE")]
    pub from_text: Option<PathBuf>,

    /// Output CSV path
    #[arg(short, long, default_value = "transactions.csv")]
    pub output: PathBuf,

    /// Layout profile TOML (defaults to the built-in BDO profile)
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// Reference CSV to compare the output against
    #[arg(long)]
    pub reference: Option<PathBuf>,

    /// Keep content-addressed copies of source images under this directory
    #[arg(long)]
    pub archive_dir: Option<PathBuf>,

    /// Also write the raw OCR text here, for debugging misreads
    #[arg(long)]
    pub dump_text: Option<PathBuf>,
}

pub async fn extract(args: ExtractArgs) -> Result<()> {
    let profile = load_profile(args.profile.as_deref())?;
    let parser = OcrTextParser::new(profile)?;

    let (statement, ocr_text) = if let Some(text_path) = &args.from_text {
        let text = tokio::fs::read_to_string(text_path)
            .await
            .with_context(|| format!("reading {}", text_path.display()))?;
        (parser.parse_document(&text)?, text)
    } else {
        let Some(image) = args.image.as_deref() else {
            bail!("an image path or --from-text is required");
        };
        let result = run_ocr_pipeline(parser, image, args.archive_dir.clone()).await?;
        (result.statement, result.ocr_text)
    };

    if let Some(dump) = &args.dump_text {
        tokio::fs::write(dump, &ocr_text)
            .await
            .with_context(|| format!("writing {}", dump.display()))?;
    }

    write_csv(&statement, &args.output)?;
    println!("wrote {} transactions to {}", statement.len(), args.output.display());

    // Observational only: a mismatch is reported but the CSV stands.
    if let Some(reference) = &args.reference {
        report_validation(&args.output, reference)?;
    }
    Ok(())
}

#[cfg(feature = "tesseract")]
async fn run_ocr_pipeline(
    parser: OcrTextParser,
    image: &Path,
    archive_dir: Option<PathBuf>,
) -> Result<ExtractionResult> {
    use ledgerlens_ocr::recognizer::tesseract_backend::TesseractRecognizer;
    use ledgerlens_ocr::StatementPipeline;

    let mut pipeline = StatementPipeline::new(TesseractRecognizer::new(None, "eng"), parser);
    if let Some(dir) = archive_dir {
        pipeline = pipeline.with_archive_dir(dir);
    }
    Ok(pipeline.process_file(image).await?)
}

#[cfg(not(feature = "tesseract"))]
async fn run_ocr_pipeline(
    _parser: OcrTextParser,
    _image: &Path,
    _archive_dir: Option<PathBuf>,
) -> Result<ExtractionResult> {
    bail!("built without the `tesseract` feature; pass --from-text with pre-extracted OCR text")
}

// ── vision ────────────────────────────────────────────────────────────────────

#[derive(Args)]
pub struct VisionArgs {
    /// Statement image (JPEG/PNG)
    pub image: PathBuf,

    /// Output CSV path
    #[arg(short, long, default_value = "transactions.csv")]
    pub output: PathBuf,

    /// Vision model name
    #[arg(long, default_value = "gpt-4o")]
    pub model: String,

    /// OpenAI-compatible API base URL
    #[arg(long, default_value = "https://api.openai.com/v1")]
    pub api_base: String,

    /// Reference CSV to compare the output against
    #[arg(long)]
    pub reference: Option<PathBuf>,
}

pub async fn vision(args: VisionArgs) -> Result<()> {
    let api_key = std::env::var("LEDGERLENS_API_KEY")
        .or_else(|_| std::env::var("OPENAI_API_KEY"))
        .map_err(|_| anyhow::anyhow!("set LEDGERLENS_API_KEY or OPENAI_API_KEY"))?;

    let bytes = tokio::fs::read(&args.image)
        .await
        .with_context(|| format!("reading {}", args.image.display()))?;

    let client = VisionClient::new(args.api_base, api_key, args.model);
    let payload = client.extract_table(&bytes, mime_for(&args.image)).await?;

    let statement = VisionJsonParser::new().parse_document(&payload)?;
    write_csv(&statement, &args.output)?;
    println!("wrote {} transactions to {}", statement.len(), args.output.display());

    if let Some(reference) = &args.reference {
        report_validation(&args.output, reference)?;
    }
    Ok(())
}

fn mime_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

// ── validate ──────────────────────────────────────────────────────────────────

#[derive(Args)]
pub struct ValidateArgs {
    /// Produced CSV
    pub produced: PathBuf,
    /// Reference CSV
    pub reference: PathBuf,
}

pub fn validate(args: ValidateArgs) -> Result<()> {
    let passed = report_validation(&args.produced, &args.reference)?;
    if !passed {
        std::process::exit(1);
    }
    Ok(())
}

// ── shared helpers ────────────────────────────────────────────────────────────

fn load_profile(path: Option<&Path>) -> Result<LayoutProfile> {
    match path {
        Some(p) => {
            let content = std::fs::read_to_string(p)
                .with_context(|| format!("reading profile {}", p.display()))?;
            Ok(LayoutProfile::from_toml(&content)?)
        }
        None => Ok(LayoutProfile::from_toml(DEFAULT_PROFILE)?),
    }
}

fn write_csv(statement: &ParsedStatement, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_statement(statement, file)?;
    Ok(())
}

fn report_validation(produced: &Path, reference: &Path) -> Result<bool> {
    let report = validate_files(produced, reference)?;
    print_report(&report);
    Ok(report.passed())
}

fn print_report(report: &ValidationReport) {
    if report.passed() {
        println!("validation passed: output matches reference exactly");
        return;
    }
    if report.produced_lines != report.reference_lines {
        println!(
            "line count mismatch: output has {} lines, reference has {}",
            report.produced_lines, report.reference_lines
        );
    }
    for diff in &report.diffs {
        println!("line {} differs:", diff.line);
        println!("  got:      {}", diff.produced);
        println!("  expected: {}", diff.reference);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_bdo_profile_parses() {
        let profile = load_profile(None).unwrap();
        assert_eq!(profile.name, "bdo");
        assert_eq!(profile.month_token, "MAY");
        assert_eq!(profile.corrections.replacements.len(), 7);
        assert_eq!(profile.corrections.full_line.len(), 1);
    }

    #[test]
    fn embedded_profile_restores_leading_space() {
        let profile = load_profile(None).unwrap();
        let fixed = profile.corrections.correct("102440020794 9 IBTD 515549515549");
        assert!(fixed.starts_with(' '));
    }

    #[test]
    fn mime_for_known_extensions() {
        assert_eq!(mime_for(Path::new("a.png")), "image/png");
        assert_eq!(mime_for(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(mime_for(Path::new("a")), "image/jpeg");
    }
}
