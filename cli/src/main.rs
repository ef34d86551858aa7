//! examgen binary
//!
//! Reads a CSV question bank and writes randomized exam PDFs with
//! matching correction keys.

mod args;
mod config;
mod logging;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Parser;
use exam_model::{Exam, SerializeExam};
use pdf_render::{render_to_file, BulletKind, RenderOptions};
use question_bank::{CsvConfig, Delimiter};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::args::Cli;
use crate::config::Settings;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_config.as_deref());
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let mut settings = config::load(cli.app_config.as_deref());
    config::merge(&mut settings, cli);

    let exam = load_exam(cli, &settings)?;
    tracing::info!(questions = exam.len(), "loaded question bank");

    std::fs::create_dir_all(&settings.output_dir).with_context(|| {
        format!(
            "creating output directory {}",
            settings.output_dir.display()
        )
    })?;

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();

    for serial in 1..=settings.number {
        let mut copy = exam.clone();
        if settings.shuffle {
            copy.shuffle(&mut rng);
        }
        generate_copy(&copy, serial, &timestamp, &settings)?;
        tracing::info!(serial, "generated exam and correction");
    }

    Ok(())
}

fn load_exam(cli: &Cli, settings: &Settings) -> Result<Exam> {
    let Some(delimiter) = Delimiter::from_name(&settings.delimiter) else {
        bail!("unknown delimiter name {:?}", settings.delimiter);
    };
    let csv_config = CsvConfig::default()
        .with_delimiter(delimiter)
        .with_encoding(&settings.encoding);

    let records = question_bank::read_file(&cli.input, &csv_config)
        .with_context(|| format!("reading question bank {}", cli.input.display()))?;

    let mut exam = Exam::new();
    exam.load(&records)
        .with_context(|| format!("loading questions from {}", cli.input.display()))?;
    exam.add_path_parent(&cli.input);

    if exam.is_empty() {
        bail!("no questions found in {}", cli.input.display());
    }
    Ok(exam)
}

fn generate_copy(exam: &Exam, serial: u32, timestamp: &str, settings: &Settings) -> Result<()> {
    let serializer = SerializeExam::new(exam);

    let exam_name = format!("{}_{}_{}.pdf", settings.exam_prefix, serial, timestamp);
    let exam_path = settings.output_dir.join(&exam_name);
    let mut exam_options =
        RenderOptions::new().with_title(format!("{} {}", settings.exam_prefix, serial));
    if let Some(ref heading) = settings.page_heading {
        exam_options = exam_options.with_heading(heading.clone());
    }
    render_to_file(serializer.assignment(), &exam_options, &exam_path)
        .with_context(|| format!("writing {}", exam_path.display()))?;

    let correction_name = format!("{}_{}_{}.pdf", settings.correction_prefix, serial, timestamp);
    let correction_path = settings.output_dir.join(&correction_name);
    let correction_options = RenderOptions::new()
        .with_title(format!("{} {}", settings.correction_prefix, serial))
        .with_bullets(BulletKind::Letter, BulletKind::Number);
    render_to_file(serializer.correction(), &correction_options, &correction_path)
        .with_context(|| format!("writing {}", correction_path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn cli_for(input: PathBuf, output_dir: PathBuf, seed: u64) -> Cli {
        Cli {
            input,
            number: Some(2),
            exam_prefix: None,
            correction_prefix: None,
            app_config: Some(PathBuf::from("no/such/config.json")),
            log_config: None,
            shuffle: Some(true),
            page_heading: Some("Final exam".to_string()),
            encoding: None,
            delimiter: None,
            output_dir: Some(output_dir),
            seed: Some(seed),
        }
    }

    #[test]
    fn test_run_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let bank = dir.path().join("bank.csv");
        std::fs::write(
            &bank,
            "question,subject,image,level,A,Ai,B,Bi,C,Ci\n\
             What color is the sky?,nature,,1,blue,,green,,red,\n\
             What is two plus two?,math,,1,4,,5,,6,\n",
        )
        .unwrap();
        let output = dir.path().join("out");

        run(&cli_for(bank, output.clone(), 11)).unwrap();

        let mut names: Vec<String> = std::fs::read_dir(&output)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();

        assert_eq!(names.len(), 4);
        assert!(names[0].starts_with("Correction_1_"));
        assert!(names[1].starts_with("Correction_2_"));
        assert!(names[2].starts_with("Exam_1_"));
        assert!(names[3].starts_with("Exam_2_"));

        for name in names {
            let bytes = std::fs::read(output.join(name)).unwrap();
            assert!(bytes.starts_with(b"%PDF-"));
        }
    }

    #[test]
    fn test_run_rejects_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let cli = cli_for(
            dir.path().join("absent.csv"),
            dir.path().join("out"),
            1,
        );
        assert!(run(&cli).is_err());
    }

    #[test]
    fn test_run_rejects_unknown_delimiter() {
        let dir = tempfile::tempdir().unwrap();
        let bank = dir.path().join("bank.csv");
        std::fs::write(&bank, "question\nQ\n").unwrap();

        let mut cli = cli_for(bank, dir.path().join("out"), 1);
        cli.delimiter = Some("pipe".to_string());
        assert!(run(&cli).is_err());
    }
}
