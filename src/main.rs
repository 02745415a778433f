#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # photocopier
//! ## Introduction
//!
//! Generates a new lesson under `Lessons/` from a course description,
//! following the layout and style of a hand-written template lesson.
//!
//! ## Configuration
//!
//! Put `OPENAI_API_KEY` (and optionally `OPENAI_MODEL`, `MAX_TOKENS`,
//! `TEMPERATURE`, `OPENAI_ENDPOINT`) in the environment or a `.env` file.
//! Run `photocopier init-env` to write a commented `.env.example`. Without a
//! key every file gets placeholder content.

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::{Context, Result};
use bpaf::*;
use colored::Colorize;
use dotenvy::dotenv;
use photocopier::{
    ContentAnalyzer, CourseReport, Photocopier, Sections, TemplateExtractor,
    config::{self, Config},
    constants::{DEFAULT_SERIES, LESSONS_DIR},
};
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Options for `generate`.
#[derive(Debug, Clone)]
struct GenerateOpts {
    /// Course description file; stdin when absent
    file:         Option<PathBuf>,
    /// Project root holding `Lessons/`
    base:         Option<PathBuf>,
    /// Template course name inside `Lessons/`
    template:     Option<String>,
    /// Write into an existing course directory
    force:        bool,
    /// Skip `summary.md`
    no_summary:   bool,
    /// Skip the reference guides
    no_reference: bool,
    /// Skip the practice solution
    no_solutions: bool,
    /// Skip the practice tests
    no_tests:     bool,
    /// Additional files to generate
    extra:        Vec<String>,
}

impl GenerateOpts {
    /// Sections left enabled by the `--no-*` switches.
    fn sections(&self) -> Sections {
        Sections {
            summary:   !self.no_summary,
            reference: !self.no_reference,
            solutions: !self.no_solutions,
            tests:     !self.no_tests,
        }
    }
}

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Generate a course
    Generate(GenerateOpts),
    /// Print the details extracted from a description
    Analyze(Option<PathBuf>),
    /// Print the structure of a template course
    Inspect(Option<PathBuf>),
    /// Write `.env.example`
    InitEnv,
}

/// Parse the command line arguments and return a `Cmd` enum
fn options() -> Cmd {
    /// parses the description file
    fn description_file() -> impl Parser<Option<PathBuf>> {
        long("file")
            .short('f')
            .help("Course description file (reads stdin when omitted)")
            .argument::<PathBuf>("PATH")
            .optional()
    }

    let base = long("base")
        .help("Project root containing the Lessons directory")
        .argument::<PathBuf>("DIR")
        .optional();
    let template = long("template")
        .help("Template course inside Lessons/")
        .argument::<String>("NAME")
        .optional();
    let force = long("force")
        .help("Write into an existing course directory")
        .switch();
    let no_summary = long("no-summary").help("Skip summary.md").switch();
    let no_reference = long("no-reference")
        .help("Skip the reference guides")
        .switch();
    let no_solutions = long("no-solutions")
        .help("Skip the practice solution")
        .switch();
    let no_tests = long("no-tests").help("Skip the practice tests").switch();
    let extra = long("extra")
        .help("Additional file to generate, relative to the course directory")
        .argument::<String>("FILE")
        .many();
    let file = description_file();

    let generate = construct!(GenerateOpts {
        file,
        base,
        template,
        force,
        no_summary,
        no_reference,
        no_solutions,
        no_tests,
        extra
    })
    .to_options()
    .command("generate")
    .help("Generate a course from a description")
    .map(Cmd::Generate);

    let analyze = construct!(Cmd::Analyze(description_file()))
        .to_options()
        .command("analyze")
        .help("Print the course details extracted from a description as JSON");

    let template_dir = long("template")
        .help("Template course directory")
        .argument::<PathBuf>("DIR")
        .optional();
    let inspect = construct!(Cmd::Inspect(template_dir))
        .to_options()
        .command("inspect")
        .help("Print the structure of a template course as JSON");

    let init_env = pure(Cmd::InitEnv)
        .to_options()
        .command("init-env")
        .help("Write a sample .env.example");

    let cmd = construct!([generate, analyze, inspect, init_env]);

    cmd.to_options()
        .descr("Generates course lessons from a description and a template")
        .run()
}

/// Reads `path`, or all of stdin when `None`.
fn read_description(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Could not read course description {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Could not read course description from stdin")?;
            Ok(text)
        }
    }
}

/// Prints the outcome of a generation run.
fn print_report(report: &CourseReport) {
    println!(
        "{}",
        format!("✅ Course '{}' generated successfully!", report.info.title).green()
    );
    println!("📍 Location: {}", report.course_path.display());
    println!("{}", report.table());

    let placeholders = report.placeholder_files();
    if placeholders > 0 {
        println!(
            "{}",
            format!("⚠️  {placeholders} file(s) use placeholder content").yellow()
        );
    }
    if !report.template_used {
        println!(
            "{}",
            "⚠️  Template course not found; generated without its style".yellow()
        );
    }
}

/// Runs `generate`.
async fn generate(opts: GenerateOpts) -> Result<()> {
    let mut cfg = Config::from_env();
    if let Some(base) = &opts.base {
        cfg = cfg.with_base_dir(base);
    }
    if let Some(template) = &opts.template {
        cfg = cfg.with_template(template);
    }
    let cfg = config::set(cfg);

    let sections = opts.sections();
    let photocopier = Photocopier::from_config(&cfg)
        .with_overwrite(opts.force)
        .with_sections(sections)
        .with_extra_files(opts.extra.clone());

    match &opts.file {
        Some(path) => {
            let description = read_description(Some(path))?;
            let report = photocopier
                .generate_course(&description, sections, &opts.extra)
                .await?;
            print_report(&report);
        }
        None => {
            let stdin = io::stdin();
            if let Some(report) = photocopier
                .run_interactive(stdin.lock(), io::stdout(), &cfg)
                .await?
            {
                println!("{}", report.table());
            }
        }
    };

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false);
    let filter_layer = LevelFilter::from_level(Level::INFO);
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    let cmd = options();

    match cmd {
        Cmd::Generate(opts) => generate(opts).await?,
        Cmd::Analyze(file) => {
            let cfg = config::get();
            let description = read_description(file.as_ref())?;
            let info = ContentAnalyzer::new()
                .with_lessons_dir(cfg.base_dir().join(LESSONS_DIR))
                .with_series(DEFAULT_SERIES)
                .extract_course_info(&description);
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Cmd::Inspect(template) => {
            let cfg = config::get();
            let path = template
                .unwrap_or_else(|| cfg.base_dir().join(LESSONS_DIR).join(cfg.template()));
            let structure = TemplateExtractor::new(path).extract_structure()?;
            println!("{}", serde_json::to_string_pretty(&structure)?);
        }
        Cmd::InitEnv => {
            let cfg = config::get();
            let path = cfg.write_sample_env(cfg.base_dir())?;
            println!("{}", format!("📄 Sample configuration created: {}", path.display()).green());
        }
    };

    Ok(())
}
