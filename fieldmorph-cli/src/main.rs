use clap::Parser;
use fieldmorph::io::load_image;
use fieldmorph::{
    Correspondences, DirectorySink, FieldParams, FrameSchedule, MorphConfig, Morpher,
    SequenceReport,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Morph IMAGE_A into IMAGE_B along matching line segments"
)]
struct Cli {
    /// Image shown at t = 0.
    #[arg(value_name = "IMAGE_A")]
    image_a: Option<PathBuf>,
    /// Image shown at t = 1 (same size as IMAGE_A).
    #[arg(value_name = "IMAGE_B")]
    image_b: Option<PathBuf>,
    /// Segment correspondence file.
    #[arg(value_name = "SEGMENTS")]
    segments: Option<PathBuf>,
    /// Distance offset `a` of the field weight (give A, B and P together).
    #[arg(value_name = "A", allow_negative_numbers = true)]
    a: Option<f64>,
    /// Falloff exponent `b`.
    #[arg(value_name = "B", allow_negative_numbers = true)]
    b: Option<f64>,
    /// Length exponent `p`.
    #[arg(value_name = "P", allow_negative_numbers = true)]
    p: Option<f64>,
    /// Path to a JSON configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Output directory (overrides the config file).
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
    /// Spacing between frame times (overrides the config file).
    #[arg(long, value_name = "STEP")]
    step: Option<f64>,
    /// Warp rows in parallel.
    #[arg(long)]
    parallel: bool,
    /// Write the JSON run report to FILE instead of stdout.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Report span timings for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Config {
    image_a: String,
    image_b: String,
    segments: String,
    output_dir: String,
    prefix: String,
    channels: usize,
    step: f64,
    clean: bool,
    parallel: bool,
    a: f64,
    b: f64,
    p: f64,
}

impl Default for Config {
    fn default() -> Self {
        let params = FieldParams::default();
        Self {
            image_a: String::new(),
            image_b: String::new(),
            segments: String::new(),
            output_dir: "results".to_string(),
            prefix: DirectorySink::DEFAULT_PREFIX.to_string(),
            channels: 4,
            step: FrameSchedule::DEFAULT_STEP,
            clean: true,
            parallel: false,
            a: params.a,
            b: params.b,
            p: params.p,
        }
    }
}

#[derive(Debug, Serialize)]
struct ParamsRecord {
    a: f64,
    b: f64,
    p: f64,
}

#[derive(Debug, Serialize)]
struct FrameRecord {
    index: usize,
    t: f64,
    path: String,
}

#[derive(Debug, Serialize)]
struct FailureRecord {
    index: usize,
    t: f64,
    error: String,
}

#[derive(Debug, Serialize)]
struct Output {
    output_dir: String,
    params: ParamsRecord,
    frames: Vec<FrameRecord>,
    failures: Vec<FailureRecord>,
}

impl Output {
    fn new(sink: &DirectorySink, params: FieldParams, report: SequenceReport) -> Self {
        Self {
            output_dir: sink.dir().display().to_string(),
            params: ParamsRecord {
                a: params.a,
                b: params.b,
                p: params.p,
            },
            frames: report
                .completed
                .iter()
                .map(|stamp| FrameRecord {
                    index: stamp.index,
                    t: stamp.t,
                    path: sink.path_for(stamp.index).display().to_string(),
                })
                .collect(),
            failures: report
                .failures
                .into_iter()
                .map(|failure| FailureRecord {
                    index: failure.index,
                    t: failure.t,
                    error: failure.error.to_string(),
                })
                .collect(),
        }
    }
}

fn pick_path(positional: Option<PathBuf>, configured: &str) -> Option<PathBuf> {
    positional.or_else(|| (!configured.is_empty()).then(|| PathBuf::from(configured)))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fieldmorph=info,fieldmorph_cli=info"));
    let span_events = if cli.trace {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(span_events)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config: Config = match &cli.config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => Config::default(),
    };

    let image_a = pick_path(cli.image_a, &config.image_a);
    let image_b = pick_path(cli.image_b, &config.image_b);
    let segments = pick_path(cli.segments, &config.segments);
    let (Some(image_a), Some(image_b), Some(segments)) = (image_a, image_b, segments) else {
        return Err("IMAGE_A, IMAGE_B and SEGMENTS must be given on the command line or in the config".into());
    };

    let params = match (cli.a, cli.b, cli.p) {
        (Some(a), Some(b), Some(p)) => FieldParams::new(a, b, p),
        (None, None, None) => FieldParams::new(config.a, config.b, config.p),
        _ => return Err("A, B and P must be given together".into()),
    };
    if ![params.a, params.b, params.p].iter().all(|v| v.is_finite()) {
        return Err("A, B and P must be finite numbers".into());
    }

    let schedule = FrameSchedule::new(cli.step.unwrap_or(config.step))?;
    let output_dir = cli
        .output_dir
        .unwrap_or_else(|| PathBuf::from(&config.output_dir));

    let img_a = load_image(&image_a, config.channels)?;
    let img_b = load_image(&image_b, config.channels)?;
    let correspondences = Correspondences::load(&segments)?;
    tracing::info!(
        "morphing {} into {} with {} segment pairs",
        image_a.display(),
        image_b.display(),
        correspondences.len()
    );
    tracing::info!(
        "using parameters {{ a: {}, b: {}, p: {} }}, {} frames",
        params.a,
        params.b,
        params.p,
        schedule.len()
    );

    let morpher = Morpher::new(img_a, img_b, correspondences)?.with_config(MorphConfig {
        params,
        parallel: cli.parallel || config.parallel,
    });
    let mut sink = DirectorySink::create(&output_dir, config.clean)?.with_prefix(config.prefix);
    let report = morpher.run_sequence(&schedule, &mut sink);

    if report.is_complete() {
        tracing::info!("wrote {} frames to {}", report.total(), output_dir.display());
    } else {
        tracing::warn!(
            "{} of {} frames failed",
            report.failures.len(),
            report.total()
        );
    }

    let output = Output::new(&sink, params, report);
    let json = serde_json::to_string_pretty(&output)?;
    match cli.report {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
