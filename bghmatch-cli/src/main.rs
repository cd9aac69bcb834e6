use bghmatch::io::{load_gray_image, save_normalized};
use bghmatch::{
    BlurKind, EncodeMode, Match, MatchConfig, Matcher, Membership, OwnedImage, Parameters,
    SweepPolicy,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "BGHMatch CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum BlurConfig {
    Box,
    Gaussian,
    Median,
}

impl From<BlurConfig> for BlurKind {
    fn from(value: BlurConfig) -> Self {
        match value {
            BlurConfig::Box => BlurKind::Box,
            BlurConfig::Gaussian => BlurKind::Gaussian,
            BlurConfig::Median => BlurKind::Median,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum EncodingConfig {
    GreaterThan,
    LessThan,
    GreaterThanRange,
    Orientation,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum SweepConfig {
    Bounded,
    AllPixels,
}

impl From<SweepConfig> for SweepPolicy {
    fn from(value: SweepConfig) -> Self {
        match value {
            SweepConfig::Bounded => SweepPolicy::Bounded,
            SweepConfig::AllPixels => SweepPolicy::AllPixels,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ParamsJson {
    kblur: usize,
    blur: BlurConfig,
    ksobel: i32,
    scale: f64,
    mag_thr: f64,
    angle_steps: u32,
}

impl Default for ParamsJson {
    fn default() -> Self {
        let p = Parameters::default();
        Self {
            kblur: p.kblur,
            blur: BlurConfig::Gaussian,
            ksobel: p.ksobel,
            scale: p.scale,
            mag_thr: p.mag_thr,
            angle_steps: p.angle_steps,
        }
    }
}

impl From<&ParamsJson> for Parameters {
    fn from(value: &ParamsJson) -> Self {
        Parameters {
            kblur: value.kblur,
            blur_kind: value.blur.into(),
            ksobel: value.ksobel,
            scale: value.scale,
            mag_thr: value.mag_thr,
            angle_steps: value.angle_steps,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct MatchConfigJson {
    sweep: SweepConfig,
    parallel: bool,
    nms_radius: usize,
}

impl Default for MatchConfigJson {
    fn default() -> Self {
        let cfg = MatchConfig::default();
        Self {
            sweep: SweepConfig::AllPixels,
            parallel: cfg.parallel,
            nms_radius: cfg.nms_radius,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    image_path: String,
    template_path: String,
    output_path: Option<String>,
    accumulator_path: Option<String>,
    topk: usize,
    params: ParamsJson,
    encoding: EncodingConfig,
    range_threshold: u8,
    adjacency_mask: Option<u8>,
    #[serde(rename = "match")]
    match_cfg: MatchConfigJson,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_path: String::new(),
            template_path: String::new(),
            output_path: None,
            accumulator_path: None,
            topk: 1,
            params: ParamsJson::default(),
            encoding: EncodingConfig::GreaterThan,
            range_threshold: 16,
            adjacency_mask: None,
            match_cfg: MatchConfigJson::default(),
        }
    }
}

impl Config {
    fn mode(&self) -> EncodeMode {
        match self.encoding {
            EncodingConfig::GreaterThan => EncodeMode::GreaterThan,
            EncodingConfig::LessThan => EncodeMode::LessThan,
            EncodingConfig::GreaterThanRange => EncodeMode::GreaterThanRange(self.range_threshold),
            EncodingConfig::Orientation => EncodeMode::Orientation,
        }
    }

    fn membership(&self, mode: EncodeMode) -> Membership {
        match (mode, self.adjacency_mask) {
            (EncodeMode::Orientation, _) | (_, None) => mode.default_membership(),
            (_, Some(mask)) => Membership::AdjacentBits(mask),
        }
    }
}

#[derive(Debug, Serialize)]
struct MatchRecord {
    x: usize,
    y: usize,
    votes: f64,
    score: f64,
}

impl From<Match> for MatchRecord {
    fn from(value: Match) -> Self {
        Self {
            x: value.x,
            y: value.y,
            votes: value.votes,
            score: value.score,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    best: Option<MatchRecord>,
    topk: Vec<MatchRecord>,
    total_votes: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("bghmatch=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.image_path.is_empty() || config.template_path.is_empty() {
        return Err("image_path and template_path must be set in the config".into());
    }
    if config.topk == 0 {
        return Err("topk must be at least 1".into());
    }

    let image = load_gray_image(&config.image_path)?;
    let template = load_gray_image(&config.template_path)?;

    let params = Parameters::from(&config.params);
    let mode = config.mode();
    let membership = config.membership(mode);
    let matcher = Matcher::from_template(template.view(), &params, mode, &membership).with_config(
        MatchConfig {
            sweep: config.match_cfg.sweep.into(),
            parallel: config.match_cfg.parallel,
            nms_radius: config.match_cfg.nms_radius,
        },
    );
    let total_votes = matcher.table().total_votes();
    if total_votes == 0 {
        tracing::warn!("template produced an empty vote table");
    }

    let acc: OwnedImage<u32> = matcher.accumulate(image.view());
    let best = matcher.best_match(&acc).map(MatchRecord::from);
    let topk = matcher
        .top_matches(&acc, config.topk)
        .into_iter()
        .map(MatchRecord::from)
        .collect();
    let output = Output {
        best,
        topk,
        total_votes,
    };
    let json = serde_json::to_string_pretty(&output)?;

    if let Some(path) = &config.accumulator_path {
        save_normalized(&acc, path)?;
    }

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
