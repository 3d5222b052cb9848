use std::fs;
use std::io::{self, Read, Write};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use thiserror::Error;
use stroke_features::attributes::yes_no;
use stroke_features::{
    encode, EncodingError, EncodingTable, Gender, PatientAttributes, ResidenceType,
    SmokingStatus, WorkType,
};
use stroke_model::{ArtifactPaths, ModelArtifacts};
use stroke_risk::{PredictionError, RiskLabel, RiskScorer, Verdict};

const EXIT_OK: i32 = 0;
const EXIT_UNAVAILABLE: i32 = 1;
const EXIT_BAD_INPUT: i32 = 2;

const AGE_RANGE: RangeInclusive<f64> = 1.0..=120.0;
const GLUCOSE_RANGE: RangeInclusive<f64> = 40.0..=300.0;
const BMI_RANGE: RangeInclusive<f64> = 10.0..=60.0;

#[derive(Debug, Parser)]
#[command(
    name = "stroke-risk",
    version,
    about = "Stroke risk prediction from patient health attributes",
    long_about = "stroke-risk encodes patient health attributes into the feature vector\n\
        the stroke classifier was trained on, scales it, and reports the\n\
        classifier's stroke probability and risk verdict.\n\n\
        EXAMPLES:\n\
        \n  stroke-risk predict --input patient.json\n\
        \n  stroke-risk predict --gender Male --age 67 --hypertension Yes ...\n\
        \n  stroke-risk check --model-dir models\n\
        \n  stroke-risk encoding-table > encoding.json"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Predict stroke risk for one patient
    Predict(PredictArgs),

    /// Print the feature vector for one patient without scoring it
    Encode(EncodeArgs),

    /// Load the scaler and classifier artifacts and print their metadata
    Check(CheckArgs),

    /// Print the versioned categorical encoding table as JSON
    EncodingTable,
}

#[derive(Debug, Args, Clone)]
struct ModelArgs {
    /// Directory holding scaler.json and stroke_model.json
    #[arg(
        long = "model-dir",
        value_name = "DIR",
        env = "STROKE_MODEL_DIR",
        default_value = "models"
    )]
    model_dir: PathBuf,

    /// Scaler artifact path (overrides --model-dir)
    #[arg(long, value_name = "FILE")]
    scaler: Option<PathBuf>,

    /// Classifier artifact path (overrides --model-dir)
    #[arg(long, value_name = "FILE")]
    classifier: Option<PathBuf>,
}

impl ModelArgs {
    fn paths(&self) -> ArtifactPaths {
        let mut paths = ArtifactPaths::in_dir(&self.model_dir);
        if let Some(scaler) = &self.scaler {
            paths.scaler = scaler.clone();
        }
        if let Some(classifier) = &self.classifier {
            paths.classifier = classifier.clone();
        }
        paths
    }
}

#[derive(Debug, Args, Clone)]
struct PatientArgs {
    /// JSON patient record ('-' reads stdin)
    #[arg(
        long,
        value_name = "FILE",
        conflicts_with_all = [
            "gender", "age", "hypertension", "heart_disease", "ever_married",
            "work_type", "residence_type", "avg_glucose_level", "bmi", "smoking_status",
        ]
    )]
    input: Option<PathBuf>,

    #[arg(long, value_parser = PossibleValuesParser::new(Gender::LABELS.iter().copied()))]
    gender: Option<String>,

    /// Age in years (1-120)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=120))]
    age: Option<u8>,

    #[arg(long, value_parser = PossibleValuesParser::new([yes_no::NO, yes_no::YES]))]
    hypertension: Option<String>,

    #[arg(long = "heart-disease", value_parser = PossibleValuesParser::new([yes_no::NO, yes_no::YES]))]
    heart_disease: Option<String>,

    #[arg(long = "ever-married", value_parser = PossibleValuesParser::new([yes_no::NO, yes_no::YES]))]
    ever_married: Option<String>,

    #[arg(long = "work-type", value_parser = PossibleValuesParser::new(WorkType::LABELS.iter().copied()))]
    work_type: Option<String>,

    #[arg(long = "residence-type", value_parser = PossibleValuesParser::new(ResidenceType::LABELS.iter().copied()))]
    residence_type: Option<String>,

    /// Average glucose level in mg/dL (40-300)
    #[arg(long = "avg-glucose-level", value_parser = parse_glucose)]
    avg_glucose_level: Option<f64>,

    /// Body mass index (10-60)
    #[arg(long, value_parser = parse_bmi)]
    bmi: Option<f64>,

    #[arg(long = "smoking-status", value_parser = PossibleValuesParser::new(SmokingStatus::LABELS.iter().copied()))]
    smoking_status: Option<String>,
}

#[derive(Debug, Args, Clone)]
struct PredictArgs {
    #[command(flatten)]
    patient: PatientArgs,

    #[command(flatten)]
    model: ModelArgs,

    /// Print the verdict as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args, Clone)]
struct EncodeArgs {
    #[command(flatten)]
    patient: PatientArgs,

    /// Print the vector as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args, Clone)]
struct CheckArgs {
    #[command(flatten)]
    model: ModelArgs,

    /// Print the artifact metadata as JSON
    #[arg(long)]
    json: bool,
}

fn parse_bounded(s: &str, range: &RangeInclusive<f64>) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(format!(
            "{value} is not in {}..={}",
            range.start(),
            range.end()
        ))
    }
}

fn parse_glucose(s: &str) -> Result<f64, String> {
    parse_bounded(s, &GLUCOSE_RANGE)
}

fn parse_bmi(s: &str) -> Result<f64, String> {
    parse_bounded(s, &BMI_RANGE)
}

#[derive(Debug, Error)]
enum InputError {
    #[error("cannot read patient record: {0}")]
    Read(#[source] io::Error),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error("{field} {value} is outside the accepted range {}..={}", .range.start(), .range.end())]
    OutOfRange {
        field: &'static str,
        value: f64,
        range: RangeInclusive<f64>,
    },
}

fn read_input(path: &Path) -> io::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(path)
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, EncodingError> {
    value.ok_or(EncodingError::MissingField(field))
}

fn required_flag(value: Option<&str>, field: &'static str) -> Result<bool, EncodingError> {
    let label = required(value, field)?;
    yes_no::parse(label).ok_or_else(|| EncodingError::UnknownCategory {
        field,
        value: label.to_string(),
        expected: &[yes_no::NO, yes_no::YES],
    })
}

/// Numeric ranges the input form enforces before a record reaches the encoder.
fn check_ranges(attrs: &PatientAttributes) -> Result<(), InputError> {
    for (field, value, range) in [
        ("age", attrs.age, AGE_RANGE),
        ("avg_glucose_level", attrs.avg_glucose_level, GLUCOSE_RANGE),
        ("bmi", attrs.bmi, BMI_RANGE),
    ] {
        if !range.contains(&value) {
            return Err(InputError::OutOfRange {
                field,
                value,
                range,
            });
        }
    }
    Ok(())
}

impl PatientArgs {
    fn to_attributes(&self) -> Result<PatientAttributes, InputError> {
        let attrs = match &self.input {
            Some(path) => {
                let text = read_input(path).map_err(InputError::Read)?;
                PatientAttributes::from_json(&text)?
            }
            None => PatientAttributes {
                gender: required(self.gender.clone(), "gender")?,
                age: f64::from(required(self.age, "age")?),
                hypertension: required_flag(self.hypertension.as_deref(), "hypertension")?,
                heart_disease: required_flag(self.heart_disease.as_deref(), "heart_disease")?,
                ever_married: required_flag(self.ever_married.as_deref(), "ever_married")?,
                work_type: required(self.work_type.clone(), "work_type")?,
                residence_type: required(self.residence_type.clone(), "residence_type")?,
                avg_glucose_level: required(self.avg_glucose_level, "avg_glucose_level")?,
                bmi: required(self.bmi, "bmi")?,
                smoking_status: required(self.smoking_status.clone(), "smoking_status")?,
            },
        };
        check_ranges(&attrs)?;
        Ok(attrs)
    }
}

fn render_verdict(verdict: &Verdict) -> String {
    match verdict.label {
        RiskLabel::HighRisk => format!(
            "High Risk of Stroke Detected! (Probability: {:.2})",
            verdict.probability
        ),
        RiskLabel::LowRisk => format!(
            "Low Risk of Stroke (Probability: {:.2})",
            verdict.probability
        ),
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Write the rendered output, or report a serialization failure as unavailable.
fn emit(out: &mut dyn Write, rendered: Result<String, serde_json::Error>) -> i32 {
    match rendered {
        Ok(text) => write_line(out, &text),
        Err(e) => {
            log::error!("cannot serialize output: {e}");
            eprintln!("error: cannot serialize output: {e}");
            EXIT_UNAVAILABLE
        }
    }
}

fn run_predict(args: &PredictArgs, out: &mut dyn Write) -> i32 {
    // load first: no request is handled without both artifacts
    let scorer = match RiskScorer::load(&args.model.paths()) {
        Ok(s) => s,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {}", PredictionError::from(e).user_message());
            return EXIT_UNAVAILABLE;
        }
    };

    let attrs = match args.patient.to_attributes() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return EXIT_BAD_INPUT;
        }
    };

    match scorer.predict(&attrs) {
        Ok(verdict) => {
            let rendered = if args.json {
                to_json(&verdict)
            } else {
                Ok(render_verdict(&verdict))
            };
            emit(out, rendered)
        }
        Err(PredictionError::Encoding(e)) => {
            eprintln!("error: {e}");
            EXIT_BAD_INPUT
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {}", e.user_message());
            EXIT_UNAVAILABLE
        }
    }
}

fn run_encode(args: &EncodeArgs, out: &mut dyn Write) -> i32 {
    let vector = match args
        .patient
        .to_attributes()
        .and_then(|attrs| encode(&attrs).map_err(InputError::from))
    {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: {e}");
            return EXIT_BAD_INPUT;
        }
    };

    let rendered = if args.json {
        let columns: serde_json::Map<String, serde_json::Value> = vector
            .named()
            .map(|(name, value)| (name.to_string(), json!(value)))
            .collect();
        to_json(&json!({
            "encoding_version": stroke_features::ENCODING_VERSION,
            "vector": vector,
            "columns": columns,
        }))
    } else {
        Ok(vector
            .named()
            .map(|(name, value)| format!("{name:<18} {value}"))
            .collect::<Vec<_>>()
            .join("\n"))
    };
    emit(out, rendered)
}

fn run_check(args: &CheckArgs, out: &mut dyn Write) -> i32 {
    let artifacts = match ModelArtifacts::load(&args.model.paths()) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return EXIT_UNAVAILABLE;
        }
    };

    let rendered = if args.json {
        to_json(&json!({
            "scaler": {
                "backend": artifacts.scaler().backend_name(),
                "metadata": artifacts.scaler_metadata(),
            },
            "classifier": {
                "backend": artifacts.classifier().backend_name(),
                "metadata": artifacts.classifier_metadata(),
            },
        }))
    } else {
        let mut lines = Vec::new();
        for (role, backend, meta) in [
            (
                "scaler",
                artifacts.scaler().backend_name(),
                artifacts.scaler_metadata(),
            ),
            (
                "classifier",
                artifacts.classifier().backend_name(),
                artifacts.classifier_metadata(),
            ),
        ] {
            match meta {
                Some(m) => lines.push(format!(
                    "{role}: {} v{} ({backend}, encoding v{})",
                    m.name, m.version, m.encoding_version
                )),
                None => lines.push(format!("{role}: {backend}")),
            }
        }
        lines.push("ok".to_string());
        Ok(lines.join("\n"))
    };
    emit(out, rendered)
}

fn run_encoding_table(out: &mut dyn Write) -> i32 {
    emit(out, EncodingTable::current().to_json_pretty())
}

fn write_line(out: &mut dyn Write, text: &str) -> i32 {
    match writeln!(out, "{text}") {
        Ok(()) => EXIT_OK,
        Err(e) => {
            eprintln!("error: cannot write output: {e}");
            EXIT_UNAVAILABLE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}

fn run(cli: Cli, out: &mut dyn Write) -> i32 {
    match &cli.command {
        Command::Predict(args) => run_predict(args, out),
        Command::Encode(args) => run_encode(args, out),
        Command::Check(args) => run_check(args, out),
        Command::EncodingTable => run_encoding_table(out),
    }
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}

fn main() {
    std::process::exit(run_cli());
}
