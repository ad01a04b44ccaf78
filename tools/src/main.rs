//! campaign-predictor: front-end driver for the campaign-response predictor.
//!
//! Usage:
//!   campaign-predictor --input form.json [--json]
//!   campaign-predictor --input - < form.json
//!   campaign-predictor --ipc-mode
//!
//! Common flags: --config <path>  --db <path>  --model <path>

use anyhow::{bail, Context, Result};
use campaign_core::{
    config::AppConfig,
    form::{FormInput, FormSchema},
    model::{Classifier, LoadedModel},
    predictor::{MessageLevel, Predictor, SubmissionOutcome},
    store::{PredictionSink, PredictionStore},
};
use std::env;
use std::io::{self, BufRead, Read, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    FormSchema,
    Submit { form: FormInput },
    Quit,
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let json_output = args.iter().any(|a| a == "--json");
    let input = flag_value(&args, "--input");

    let mut config = match flag_value(&args, "--config") {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(db) = flag_value(&args, "--db") {
        config.db_path = db.to_string();
    }
    if let Some(model) = flag_value(&args, "--model") {
        config.model_path = model.to_string();
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    if !ipc_mode && input.is_none() {
        bail!("nothing to do: pass --input <file|-> or --ipc-mode");
    }

    // Load errors halt here, before any submission is accepted.
    let model = LoadedModel::load(&config.model_path)
        .with_context(|| format!("loading model artifact {}", config.model_path))?;
    let rule = model.decision_rule();

    let store = PredictionStore::open(&config.db_path)?;
    store.migrate()?;

    let mut predictor = Predictor::new(model, rule, store);

    if ipc_mode {
        run_ipc_loop(&mut predictor, io::stdin().lock(), io::stdout())?;
    } else if let Some(source) = input {
        let form = read_form(source)?;
        let outcome = predictor.submit(&form);
        if json_output {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        } else {
            print_outcome(&outcome);
        }
    }

    predictor.into_sink().close()?;
    Ok(())
}

/// One JSON command per input line, one JSON reply per output line.
/// A malformed line gets an `{"error": ...}` reply and the loop goes on.
fn run_ipc_loop<C, S, R, W>(predictor: &mut Predictor<C, S>, mut input: R, mut output: W) -> Result<()>
where
    C: Classifier,
    S: PredictionSink,
    R: BufRead,
    W: Write,
{
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = input.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(output, "{}", err_json)?;
                output.flush()?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::FormSchema => {
                writeln!(output, "{}", serde_json::to_string(&FormSchema::standard())?)?;
            }
            IpcCommand::Submit { form } => {
                let outcome = predictor.submit(&form);
                writeln!(output, "{}", serde_json::to_string(&outcome)?)?;
            }
        }
        output.flush()?;
    }
    Ok(())
}

fn read_form(source: &str) -> Result<FormInput> {
    let content = if source == "-" {
        let mut s = String::new();
        io::stdin().read_to_string(&mut s)?;
        s
    } else {
        std::fs::read_to_string(source).with_context(|| format!("reading form {source}"))?
    };
    serde_json::from_str(&content).context("parsing form JSON")
}

fn print_outcome(outcome: &SubmissionOutcome) {
    for m in &outcome.messages {
        let tag = match m.level {
            MessageLevel::Success => "ok",
            MessageLevel::Info    => "info",
            MessageLevel::Error   => "error",
        };
        println!("[{tag}] {}", m.text);
    }
    if let Some(id) = outcome.row_id {
        println!("  row id:     {id}");
    }
    println!("  submission: {}", outcome.submission_id);
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
