//! Command-line petal counter.
//!
//! Usage:
//!   petal-counter <image> [--json] [--no-delay] [--config <path>]
//!
//! The browser studio lives in the `studio` binary:
//!   cargo run --bin studio

use std::{env, path::Path, process};

use petal_counter::{input, AnalysisResult, Analyzer, PetalConfig, PetalError};

struct Options {
    image: String,
    json: bool,
    no_delay: bool,
    config: Option<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let opts = parse_args(&args);

    let mut config = match &opts.config {
        Some(path) => PetalConfig::load_json(path).unwrap_or_else(|e| fail(&e)),
        None => PetalConfig::default(),
    };
    if opts.no_delay {
        config.analysis_delay_ms = 0;
    }

    match run(&opts, &config) {
        Ok(result) if opts.json => match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(&PetalError::from(e)),
        },
        Ok(result) => print_result(&result),
        Err(e) => fail(&e),
    }
}

fn run(opts: &Options, config: &PetalConfig) -> petal_counter::Result<AnalysisResult> {
    let image = input::validate_path(Path::new(&opts.image), config.max_upload_bytes)?;
    log::info!("{}: {} ({} bytes)", image.name(), image.mime(), image.bytes().len());

    let mut analyzer = Analyzer::from_config(config);
    analyzer.analyze_bytes(image.bytes())
}

fn parse_args(args: &[String]) -> Options {
    let mut image = None;
    let mut json = false;
    let mut no_delay = false;
    let mut config = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--json" => json = true,
            "--no-delay" => no_delay = true,
            "--config" => {
                i += 1;
                match args.get(i) {
                    Some(path) => config = Some(path.clone()),
                    None => {
                        eprintln!("Error: --config needs a path");
                        process::exit(1);
                    }
                }
            }
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            arg if !arg.starts_with("--") => {
                if image.is_some() {
                    eprintln!("Error: only one image can be analyzed at a time");
                    process::exit(1);
                }
                image = Some(arg.to_owned());
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
        i += 1;
    }

    match image {
        Some(image) => Options { image, json, no_delay, config },
        None => {
            print_help(&args[0]);
            process::exit(1);
        }
    }
}

fn print_result(result: &AnalysisResult) {
    println!("Petals detected:  {}", result.petal_count);
    println!("Confidence:       {:.1}%", result.confidence);
    println!("Flower type:      {}", result.flower_type);
    println!("Processing time:  {:.1}s", result.processing_time_secs());
}

fn print_help(program: &str) {
    println!("Usage: {} <image> [--json] [--no-delay] [--config <path>]", program);
    println!();
    println!("Estimates the petal count of a flower photo (JPG, PNG or WebP, up to 10MB).");
    println!();
    println!("Options:");
    println!("  --json           print the result as JSON");
    println!("  --no-delay       skip the simulated processing delay");
    println!("  --config <path>  read settings from a JSON config file");
}

fn fail(err: &PetalError) -> ! {
    eprintln!("Error: {}", err.user_message());
    log::debug!("{:?}", err);
    process::exit(1);
}
