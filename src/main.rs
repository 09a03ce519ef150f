use clap::Parser;
use color_eyre::Result;
use std::io::{self, Write};
use std::path::PathBuf;

use dynmap_inspect::config::{self, Config, InspectOptions};
use dynmap_inspect::error::InspectError;
use dynmap_inspect::input::{InputReader, InputSource, exe_dir};
use dynmap_inspect::report::{Report, render_json, render_missing_input};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Inspect dynmap world JSON structure and statistics",
    long_about = None
)]
struct Args {
    /// Input JSON file, `-` for stdin (default: dynmap_world.json next to the executable)
    #[arg(long)]
    path: Option<PathBuf>,

    /// Top N entries for every ranked listing
    #[arg(long)]
    top: Option<usize>,

    /// Sample marker records printed per kind (0 to disable)
    #[arg(long)]
    samples: Option<usize>,

    /// Skip the key-path walk (faster on large documents)
    #[arg(long)]
    no_walk: bool,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Log debug details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(args.verbose);
    log::debug!("=== DYNMAP-INSPECT RUN STARTED ===");

    let config_result = config::load_config();
    if let Some(warning) = &config_result.warning {
        eprintln!("Warning: {}", warning);
    }
    let options = resolve_options(&args, &config_result.config);

    let source = InputSource::resolve(
        args.path.as_deref(),
        &config_result.config.input.default_file,
    );

    let document = match InputReader::read_document(&source) {
        Ok(document) => document,
        Err(InspectError::InputNotFound { path, cwd }) => {
            log::warn!("Input file not found: {:?}", path);
            print!("{}", render_missing_input(&path, &cwd, &exe_dir()));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let report = Report::build(source.to_string(), &document, &options);

    let mut stdout = io::stdout().lock();
    if args.json {
        writeln!(stdout, "{}", render_json(&report)?)?;
    } else {
        write!(stdout, "{}", report)?;
    }
    stdout.flush()?;

    log::debug!("=== DYNMAP-INSPECT RUN FINISHED ===");
    Ok(())
}

/// Stderr logging, `warn` by default, `debug` with --verbose, RUST_LOG wins
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| {
            use std::time::SystemTime;
            let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
            writeln!(
                buf,
                "[{}] [{}] {}",
                datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();
}

/// Command-line flags override the config file, which overrides defaults
fn resolve_options(args: &Args, config: &Config) -> InspectOptions {
    let mut options = InspectOptions::from(&config.report);
    if let Some(top) = args.top {
        options.top_n = top;
    }
    if let Some(samples) = args.samples {
        options.samples = samples;
    }
    if args.no_walk {
        options.walk = false;
    }
    options
}
