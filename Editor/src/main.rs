use std::process::ExitCode;

use mp4_track::{parse, set_track_flag, Mp4Error};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, Layer};

mod args;
mod output;

use args::{get_log_level_filter, parse_args, Command, OutputFormat};

fn main() -> ExitCode {
    let args = parse_args();

    // Logs go to stderr so that the listing on stdout stays machine-readable.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .with_filter(get_log_level_filter(&args));
    let subscriber = tracing_subscriber::registry().with(fmt_layer);

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", e);
        return ExitCode::FAILURE;
    }

    info!("{:?}", args);

    let file = args.command.file();
    if !file.is_file() {
        error!("Not a readable file: {}", file.display());
        return ExitCode::FAILURE;
    }

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Mp4Error> {
    match command {
        Command::List { file, format } => {
            let tracks = parse(&file)?;
            match format {
                OutputFormat::Json => {
                    let json = output::render_json(&tracks).map_err(std::io::Error::from)?;
                    println!("{}", json);
                }
                OutputFormat::Table => print!("{}", output::render_table(&tracks)),
            }
            Ok(())
        }
        Command::Set { file, track_id, flag } => set_track_flag(&file, track_id, flag.into(), true),
        Command::Unset { file, track_id, flag } => set_track_flag(&file, track_id, flag.into(), false),
    }
}
