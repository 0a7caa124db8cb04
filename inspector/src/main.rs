use std::{io, process::ExitCode, sync::OnceLock};

use common::DateTime;
use inspector::{Args, Config, Report};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    match start() {
        Ok(()) => ExitCode::SUCCESS,
        Err(()) => ExitCode::FAILURE,
    }
}

fn start() -> Result<(), ()> {
    // `--help` and `--version` are reported as errors too.
    let Args { config, token } = Args::parse().unwrap_or_else(|e| e.exit());

    let Config { output, log } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let auth = match &token {
        Some(path) => inspector::load_file(path),
        None => {
            log::debug!("reading token from STDIN");
            inspector::load(io::stdin().lock())
        }
    }
    .map_err(|e| {
        log::error!("{e}\n{}", e.trace());
    })?;

    let report = Report::new(&auth, DateTime::now(), output.attributes)
        .render(output.format)
        .map_err(|e| {
            log::error!("failed to render report: {e}");
        })?;
    println!("{report}");

    if !auth.is_valid() {
        log::warn!("`Authentication` of `{}` is not valid", auth.name());
    }

    Ok(())
}
