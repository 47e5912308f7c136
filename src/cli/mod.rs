pub mod interrupt;
pub mod record;

use std::{fmt::Display, future::Future, io::Write, path::PathBuf};

use anyhow::Result;
use chrono::{DateTime, Duration, Local, NaiveDate};
use chrono_english::parse_date_string;
use clap::{CommandFactory, Parser, ValueEnum};
use interrupt::detect_interrupt;
use record::RecordSession;
use tokio::{
    io::{AsyncBufRead, BufReader},
    select,
};
use tracing::{error, info, level_filters::LevelFilter};

use crate::{
    series::{interpolation::FillPolicy, DateRange},
    storage::data_store::{DataStore, JsonDataStore},
    tui::{TerminalVisualizer, Visualizer},
    utils::{
        clock::{Clock, DefaultClock},
        dir::create_application_default_path,
        logging::enable_logging,
    },
};

const DEFAULT_STORE_FILE: &str = "metrics_data.json";

/// Days shown before `--end` when only the end of the window is given.
const DEFAULT_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "daytally", version, long_about = None)]
#[command(about = "Records daily metrics and shows them as a graph", long_about = None)]
pub struct Args {
    #[arg(
        short,
        long = "graph-only",
        help = "Only display the graph without recording new data"
    )]
    graph_only: bool,
    #[arg(
        short,
        long,
        help = "File with recorded metrics. By default it's metrics_data.json in $XDG_STATE_HOME/daytally or $HOME/.local/state/daytally"
    )]
    file: Option<PathBuf>,
    #[arg(
        short,
        long,
        help = "Record values for this date instead of today. Examples are \"yesterday\", \"3 days ago\", \"15/03/2025\""
    )]
    date: Option<String>,
    #[arg(
        long = "start",
        short,
        help = "Start of the graph window. Examples are \"last week\", \"15/03/2025\""
    )]
    start_date: Option<String>,
    #[arg(
        long = "end",
        short,
        help = "End of the graph window. Examples are \"yesterday\", \"15/03/2025\""
    )]
    end_date: Option<String>,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
    #[arg(long, default_value_t = FillPolicy::Linear, help = "How days without values are filled in on the graph")]
    fill: FillPolicy,
    #[arg(long, help = "Enable logging")]
    log: bool,
}

/// Everything [run] needs, validated.
#[derive(Debug, Clone, PartialEq)]
pub struct RunParams {
    pub graph_only: bool,
    pub record_date: NaiveDate,
    pub zoom: Option<DateRange>,
    pub fill: FillPolicy,
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let app_dir = create_application_default_path()?;
    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(&app_dir, logging_level, args.log)?;

    let params = parse_values(&args, &DefaultClock)?;
    let store = JsonDataStore::new(args.file.unwrap_or_else(|| app_dir.join(DEFAULT_STORE_FILE)));

    run(
        &params,
        &store,
        BufReader::new(tokio::io::stdin()),
        std::io::stdout(),
        &mut TerminalVisualizer,
        detect_interrupt(),
    )
    .await
}

/// Load the store, optionally ask for new values and save them, then show the graph.
/// Once `interrupt` resolves during data entry, what was entered so far is saved and the graph is
/// skipped.
pub async fn run(
    params: &RunParams,
    store: &impl DataStore,
    input: impl AsyncBufRead + Unpin,
    mut output: impl Write,
    visualizer: &mut impl Visualizer,
    interrupt: impl Future<Output = ()>,
) -> Result<()> {
    let mut dataset = store
        .load()
        .await
        .inspect_err(|e| error!("Failed to load metrics {e:?}"))?;

    if !params.graph_only {
        let mut session = RecordSession::new(input, &mut output);
        // Whatever was entered before an interrupt is still saved.
        let interrupted = select! {
            result = session.run(&mut dataset, params.record_date) => {
                result?;
                false
            },
            _ = interrupt => true,
        };
        drop(session);

        if interrupted {
            info!("Interrupted during recording");
            writeln!(output, "\nProgram interrupted. Saving data...")?;
        }
        store.save(&dataset).await?;
        writeln!(
            output,
            "Data saved successfully to {}",
            store.location().display()
        )?;
        if interrupted {
            return Ok(());
        }
    }

    visualizer.render(&dataset, params.fill, params.zoom)
}

fn validation_error(message: String) -> anyhow::Error {
    Args::command()
        .error(clap::error::ErrorKind::ValueValidation, message)
        .into()
}

fn parse_day(
    value: Option<&str>,
    name: &str,
    now: DateTime<Local>,
    dialect: chrono_english::Dialect,
) -> Result<Option<NaiveDate>> {
    match value.map(|s| parse_date_string(s, now, dialect)) {
        Some(Ok(v)) => Ok(Some(v.date_naive())),
        Some(Err(e)) => Err(validation_error(format!("Failed to validate {name} {e}"))),
        None => Ok(None),
    }
}

/// Also provides sensible defaults for dates that weren't specified.
fn parse_values(args: &Args, clock: &impl Clock) -> Result<RunParams> {
    let now = clock.now();
    let today = now.date_naive();
    let dialect: chrono_english::Dialect = args.date_style.into();

    let record_date = parse_day(args.date.as_deref(), "date", now, dialect)?.unwrap_or(today);
    let start = parse_day(args.start_date.as_deref(), "start date", now, dialect)?;
    let end = parse_day(args.end_date.as_deref(), "end date", now, dialect)?;

    let zoom = match (start, end) {
        (None, None) => None,
        (Some(start), None) => Some((start, today.max(start))),
        (None, Some(end)) => Some((end - Duration::days(DEFAULT_WINDOW_DAYS), end)),
        (Some(start), Some(end)) => Some((start, end)),
    };
    let zoom = match zoom {
        Some((start, end)) => Some(DateRange::new(start, end).ok_or_else(|| {
            validation_error(format!("Start of the window {start} comes after its end {end}"))
        })?),
        None => None,
    };

    Ok(RunParams {
        graph_only: args.graph_only,
        record_date,
        zoom,
        fill: args.fill,
    })
}
