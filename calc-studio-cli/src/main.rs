mod repl;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use calc_studio::chart::{self, ChartKind};
use calc_studio::engine::{evaluate, AngleMode};
use calc_studio::forecast::LinearTrend;
use calc_studio::table::Table;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::Verbosity;
use log::{debug, info};

/// Calculator, CSV chart viewer and linear-trend forecaster
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Arguments {
    #[clap(subcommand)]
    command: Command,

    #[clap(flatten)]
    verbose: Verbosity,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluates an expression and prints the result
    Eval {
        /// The expression to evaluate
        expression: String,

        /// Treat trigonometric arguments as degrees instead of radians
        #[clap(long)]
        degrees: bool,
    },
    /// Starts an interactive evaluation session
    Repl {
        /// Treat trigonometric arguments as degrees instead of radians
        #[clap(long)]
        degrees: bool,
    },
    /// Renders a CSV file as a chart
    Chart {
        /// The CSV file to render (header row, then one label column and
        /// numeric value columns)
        csv: PathBuf,

        /// Where to write the chart (.svg for vector output, .png otherwise)
        #[clap(short, long)]
        output: PathBuf,

        /// The chart kind: line, bar or pie
        #[clap(short, long, default_value = "line")]
        kind: String,
    },
    /// Fits a linear trend to a CSV column and predicts future values
    Forecast {
        /// The CSV file holding the observations
        csv: PathBuf,

        /// The column to forecast
        #[clap(short, long)]
        column: String,

        /// How many future points to predict
        #[clap(short, long, default_value_t = 5)]
        steps: usize,

        /// Render the observed and predicted series to this file
        #[clap(long)]
        chart: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let arguments = Arguments::parse();

    env_logger::Builder::new()
        .filter_level(arguments.verbose.log_level_filter())
        .init();

    match arguments.command {
        Command::Eval {
            expression,
            degrees,
        } => {
            let result = evaluate(&expression, angle_mode(degrees))
                .map_err(|error| anyhow!("invalid expression: {}", error))?;
            println!("{}", result);
        }
        Command::Repl { degrees } => repl::run(angle_mode(degrees))?,
        Command::Chart { csv, output, kind } => {
            let kind: ChartKind = kind.parse()?;
            let table = Table::from_path(&csv)?;
            info!(
                "rendering {} rows from '{}' as a {} chart",
                table.row_count(),
                csv.display(),
                kind
            );
            chart::render(&table, kind, &output)?;
            println!("wrote {} chart to {}", kind, output.display());
        }
        Command::Forecast {
            csv,
            column,
            steps,
            chart: chart_output,
        } => {
            let table = Table::from_path(&csv)?;
            let observed = table.numeric_column(&column)?;
            let trend = LinearTrend::fit(&observed)
                .with_context(|| format!("Failed to fit a trend to column '{}'", column))?;
            debug!("fitted trend: {:?}", trend);

            println!(
                "trend: value = {:.4} * index + {:.4}",
                trend.slope(),
                trend.intercept()
            );
            let predicted = trend.forecast(observed.len(), steps);
            for (index, value) in &predicted {
                println!("index {}: {:.4}", index, value);
            }
            if let Some(path) = chart_output {
                chart::render_forecast(&observed, &predicted, &column, &path)?;
                println!("wrote forecast chart to {}", path.display());
            }
        }
    }
    Ok(())
}

fn angle_mode(degrees: bool) -> AngleMode {
    if degrees {
        AngleMode::Degrees
    } else {
        AngleMode::Radians
    }
}
