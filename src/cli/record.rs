use std::io::Write;

use ansi_term::{Colour, Style};
use anyhow::{bail, Result};
use chrono::NaiveDate;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, instrument};

use crate::{
    storage::{entities::Dataset, registry::metric_name_with_unit},
    utils::{measurement::Measurement, time::date_to_record_name},
};

/// Interactive session asking the user for the values of a day. Reads answers line by line from
/// `input` and writes questions into `output`.
pub struct RecordSession<R, W> {
    input: R,
    output: W,
}

impl<R: AsyncBufRead + Unpin, W: Write> RecordSession<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Asks a question and returns trimmed answer. [None] means input was closed.
    async fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Records values for `date` into `dataset`, adding new metrics along the way.
    #[instrument(skip(self, dataset))]
    pub async fn run(&mut self, dataset: &mut Dataset, date: NaiveDate) -> Result<()> {
        writeln!(
            self.output,
            "\n{}\n",
            Style::new().bold().paint(format!(
                "=== Recording metrics for {}, {} ===",
                date.format("%A"),
                date_to_record_name(date)
            ))
        )?;

        if !dataset.is_empty() {
            writeln!(self.output, "Current metrics being tracked:")?;
            for (i, name) in dataset.names().enumerate() {
                writeln!(self.output, "{}. {name}", i + 1)?;
            }
        }

        let add_new = self
            .ask("\nWould you like to add any new metrics to track? (y/n): ")
            .await?;
        if add_new.is_some_and(|v| v.eq_ignore_ascii_case("y")) {
            self.add_metrics(dataset).await?;
        }

        if dataset.is_empty() {
            self.add_required_metrics(dataset).await?;
        }

        self.record_values(dataset, date).await?;

        writeln!(self.output, "\nToday's recording completed.")?;
        Ok(())
    }

    async fn add_metrics(&mut self, dataset: &mut Dataset) -> Result<()> {
        while let Some(name) = self
            .ask("Enter name of new metric (or press enter to stop adding): ")
            .await?
            .filter(|v| !v.is_empty())
        {
            if dataset.contains(&name) {
                writeln!(self.output, "'{name}' is already being tracked.")?;
                continue;
            }
            self.add_with_unit(dataset, &name).await?;
        }
        Ok(())
    }

    async fn add_required_metrics(&mut self, dataset: &mut Dataset) -> Result<()> {
        writeln!(self.output, "\nNo metrics configured. Let's add some first.")?;
        loop {
            let Some(name) = self
                .ask("Enter name of metric to track (or press enter to stop): ")
                .await?
            else {
                bail!("Input was closed before any metric was added");
            };
            if name.is_empty() {
                if dataset.is_empty() {
                    writeln!(self.output, "You must add at least one metric.")?;
                    continue;
                }
                return Ok(());
            }
            if dataset.contains(&name) {
                writeln!(self.output, "'{name}' is already being tracked.")?;
                continue;
            }
            self.add_with_unit(dataset, &name).await?;
        }
    }

    async fn add_with_unit(&mut self, dataset: &mut Dataset, name: &str) -> Result<()> {
        let unit = self
            .ask(&format!("What unit is {name} measured in? (e.g., kg, cm): "))
            .await?
            .unwrap_or_default();
        let full_name = metric_name_with_unit(name, &unit);
        if dataset.add_metric(full_name.clone()) {
            writeln!(self.output, "Added '{full_name}' to tracked metrics.")?;
        } else {
            writeln!(self.output, "'{full_name}' is already being tracked.")?;
        }
        Ok(())
    }

    async fn record_values(&mut self, dataset: &mut Dataset, date: NaiveDate) -> Result<()> {
        writeln!(self.output, "\nEnter today's values (leave blank to skip):")?;
        let names = dataset.names().map(String::from).collect::<Vec<_>>();
        for name in names {
            loop {
                let Some(answer) = self.ask(&format!("{name}: ")).await? else {
                    debug!("Input closed, skipping remaining values");
                    return Ok(());
                };
                if answer.is_empty() {
                    break;
                }
                match answer.parse::<Measurement>() {
                    Ok(value) => {
                        dataset.record(&name, date, *value);
                        break;
                    }
                    Err(e) => {
                        debug!("Rejected value {answer:?} for {name}: {e}");
                        writeln!(
                            self.output,
                            "{}",
                            Colour::Red.paint("Please enter a valid number.")
                        )?;
                    }
                }
            }
        }
        Ok(())
    }
}
