//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::client::{Client, ReadOptions, SeriesFilter};
use crate::config::ClientConfig;
use crate::decode::FromJson;
use crate::error::{Error, Result, ResultExt};
use crate::pagination::Cursor;
use crate::protocol::{DataPoint, DataPointFound, Series};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let client = Client::new(self.load_config()?)?;

        match &self.cli.command {
            Commands::ListSeries {
                key,
                tag,
                attr,
                max,
            } => {
                let filter = SeriesFilter {
                    keys: key.clone(),
                    tags: tag.clone(),
                    attributes: attr.iter().cloned().collect(),
                    ..SeriesFilter::default()
                };
                let cursor = client.list_series(&filter).await?;
                self.drain(cursor, *max, Series::to_json_value).await
            }
            Commands::GetSeries { key } => {
                let series = client.get_series(key).await?;
                self.output(&series.to_json_value());
                Ok(())
            }
            Commands::CreateSeries {
                key,
                name,
                tag,
                attr,
            } => {
                let mut series = Series::new(key.as_str());
                series.name = name.clone().unwrap_or_default();
                series.tags = tag.clone();
                series.attributes = attr.iter().cloned().collect();

                let created = client.create_series(&series).await?;
                self.output(&created.to_json_value());
                Ok(())
            }
            Commands::Read {
                key,
                start,
                end,
                rollup,
                tz,
                limit,
                max,
            } => {
                let options = ReadOptions {
                    rollup: rollup.clone(),
                    interpolation: None,
                    tz: tz.clone(),
                    limit: *limit,
                };
                let cursor = client
                    .read_data(key, start.as_str(), end.as_str(), &options)
                    .await?;
                if let Some(rollup) = cursor.rollup() {
                    debug!("Server rollup: {}", rollup.to_json_value());
                }
                self.drain(cursor, *max, DataPoint::to_json_value).await
            }
            Commands::Find {
                key,
                predicate,
                period,
                start,
                end,
                tz,
                max,
            } => {
                let options = ReadOptions {
                    tz: tz.clone(),
                    ..ReadOptions::default()
                };
                let cursor = client
                    .find_data(key, predicate, period, start.as_str(), end.as_str(), &options)
                    .await?;
                self.drain(cursor, *max, DataPointFound::to_json_value)
                    .await
            }
            Commands::Write { key, points } => {
                let points = points
                    .iter()
                    .map(|(t, v)| parse_point(t, v))
                    .collect::<Result<Vec<_>>>()?;
                let response = client.write_data(key, &points).await?;
                self.output(&json!({
                    "written": points.len(),
                    "status": response.status,
                }));
                Ok(())
            }
            Commands::Single { key, ts, direction } => {
                let single = client.single_value(key, ts.as_str(), *direction).await?;
                self.output(&json!({
                    "series": single.series.to_json_value(),
                    "data": single.data.as_ref().map(DataPoint::to_json_value),
                }));
                Ok(())
            }
            Commands::Delete { key, start, end } => {
                let response = client.delete(key, start.as_str(), end.as_str()).await?;
                self.output(&json!({ "status": response.status }));
                Ok(())
            }
        }
    }

    /// Load config from the file given with `--config`, or the environment
    fn load_config(&self) -> Result<ClientConfig> {
        match &self.cli.config {
            Some(path) => {
                debug!("Loading config from {}", path.display());
                ClientConfig::from_yaml_file(path)
            }
            None => ClientConfig::from_env()
                .context("No --config given and environment is incomplete"),
        }
    }

    /// Print every element of a cursor, up to `max`
    async fn drain<T: FromJson>(
        &self,
        mut cursor: Cursor<T>,
        max: Option<usize>,
        to_json: impl Fn(&T) -> Value,
    ) -> Result<()> {
        let started = Instant::now();
        let mut count = 0usize;

        while max.map_or(true, |max| count < max) {
            let Some(item) = cursor.try_next().await? else {
                break;
            };
            self.output(&to_json(&item));
            count += 1;
        }

        info!(
            "Printed {} records in {:.2}s",
            count,
            started.elapsed().as_secs_f64()
        );
        Ok(())
    }

    fn output(&self, value: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(value).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
            }
        }
    }
}

fn parse_point(time: &str, value: &str) -> Result<DataPoint> {
    let v: f64 = value
        .parse()
        .map_err(|_| Error::Other(format!("Invalid value '{value}' for point at {time}")))?;
    DataPoint::from_data(time, v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        let point = parse_point("2013-01-01T00:00:00", "1.5").unwrap();
        assert_eq!(point.v, 1.5);
        assert_eq!(point.timestamp(), "2013-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_parse_point_rejects_bad_value() {
        let err = parse_point("2013-01-01T00:00:00", "abc").unwrap_err();
        assert!(err.to_string().contains("Invalid value 'abc'"));
        assert!(parse_point("yesterday", "1").is_err());
    }
}
