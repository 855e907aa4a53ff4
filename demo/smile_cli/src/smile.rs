//! Greek smile computation and rendering.

use pricer_core::market_data::ForwardCurve;
use pricer_models::instruments::EuropeanVanillaOption;
use pricer_pricing::greeks::{GreekKind, GreekValue, LocalVolGreekEngine, SingleResultResolver};
use pricer_pricing::pde::PdeError;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt::Write as _;
use std::str::FromStr;
use tracing::{debug, info};

use crate::config::{Method, OptionType, SmileConfig};
use crate::error::{Result, SmileError};

/// Output format of the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned text table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{}', expected table or json", other)),
        }
    }
}

/// Greeks at one strike
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmileRow {
    /// Strike
    pub strike: f64,
    /// One value per reported kind, in report order
    pub values: Vec<GreekValue>,
}

/// Greeks across the configured strikes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmileReport {
    /// Solver direction used
    pub method: &'static str,
    /// Forward at expiry
    pub forward: f64,
    /// Time to expiry
    pub expiry: f64,
    /// Reported kinds
    pub kinds: Vec<GreekKind>,
    /// One row per strike
    pub rows: Vec<SmileRow>,
}

/// Price the configured smile.
pub fn run(config: &SmileConfig) -> Result<SmileReport> {
    let surface = config.market.surface.build()?;
    let curve = config.market.curve()?;
    let expiry = config.option.expiry;
    let is_call = config.option.option_type == OptionType::Call;
    let forward = curve.forward(expiry)?;
    let engine = LocalVolGreekEngine::new(config.pde);

    info!(
        method = ?config.method,
        strikes = config.strikes.len(),
        kinds = config.greeks.len(),
        "pricing smile"
    );

    let rows = match config.method {
        Method::Forward => {
            // The forward grid covers every strike; the option only fixes expiry and type
            let option = EuropeanVanillaOption::new(forward, expiry, is_call)?;
            let collection =
                engine.grid_greeks_for(surface.as_ref(), &curve, &option, &config.greeks)?;

            config
                .strikes
                .iter()
                .map(|&strike| -> Result<SmileRow> {
                    let values = config
                        .greeks
                        .iter()
                        .map(|&kind| {
                            match SingleResultResolver::new(&collection, kind).result(strike) {
                                Ok(value) => Ok(GreekValue::Available(value)),
                                Err(err @ PdeError::Unavailable { .. }) => {
                                    Ok(GreekValue::Unavailable(err.to_string()))
                                }
                                Err(err) => Err(SmileError::from(err)),
                            }
                        })
                        .collect::<Result<Vec<_>>>()?;
                    Ok(SmileRow { strike, values })
                })
                .collect::<Result<Vec<_>>>()?
        }
        // One independent backward solve set per strike
        Method::Backward => config
            .strikes
            .par_iter()
            .map(|&strike| -> Result<SmileRow> {
                let option = EuropeanVanillaOption::new(strike, expiry, is_call)?;
                let point =
                    engine.backward_greeks_for(surface.as_ref(), &curve, &option, &config.greeks)?;
                debug!(strike, "backward Greeks done");
                let values = config
                    .greeks
                    .iter()
                    .map(|&kind| {
                        point
                            .get(kind)
                            .cloned()
                            .unwrap_or_else(|| GreekValue::Unavailable("not computed".to_string()))
                    })
                    .collect();
                Ok(SmileRow { strike, values })
            })
            .collect::<Result<Vec<_>>>()?,
    };

    Ok(SmileReport {
        method: match config.method {
            Method::Forward => "forward",
            Method::Backward => "backward",
        },
        forward,
        expiry,
        kinds: config.greeks.clone(),
        rows,
    })
}

impl SmileReport {
    /// Render the report in `format`.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(self).map_err(|e| SmileError::Output(e.to_string()))
            }
            OutputFormat::Table => Ok(self.table()),
        }
    }

    fn table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} PDE, expiry {:.4}, forward {:.4}",
            self.method, self.expiry, self.forward
        );
        let _ = write!(out, "{:>10}", "strike");
        for kind in &self.kinds {
            let _ = write!(out, " {:>16}", kind.name());
        }
        out.push('\n');

        for row in &self.rows {
            let _ = write!(out, "{:>10.4}", row.strike);
            for value in &row.values {
                match value.value() {
                    Some(v) => {
                        let _ = write!(out, " {:>16.8}", v);
                    }
                    None => {
                        let _ = write!(out, " {:>16}", "n/a");
                    }
                }
            }
            out.push('\n');
        }
        out
    }
}
