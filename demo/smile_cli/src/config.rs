//! Smile configuration management.
//!
//! Handles loading of the market, option and engine settings from TOML files
//! with environment variable override support.

use pricer_core::market_data::{
    DriftForwardCurve, FlatLocalVol, FunctionalLocalVol, GridLocalVol, LocalVolatilitySurface,
    MarketDataError, SurfaceCoordinate,
};
use pricer_pricing::greeks::GreekKind;
use pricer_pricing::pde::PdeConfig;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Surface shared across the Greek engine's worker threads.
pub type SharedSurface = Box<dyn LocalVolatilitySurface<f64> + Send + Sync>;

/// PDE used to produce the smile
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// One forward solve for every strike
    #[default]
    Forward,
    /// One backward solve per strike
    Backward,
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "forward" => Ok(Self::Forward),
            "backward" => Ok(Self::Backward),
            other => Err(format!("unknown method '{}', expected forward or backward", other)),
        }
    }
}

/// Call or put
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Call option
    #[default]
    Call,
    /// Put option
    Put,
}

/// Local volatility surface description
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SurfaceConfig {
    /// Constant volatility
    Flat {
        /// Volatility level
        sigma: f64,
        /// Declared coordinate
        #[serde(default = "default_coordinate")]
        coordinate: SurfaceCoordinate,
    },
    /// `level + skew·tanh(steepness·(x/pivot - 1))`, floored at zero
    Skew {
        /// At-the-pivot volatility
        level: f64,
        /// Skew amplitude
        skew: f64,
        /// Steepness of the transition
        #[serde(default = "default_steepness")]
        steepness: f64,
        /// Coordinate value where the skew is centred
        pivot: f64,
        /// Declared coordinate
        #[serde(default = "default_coordinate")]
        coordinate: SurfaceCoordinate,
    },
    /// Bilinear grid of volatilities
    Grid {
        /// Time pillars
        times: Vec<f64>,
        /// Strike or moneyness pillars
        xs: Vec<f64>,
        /// `vols[time][x]`
        vols: Vec<Vec<f64>>,
        /// Declared coordinate
        #[serde(default = "default_coordinate")]
        coordinate: SurfaceCoordinate,
    },
}

fn default_coordinate() -> SurfaceCoordinate {
    SurfaceCoordinate::Strike
}

fn default_steepness() -> f64 {
    1.0
}

impl SurfaceConfig {
    /// Build the described surface.
    pub fn build(&self) -> Result<SharedSurface, MarketDataError> {
        Ok(match self {
            Self::Flat { sigma, coordinate } => Box::new(FlatLocalVol::new(*sigma, *coordinate)?),
            Self::Skew {
                level,
                skew,
                steepness,
                pivot,
                coordinate,
            } => {
                let (level, skew, steepness, pivot) = (*level, *skew, *steepness, *pivot);
                Box::new(FunctionalLocalVol::new(
                    move |_t: f64, x: f64| {
                        (level + skew * (steepness * (x / pivot - 1.0)).tanh()).max(0.0)
                    },
                    *coordinate,
                ))
            }
            Self::Grid {
                times,
                xs,
                vols,
                coordinate,
            } => {
                let rows: Vec<&[f64]> = vols.iter().map(Vec::as_slice).collect();
                Box::new(GridLocalVol::new(times, xs, &rows, *coordinate)?)
            }
        })
    }
}

/// Forward curve and surface
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MarketConfig {
    /// Forward at time zero
    pub spot: f64,

    /// Continuously compounded drift of the forward curve
    #[serde(default)]
    pub drift: f64,

    /// Local volatility surface
    pub surface: SurfaceConfig,
}

impl MarketConfig {
    /// Build the forward curve.
    pub fn curve(&self) -> Result<DriftForwardCurve<f64>, MarketDataError> {
        DriftForwardCurve::new(self.spot, self.drift)
    }
}

/// Option shape shared by every strike of the smile
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct OptionConfig {
    /// Time to expiry in years
    pub expiry: f64,

    /// Call or put
    #[serde(default, rename = "type")]
    pub option_type: OptionType,
}

/// Smile demo configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SmileConfig {
    /// Solver direction
    #[serde(default)]
    pub method: Method,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Strikes to report
    pub strikes: Vec<f64>,

    /// Greeks to report
    #[serde(default = "default_greeks")]
    pub greeks: Vec<GreekKind>,

    /// Market description
    pub market: MarketConfig,

    /// Option description
    pub option: OptionConfig,

    /// Finite-difference settings
    #[serde(default)]
    pub pde: PdeConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_greeks() -> Vec<GreekKind> {
    vec![
        GreekKind::Price,
        GreekKind::Delta,
        GreekKind::Gamma,
        GreekKind::ImpliedVol,
    ]
}

impl Default for SmileConfig {
    fn default() -> Self {
        Self {
            method: Method::default(),
            log_level: default_log_level(),
            strikes: vec![80.0, 90.0, 100.0, 110.0, 120.0],
            greeks: default_greeks(),
            market: MarketConfig {
                spot: 100.0,
                drift: 0.0,
                surface: SurfaceConfig::Skew {
                    level: 0.25,
                    skew: -0.05,
                    steepness: default_steepness(),
                    pivot: 100.0,
                    coordinate: SurfaceCoordinate::Strike,
                },
            },
            option: OptionConfig {
                expiry: 1.0,
                option_type: OptionType::Call,
            },
            pde: PdeConfig::default(),
        }
    }
}

impl SmileConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply environment variable overrides
    pub fn with_env_override(mut self) -> Self {
        if let Ok(method) = std::env::var("SMILE_METHOD") {
            self.method = method.parse().unwrap_or(self.method);
        }

        if let Ok(log_level) = std::env::var("SMILE_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Ok(expiry) = std::env::var("SMILE_EXPIRY") {
            self.option.expiry = expiry.parse().unwrap_or(self.option.expiry);
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        if self.strikes.is_empty() {
            errors.push("strikes cannot be empty".to_string());
        }
        for &strike in &self.strikes {
            if !(strike.is_finite() && strike > 0.0) {
                errors.push(format!("strike {} must be positive and finite", strike));
            }
        }

        if self.greeks.is_empty() {
            errors.push("greeks cannot be empty".to_string());
        }

        if !(self.market.spot.is_finite() && self.market.spot > 0.0) {
            errors.push(format!("market.spot {} must be positive", self.market.spot));
        }

        if !(self.option.expiry.is_finite() && self.option.expiry > 0.0) {
            errors.push(format!("option.expiry {} must be positive", self.option.expiry));
        }

        if let SurfaceConfig::Skew { pivot, .. } = self.market.surface {
            if !(pivot.is_finite() && pivot > 0.0) {
                errors.push(format!("surface pivot {} must be positive", pivot));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from file with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }
}

/// Configuration error type
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// IO error reading config file
    Io(String),
    /// Parse error in config file
    Parse(String),
    /// Validation error
    Validation(Vec<String>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {}", msg),
            Self::Parse(msg) => write!(f, "Parse error: {}", msg),
            Self::Validation(errors) => write!(f, "Validation errors: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        method = "backward"
        strikes = [90.0, 100.0, 110.0]
        greeks = ["Price", "Vega"]

        [market]
        spot = 100.0
        drift = 0.02

        [market.surface]
        kind = "flat"
        sigma = 0.2
        coordinate = "moneyness"

        [option]
        expiry = 0.5
        type = "put"

        [pde]
        space_steps = 150
    "#;

    #[test]
    fn test_default_config_validates() {
        let config = SmileConfig::default();
        assert_eq!(config.method, Method::Forward);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_sample() {
        let config = SmileConfig::parse(SAMPLE).unwrap();
        assert_eq!(config.method, Method::Backward);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.greeks, vec![GreekKind::Price, GreekKind::Vega]);
        assert_eq!(config.option.option_type, OptionType::Put);
        assert_eq!(config.pde.space_steps(), 150);
        assert_eq!(config.pde.time_steps(), PdeConfig::default().time_steps());
        assert_eq!(
            config.market.surface,
            SurfaceConfig::Flat {
                sigma: 0.2,
                coordinate: SurfaceCoordinate::Moneyness
            }
        );
    }

    #[test]
    fn test_parse_rejects_invalid_pde_section() {
        let content = SAMPLE.replace("space_steps = 150", "theta = 2.0");
        match SmileConfig::parse(&content) {
            Err(ConfigError::Parse(msg)) => assert!(msg.contains("theta")),
            _ => panic!("Expected parse error"),
        }
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!("Forward".parse::<Method>().unwrap(), Method::Forward);
        assert_eq!("backward".parse::<Method>().unwrap(), Method::Backward);
        assert!("sideways".parse::<Method>().is_err());
    }

    #[test]
    fn test_env_override() {
        std::env::set_var("SMILE_METHOD", "backward");
        let config = SmileConfig::default().with_env_override();
        assert_eq!(config.method, Method::Backward);
        std::env::remove_var("SMILE_METHOD");
    }

    #[test]
    fn test_build_surfaces() {
        let skew = SmileConfig::default().market.surface.build().unwrap();
        assert_eq!(skew.coordinate(), SurfaceCoordinate::Strike);
        assert!((skew.volatility(1.0, 100.0).unwrap() - 0.25).abs() < 1e-12);
        assert!(skew.volatility(1.0, 80.0).unwrap() > 0.25);

        let grid = SurfaceConfig::Grid {
            times: vec![0.0, 1.0],
            xs: vec![0.5, 1.5],
            vols: vec![vec![0.3, 0.2], vec![0.3, 0.2]],
            coordinate: SurfaceCoordinate::Moneyness,
        };
        let grid = grid.build().unwrap();
        assert!((grid.volatility(0.5, 1.0).unwrap() - 0.25).abs() < 1e-12);

        let flat = SurfaceConfig::Flat {
            sigma: -0.1,
            coordinate: SurfaceCoordinate::Strike,
        };
        assert!(flat.build().is_err());
    }

    #[test]
    fn test_validate_multiple_errors() {
        let mut config = SmileConfig::default();
        config.log_level = "loud".to_string();
        config.strikes = vec![100.0, -5.0];
        config.option.expiry = 0.0;

        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 3);
                assert!(errors.iter().any(|e| e.contains("log_level")));
                assert!(errors.iter().any(|e| e.contains("strike -5")));
                assert!(errors.iter().any(|e| e.contains("expiry")));
            }
            _ => panic!("Expected validation error"),
        }
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::Validation(vec!["Error 1".to_string(), "Error 2".to_string()]);
        let display = format!("{}", error);
        assert!(display.contains("Error 1"));
        assert!(display.contains("Error 2"));
    }
}
