//! Finite-difference engine configuration.
//!
//! [`PdeConfig`] gathers every numerical constant of the engine: the theta
//! weight, grid sizes, node bunching, domain size and the bump sizes used by
//! the Greek engine. Construct it with [`PdeConfig::builder`]; unset fields
//! take the defaults below and `build()` rejects invalid values.
//!
//! | field | default |
//! |---|---|
//! | `theta` | 0.5 |
//! | `time_steps` | 100 |
//! | `space_steps` | 100 |
//! | `time_bunching` | 5.0 |
//! | `space_bunching` | 0.05 |
//! | `domain_multiple` | 3.5 |
//! | `forward_shift` | 1e-2 |
//! | `vol_shift` | 1e-4 |

use super::error::ConfigError;

/// Crank-Nicolson weight.
pub const DEFAULT_THETA: f64 = 0.5;
/// Default number of time steps.
pub const DEFAULT_TIME_STEPS: usize = 100;
/// Default number of space steps.
pub const DEFAULT_SPACE_STEPS: usize = 100;
/// Default exponential bunching of the time mesh.
pub const DEFAULT_TIME_BUNCHING: f64 = 5.0;
/// Default hyperbolic bunching of the space mesh.
pub const DEFAULT_SPACE_BUNCHING: f64 = 0.05;
/// Default upper end of the space domain, in units of the forward.
pub const DEFAULT_DOMAIN_MULTIPLE: f64 = 3.5;
/// Default fractional forward bump.
pub const DEFAULT_FORWARD_SHIFT: f64 = 1e-2;
/// Default absolute volatility bump.
pub const DEFAULT_VOL_SHIFT: f64 = 1e-4;

/// Finite-difference engine configuration.
///
/// Immutable once built. Use [`PdeConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::pde::PdeConfig;
///
/// let config = PdeConfig::builder()
///     .space_steps(200)
///     .time_steps(150)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.space_steps(), 200);
/// assert_eq!(config.theta(), 0.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "PdeConfigBuilder"))]
pub struct PdeConfig {
    theta: f64,
    time_steps: usize,
    space_steps: usize,
    time_bunching: f64,
    space_bunching: f64,
    domain_multiple: f64,
    forward_shift: f64,
    vol_shift: f64,
}

impl Default for PdeConfig {
    fn default() -> Self {
        Self {
            theta: DEFAULT_THETA,
            time_steps: DEFAULT_TIME_STEPS,
            space_steps: DEFAULT_SPACE_STEPS,
            time_bunching: DEFAULT_TIME_BUNCHING,
            space_bunching: DEFAULT_SPACE_BUNCHING,
            domain_multiple: DEFAULT_DOMAIN_MULTIPLE,
            forward_shift: DEFAULT_FORWARD_SHIFT,
            vol_shift: DEFAULT_VOL_SHIFT,
        }
    }
}

impl PdeConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> PdeConfigBuilder {
        PdeConfigBuilder::default()
    }

    /// Theta weight of the implicit part (0 explicit, 1 fully implicit).
    #[inline]
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Number of time steps.
    #[inline]
    pub fn time_steps(&self) -> usize {
        self.time_steps
    }

    /// Number of space steps.
    #[inline]
    pub fn space_steps(&self) -> usize {
        self.space_steps
    }

    /// Exponential bunching parameter of the time mesh.
    #[inline]
    pub fn time_bunching(&self) -> f64 {
        self.time_bunching
    }

    /// Hyperbolic bunching parameter of the space mesh.
    #[inline]
    pub fn space_bunching(&self) -> f64 {
        self.space_bunching
    }

    /// Upper end of the space domain in units of the forward.
    #[inline]
    pub fn domain_multiple(&self) -> f64 {
        self.domain_multiple
    }

    /// Fractional forward bump used by delta and gamma.
    #[inline]
    pub fn forward_shift(&self) -> f64 {
        self.forward_shift
    }

    /// Absolute volatility bump used by vega, vanna and vomma.
    #[inline]
    pub fn vol_shift(&self) -> f64 {
        self.vol_shift
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `theta` is outside `[0, 1]`
    /// - `time_steps` or `space_steps` is below 2
    /// - `time_bunching` is not finite
    /// - `space_bunching` is not positive
    /// - `domain_multiple` is not above 1
    /// - `forward_shift` is outside `(0, 1)`
    /// - `vol_shift` is not positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.theta) {
            return Err(invalid("theta", "must be in [0, 1]", self.theta));
        }
        if self.time_steps < 2 {
            return Err(ConfigError::InvalidStepCount {
                name: "time_steps",
                steps: self.time_steps,
            });
        }
        if self.space_steps < 2 {
            return Err(ConfigError::InvalidStepCount {
                name: "space_steps",
                steps: self.space_steps,
            });
        }
        if !self.time_bunching.is_finite() {
            return Err(invalid("time_bunching", "must be finite", self.time_bunching));
        }
        if !(self.space_bunching > 0.0 && self.space_bunching.is_finite()) {
            return Err(invalid(
                "space_bunching",
                "must be positive",
                self.space_bunching,
            ));
        }
        if !(self.domain_multiple > 1.0 && self.domain_multiple.is_finite()) {
            return Err(invalid(
                "domain_multiple",
                "must be greater than 1",
                self.domain_multiple,
            ));
        }
        if !(self.forward_shift > 0.0 && self.forward_shift < 1.0) {
            return Err(invalid(
                "forward_shift",
                "must be in (0, 1)",
                self.forward_shift,
            ));
        }
        if !(self.vol_shift > 0.0 && self.vol_shift.is_finite()) {
            return Err(invalid("vol_shift", "must be positive", self.vol_shift));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, rule: &str, value: f64) -> ConfigError {
    ConfigError::InvalidParameter {
        name,
        value: format!("{}, got {}", rule, value),
    }
}

/// Builder for [`PdeConfig`].
///
/// Every field is optional; unset fields take the engine defaults.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct PdeConfigBuilder {
    theta: Option<f64>,
    time_steps: Option<usize>,
    space_steps: Option<usize>,
    time_bunching: Option<f64>,
    space_bunching: Option<f64>,
    domain_multiple: Option<f64>,
    forward_shift: Option<f64>,
    vol_shift: Option<f64>,
}

impl PdeConfigBuilder {
    /// Sets the theta weight.
    #[inline]
    pub fn theta(mut self, theta: f64) -> Self {
        self.theta = Some(theta);
        self
    }

    /// Sets the number of time steps.
    #[inline]
    pub fn time_steps(mut self, steps: usize) -> Self {
        self.time_steps = Some(steps);
        self
    }

    /// Sets the number of space steps.
    #[inline]
    pub fn space_steps(mut self, steps: usize) -> Self {
        self.space_steps = Some(steps);
        self
    }

    /// Sets the time mesh bunching.
    #[inline]
    pub fn time_bunching(mut self, bunching: f64) -> Self {
        self.time_bunching = Some(bunching);
        self
    }

    /// Sets the space mesh bunching.
    #[inline]
    pub fn space_bunching(mut self, bunching: f64) -> Self {
        self.space_bunching = Some(bunching);
        self
    }

    /// Sets the domain multiple.
    #[inline]
    pub fn domain_multiple(mut self, multiple: f64) -> Self {
        self.domain_multiple = Some(multiple);
        self
    }

    /// Sets the fractional forward bump.
    #[inline]
    pub fn forward_shift(mut self, shift: f64) -> Self {
        self.forward_shift = Some(shift);
        self
    }

    /// Sets the absolute volatility bump.
    #[inline]
    pub fn vol_shift(mut self, shift: f64) -> Self {
        self.vol_shift = Some(shift);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any parameter fails [`PdeConfig::validate`].
    pub fn build(self) -> Result<PdeConfig, ConfigError> {
        let defaults = PdeConfig::default();
        let config = PdeConfig {
            theta: self.theta.unwrap_or(defaults.theta),
            time_steps: self.time_steps.unwrap_or(defaults.time_steps),
            space_steps: self.space_steps.unwrap_or(defaults.space_steps),
            time_bunching: self.time_bunching.unwrap_or(defaults.time_bunching),
            space_bunching: self.space_bunching.unwrap_or(defaults.space_bunching),
            domain_multiple: self.domain_multiple.unwrap_or(defaults.domain_multiple),
            forward_shift: self.forward_shift.unwrap_or(defaults.forward_shift),
            vol_shift: self.vol_shift.unwrap_or(defaults.vol_shift),
        };

        config.validate()?;
        Ok(config)
    }
}

impl TryFrom<PdeConfigBuilder> for PdeConfig {
    type Error = ConfigError;

    fn try_from(builder: PdeConfigBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}
