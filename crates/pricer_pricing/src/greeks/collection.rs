//! Greek results: a whole forward grid, or a single strike.

use std::collections::BTreeMap;

use super::kind::{GreekKind, GreekValue};
#[cfg(feature = "serde")]
use crate::pde::ConfigError;

/// Greeks at the interior nodes of a forward grid.
///
/// Rows are strikes `K_i = m_i·F(T)` in increasing order; each requested
/// [`GreekKind`] has one column of [`GreekValue`]s.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridGreekCollectionData"))]
pub struct GridGreekCollection {
    strikes: Vec<f64>,
    columns: Vec<Option<Vec<GreekValue>>>,
    forward: f64,
    expiry: f64,
    is_call: bool,
}

impl GridGreekCollection {
    /// Empty collection over `strikes`.
    pub(crate) fn new(strikes: Vec<f64>, forward: f64, expiry: f64, is_call: bool) -> Self {
        Self {
            strikes,
            columns: vec![None; GreekKind::ALL.len()],
            forward,
            expiry,
            is_call,
        }
    }

    /// Stores the column of `kind`, replacing any previous one.
    pub(crate) fn insert(&mut self, kind: GreekKind, column: Vec<GreekValue>) {
        debug_assert_eq!(column.len(), self.strikes.len());
        self.columns[kind.index()] = Some(column);
    }

    /// Strikes of the rows.
    #[inline]
    pub fn strikes(&self) -> &[f64] {
        &self.strikes
    }

    /// Column of `kind`, if it was computed.
    #[inline]
    pub fn column(&self, kind: GreekKind) -> Option<&[GreekValue]> {
        self.columns.get(kind.index()).and_then(|c| c.as_deref())
    }

    /// Value of `kind` at row `i`.
    #[inline]
    pub fn get(&self, kind: GreekKind, i: usize) -> Option<&GreekValue> {
        self.column(kind).and_then(|c| c.get(i))
    }

    /// Kinds with a column, in [`GreekKind::ALL`] order.
    pub fn kinds(&self) -> Vec<GreekKind> {
        GreekKind::ALL
            .into_iter()
            .filter(|k| self.column(*k).is_some())
            .collect()
    }

    /// Forward `F(T)`.
    #[inline]
    pub fn forward(&self) -> f64 {
        self.forward
    }

    /// Expiry.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// True for calls.
    #[inline]
    pub fn is_call(&self) -> bool {
        self.is_call
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.strikes.len()
    }

    /// True without rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strikes.is_empty()
    }

    /// `(lowest strike, highest strike)`, or `None` without rows.
    pub fn strike_range(&self) -> Option<(f64, f64)> {
        Some((*self.strikes.first()?, *self.strikes.last()?))
    }
}

/// Unchecked shape of a [`GridGreekCollection`].
#[cfg(feature = "serde")]
#[derive(Clone, Debug, serde::Deserialize)]
pub struct GridGreekCollectionData {
    strikes: Vec<f64>,
    columns: Vec<Option<Vec<GreekValue>>>,
    forward: f64,
    expiry: f64,
    is_call: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<GridGreekCollectionData> for GridGreekCollection {
    type Error = ConfigError;

    /// One slot per [`GreekKind`] and one row per strike in every column.
    fn try_from(data: GridGreekCollectionData) -> Result<Self, Self::Error> {
        if data.columns.len() != GreekKind::ALL.len() {
            return Err(ConfigError::InvalidParameter {
                name: "columns",
                value: format!(
                    "{} column slots, expected {}",
                    data.columns.len(),
                    GreekKind::ALL.len()
                ),
            });
        }
        for (kind, column) in GreekKind::ALL.into_iter().zip(&data.columns) {
            if let Some(column) = column {
                if column.len() != data.strikes.len() {
                    return Err(ConfigError::InvalidParameter {
                        name: "columns",
                        value: format!(
                            "{} has {} rows for {} strikes",
                            kind.name(),
                            column.len(),
                            data.strikes.len()
                        ),
                    });
                }
            }
        }

        Ok(Self {
            strikes: data.strikes,
            columns: data.columns,
            forward: data.forward,
            expiry: data.expiry,
            is_call: data.is_call,
        })
    }
}

/// Greeks of a single option, as produced by backward solves.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointGreeks {
    strike: f64,
    values: BTreeMap<GreekKind, GreekValue>,
}

impl PointGreeks {
    pub(crate) fn new(strike: f64) -> Self {
        Self {
            strike,
            values: BTreeMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, kind: GreekKind, value: GreekValue) {
        self.values.insert(kind, value);
    }

    /// Strike of the option.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Value of `kind`, if it was requested.
    #[inline]
    pub fn get(&self, kind: GreekKind) -> Option<&GreekValue> {
        self.values.get(&kind)
    }

    /// Requested kinds and their values, in [`GreekKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (GreekKind, &GreekValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }
}
