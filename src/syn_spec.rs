//! SynSpec - Per-connection synapse properties.
//!
//! A [`SynSpec`] carries the synapse type, receptor port, weight and delay
//! applied to each generated connection. Weight and delay are each either a
//! single scalar shared by every connection ([`ParamMode::Scalar`]) or a
//! borrowed per-connection array ([`ParamMode::Distribution`]).
//!
//! # Parameter names
//!
//! | Name | Kind | Effect |
//! |---|---|---|
//! | `synapse_type` | int | `0` = `standard_synapse`, `1` = `stdp` |
//! | `receptor` | int | post-synaptic receptor port, `0..=255` |
//! | `weight`, `delay` | float | sets the scalar and switches to scalar mode |
//! | `weight_array`, `delay_array` | array | borrows the array and switches to distribution mode |
//!
//! Reading `weight`/`delay` always returns the stored scalar, even in
//! distribution mode. Check [`SynSpec::weight_mode`] first.
//!
//! # Examples
//!
//! ```
//! use connspec::{ParamMode, SynSpec, SynapseType};
//!
//! let weights = vec![0.1f32, 0.2, 0.3];
//! let mut syn = SynSpec::with_type(SynapseType::Stdp, 0.5, 1.2, 2);
//!
//! syn.set_array_param("weight_array", &weights).unwrap();
//! assert_eq!(syn.weight_mode(), ParamMode::Distribution);
//! // The scalar survives and is still readable
//! assert_eq!(syn.get_float_param("weight").unwrap(), 0.5);
//!
//! syn.set_float_param("weight", 0.7).unwrap();
//! assert_eq!(syn.weight_mode(), ParamMode::Scalar);
//! ```

use crate::params::{ParamKind, ParamTable, ParamValue};
use crate::{ConnSpecError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of synapse types.
pub const N_SYNAPSE_TYPE: usize = 2;

/// Synapse type names, indexed by `SynapseType as usize`.
pub const SYNAPSE_TYPE_NAMES: [&str; N_SYNAPSE_TYPE] = ["standard_synapse", "stdp"];

/// Synapse model attached to generated connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SynapseType {
    /// Static synapse
    #[default]
    #[serde(rename = "standard_synapse")]
    Standard = 0,
    /// Spike-timing-dependent plasticity
    #[serde(rename = "stdp")]
    Stdp = 1,
}

impl SynapseType {
    /// All synapse types in discriminant order.
    pub const ALL: [SynapseType; N_SYNAPSE_TYPE] = [SynapseType::Standard, SynapseType::Stdp];

    /// Canonical name from [`SYNAPSE_TYPE_NAMES`].
    #[inline]
    pub fn name(self) -> &'static str {
        SYNAPSE_TYPE_NAMES[self as usize]
    }

    /// Look up a synapse type by its canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        SYNAPSE_TYPE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| Self::ALL[i])
    }
}

impl TryFrom<i64> for SynapseType {
    type Error = ConnSpecError;

    fn try_from(value: i64) -> Result<Self> {
        usize::try_from(value)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| {
                ConnSpecError::InvalidArgument(format!(
                    "synapse type {} outside [0, {})",
                    value, N_SYNAPSE_TYPE
                ))
            })
    }
}

impl FromStr for SynapseType {
    type Err = ConnSpecError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
            .ok_or_else(|| ConnSpecError::InvalidArgument(format!("unknown synapse type '{}'", s)))
    }
}

impl fmt::Display for SynapseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a weight or delay is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamMode {
    /// One value for every connection
    #[default]
    Scalar,
    /// One value per connection, from a borrowed array
    Distribution,
}

/// Resolved source of weight or delay values, as read by the generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ValueSource<'a> {
    Scalar(f32),
    Distribution(&'a [f32]),
}

impl ValueSource<'_> {
    /// Value for connection `i`. Callers check the array length up front.
    #[inline]
    pub(crate) fn at(&self, i: usize) -> f32 {
        match self {
            ValueSource::Scalar(v) => *v,
            ValueSource::Distribution(values) => values[i],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SynParam {
    SynapseType,
    Receptor,
    Weight,
    Delay,
    WeightArray,
    DelayArray,
}

static SYN_PARAMS: ParamTable<SynParam> = ParamTable::new(
    "synapse spec",
    &[
        ("synapse_type", ParamKind::Int, SynParam::SynapseType),
        ("receptor", ParamKind::Int, SynParam::Receptor),
        ("weight", ParamKind::Float, SynParam::Weight),
        ("delay", ParamKind::Float, SynParam::Delay),
        ("weight_array", ParamKind::Array, SynParam::WeightArray),
        ("delay_array", ParamKind::Array, SynParam::DelayArray),
    ],
);

fn finite(name: &str, value: f32) -> Result<f32> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConnSpecError::InvalidArgument(format!(
            "{} must be finite, got {}",
            name, value
        )))
    }
}

fn non_empty<'a>(name: &str, values: &'a [f32]) -> Result<&'a [f32]> {
    if values.is_empty() {
        return Err(ConnSpecError::InvalidArgument(format!(
            "{} must not be empty",
            name
        )));
    }
    Ok(values)
}

fn receptor_port(value: i64) -> Result<u8> {
    u8::try_from(value).map_err(|_| {
        ConnSpecError::InvalidArgument(format!("receptor {} outside [0, {}]", value, u8::MAX))
    })
}

/// Synapse type, receptor, weight and delay for generated connections.
///
/// Arrays set in distribution mode are borrowed for `'a` and never copied;
/// the spec cannot outlive them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SynSpec<'a> {
    synapse_type: SynapseType,
    receptor: u8,
    weight_mode: ParamMode,
    weight_array: Option<&'a [f32]>,
    weight: f32,
    delay_mode: ParamMode,
    delay_array: Option<&'a [f32]>,
    delay: f32,
}

impl<'a> SynSpec<'a> {
    /// Create the default spec: standard synapse, receptor 0, scalar weight
    /// and delay of 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a standard synapse with scalar `weight` and `delay`.
    ///
    /// # Panics
    ///
    /// Panics if `weight` or `delay` is not finite. Use
    /// [`init_weight_delay`](Self::init_weight_delay) for a fallible version.
    pub fn with_weight_delay(weight: f32, delay: f32) -> Self {
        assert!(weight.is_finite(), "weight must be finite");
        assert!(delay.is_finite(), "delay must be finite");
        Self {
            weight,
            delay,
            ..Self::default()
        }
    }

    /// Create a spec with every scalar field given explicitly.
    ///
    /// # Panics
    ///
    /// Panics if `weight` or `delay` is not finite.
    pub fn with_type(synapse_type: SynapseType, weight: f32, delay: f32, receptor: u8) -> Self {
        Self {
            synapse_type,
            receptor,
            ..Self::with_weight_delay(weight, delay)
        }
    }

    /// Reset to the default spec, dropping any borrowed arrays.
    pub fn init(&mut self) {
        *self = Self::default();
    }

    /// Reset to a standard synapse with scalar `weight` and `delay`.
    pub fn init_weight_delay(&mut self, weight: f32, delay: f32) -> Result<()> {
        let weight = SYN_PARAMS.report("weight", finite("weight", weight))?;
        let delay = SYN_PARAMS.report("delay", finite("delay", delay))?;
        *self = Self {
            weight,
            delay,
            ..Self::default()
        };
        Ok(())
    }

    /// Reset from raw integer codes, as accepted by the named-parameter
    /// interface. Both weight and delay end up in scalar mode.
    pub fn init_with_type(
        &mut self,
        synapse_type: i64,
        weight: f32,
        delay: f32,
        receptor: i64,
    ) -> Result<()> {
        let mut spec = Self::default();
        SYN_PARAMS.report("synapse_type", spec.apply(SynParam::SynapseType, synapse_type.into()))?;
        SYN_PARAMS.report("receptor", spec.apply(SynParam::Receptor, receptor.into()))?;
        SYN_PARAMS.report("weight", spec.apply(SynParam::Weight, weight.into()))?;
        SYN_PARAMS.report("delay", spec.apply(SynParam::Delay, delay.into()))?;
        *self = spec;
        Ok(())
    }

    /// Set `synapse_type` or `receptor`.
    pub fn set_int_param(&mut self, name: &str, value: i64) -> Result<()> {
        self.set_param(name, ParamValue::Int(value))
    }

    /// Set the `weight` or `delay` scalar and switch that value to scalar mode.
    pub fn set_float_param(&mut self, name: &str, value: f32) -> Result<()> {
        self.set_param(name, ParamValue::Float(value))
    }

    /// Borrow `weight_array` or `delay_array` and switch that value to
    /// distribution mode. An empty array is rejected.
    pub fn set_array_param(&mut self, name: &str, values: &'a [f32]) -> Result<()> {
        self.set_param(name, ParamValue::Array(values))
    }

    /// Set any parameter. The value's tag selects which names are accepted.
    pub fn set_param(&mut self, name: &str, value: ParamValue<'a>) -> Result<()> {
        let applied = SYN_PARAMS
            .lookup(name, value.kind())
            .and_then(|slot| self.apply(slot, value));
        SYN_PARAMS.report(name, applied)?;
        tracing::trace!(name, kind = ?value.kind(), "synapse spec parameter set");
        Ok(())
    }

    fn apply(&mut self, slot: SynParam, value: ParamValue<'a>) -> Result<()> {
        match (slot, value) {
            (SynParam::SynapseType, ParamValue::Int(v)) => {
                self.synapse_type = SynapseType::try_from(v)?
            }
            (SynParam::Receptor, ParamValue::Int(v)) => self.receptor = receptor_port(v)?,
            (SynParam::Weight, ParamValue::Float(v)) => {
                self.weight = finite("weight", v)?;
                self.weight_mode = ParamMode::Scalar;
            }
            (SynParam::Delay, ParamValue::Float(v)) => {
                self.delay = finite("delay", v)?;
                self.delay_mode = ParamMode::Scalar;
            }
            (SynParam::WeightArray, ParamValue::Array(values)) => {
                self.weight_array = Some(non_empty("weight_array", values)?);
                self.weight_mode = ParamMode::Distribution;
            }
            (SynParam::DelayArray, ParamValue::Array(values)) => {
                self.delay_array = Some(non_empty("delay_array", values)?);
                self.delay_mode = ParamMode::Distribution;
            }
            (slot, value) => {
                return Err(ConnSpecError::InvalidArgument(format!(
                    "{:?} does not take a {:?} value",
                    slot,
                    value.kind()
                )))
            }
        }
        Ok(())
    }

    /// Current value in `slot`. `None` for an array that was never set.
    fn read(&self, slot: SynParam) -> Option<ParamValue<'a>> {
        match slot {
            SynParam::SynapseType => Some(ParamValue::Int(self.synapse_type as i64)),
            SynParam::Receptor => Some(ParamValue::Int(i64::from(self.receptor))),
            SynParam::Weight => Some(ParamValue::Float(self.weight)),
            SynParam::Delay => Some(ParamValue::Float(self.delay)),
            SynParam::WeightArray => self.weight_array.map(ParamValue::Array),
            SynParam::DelayArray => self.delay_array.map(ParamValue::Array),
        }
    }

    /// Read `synapse_type` or `receptor`.
    pub fn get_int_param(&self, name: &str) -> Result<i64> {
        let value = SYN_PARAMS
            .lookup(name, ParamKind::Int)
            .map(|slot| self.read(slot).and_then(|v| v.as_int()).unwrap_or_default());
        SYN_PARAMS.report(name, value)
    }

    /// Read the `weight` or `delay` scalar.
    ///
    /// Returns the stored scalar in either mode; in distribution mode that is
    /// the last scalar set (or the default), not an array value.
    pub fn get_float_param(&self, name: &str) -> Result<f32> {
        let value = SYN_PARAMS
            .lookup(name, ParamKind::Float)
            .map(|slot| self.read(slot).and_then(|v| v.as_float()).unwrap_or_default());
        SYN_PARAMS.report(name, value)
    }

    /// Read `weight_array` or `delay_array`, `None` if never set.
    ///
    /// A borrowed array stays readable after a later scalar set switches the
    /// mode back; only [`init`](Self::init) forgets it.
    pub fn get_array_param(&self, name: &str) -> Result<Option<&'a [f32]>> {
        let value = SYN_PARAMS
            .lookup(name, ParamKind::Array)
            .map(|slot| self.read(slot).and_then(|v| v.as_array()));
        SYN_PARAMS.report(name, value)
    }

    /// Read any parameter as a tagged value.
    ///
    /// Fails with `InvalidArgument` when an array parameter has never been set.
    pub fn get_param(&self, name: &str) -> Result<ParamValue<'a>> {
        let value = SYN_PARAMS.lookup_any(name).and_then(|(_, slot)| {
            self.read(slot)
                .ok_or_else(|| ConnSpecError::InvalidArgument(format!("{} is not set", name)))
        });
        SYN_PARAMS.report(name, value)
    }

    /// Synapse type.
    #[inline]
    pub fn synapse_type(&self) -> SynapseType {
        self.synapse_type
    }

    /// Receptor port.
    #[inline]
    pub fn receptor(&self) -> u8 {
        self.receptor
    }

    /// How the weight is supplied.
    #[inline]
    pub fn weight_mode(&self) -> ParamMode {
        self.weight_mode
    }

    /// How the delay is supplied.
    #[inline]
    pub fn delay_mode(&self) -> ParamMode {
        self.delay_mode
    }

    pub(crate) fn weight_source(&self) -> ValueSource<'a> {
        match (self.weight_mode, self.weight_array) {
            (ParamMode::Distribution, Some(values)) => ValueSource::Distribution(values),
            _ => ValueSource::Scalar(self.weight),
        }
    }

    pub(crate) fn delay_source(&self) -> ValueSource<'a> {
        match (self.delay_mode, self.delay_array) {
            (ParamMode::Distribution, Some(values)) => ValueSource::Distribution(values),
            _ => ValueSource::Scalar(self.delay),
        }
    }
}
