//! Machine configuration with YAML schema and validation.
//!
//! A [`MachineConfig`] is a complete key: rotor selection, reflector,
//! start positions, ring settings, plugboard and case policy. It is checked
//! in two passes:
//! - schema validation via `validator` (field shapes and counts)
//! - semantic validation (value ranges, plugboard pairing rules)

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::engine::alphabet;
use crate::engine::plugboard::{PairPolicy, Plugboard};
use crate::engine::rotor::RotorState;
use crate::engine::wiring::{ReflectorType, RotorType};
use crate::error::{EnigmaError, EnigmaResult};

/// Number of rotor slots in the machine.
pub const ROTOR_COUNT: usize = 3;

/// Handling of characters that are not uppercase `A`-`Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CasePolicy {
    /// Only `A`-`Z` is enciphered. Lowercase passes through like any other
    /// non-alphabet character and does not step the rotors.
    #[default]
    Strict,
    /// ASCII lowercase is uppercased before enciphering; output is uppercase.
    Normalize,
    /// ASCII lowercase is enciphered and emitted as lowercase.
    Preserve,
}

/// Top-level machine configuration.
///
/// Loaded from YAML files with full schema validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct MachineConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Rotor types, left to right.
    #[validate(length(equal = 3))]
    pub rotors: Vec<RotorType>,

    /// Reflector type.
    #[serde(default)]
    pub reflector: ReflectorType,

    /// Start positions (0-25), left to right.
    #[validate(length(equal = 3))]
    #[serde(default = "default_settings")]
    pub positions: Vec<u8>,

    /// Ring settings (0-25), left to right.
    #[validate(length(equal = 3))]
    #[serde(default = "default_settings")]
    pub ring_settings: Vec<u8>,

    /// Plugboard cabling.
    #[validate(nested)]
    #[serde(default)]
    pub plugboard: PlugboardConfig,

    /// Case handling for processed text.
    #[serde(default)]
    pub case_policy: CasePolicy,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

fn default_settings() -> Vec<u8> {
    vec![0; ROTOR_COUNT]
}

/// Plugboard section of the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PlugboardConfig {
    /// Two-letter pair tokens, e.g. `["AB", "CD"]`.
    #[validate(length(max = 13))]
    #[serde(default)]
    pub pairs: Vec<String>,

    /// Rule for reused letters and self pairs.
    #[serde(default)]
    pub policy: PairPolicy,
}

impl MachineConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> EnigmaResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> EnigmaResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> EnigmaResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> MachineConfigBuilder {
        MachineConfigBuilder::default()
    }

    /// Run schema and semantic validation.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn check(&self) -> EnigmaResult<()> {
        self.assemble().map(|_| ())
    }

    /// Validate and build the stateful machine parts in one pass.
    pub(crate) fn assemble(&self) -> EnigmaResult<([RotorState; ROTOR_COUNT], Plugboard)> {
        if self.rotors.len() != ROTOR_COUNT {
            return Err(EnigmaError::RotorCount(self.rotors.len()));
        }
        self.validate()?;
        Ok((self.rotor_states()?, self.build_plugboard()?))
    }

    /// Mount the three configured rotors.
    fn rotor_states(&self) -> EnigmaResult<[RotorState; ROTOR_COUNT]> {
        if self.rotors.len() != ROTOR_COUNT {
            return Err(EnigmaError::RotorCount(self.rotors.len()));
        }
        for (field, len) in [
            ("positions", self.positions.len()),
            ("ring_settings", self.ring_settings.len()),
        ] {
            if len != ROTOR_COUNT {
                return Err(EnigmaError::config(format!(
                    "expected {ROTOR_COUNT} {field}, got {len}"
                )));
            }
        }

        let mount = |slot: usize| {
            RotorState::new(
                slot,
                self.rotors[slot],
                self.positions[slot],
                self.ring_settings[slot],
            )
        };
        Ok([mount(0)?, mount(1)?, mount(2)?])
    }

    /// Build the configured plugboard.
    fn build_plugboard(&self) -> EnigmaResult<Plugboard> {
        Plugboard::from_tokens(&self.plugboard.pairs, self.plugboard.policy)
    }

    /// Rotor positions as window letters, e.g. `"ADU"`.
    #[must_use]
    pub fn window(&self) -> String {
        self.positions.iter().map(|&p| alphabet::letter_at(p)).collect()
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            rotors: vec![RotorType::I, RotorType::II, RotorType::III],
            reflector: ReflectorType::default(),
            positions: default_settings(),
            ring_settings: default_settings(),
            plugboard: PlugboardConfig::default(),
            case_policy: CasePolicy::default(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct MachineConfigBuilder {
    rotors: Option<Vec<RotorType>>,
    reflector: Option<ReflectorType>,
    positions: Option<Vec<u8>>,
    ring_settings: Option<Vec<u8>>,
    pairs: Vec<String>,
    pair_policy: Option<PairPolicy>,
    case_policy: Option<CasePolicy>,
}

/// Letters to indices; anything outside `A`-`Z` becomes an out-of-range value
/// that fails validation when the machine is built.
fn letters_to_indices(letters: &str) -> Vec<u8> {
    letters
        .chars()
        .map(|c| alphabet::index_of(c.to_ascii_uppercase()).unwrap_or(u8::MAX))
        .collect()
}

impl MachineConfigBuilder {
    /// Set the rotor types, left to right.
    #[must_use]
    pub fn rotors(mut self, rotors: [RotorType; ROTOR_COUNT]) -> Self {
        self.rotors = Some(rotors.to_vec());
        self
    }

    /// Set the reflector.
    #[must_use]
    pub fn reflector(mut self, reflector: ReflectorType) -> Self {
        self.reflector = Some(reflector);
        self
    }

    /// Set start positions (0-25), left to right.
    #[must_use]
    pub fn positions(mut self, positions: [u8; ROTOR_COUNT]) -> Self {
        self.positions = Some(positions.to_vec());
        self
    }

    /// Set start positions from window letters, e.g. `"ADU"`.
    #[must_use]
    pub fn window(mut self, letters: &str) -> Self {
        self.positions = Some(letters_to_indices(letters));
        self
    }

    /// Set ring settings (0-25), left to right.
    #[must_use]
    pub fn ring_settings(mut self, rings: [u8; ROTOR_COUNT]) -> Self {
        self.ring_settings = Some(rings.to_vec());
        self
    }

    /// Set ring settings from letters, e.g. `"BBB"`.
    #[must_use]
    pub fn rings(mut self, letters: &str) -> Self {
        self.ring_settings = Some(letters_to_indices(letters));
        self
    }

    /// Add one plug pair, e.g. `"AB"`.
    #[must_use]
    pub fn plug(mut self, pair: &str) -> Self {
        self.pairs.push(pair.to_string());
        self
    }

    /// Add plug pairs in `"AB CD"` notation.
    #[must_use]
    pub fn plugboard(mut self, notation: &str) -> Self {
        self.pairs.extend(
            notation
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|token| !token.is_empty())
                .map(str::to_string),
        );
        self
    }

    /// Set the plugboard pairing policy.
    #[must_use]
    pub fn pair_policy(mut self, policy: PairPolicy) -> Self {
        self.pair_policy = Some(policy);
        self
    }

    /// Set the case policy.
    #[must_use]
    pub fn case_policy(mut self, policy: CasePolicy) -> Self {
        self.case_policy = Some(policy);
        self
    }

    /// Build the configuration.
    ///
    /// Values are not checked here; [`MachineConfig::check`] and machine
    /// construction report any violation.
    #[must_use]
    pub fn build(self) -> MachineConfig {
        let mut config = MachineConfig::default();

        if let Some(rotors) = self.rotors {
            config.rotors = rotors;
        }
        if let Some(reflector) = self.reflector {
            config.reflector = reflector;
        }
        if let Some(positions) = self.positions {
            config.positions = positions;
        }
        if let Some(rings) = self.ring_settings {
            config.ring_settings = rings;
        }
        config.plugboard.pairs = self.pairs;
        if let Some(policy) = self.pair_policy {
            config.plugboard.policy = policy;
        }
        if let Some(policy) = self.case_policy {
            config.case_policy = policy;
        }

        config
    }
}
