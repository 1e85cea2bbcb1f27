//! Frozen configuration: the versioned, checksummed threshold set
//!
//! The thresholds in the crate root are axioms, not tuning knobs. At
//! startup the value is sealed with a SHA-256 checksum of its canonical
//! byte form; every turn re-verifies the seal before deciding. A mismatch
//! means configuration drift: the turn still completes, but damped to
//! CENTER and carrying a CRITICAL alert. Never a crash.

use sha2::{Digest, Sha256};
use tracing::error;

use crate::types::{CoreError, CoreResult};
use crate::{
    ANCHOR_LEN, ANCHOR_MIN_HITS, AXIS_BUILD_TURNS, AXIS_WARMUP_TURNS, CENTER_ENTRY_COUNT,
    CONFIDENCE_FLOOR, ENERGY_SKEW_CLAUSE, ENERGY_SKEW_WELL, FROZEN_VERSION, INERTIA_CARRY_MIN,
    INERTIA_SILENT_MIN, LOOP_FORCE_COUNT, MAX_CARRIED_CANDIDATES, MAX_LISTED_CANDIDATES,
    READING_CLIP_CHARS,
};

/// Byte width of the version field in the canonical form
const VERSION_FIELD_LEN: usize = 8;

/// The frozen threshold set as a plain value
#[derive(Debug, Clone, PartialEq)]
pub struct FrozenConfig {
    pub version: String,
    pub axis_warmup_turns: u32,
    pub axis_build_turns: u32,
    pub loop_force_count: u32,
    pub center_entry_count: u32,
    pub anchor_len: u32,
    pub anchor_min_hits: u32,
    pub max_listed_candidates: u32,
    pub max_carried_candidates: u32,
    pub reading_clip_chars: u32,
    pub inertia_silent_min: f64,
    pub inertia_carry_min: f64,
    pub confidence_floor: f64,
    pub energy_skew_well: f64,
    pub energy_skew_clause: f64,
}

impl FrozenConfig {
    /// The frozen value as compiled into this build
    pub fn current() -> Self {
        Self {
            version: FROZEN_VERSION.to_string(),
            axis_warmup_turns: AXIS_WARMUP_TURNS,
            axis_build_turns: AXIS_BUILD_TURNS,
            loop_force_count: LOOP_FORCE_COUNT,
            center_entry_count: CENTER_ENTRY_COUNT,
            anchor_len: ANCHOR_LEN as u32,
            anchor_min_hits: ANCHOR_MIN_HITS as u32,
            max_listed_candidates: MAX_LISTED_CANDIDATES as u32,
            max_carried_candidates: MAX_CARRIED_CANDIDATES as u32,
            reading_clip_chars: READING_CLIP_CHARS as u32,
            inertia_silent_min: INERTIA_SILENT_MIN,
            inertia_carry_min: INERTIA_CARRY_MIN,
            confidence_floor: CONFIDENCE_FLOOR,
            energy_skew_well: ENERGY_SKEW_WELL,
            energy_skew_clause: ENERGY_SKEW_CLAUSE,
        }
    }

    /// Canonical fixed-width byte form.
    ///
    /// Layout: version(8, zero-padded ASCII) + counts(9*4, big-endian u32)
    /// + thresholds(5*8, big-endian f64) = 84
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut version_field = [0u8; VERSION_FIELD_LEN];
        for (i, byte) in self.version.bytes().take(VERSION_FIELD_LEN).enumerate() {
            version_field[i] = byte;
        }

        let counts = [
            self.axis_warmup_turns,
            self.axis_build_turns,
            self.loop_force_count,
            self.center_entry_count,
            self.anchor_len,
            self.anchor_min_hits,
            self.max_listed_candidates,
            self.max_carried_candidates,
            self.reading_clip_chars,
        ];
        let thresholds = [
            self.inertia_silent_min,
            self.inertia_carry_min,
            self.confidence_floor,
            self.energy_skew_well,
            self.energy_skew_clause,
        ];

        let mut bytes = Vec::with_capacity(VERSION_FIELD_LEN + counts.len() * 4 + thresholds.len() * 8);
        bytes.extend_from_slice(&version_field);
        for count in counts {
            bytes.extend_from_slice(&count.to_be_bytes());
        }
        for threshold in thresholds {
            bytes.extend_from_slice(&threshold.to_be_bytes());
        }
        bytes
    }

    /// SHA-256 over the canonical form, hex encoded
    pub fn checksum(&self) -> String {
        sha256_hex(&self.to_bytes())
    }
}

/// Frozen value plus the checksum recorded when it was sealed
#[derive(Debug, Clone)]
pub struct SealedConfig {
    config: FrozenConfig,
    checksum: String,
}

impl SealedConfig {
    /// Seal the compiled-in frozen value; done once at startup
    pub fn seal() -> Self {
        let config = FrozenConfig::current();
        let checksum = config.checksum();
        Self { config, checksum }
    }

    /// Recreate a seal from persisted parts; `verify` decides trust
    pub fn from_parts(config: FrozenConfig, checksum: impl Into<String>) -> Self {
        Self {
            config,
            checksum: checksum.into(),
        }
    }

    /// The sealed value
    pub fn config(&self) -> &FrozenConfig {
        &self.config
    }

    /// The checksum recorded at seal time (hex)
    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    /// Recompute the checksum and compare against the seal.
    ///
    /// A mismatch is configuration drift and must never silently
    /// continue; the caller routes it into CENTER damping.
    pub fn verify(&self) -> CoreResult<()> {
        let computed = self.config.checksum();
        if computed != self.checksum {
            error!(
                expected = self.checksum.as_str(),
                computed = computed.as_str(),
                "CRITICAL: frozen config checksum mismatch"
            );
            return Err(CoreError::IntegrityViolation {
                expected: self.checksum.clone(),
                computed,
            });
        }
        Ok(())
    }
}

impl Default for SealedConfig {
    fn default() -> Self {
        Self::seal()
    }
}

/// SHA-256 helper, hex encoded
fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().iter().map(|b| format!("{:02x}", b)).collect()
}

// =============================================================================
// TESTS
// =============================================================================
