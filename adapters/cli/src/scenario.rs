//! Headless run parameters loaded from TOML and overridden by flags.

use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use shoal_core::GameMode;

/// Fastest cadence the autoclicker accepts.
const MAX_CLICKS_PER_SECOND: f32 = 1_000.0;

/// Parameters of a headless autoclicker session.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Scenario {
    /// Seed of the simulation's random stream.
    pub(crate) seed: u64,
    /// Rule set every game is started in.
    pub(crate) mode: GameMode,
    /// Number of frames to simulate.
    pub(crate) frames: u32,
    /// Simulated duration of each frame.
    pub(crate) frame_millis: u64,
    /// Click cadence of the autoclicker.
    pub(crate) clicks_per_second: f32,
    /// Probability that a click is aimed at a live creature.
    pub(crate) accuracy: f32,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            seed: 0x5ea_f00d,
            mode: GameMode::Classic,
            frames: 3_600,
            frame_millis: 16,
            clicks_per_second: 2.0,
            accuracy: 0.6,
        }
    }
}

/// Flag values that take precedence over the scenario file.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Overrides {
    pub(crate) seed: Option<u64>,
    pub(crate) mode: Option<GameMode>,
    pub(crate) frames: Option<u32>,
    pub(crate) frame_millis: Option<u64>,
    pub(crate) clicks_per_second: Option<f32>,
    pub(crate) accuracy: Option<f32>,
}

impl Scenario {
    /// Reads and validates a scenario file.
    pub(crate) fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario at {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid scenario at {}", path.display()))
    }

    pub(crate) fn from_toml_str(contents: &str) -> Result<Self> {
        let scenario: Self =
            toml::from_str(contents).context("failed to parse scenario toml contents")?;
        scenario.validated()
    }

    /// Applies flag overrides and validates the merged result.
    pub(crate) fn with_overrides(self, overrides: Overrides) -> Result<Self> {
        Self {
            seed: overrides.seed.unwrap_or(self.seed),
            mode: overrides.mode.unwrap_or(self.mode),
            frames: overrides.frames.unwrap_or(self.frames),
            frame_millis: overrides.frame_millis.unwrap_or(self.frame_millis),
            clicks_per_second: overrides
                .clicks_per_second
                .unwrap_or(self.clicks_per_second),
            accuracy: overrides.accuracy.unwrap_or(self.accuracy),
        }
        .validated()
    }

    /// Time between two clicks, or `None` for a player that never clicks.
    pub(crate) fn click_interval(&self) -> Result<Option<Duration>> {
        if self.clicks_per_second == 0.0 {
            return Ok(None);
        }
        let interval = Duration::try_from_secs_f32(self.clicks_per_second.recip())
            .with_context(|| {
                format!(
                    "clicks_per_second {} has no representable click interval",
                    self.clicks_per_second
                )
            })?;
        if interval.is_zero() {
            bail!(
                "clicks_per_second {} rounds to a zero click interval",
                self.clicks_per_second
            );
        }
        Ok(Some(interval))
    }

    fn validated(self) -> Result<Self> {
        if self.frame_millis == 0 {
            bail!("frame_millis must be positive");
        }
        if !(0.0..=MAX_CLICKS_PER_SECOND).contains(&self.clicks_per_second) {
            bail!(
                "clicks_per_second must lie in 0.0..={MAX_CLICKS_PER_SECOND} (received {})",
                self.clicks_per_second
            );
        }
        let _ = self.click_interval()?;
        if !(0.0..=1.0).contains(&self.accuracy) {
            bail!("accuracy must lie in 0.0..=1.0 (received {})", self.accuracy);
        }
        Ok(self)
    }
}
