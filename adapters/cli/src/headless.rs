//! Windowless backend driven by a simulated player.

use std::time::Duration;

use anyhow::Result;
use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use shoal_core::{Bounds, GameMode, PlayMode};
use shoal_rendering::{RawInput, RenderingBackend, Scene};

/// Simulated player that clicks at a fixed cadence.
///
/// Aimed clicks target the centre of a random live sprite; the rest land on
/// a uniformly random point of the play area. While the menu is showing the
/// player immediately starts a new game.
#[derive(Debug)]
pub(crate) struct Autoclicker {
    mode: GameMode,
    bounds: Bounds,
    click_interval: Option<Duration>,
    accuracy: f64,
    since_click: Duration,
    rng: ChaCha8Rng,
}

impl Autoclicker {
    pub(crate) fn new(
        mode: GameMode,
        bounds: Bounds,
        click_interval: Option<Duration>,
        accuracy: f32,
        rng: ChaCha8Rng,
    ) -> Self {
        Self {
            mode,
            bounds,
            click_interval,
            accuracy: f64::from(accuracy),
            since_click: Duration::ZERO,
            rng,
        }
    }

    /// Input the player produces during a frame of length `dt`.
    pub(crate) fn poll(&mut self, dt: Duration, scene: &Scene, out: &mut Vec<RawInput>) {
        if scene.hud.play_mode == PlayMode::Menu {
            self.since_click = Duration::ZERO;
            out.push(RawInput::Start(self.mode));
            return;
        }

        let Some(interval) = self.click_interval else {
            return;
        };
        self.since_click += dt;
        while self.since_click >= interval {
            self.since_click -= interval;
            let position = self.aim(scene);
            out.push(RawInput::Press { position });
        }
    }

    fn aim(&mut self, scene: &Scene) -> Vec2 {
        let live = &scene.sprites[..scene.hud.population.min(scene.sprites.len())];
        if !live.is_empty() && self.rng.gen_bool(self.accuracy) {
            let target = live[self.rng.gen_range(0..live.len())];
            return target.center();
        }
        Vec2::new(
            self.rng.gen_range(0.0..self.bounds.width() as f32),
            self.rng.gen_range(0.0..self.bounds.height() as f32),
        )
    }
}

/// Backend that runs a fixed number of frames without presenting them.
#[derive(Debug)]
pub(crate) struct HeadlessBackend {
    frames: u32,
    frame: Duration,
    player: Autoclicker,
}

impl HeadlessBackend {
    pub(crate) fn new(frames: u32, frame: Duration, player: Autoclicker) -> Self {
        Self {
            frames,
            frame,
            player,
        }
    }
}

impl RenderingBackend for HeadlessBackend {
    fn run<F>(mut self, mut scene: Scene, mut update_scene: F) -> Result<Scene>
    where
        F: FnMut(Duration, &[RawInput], &mut Scene) -> bool,
    {
        let mut inputs = Vec::new();
        for _ in 0..self.frames {
            inputs.clear();
            self.player.poll(self.frame, &scene, &mut inputs);
            if !update_scene(self.frame, &inputs, &mut scene) {
                break;
            }
        }
        Ok(scene)
    }
}
