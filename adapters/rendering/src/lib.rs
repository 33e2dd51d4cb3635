#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation contracts for Shoal adapters.
//!
//! Adapters translate raw pointer and keyboard input into world commands with
//! [`InputBridge`], and mirror world events onto their visuals through
//! [`Presenter`], which drives one [`AppearanceBinding`] per population slot.

use anyhow::Result as AnyResult;
use glam::Vec2;
use log::trace;
use shoal_core::{AppearanceBinding, Command, Creature, Event, GameMode, PlayMode, Slot, Tint};
use std::time::Duration;
use thiserror::Error;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self::new(
            f32::from(red) / 255.0,
            f32::from(green) / 255.0,
            f32::from(blue) / 255.0,
            1.0,
        )
    }
}

impl From<Tint> for Color {
    fn from(tint: Tint) -> Self {
        Self::from_rgb_u8(tint.red(), tint.green(), tint.blue())
    }
}

/// Raw input gathered by an adapter before it is translated into commands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RawInput {
    /// Primary pointer button pressed at the provided position in simulation pixels.
    Press {
        /// Pointer location when the button went down.
        position: Vec2,
    },
    /// The escape key was released.
    Escape,
    /// A menu entry starting a game was confirmed.
    Start(GameMode),
}

/// Translates raw input into world commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputBridge;

impl InputBridge {
    /// Creates a new input bridge.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Appends the commands the input maps to.
    ///
    /// A press hits every creature whose box strictly contains the pointer,
    /// in slot order, and then spends a single click.
    pub fn translate(&self, input: RawInput, creatures: &[Creature], out: &mut Vec<Command>) {
        match input {
            RawInput::Press { position } => {
                for (index, creature) in creatures.iter().enumerate() {
                    if creature.contains(position.x, position.y) {
                        out.push(Command::HitCreature {
                            slot: Slot::new(index as u32),
                        });
                    }
                }
                out.push(Command::Click);
            }
            RawInput::Escape => out.push(Command::ReturnToMenu),
            RawInput::Start(mode) => out.push(Command::StartGame { mode }),
        }
    }
}

/// Errors raised while mirroring world events onto visuals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RenderingError {
    /// An event addressed a slot that has no binding.
    #[error("no appearance binding for slot {slot}")]
    MissingBinding {
        /// Slot index the event addressed.
        slot: u32,
    },
}

/// Routes world events to per-slot appearance bindings.
#[derive(Clone, Copy, Debug, Default)]
pub struct Presenter;

impl Presenter {
    /// Creates a new presenter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Pushes a full snapshot of the creatures onto their bindings.
    pub fn bind_all<B: AppearanceBinding>(
        &self,
        creatures: &[Creature],
        bindings: &mut [B],
    ) -> Result<(), RenderingError> {
        for (index, creature) in creatures.iter().enumerate() {
            bind(creature, binding_for(bindings, Slot::new(index as u32))?);
        }
        Ok(())
    }

    /// Applies spawn, motion and flip events to the bindings they address.
    pub fn present<B: AppearanceBinding>(
        &self,
        events: &[Event],
        bindings: &mut [B],
    ) -> Result<(), RenderingError> {
        for event in events {
            match event {
                Event::CreatureSpawned { slot, creature, .. } => {
                    bind(creature, binding_for(bindings, *slot)?);
                }
                Event::CreatureMoved { slot, position } => {
                    binding_for(bindings, *slot)?.set_position(position.x, position.y);
                }
                Event::CreatureFlipped { slot, flipped } => {
                    trace!("slot {} flipped to {flipped}", slot.get());
                    binding_for(bindings, *slot)?.set_horizontal_flip(*flipped);
                }
                _ => {}
            }
        }
        Ok(())
    }
}

fn binding_for<B>(bindings: &mut [B], slot: Slot) -> Result<&mut B, RenderingError> {
    bindings
        .get_mut(slot.index())
        .ok_or(RenderingError::MissingBinding { slot: slot.get() })
}

fn bind<B: AppearanceBinding>(creature: &Creature, binding: &mut B) {
    let size = creature.size as f32;
    binding.set_size(size, size);
    binding.set_position(creature.position.x, creature.position.y);
    binding.set_tint(creature.tint);
    binding.set_horizontal_flip(creature.horizontally_flipped());
}

/// In-memory visual that records everything a binding was told.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteRecord {
    /// Rendered width and height.
    pub size: Vec2,
    /// Top-left corner in simulation pixels.
    pub position: Vec2,
    /// Multiplicative tint.
    pub color: Color,
    /// Whether the texture is mirrored horizontally.
    pub flipped: bool,
}

impl SpriteRecord {
    /// Centre of the sprite.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }
}

impl Default for SpriteRecord {
    fn default() -> Self {
        Self {
            size: Vec2::ZERO,
            position: Vec2::ZERO,
            color: Color::from(Tint::WHITE),
            flipped: false,
        }
    }
}

impl AppearanceBinding for SpriteRecord {
    fn set_size(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    fn set_position(&mut self, x: f32, y: f32) {
        self.position = Vec2::new(x, y);
    }

    fn set_tint(&mut self, tint: Tint) {
        self.color = Color::from(tint);
    }

    fn set_horizontal_flip(&mut self, flipped: bool) {
        self.flipped = flipped;
    }
}

/// Heads-up figures mirrored from world events.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hud {
    /// Whether the menu or a game is showing.
    pub play_mode: PlayMode,
    /// Latest reported score.
    pub score: u32,
    /// Latest reported difficulty level.
    pub level: u32,
    /// Latest reported life.
    pub life: f32,
    /// Number of leading slots holding a live creature.
    pub population: usize,
}

impl Hud {
    /// Updates the figures from the events they mirror.
    pub fn observe(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::PlayModeChanged { mode } => {
                    self.play_mode = *mode;
                    if *mode == PlayMode::Menu {
                        self.level = 0;
                        self.life = 0.0;
                        self.population = 0;
                    }
                }
                Event::CreatureSpawned { slot, .. } => {
                    self.population = self.population.max(slot.index() + 1);
                }
                Event::ScoreChanged { score } => self.score = *score,
                Event::DifficultyRaised { level } => self.level = *level,
                Event::LifeChanged { life } => self.life = *life,
                _ => {}
            }
        }
    }

    /// Fraction of the life bar that remains visible, in `0.0..=1.0`.
    #[must_use]
    pub fn life_fraction(&self, life_max: f32) -> f32 {
        if life_max <= 0.0 {
            return 0.0;
        }
        (self.life / life_max).clamp(0.0, 1.0)
    }
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            play_mode: PlayMode::Menu,
            score: 0,
            level: 0,
            life: 0.0,
            population: 0,
        }
    }
}

/// Everything a backend needs to draw a frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// One visual per population slot.
    pub sprites: Vec<SpriteRecord>,
    /// Heads-up figures.
    pub hud: Hud,
}

impl Scene {
    /// Creates a scene with one default sprite per slot.
    #[must_use]
    pub fn with_slots(slots: usize) -> Self {
        Self {
            sprites: vec![SpriteRecord::default(); slots],
            hud: Hud::default(),
        }
    }
}

/// Backend that drives frames and presents scenes.
pub trait RenderingBackend {
    /// Runs the backend until it is requested to exit.
    ///
    /// The closure receives the frame delta, the raw input captured during the
    /// frame, and the scene to update before it is presented. Returning
    /// `false` stops the loop.
    fn run<F>(self, scene: Scene, update_scene: F) -> AnyResult<Scene>
    where
        F: FnMut(Duration, &[RawInput], &mut Scene) -> bool;
}
