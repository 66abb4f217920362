//! Film-stock presets.
//!
//! Each preset is three straight tone lines `clamp(round(slope * i + offset))`,
//! one per channel, baked into an [`RgbLut`]. Tables are pure functions of
//! the index, so a preset applied twice to the same image is bit-identical.
//!
//! # Registry
//!
//! [`PresetRegistry::new`] builds every table eagerly and can be owned by the
//! caller. [`PresetRegistry::global`] is a process-wide instance built exactly
//! once on first use and shared read-only afterwards.
//!
//! ```rust
//! use filmgrade_core::Image;
//! use filmgrade_ops::preset::{FilmStock, PresetRegistry};
//!
//! let img = Image::filled(4, 4, &[200, 200, 200]).unwrap();
//! let out = PresetRegistry::global().apply(&img, FilmStock::KodakPortra400).unwrap();
//! assert_eq!(out.pixel(0, 0), &[200, 202, 190]);
//! ```

use crate::OpsResult;
use filmgrade_core::Image;
use filmgrade_lut::{build_channel_lut, RgbLut};
use std::fmt;
use std::sync::OnceLock;
use tracing::debug;

/// One channel's tone line: `out = slope * in + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneLine {
    /// Multiplier on the input byte
    pub slope: f64,
    /// Added after scaling
    pub offset: f64,
}

impl ToneLine {
    const fn new(slope: f64, offset: f64) -> Self {
        Self { slope, offset }
    }

    /// Unclamped curve value at `i`.
    #[inline]
    pub fn eval(&self, i: u8) -> f64 {
        self.slope * i as f64 + self.offset
    }
}

/// The named color-grading presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilmStock {
    /// Kodak Portra 400
    KodakPortra400,
    /// Fujifilm Velvia 50
    FujifilmVelvia50,
    /// Cinestill 800T
    Cinestill800T,
    /// Kodak Ektar 100
    KodakEktar100,
    /// Fujifilm Provia 100F
    FujifilmProvia100F,
    /// Warm shift: red up 20, blue down 20
    CustomWarm,
}

impl FilmStock {
    /// All presets, in registry order.
    pub const ALL: [FilmStock; 6] = [
        FilmStock::KodakPortra400,
        FilmStock::FujifilmVelvia50,
        FilmStock::Cinestill800T,
        FilmStock::KodakEktar100,
        FilmStock::FujifilmProvia100F,
        FilmStock::CustomWarm,
    ];

    /// Human-readable stock name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::KodakPortra400 => "Kodak Portra 400",
            Self::FujifilmVelvia50 => "Fujifilm Velvia 50",
            Self::Cinestill800T => "Cinestill 800T",
            Self::KodakEktar100 => "Kodak Ektar 100",
            Self::FujifilmProvia100F => "Fujifilm Provia 100F",
            Self::CustomWarm => "Custom Warm",
        }
    }

    /// Tone lines for R, G, B.
    pub fn curves(&self) -> [ToneLine; 3] {
        match self {
            Self::KodakPortra400 => [
                ToneLine::new(1.0, 0.0),
                ToneLine::new(0.95, 12.0),
                ToneLine::new(0.85, 20.0),
            ],
            Self::FujifilmVelvia50 => [
                ToneLine::new(0.9, 10.0),
                ToneLine::new(0.85, 20.0),
                ToneLine::new(1.0, 0.0),
            ],
            Self::Cinestill800T => [
                ToneLine::new(0.9, 20.0),
                ToneLine::new(0.85, 15.0),
                ToneLine::new(1.1, -10.0),
            ],
            Self::KodakEktar100 => [
                ToneLine::new(1.1, 0.0),
                ToneLine::new(0.95, 0.0),
                ToneLine::new(0.9, 10.0),
            ],
            Self::FujifilmProvia100F => [
                ToneLine::new(1.05, 0.0),
                ToneLine::new(0.95, 10.0),
                ToneLine::new(1.1, -20.0),
            ],
            Self::CustomWarm => [
                ToneLine::new(1.0, 20.0),
                ToneLine::new(1.0, 0.0),
                ToneLine::new(1.0, -20.0),
            ],
        }
    }

    /// Bakes the tone lines into lookup tables.
    pub fn build_lut(&self) -> RgbLut {
        let [r, g, b] = self.curves();
        debug!(stock = self.display_name(), "Building preset LUT");
        RgbLut::new(
            build_channel_lut(|i| r.eval(i)),
            build_channel_lut(|i| g.eval(i)),
            build_channel_lut(|i| b.eval(i)),
        )
    }

    #[inline]
    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for FilmStock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Immutable set of baked preset tables.
#[derive(Debug, Clone)]
pub struct PresetRegistry {
    luts: [RgbLut; 6],
}

impl PresetRegistry {
    /// Builds every preset table.
    pub fn new() -> Self {
        Self {
            luts: FilmStock::ALL.map(|stock| stock.build_lut()),
        }
    }

    /// Process-wide registry, built exactly once on first access.
    ///
    /// Concurrent first callers block until the single construction finishes,
    /// so no caller ever sees a partially built table.
    pub fn global() -> &'static PresetRegistry {
        static INSTANCE: OnceLock<PresetRegistry> = OnceLock::new();
        INSTANCE.get_or_init(PresetRegistry::new)
    }

    /// Tables for `stock`.
    #[inline]
    pub fn get(&self, stock: FilmStock) -> &RgbLut {
        &self.luts[stock.index()]
    }

    /// Applies `stock` to an RGB image.
    ///
    /// # Errors
    ///
    /// Channel mismatch unless the image has 3 channels.
    pub fn apply(&self, image: &Image, stock: FilmStock) -> OpsResult<Image> {
        Ok(self.get(stock).apply(image)?)
    }
}

impl Default for PresetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies `stock` using the global registry.
pub fn apply_preset(image: &Image, stock: FilmStock) -> OpsResult<Image> {
    PresetRegistry::global().apply(image, stock)
}
