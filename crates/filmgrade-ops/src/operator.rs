//! Named-operator dispatch.
//!
//! The engine exposes a closed set of operators. Callers pick one by
//! [`Operator`] value or by name; anything outside the set is rejected with
//! [`OpsError::UnsupportedOperator`] rather than passed through.
//!
//! ```rust
//! use filmgrade_core::Image;
//! use filmgrade_ops::{apply_named, Operator, OpsError};
//!
//! let img = Image::filled(8, 8, &[10, 20, 30]).unwrap();
//! let gray = apply_named("Grayscale", &img, None).unwrap();
//! assert_eq!(gray.channels(), 1);
//!
//! let err = apply_named("Solarize", &img, None).unwrap_err();
//! assert!(matches!(err, OpsError::UnsupportedOperator(_)));
//! ```

use crate::edge::edge_detect;
use crate::filter::{gaussian_blur, grayscale, sepia};
use crate::params::OpParams;
use crate::pipeline::vintage_effect_with_rng;
use crate::preset::{FilmStock, PresetRegistry};
use crate::random::rng_from_seed;
use crate::{OpsError, OpsResult};
use filmgrade_core::Image;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// The supported operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// RGB -> 1-channel luma
    Grayscale,
    /// Sepia color matrix
    Sepia,
    /// Gaussian blur (kernel from [`OpParams::blur_kernel`])
    Blur,
    /// Binary edge map, 1-channel
    EdgeDetection,
    /// Kodak Portra 400 preset
    KodakPortra400,
    /// Fujifilm Velvia 50 preset
    FujifilmVelvia50,
    /// Cinestill 800T preset
    Cinestill800T,
    /// Kodak Ektar 100 preset
    KodakEktar100,
    /// Fujifilm Provia 100F preset
    FujifilmProvia100F,
    /// Custom warm preset
    CustomWarm,
    /// Sepia, blur, grain, light leaks, vignette
    VintageEffect,
}

impl Operator {
    /// Every operator, in presentation order.
    pub const ALL: [Operator; 11] = [
        Operator::Grayscale,
        Operator::Sepia,
        Operator::Blur,
        Operator::EdgeDetection,
        Operator::KodakPortra400,
        Operator::FujifilmVelvia50,
        Operator::Cinestill800T,
        Operator::KodakEktar100,
        Operator::FujifilmProvia100F,
        Operator::CustomWarm,
        Operator::VintageEffect,
    ];

    /// Identifier form, e.g. `KodakPortra400`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Grayscale => "Grayscale",
            Self::Sepia => "Sepia",
            Self::Blur => "Blur",
            Self::EdgeDetection => "EdgeDetection",
            Self::KodakPortra400 => "KodakPortra400",
            Self::FujifilmVelvia50 => "FujifilmVelvia50",
            Self::Cinestill800T => "Cinestill800T",
            Self::KodakEktar100 => "KodakEktar100",
            Self::FujifilmProvia100F => "FujifilmProvia100F",
            Self::CustomWarm => "CustomWarm",
            Self::VintageEffect => "VintageEffect",
        }
    }

    /// Label shown to users, e.g. `Kodak Portra 400`.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::EdgeDetection => "Edge Detection",
            Self::CustomWarm => "Custom Warm Filter",
            Self::VintageEffect => "Vintage Film Effect",
            other => match other.film_stock() {
                Some(stock) => stock.display_name(),
                None => other.name(),
            },
        }
    }

    /// The preset behind a film-stock operator.
    pub fn film_stock(&self) -> Option<FilmStock> {
        match self {
            Self::KodakPortra400 => Some(FilmStock::KodakPortra400),
            Self::FujifilmVelvia50 => Some(FilmStock::FujifilmVelvia50),
            Self::Cinestill800T => Some(FilmStock::Cinestill800T),
            Self::KodakEktar100 => Some(FilmStock::KodakEktar100),
            Self::FujifilmProvia100F => Some(FilmStock::FujifilmProvia100F),
            Self::CustomWarm => Some(FilmStock::CustomWarm),
            _ => None,
        }
    }

    /// Channel count of the result (1 for Grayscale/EdgeDetection, else 3).
    pub fn output_channels(&self) -> u32 {
        match self {
            Self::Grayscale | Self::EdgeDetection => 1,
            _ => 3,
        }
    }

    /// True for operators whose output depends on a random source.
    pub fn is_stochastic(&self) -> bool {
        matches!(self, Self::VintageEffect)
    }

    /// Applies this operator with the given params and the global presets.
    pub fn apply(&self, image: &Image, params: &OpParams) -> OpsResult<Image> {
        apply_with(PresetRegistry::global(), *self, image, params)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lowercase, with spaces, dashes and underscores removed.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for Operator {
    type Err = OpsError;

    /// Accepts the identifier or the display label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Operator::ALL
            .into_iter()
            .find(|op| normalize(op.name()) == wanted || normalize(op.display_name()) == wanted)
            .ok_or_else(|| OpsError::UnsupportedOperator(s.to_string()))
    }
}

/// Applies `op` to `image` using the global preset registry.
pub fn apply(op: Operator, image: &Image, params: &OpParams) -> OpsResult<Image> {
    apply_with(PresetRegistry::global(), op, image, params)
}

/// Looks up `name` and applies it; `None` params means defaults.
///
/// # Errors
///
/// [`OpsError::UnsupportedOperator`] for unknown names, plus whatever the
/// operator itself reports.
pub fn apply_named(name: &str, image: &Image, params: Option<&OpParams>) -> OpsResult<Image> {
    let op: Operator = name.parse()?;
    let default = OpParams::default();
    apply(op, image, params.unwrap_or(&default))
}

/// Applies `op` using the given preset registry.
pub fn apply_with(
    registry: &PresetRegistry,
    op: Operator,
    image: &Image,
    params: &OpParams,
) -> OpsResult<Image> {
    params.validate()?;
    info!(
        op = op.name(),
        width = image.width(),
        height = image.height(),
        channels = image.channels(),
        "Applying operator"
    );

    let result = match op {
        Operator::Grayscale => grayscale(image)?,
        Operator::Sepia => sepia(image)?,
        Operator::Blur => gaussian_blur(image, params.blur_ksize())?,
        Operator::EdgeDetection => edge_detect(image)?,
        Operator::VintageEffect => {
            debug!(seed = ?params.seed, "Vintage random source");
            vintage_effect_with_rng(image, &mut rng_from_seed(params.seed))?
        }
        preset => {
            let stock = preset
                .film_stock()
                .ok_or_else(|| OpsError::UnsupportedOperator(preset.name().to_string()))?;
            registry.apply(image, stock)?
        }
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Image {
        let data: Vec<u8> = (0..16 * 12 * 3).map(|i| (i * 29 % 256) as u8).collect();
        Image::from_raw(16, 12, 3, data).unwrap()
    }

    #[test]
    fn test_parse_names_and_labels() {
        for op in Operator::ALL {
            assert_eq!(op.name().parse::<Operator>().unwrap(), op);
            assert_eq!(op.display_name().parse::<Operator>().unwrap(), op);
        }
        assert_eq!("kodak-portra-400".parse::<Operator>().unwrap(), Operator::KodakPortra400);
        assert_eq!("edge_detection".parse::<Operator>().unwrap(), Operator::EdgeDetection);
        assert_eq!("Custom Warm Filter".parse::<Operator>().unwrap(), Operator::CustomWarm);
    }

    #[test]
    fn test_unknown_name() {
        let err = "Posterize".parse::<Operator>().unwrap_err();
        assert_eq!(err, OpsError::UnsupportedOperator("Posterize".into()));
        assert_eq!(err.to_string(), "unsupported operator: Posterize");
        assert!("".parse::<Operator>().is_err());
    }

    #[test]
    fn test_output_channels() {
        let img = sample();
        let params = OpParams::seeded(4);
        for op in Operator::ALL {
            let out = op.apply(&img, &params).unwrap();
            assert_eq!(out.channels(), op.output_channels(), "{op}");
            assert_eq!((out.width(), out.height()), (img.width(), img.height()));
        }
    }

    #[test]
    fn test_deterministic_operators_repeatable() {
        let img = sample();
        let params = OpParams::default();
        for op in Operator::ALL.into_iter().filter(|op| !op.is_stochastic()) {
            let a = apply(op, &img, &params).unwrap();
            let b = apply(op, &img, &params).unwrap();
            assert_eq!(a, b, "{op}");
        }
    }

    #[test]
    fn test_seeded_vintage_repeatable() {
        let img = sample();
        let params = OpParams::seeded(123);
        let a = apply(Operator::VintageEffect, &img, &params).unwrap();
        let b = apply(Operator::VintageEffect, &img, &params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_preset_dispatch_uses_registry() {
        let img = sample();
        let registry = PresetRegistry::new();
        let via_op = apply_with(&registry, Operator::FujifilmVelvia50, &img, &OpParams::default()).unwrap();
        let direct = registry.apply(&img, FilmStock::FujifilmVelvia50).unwrap();
        assert_eq!(via_op, direct);
    }

    #[test]
    fn test_blur_kernel_from_params() {
        let img = sample();
        let params = OpParams { blur_kernel: [3, 3], seed: None };
        let out = apply(Operator::Blur, &img, &params).unwrap();
        assert_eq!(out, gaussian_blur(&img, (3, 3)).unwrap());
    }

    #[test]
    fn test_invalid_params_rejected() {
        let img = sample();
        let params = OpParams { blur_kernel: [2, 2], seed: None };
        assert!(matches!(
            apply(Operator::Sepia, &img, &params),
            Err(OpsError::InvalidParameter(_))
        ));
        let huge = OpParams { blur_kernel: [usize::MAX, 1], seed: None };
        assert!(matches!(
            apply(Operator::Blur, &img, &huge),
            Err(OpsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_color_ops_reject_gray_input() {
        let gray = Image::new(4, 4, 1).unwrap();
        assert!(apply_named("Sepia", &gray, None).is_err());
        assert!(apply_named("KodakEktar100", &gray, None).is_err());
        // edge detection and blur accept single-channel input
        assert!(apply_named("EdgeDetection", &gray, None).is_ok());
        assert!(apply_named("Blur", &gray, None).is_ok());
    }
}
