//! Operator configuration.
//!
//! [`OpParams`] is the optional configuration passed alongside an operator
//! name. Every field has a default, so a partial YAML/JSON document or
//! `OpParams::default()` is always valid input.
//!
//! ```rust
//! use filmgrade_ops::OpParams;
//!
//! let params = OpParams::default();
//! assert_eq!(params.blur_kernel, [15, 15]);
//! assert_eq!(params.seed, None);
//! ```

use crate::filter::{check_kernel, DEFAULT_BLUR_KERNEL};
use crate::OpsResult;
use serde::{Deserialize, Serialize};

/// Tunables for [`apply`](crate::apply).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OpParams {
    /// Kernel `[width, height]` of the standalone Blur operator; both odd and
    /// at most [`MAX_BLUR_KERNEL`](crate::filter::MAX_BLUR_KERNEL).
    pub blur_kernel: [usize; 2],
    /// Seed for the stochastic stages of VintageEffect. `None` draws from
    /// entropy, so repeated runs differ.
    pub seed: Option<u64>,
}

impl Default for OpParams {
    fn default() -> Self {
        Self {
            blur_kernel: [DEFAULT_BLUR_KERNEL.0, DEFAULT_BLUR_KERNEL.1],
            seed: None,
        }
    }
}

impl OpParams {
    /// Params with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Blur kernel as `(width, height)`.
    #[inline]
    pub fn blur_ksize(&self) -> (usize, usize) {
        (self.blur_kernel[0], self.blur_kernel[1])
    }

    /// Checks value ranges.
    pub fn validate(&self) -> OpsResult<()> {
        check_kernel(self.blur_ksize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OpsError;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let params: OpParams = serde_yaml::from_str("seed: 42").unwrap();
        assert_eq!(params.seed, Some(42));
        assert_eq!(params.blur_kernel, [15, 15]);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_full_yaml() {
        let params: OpParams = serde_yaml::from_str("blur_kernel: [3, 7]\nseed: 1\n").unwrap();
        assert_eq!(params.blur_ksize(), (3, 7));
        assert_eq!(params, OpParams { blur_kernel: [3, 7], seed: Some(1) });
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(serde_yaml::from_str::<OpParams>("grain: 0.5").is_err());
    }

    #[test]
    fn test_validate_kernel() {
        let mut params = OpParams::seeded(3);
        assert!(params.validate().is_ok());
        params.blur_kernel = [4, 5];
        assert!(matches!(params.validate(), Err(OpsError::InvalidParameter(_))));
        params.blur_kernel = [0, 5];
        assert!(params.validate().is_err());
        params.blur_kernel = [usize::MAX, 1];
        assert!(matches!(params.validate(), Err(OpsError::InvalidParameter(_))));
        params.blur_kernel = [(1 << 32) + 1, 1];
        assert!(params.validate().is_err());
    }
}
