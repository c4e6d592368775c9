//! Bucketizer: day counts → fixed-width labelled ranges.

use crate::config::BucketConfig;
use crate::errors::{AppError, AppResult};
use crate::models::bucket::{Bucket, NegativePolicy};

/// Upper bound on the number of finite ranges.
pub const MAX_BUCKETS: i64 = 1000;

/// Partition `[0, w), [w, 2w), ... [(n-1)w, nw), [nw, ∞)` plus the policy
/// for values below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucketizer {
    width: i64,
    count: i64,
    negative: NegativePolicy,
}

impl Default for Bucketizer {
    fn default() -> Self {
        Self {
            width: 5,
            count: 10,
            negative: NegativePolicy::Bucket,
        }
    }
}

impl Bucketizer {
    pub fn new(width: i64, count: i64, negative: NegativePolicy) -> AppResult<Self> {
        let invalid = width <= 0
            || count <= 0
            || count > MAX_BUCKETS
            || width.checked_mul(count).is_none();
        if invalid {
            return Err(AppError::Config(format!(
                "invalid bucket partition: width={width}, count={count} (count at most {MAX_BUCKETS})"
            )));
        }
        Ok(Self {
            width,
            count,
            negative,
        })
    }

    pub fn from_config(cfg: &BucketConfig) -> AppResult<Self> {
        Self::new(cfg.width, cfg.count, cfg.negative_policy)
    }

    pub fn with_negative_policy(mut self, negative: NegativePolicy) -> Self {
        self.negative = negative;
        self
    }

    pub fn negative_policy(&self) -> NegativePolicy {
        self.negative
    }

    /// First value that lands in the open overflow bucket.
    /// `new` guarantees the product fits.
    pub fn overflow_start(&self) -> i64 {
        self.width * self.count
    }

    pub fn bucket(&self, value: Option<i64>) -> Option<Bucket> {
        let v = value?;

        if v < 0 {
            return match self.negative {
                NegativePolicy::Bucket => Some(Bucket::Negative),
                NegativePolicy::Missing => None,
            };
        }

        if v >= self.overflow_start() {
            return Some(Bucket::Overflow {
                from: self.overflow_start(),
            });
        }

        let lo = (v / self.width) * self.width;
        Some(Bucket::Range {
            lo,
            hi: lo + self.width - 1,
        })
    }

    /// Every label this partition can produce, in chart order.
    pub fn labels(&self) -> Vec<Bucket> {
        let mut out = Vec::with_capacity(self.count as usize + 2);

        if self.negative == NegativePolicy::Bucket {
            out.push(Bucket::Negative);
        }

        for k in 0..self.count {
            let lo = k * self.width;
            out.push(Bucket::Range {
                lo,
                hi: lo + self.width - 1,
            });
        }

        out.push(Bucket::Overflow {
            from: self.overflow_start(),
        });
        out
    }
}
