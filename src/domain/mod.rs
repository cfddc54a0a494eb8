pub mod verdict;

pub use verdict::{Explanation, ImageVerdict, RiskTier, Verdict};
