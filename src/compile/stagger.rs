use crate::compile::spec::{DelaySpec, StaggerBound};

impl StaggerBound {
    /// Resolve against a collection of `total` targets; percentages count from the size.
    ///
    /// Percent strings that do not parse resolve to 0.
    pub fn resolve(&self, total: usize) -> f64 {
        match self {
            Self::Count(n) => *n,
            Self::Percent(s) => {
                let pct = s
                    .trim()
                    .trim_end_matches('%')
                    .trim()
                    .parse::<f64>()
                    .unwrap_or(0.0);
                total as f64 * pct / 100.0
            }
        }
    }
}

/// Delay of target `index` out of `total` under a `[start, range, gap]` schedule.
///
/// `0` before `start`, then `floor((index - start) / range) * gap`. A non-positive `range`
/// puts every target past `start` in the first group.
pub fn stagger_delay(
    start: &StaggerBound,
    range: &StaggerBound,
    gap: f64,
    total: usize,
    index: usize,
) -> f64 {
    let s = start.resolve(total);
    let r = range.resolve(total);
    let i = index as f64;
    if i < s || r <= 0.0 {
        return 0.0;
    }
    ((i - s) / r).floor() * gap
}

impl DelaySpec {
    /// Local delay (ms) of target `index` out of `total`.
    pub fn resolve(&self, total: usize, index: usize) -> f64 {
        match self {
            Self::Fixed(ms) => *ms,
            Self::Stagger(start, range, gap) => stagger_delay(start, range, *gap, total, index),
        }
    }

    /// Whether the delay varies across targets.
    pub fn is_staggered(&self) -> bool {
        matches!(self, Self::Stagger(..))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/stagger.rs"]
mod tests;
