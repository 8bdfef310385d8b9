use serde::{Deserialize, Serialize};

/// Counters for gated render requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderStats {
    pub rendered: u64,
    pub skipped: u64,
}

/// Pure-render gate: a render may be skipped when the surface already shows
/// the result for equal props.
///
/// Layer props compare data snapshots by identity, so an equality check never
/// walks the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderGate {
    primed: bool,
    stats: RenderStats,
}

impl RenderGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when a previous pass drew `current` and `next` would look the same.
    #[must_use]
    pub fn should_skip_render<P: PartialEq + ?Sized>(&self, current: &P, next: &P) -> bool {
        self.primed && current == next
    }

    pub fn record_render(&mut self) {
        self.primed = true;
        self.stats.rendered += 1;
    }

    pub fn record_skip(&mut self) {
        self.stats.skipped += 1;
    }

    /// Forces the next request through, e.g. after the backing store was
    /// reallocated.
    pub fn invalidate(&mut self) {
        self.primed = false;
    }

    #[must_use]
    pub fn is_primed(&self) -> bool {
        self.primed
    }

    #[must_use]
    pub fn stats(&self) -> RenderStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::RenderGate;

    #[test]
    fn gate_never_skips_before_first_render() {
        let gate = RenderGate::new();
        assert!(!gate.should_skip_render(&1, &1));
    }

    #[test]
    fn gate_skips_equal_props_once_primed() {
        let mut gate = RenderGate::new();
        gate.record_render();
        assert!(gate.should_skip_render(&1, &1));
        assert!(!gate.should_skip_render(&1, &2));
    }

    #[test]
    fn invalidate_reopens_gate() {
        let mut gate = RenderGate::new();
        gate.record_render();
        gate.invalidate();
        assert!(!gate.should_skip_render("a", "a"));
    }
}
