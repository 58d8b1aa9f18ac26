/// Recursion guard - bounds the chain of nested reflection renders.
///
/// One guard per RenderContext. It counts nesting across all mirrors, so
/// two facing mirrors and a hall of ten mirrors hit the same limit.

/// Nesting counter with a configurable limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecursionGuard {
    depth: u32,
    max_depth: u32,
    /// Deepest nesting reached since the last reset_stats()
    deepest: u32,
}

impl RecursionGuard {
    pub fn new(max_depth: u32) -> Self {
        Self {
            depth: 0,
            max_depth,
            deepest: 0,
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Takes effect at the next enter(). Renders already nested deeper
    /// unwind normally.
    pub fn set_max_depth(&mut self, max_depth: u32) {
        self.max_depth = max_depth;
    }

    pub fn deepest(&self) -> u32 {
        self.deepest
    }

    /// `true` when no further reflection render may start.
    pub fn is_exhausted(&self) -> bool {
        self.depth >= self.max_depth
    }

    pub fn enter(&mut self) {
        self.depth += 1;
        self.deepest = self.deepest.max(self.depth);
    }

    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn reset_stats(&mut self) {
        self.deepest = self.depth;
    }
}

impl Default for RecursionGuard {
    fn default() -> Self {
        Self::new(super::render_context::DEFAULT_MAX_RECURSION_DEPTH)
    }
}

#[cfg(test)]
#[path = "recursion_guard_tests.rs"]
mod tests;
