// Score counter

/// Points collected so far; only ever goes up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    points: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    /// Add one point and return the new total
    pub fn increment(&mut self) -> u32 {
        self.points = self.points.saturating_add(1);
        self.points
    }

    /// Display text, e.g. "Points: 3"
    pub fn text(&self) -> String {
        format!("Points: {}", self.points)
    }
}
