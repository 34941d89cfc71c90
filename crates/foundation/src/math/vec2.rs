/// Screen-space vector in pixels.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(self, o: Vec2) -> Vec2 {
        Vec2::new(self.x + o.x, self.y + o.y)
    }

    pub fn sub(self, o: Vec2) -> Vec2 {
        Vec2::new(self.x - o.x, self.y - o.y)
    }

    pub fn scale(self, s: f64) -> Vec2 {
        Vec2::new(self.x * s, self.y * s)
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn normalize_or(self, fallback: Vec2) -> Vec2 {
        let n = self.length();
        if n > 1e-10 {
            self.scale(1.0 / n)
        } else {
            fallback
        }
    }

    /// Clamps the vector's length to `max_len`, preserving direction.
    pub fn clamp_length(self, max_len: f64) -> Vec2 {
        let n = self.length();
        if n > max_len && n > 1e-10 {
            self.scale(max_len / n)
        } else {
            self
        }
    }
}
