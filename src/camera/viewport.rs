use glam::Vec2;

/// Pixel dimensions of a render view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Width in physical pixels.
    pub width: u32,
    /// Height in physical pixels.
    pub height: u32,
}

impl Viewport {
    /// Create a viewport of the given size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width / height.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Center of the viewport in pixels.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * 0.5
    }

    /// Whether a pointer position lies inside the viewport (edges
    /// inclusive). Non-finite positions are never inside.
    #[must_use]
    pub fn contains(&self, pointer: Vec2) -> bool {
        pointer.is_finite()
            && pointer.x >= 0.0
            && pointer.y >= 0.0
            && pointer.x <= self.width as f32
            && pointer.y <= self.height as f32
    }

    /// Convert pixel coordinates (origin top-left, y down) to normalized
    /// device coordinates (-1 to 1, y up).
    #[must_use]
    pub fn to_ndc(&self, pointer: Vec2) -> Vec2 {
        Vec2::new(
            (pointer.x / self.width as f32) * 2.0 - 1.0,
            1.0 - (pointer.y / self.height as f32) * 2.0,
        )
    }
}
