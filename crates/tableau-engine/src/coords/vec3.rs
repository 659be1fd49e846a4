use super::Vec2;

/// 3D point in world units.
///
/// Display objects carry a 3D position so layers can be drawn either flat
/// (z ignored) or with an isometric projection.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Drops the z component.
    #[inline]
    pub fn xy(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Projects onto the drawing plane.
    ///
    /// Flat projection drops `z`. Isometric projection uses the 2:1 dimetric
    /// mapping common to tile engines: `x' = x - y`, `y' = (x + y) / 2 - z`.
    #[inline]
    pub fn project(self, isometric: bool) -> Vec2 {
        if isometric {
            Vec2::new(self.x - self.y, (self.x + self.y) * 0.5 - self.z)
        } else {
            self.xy()
        }
    }
}

impl From<Vec2> for Vec3 {
    #[inline]
    fn from(v: Vec2) -> Self {
        Vec3::new(v.x, v.y, 0.0)
    }
}

impl From<[f32; 3]> for Vec3 {
    #[inline]
    fn from([x, y, z]: [f32; 3]) -> Self {
        Vec3::new(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_projection_drops_z() {
        let p = Vec3::new(3.0, 4.0, 99.0);
        assert_eq!(p.project(false), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn isometric_projection_of_axes() {
        assert_eq!(Vec3::new(10.0, 0.0, 0.0).project(true), Vec2::new(10.0, 5.0));
        assert_eq!(Vec3::new(0.0, 10.0, 0.0).project(true), Vec2::new(-10.0, 5.0));
        assert_eq!(Vec3::new(0.0, 0.0, 10.0).project(true), Vec2::new(0.0, -10.0));
    }

    #[test]
    fn origin_projects_to_origin() {
        assert_eq!(Vec3::zero().project(true), Vec2::zero());
    }
}
