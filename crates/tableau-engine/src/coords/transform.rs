use super::{Vec2, Viewport};

/// Maps a screen coordinate into world space.
///
/// The world origin is the centre of the drawing surface. `surface_offset` is the
/// surface's top-left corner in screen space and `world` its size, so the result
/// is `screen - (surface_offset + world / 2)`.
///
/// Hosts that move the surface's logical origin away from its centre must
/// convert coordinates themselves.
#[inline]
pub fn screen_to_world(screen: Vec2, surface_offset: Vec2, world: Viewport) -> Vec2 {
    screen - (surface_offset + world.half())
}

/// Inverse of [`screen_to_world`].
#[inline]
pub fn world_to_screen(world_pos: Vec2, surface_offset: Vec2, world: Viewport) -> Vec2 {
    world_pos + surface_offset + world.half()
}
