//! Pointer-to-time mapping for the selector track
//!
//! Pure conversions between pixel positions, track fractions, and media
//! time. All clamping lives here so the rest of the engine never sees a
//! fraction outside `[0, 1]` or a division by zero.

/// Pixel-space bounding box of the track.
///
/// Read fresh on every pointer computation; never cached across drags,
/// since layout can change between events.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackGeometry {
    /// X coordinate of the track's left edge.
    pub left: f32,
    /// Track width in pixels.
    pub width: f32,
}

impl TrackGeometry {
    /// Create a track geometry from a left edge and width
    pub fn new(left: f32, width: f32) -> Self {
        Self { left, width }
    }
}

/// A pointer X coordinate from either input source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    /// Mouse cursor position.
    Mouse { x: f32 },
    /// First touch point of a touch event.
    Touch { x: f32 },
}

impl PointerInput {
    /// Pointer input from a mouse coordinate
    pub fn mouse(x: f32) -> Self {
        Self::Mouse { x }
    }

    /// The X coordinate regardless of input source
    pub fn x(&self) -> f32 {
        match *self {
            PointerInput::Mouse { x } => x,
            PointerInput::Touch { x } => x,
        }
    }
}

/// Clamp a value into `[0, 1]`
pub fn clamp_unit(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Convert a pointer X position into a track fraction.
///
/// Positions left of the track map to `0`, right of it to `1`. A zero or
/// negative track width yields `0` so no NaN can propagate.
pub fn position_to_fraction(pointer_x: f32, track: TrackGeometry) -> f32 {
    if track.width <= 0.0 {
        return 0.0;
    }
    clamp_unit((pointer_x - track.left) / track.width)
}

/// Convert a track fraction into a time in seconds
pub fn fraction_to_time(fraction: f32, duration: f64) -> f64 {
    f64::from(fraction) * duration
}

/// Convert a time in seconds into a track fraction.
///
/// Returns `0` while the duration is unknown.
pub fn time_to_fraction(time: f64, duration: f64) -> f32 {
    if duration > 0.0 {
        clamp_unit((time / duration) as f32)
    } else {
        0.0
    }
}
