/// Radius where the cosine taper begins, in pixels.
pub const DEFAULT_INNER_RADIUS: f64 = 12.0;

/// Radius where the taper reaches zero, in pixels.
pub const DEFAULT_OUTER_RADIUS: f64 = 14.0;

/// Mid-gray of the 8-bit range; masked-out pixels settle here.
pub const DEFAULT_BACKGROUND_LEVEL: f64 = 255.0 / 2.0;

/// Largest value of the 8-bit intensity domain.
pub const MAX_INTENSITY: f64 = 255.0;
