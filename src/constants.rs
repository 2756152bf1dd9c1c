// Port configuration
pub const DEFAULT_PORT: u16 = 3001;

// Badge geometry (logical pixels)
pub const BADGE_SIZE: u32 = 32;
pub const BADGE_PADDING: u32 = 4;
pub const BADGE_ICON_SIZE: u32 = 16;
