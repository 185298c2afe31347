use ratatui::style::Color;

pub const PRIMARY: Color = Color::from_u32(0x00e8505b);
pub const SECONDARY: Color = Color::from_u32(0x007a2a30);
pub const NEUTRAL: Color = Color::from_u32(0x00404040);
pub const BACKGROUND: Color = Color::from_u32(0x000d0d0d);
pub const ACCENT: Color = Color::from_u32(0x00f9d56e);
pub const TEXT: Color = Color::from_u32(0x00e6e6e6);
