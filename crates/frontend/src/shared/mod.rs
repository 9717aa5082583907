pub mod api_utils;
pub mod components;
pub mod icons;
pub mod list_pattern;
pub mod list_screen;
pub mod modal;
pub mod page_frame;
pub mod page_standard;
