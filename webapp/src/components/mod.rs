pub mod breakpoint;
pub mod navigation;
pub mod theme;
pub mod user_menu;
