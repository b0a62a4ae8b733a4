pub mod detail_panel;
pub mod dev_tools;
pub mod filter_bar;
pub mod fullscreen;
pub mod help_overlay;
pub mod map_view;
