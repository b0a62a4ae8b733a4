pub mod map_page;
