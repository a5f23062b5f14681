pub mod category_pills;
pub mod hero_carousel;
pub mod player_bar;
pub mod search_bar;
pub mod sidebar;
pub mod song_list;
pub mod splash;
