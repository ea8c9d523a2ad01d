pub mod cosine_window;
pub mod window_application;
