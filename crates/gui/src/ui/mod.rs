pub mod jobs_panel;
pub mod paint_panel;
pub mod status_bar;
pub mod timer_panel;
pub mod zone_panel;
