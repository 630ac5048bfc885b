mod slider;
mod status_bar;

pub use slider::SliderWidget;
pub use status_bar::StatusBarWidget;
