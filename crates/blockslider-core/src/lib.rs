pub mod article;
pub mod bus;
pub mod config;
pub mod device;
pub mod error;
pub mod gesture;
pub mod layout;
pub mod navigation;
pub mod readiness;
pub mod resize;
pub mod schedule;
pub mod scroll;
pub mod slider;
pub mod surface;

pub use article::{ArticleLifecycle, ArticleModel, ArticleView, BlockModel, HostContext};
pub use bus::{EventBus, HostBus, HostSignal, SliderEvent, Subscription, ViewPhase};
pub use config::{AppConfig, CourseSliderConfig, EasingType, SliderConfig, SliderSettings};
pub use device::{Breakpoints, Device, Direction, ScreenSize};
pub use error::{Error, Result};
pub use navigation::ControlId;
pub use readiness::{Readiness, ReadinessWaiter, WaitQueue};
pub use slider::BlockSlider;
pub use surface::{MemorySurface, Surface};
