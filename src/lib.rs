pub mod api;
pub mod core;
pub mod scanner;

pub use crate::core::color::{classify, ColorLabel, PixelSample};
pub use crate::core::hold::{HoldOutcome, HoldTracker};

pub fn init_logging() {
    #[cfg(target_os = "android")]
    {
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(log::LevelFilter::Debug)
                .with_tag("stress_scan_rust"),
        );
    }

    #[cfg(not(target_os = "android"))]
    {
        // desktop / test hosts install their own `log` backend
    }
}
