//! Procedural canvas backdrops: scrolling waves with rising bubbles, a velvet
//! fabric texture and a flowing silk overlay.
//!
//! Everything outside `wasm` is plain Rust driven through small traits
//! ([`canvas::Canvas2d`], [`viewport::ViewportSource`],
//! [`sections::RegionSource`], [`host::FrameScheduler`]), so the simulation
//! runs and is tested natively. The browser glue only exists on wasm32.

pub mod canvas;
pub mod clock;
pub mod color;
pub mod config;
pub mod error;
pub mod fabric;
pub mod host;
pub mod particles;
pub mod scene;
pub mod sections;
pub mod silk;
pub mod theme;
pub mod viewport;
pub mod visibility;
pub mod waves;

pub use config::{BackdropConfig, Kind};
pub use error::{BackdropError, Result};
pub use host::{AnimationHost, FrameHandle, FrameScheduler, HostState};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    mod dom;
    mod driver;
    mod render;

    pub use driver::{live_registrations, mount_backdrop, unmount_all, Backdrop};

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let mounted = driver::mount_all()?;
        log::info!("backdrops started ({mounted} auto-mounted)");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{live_registrations, mount_backdrop, unmount_all, Backdrop};
