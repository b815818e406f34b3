//! Browser entry point for the portfolio page.
//!
//! The page logic lives in the `behavior` crate and runs against any
//! [`behavior::document::DocumentView`]. This crate supplies the live
//! implementations (DOM, `localStorage`, listeners, observers) and boots
//! them from `#[wasm_bindgen(start)]`.
//!
//! | Module | Concern |
//! |--------|---------|
//! | `page_config` | embedded JSON config, defaults on absence or error |
//! | `dom` | `web-sys` document adapter |
//! | `storage` | `localStorage` preference store with in-memory fallback |
//! | `listeners` | leaked-closure event listeners |
//! | `observers` | `IntersectionObserver` plumbing |
//! | `logging` | console logger and panic hook |
//! | `site` | boot sequence and event wiring |

pub mod page_config;

#[cfg(feature = "hydrate")]
pub mod dom;
#[cfg(feature = "hydrate")]
pub mod listeners;
#[cfg(feature = "hydrate")]
pub mod logging;
#[cfg(feature = "hydrate")]
pub mod observers;
#[cfg(feature = "hydrate")]
mod site;
#[cfg(feature = "hydrate")]
pub mod storage;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    site::start();
}
