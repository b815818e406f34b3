//! Browser-free interaction logic for the portfolio site.
//!
//! Every controller here reads the page through [`document::DocumentView`]
//! and answers with a list of [`document::Effect`] commands instead of
//! touching the DOM itself. The root `portfolio` crate supplies the
//! `web-sys` implementation and wires events; tests use
//! [`memory::MemoryDocument`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`document`] | `DocumentView` trait, `Effect` commands, `apply` |
//! | [`memory`] | In-memory document with a small selector engine |
//! | [`preferences`] | `PreferenceStore` trait and the in-memory store |
//! | [`theme`] | Light/dark toggle |
//! | [`locale`] | English/Arabic toggle with direction switching |
//! | [`navigation`] | Mobile menu, anchor scrolling, scroll highlighting |
//! | [`reveal`] | Fade-in latch and deferred image loading |
//! | [`misc`] | Year stamp, link hardening, hover and download hooks |
//! | [`config`] | Page-overridable tuning and selectors |
//! | [`consts`] | Fixed class names, glyphs, and style values |
//! | [`error`] | Crate error type |

pub mod config;
pub mod consts;
pub mod document;
pub mod error;
pub mod locale;
pub mod memory;
pub mod misc;
pub mod navigation;
pub mod preferences;
pub mod reveal;
pub mod theme;
