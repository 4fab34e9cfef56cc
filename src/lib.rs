//! SVG Color Shifter
//!
//! Desktop utility for recoloring flat SVG artwork: drop a file, pick one of
//! its fill colors, and repaint every occurrence through a color picker with
//! a live preview. Patched documents can be saved back as SVG or exported to
//! PNG, and a batch converter turns dropped SVG files into sibling PNGs.
//!
//! The core works on raw SVG text. `palette` finds `fill="#RRGGBB"` literals
//! and groups them by decoded color, `patch` splices replacement hex digits
//! over the stored offsets, and `state::Session` drives the load/repaint/
//! save lifecycle. Everything visual lives under `gui`.

pub mod color;
pub mod config;
pub mod error;
pub mod gui;
pub mod palette;
pub mod patch;
pub mod render;
pub mod sanitize;
pub mod state;
pub mod transcode;
