//! Skyturn application: platform directories, frame loop, and a headless
//! scene host driving the starfield core.

pub mod app;
pub mod frame_loop;
pub mod headless;
pub mod platform;
