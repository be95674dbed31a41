pub mod chart;
pub mod gate;
pub mod judgment;
pub mod note;
pub mod scoring;
pub mod session;
pub mod spawn;
