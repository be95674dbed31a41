pub mod clock;
pub mod hands;
