pub mod stop;

pub use stop::StopFlag;
