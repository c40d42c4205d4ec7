pub mod pre_compact;
pub mod session_start;
pub mod status;
pub mod stop;
