//! Ad-hoc timing macros, handy when `utils::tracer::Tracer` is more
//! machinery than a one-off measurement needs.

mod debug_timer;
