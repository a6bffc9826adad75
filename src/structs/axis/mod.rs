mod axes;
mod axis;
mod builder;

pub use self::axes::Axes;
pub use self::axis::Axis;
pub use self::builder::AxisBuilder;
