//! Testing utilities and harness for Tactile

pub mod robot;
pub mod robot_assertions;
mod target;

pub use robot::GestureRobot;
pub use target::{PlainTouchArea, ReceivedTouch, RobotTarget};

pub mod prelude {
    pub use crate::robot::GestureRobot;
    pub use crate::robot_assertions;
    pub use crate::target::{PlainTouchArea, ReceivedTouch, RobotTarget};
}
