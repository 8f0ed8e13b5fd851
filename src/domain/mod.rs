pub mod forecast;
pub mod observation;
pub mod schedule;

pub use forecast::*;
pub use observation::*;
pub use schedule::*;
