pub mod body;
pub mod declination;

pub use body::*;
pub use declination::*;
