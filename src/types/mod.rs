pub mod bar;
pub mod clock;
pub mod interval;
pub mod panel;
pub mod score;

pub use bar::*;
pub use clock::*;
pub use interval::*;
pub use panel::*;
pub use score::*;
