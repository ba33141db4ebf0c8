pub mod candle;
pub mod signals;
pub mod ticker;

pub use candle::*;
pub use signals::*;
pub use ticker::*;
