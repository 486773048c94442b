mod office;
mod reservation;
mod slot;
pub mod time;

pub use office::*;
pub use reservation::*;
pub use slot::*;
