pub mod codec;

pub use codec::{to_hex, ColorHex, Rgb};
