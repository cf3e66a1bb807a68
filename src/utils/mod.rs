pub mod helper;

mod alignment;
pub use alignment::align;
