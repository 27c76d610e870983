pub mod cell;
pub mod reader;

pub use cell::cell_to_text;
pub use reader::{SheetReader, SheetRow};
