mod reader;

pub use reader::{InputReader, InputSource, exe_dir};
