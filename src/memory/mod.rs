//! The machine's flat memory, and the program images that get loaded into it.

mod image;
mod ram;

pub use image::load_image_file;
pub use ram::{Memory, DEFAULT_CAPACITY};

#[cfg(test)]
pub use image::{load_image, parse_image};
