pub mod classification;
pub mod enums;
pub mod facility;
pub mod geo;
pub mod photo;

pub use classification::*;
pub use enums::*;
pub use facility::*;
pub use geo::*;
pub use photo::*;
