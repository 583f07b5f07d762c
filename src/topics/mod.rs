// Topic extraction — taxonomy table plus swappable matching strategies.

pub mod keyword;
pub mod taxonomy;
pub mod traits;

#[cfg(feature = "semantic")]
pub mod semantic;
