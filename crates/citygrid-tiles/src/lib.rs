pub mod atlas;
pub mod buffer;
pub mod cache;
pub mod instances;
pub mod paint;
pub mod settings;
pub mod synthesis;

pub use buffer::TileBuffer;
pub use cache::TileCache;
pub use instances::{building_instances, flatten, refresh_instances, BuildingInstance};
pub use settings::TileSettings;
pub use synthesis::{synthesize_chunk, synthesize_tiles};
