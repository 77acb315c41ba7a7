pub mod builder;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use builder::{CollectionBuilder, resolve};
pub use types::{
    Collection, Folder, FolderNode, Info, ItemList, PostmanRequest, PostmanUrl, RawBody,
    RequestItem, SCHEMA_V2_1,
};
pub use writer::{to_json_string, write_collection};
