pub mod common_files;
pub mod wayback;
