//! Pages
//!
//! One component per route.

mod landing;
mod auth;
mod home;
mod import;
mod data;
mod filtered_data;
mod generate_codebook;
mod view_codebook;
mod apply_codebook;
mod view_coding;
mod compare_codebooks;
mod project;
mod not_found;

pub use landing::LandingPage;
pub use auth::{LoginPage, RegisterPage};
pub use home::HomePage;
pub use import::ImportPage;
pub use data::DataPage;
pub use filtered_data::FilteredDataPage;
pub use generate_codebook::GenerateCodebookPage;
pub use view_codebook::ViewCodebookPage;
pub use apply_codebook::ApplyCodebookPage;
pub use view_coding::ViewCodingPage;
pub use compare_codebooks::CompareCodebooksPage;
pub use project::ProjectPage;
pub use not_found::NotFoundPage;
