mod home;
mod package;

pub use home::HomePage;
pub use package::PackagePage;
