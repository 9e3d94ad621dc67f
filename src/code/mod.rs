pub mod dependencies;
pub mod persister;

pub use dependencies::detect_dependencies;
pub use persister::CodePersister;
