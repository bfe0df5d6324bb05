pub mod builder;
pub mod context;
pub mod error;
pub mod fixtures;
pub mod valkey;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;
pub use valkey::ValkeyTest;

pub mod prelude {
    pub use crate::{fixtures::registry::factory, TestBuilder, TestContext, TestError};
}
