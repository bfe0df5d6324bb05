use crate::TestContext;

pub mod data;
pub mod factory;

impl TestContext {
    pub fn registry<'a>(&'a mut self) -> RegistryFixtures<'a> {
        RegistryFixtures { context: self }
    }
}

pub struct RegistryFixtures<'a> {
    pub context: &'a mut TestContext,
}
