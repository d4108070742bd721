use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

/// Global config repository, keyed by config type
static CONFIG_REPOSITORY: OnceLock<RwLock<ConfigRepository>> = OnceLock::new();

/// Typed configuration structs stored by `TypeId`
#[derive(Default)]
pub struct ConfigRepository {
    configs: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl ConfigRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a config struct, replacing any previous value of the same type
    pub fn register<T: Any + Send + Sync + 'static>(&mut self, config: T) {
        self.configs.insert(TypeId::of::<T>(), Box::new(config));
    }

    pub fn get<T: Any + Send + Sync + Clone + 'static>(&self) -> Option<T> {
        self.configs
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
            .cloned()
    }

    pub fn has<T: Any + 'static>(&self) -> bool {
        self.configs.contains_key(&TypeId::of::<T>())
    }
}

fn repository() -> &'static RwLock<ConfigRepository> {
    CONFIG_REPOSITORY.get_or_init(|| RwLock::new(ConfigRepository::new()))
}

pub fn register<T: Any + Send + Sync + 'static>(config: T) {
    if let Ok(mut repo) = repository().write() {
        repo.register(config);
    }
}

pub fn get<T: Any + Send + Sync + Clone + 'static>() -> Option<T> {
    repository().read().ok()?.get::<T>()
}

pub fn has<T: Any + 'static>() -> bool {
    repository()
        .read()
        .map(|repo| repo.has::<T>())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Sample {
        value: u8,
    }

    #[test]
    fn test_register_replaces_previous_value() {
        let mut repo = ConfigRepository::new();
        assert!(!repo.has::<Sample>());

        repo.register(Sample { value: 1 });
        repo.register(Sample { value: 2 });

        assert_eq!(repo.get::<Sample>(), Some(Sample { value: 2 }));
        assert_eq!(repo.get::<String>(), None);
    }
}
