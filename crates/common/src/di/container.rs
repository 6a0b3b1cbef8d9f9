//! DI контейнер HMS
//!
//! АРХИТЕКТУРНЫЕ РЕШЕНИЯ:
//! - HashMap<TypeId, ServiceEntry> для O(1) поиска по capability
//! - Хранится `Arc<T>`, упакованный в `Arc<dyn Any>`, поэтому `T` может быть trait object
//! - Factory вызывается БЕЗ удержания lock'а: она сама зовёт `resolve` для зависимостей
//! - Clone-able контейнер (внутреннее состояние за Arc)

use parking_lot::{Mutex, RwLock};
use std::{
    any::{type_name, Any, TypeId},
    collections::HashMap,
    sync::Arc,
};
use tracing::debug;

use super::errors::{DIError, DIResult};

/// Режим жизни зарегистрированного сервиса
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// Factory вызывается лениво, не более одного раза
    Singleton,
    /// Новый экземпляр при каждом разрешении
    Factory,
    /// Заранее созданный экземпляр, возвращается как есть
    Instance,
}

type ErasedArc = Arc<dyn Any + Send + Sync>;
type ErasedFactory = Arc<dyn Fn(&DIContainer) -> anyhow::Result<ErasedArc> + Send + Sync>;

enum Provider {
    Singleton {
        factory: ErasedFactory,
        instance: Option<ErasedArc>,
    },
    Factory(ErasedFactory),
    Instance(ErasedArc),
}

impl Provider {
    fn lifetime(&self) -> Lifetime {
        match self {
            Provider::Singleton { .. } => Lifetime::Singleton,
            Provider::Factory(_) => Lifetime::Factory,
            Provider::Instance(_) => Lifetime::Instance,
        }
    }
}

struct ServiceEntry {
    service_name: &'static str,
    provider: Provider,
    resolved: bool,
}

/// Реестр capability -> provider
///
/// Регистрация должна полностью предшествовать разрешению зависимых ключей:
/// повторная регистрация уже разрешённого ключа отклоняется.
#[derive(Clone, Default)]
pub struct DIContainer {
    services: Arc<RwLock<HashMap<TypeId, ServiceEntry>>>,
    /// Стек ключей, которые сейчас создаются (для обнаружения циклов)
    resolving: Arc<Mutex<Vec<(TypeId, &'static str)>>>,
}

impl DIContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Зарегистрировать singleton: factory вызывается при первом `resolve`
    pub fn register_singleton<T, F>(&self, factory: F) -> DIResult<()>
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&DIContainer) -> anyhow::Result<Arc<T>> + Send + Sync + 'static,
    {
        self.insert::<T>(Provider::Singleton {
            factory: Self::erase(factory),
            instance: None,
        })
    }

    /// Зарегистрировать factory: новый экземпляр на каждый `resolve`
    pub fn register_factory<T, F>(&self, factory: F) -> DIResult<()>
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&DIContainer) -> anyhow::Result<Arc<T>> + Send + Sync + 'static,
    {
        self.insert::<T>(Provider::Factory(Self::erase(factory)))
    }

    /// Зарегистрировать готовый экземпляр
    pub fn register_instance<T>(&self, instance: Arc<T>) -> DIResult<()>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.insert::<T>(Provider::Instance(Arc::new(instance)))
    }

    /// Разрешить зависимость
    pub fn resolve<T>(&self) -> DIResult<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let type_id = TypeId::of::<T>();
        let service_name = type_name::<T>();

        // Под lock'ом только выбираем provider; factory вызывается после его освобождения
        let (factory, lifetime) = {
            let mut services = self.services.write();
            let entry = services
                .get_mut(&type_id)
                .ok_or_else(|| DIError::UnregisteredKey {
                    service: service_name.to_string(),
                })?;
            entry.resolved = true;

            match &entry.provider {
                Provider::Instance(instance)
                | Provider::Singleton {
                    instance: Some(instance),
                    ..
                } => {
                    debug!(service = service_name, "resolved cached instance");
                    return Self::downcast::<T>(instance, service_name);
                }
                Provider::Singleton {
                    factory,
                    instance: None,
                } => (Arc::clone(factory), Lifetime::Singleton),
                Provider::Factory(factory) => (Arc::clone(factory), Lifetime::Factory),
            }
        };

        let created = {
            let _guard = self.enter(type_id, service_name)?;
            factory(self).map_err(|error| DIError::from_factory(service_name, error))?
        };
        debug!(service = service_name, ?lifetime, "created instance");

        if lifetime == Lifetime::Singleton {
            let mut services = self.services.write();
            if let Some(ServiceEntry {
                provider: Provider::Singleton { instance, .. },
                ..
            }) = services.get_mut(&type_id)
            {
                let cached = instance.get_or_insert_with(|| Arc::clone(&created));
                return Self::downcast::<T>(cached, service_name);
            }
        }

        Self::downcast::<T>(&created, service_name)
    }

    /// Попытаться разрешить зависимость (None при любой ошибке)
    pub fn try_resolve<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.resolve::<T>().ok()
    }

    pub fn is_registered<T>(&self) -> bool
    where
        T: ?Sized + 'static,
    {
        self.services.read().contains_key(&TypeId::of::<T>())
    }

    pub fn lifetime_of<T>(&self) -> Option<Lifetime>
    where
        T: ?Sized + 'static,
    {
        self.services
            .read()
            .get(&TypeId::of::<T>())
            .map(|entry| entry.provider.lifetime())
    }

    pub fn service_count(&self) -> usize {
        self.services.read().len()
    }

    /// Имена зарегистрированных capability (для отладки)
    pub fn registered_services(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .services
            .read()
            .values()
            .map(|entry| entry.service_name)
            .collect();
        names.sort_unstable();
        names
    }

    fn insert<T>(&self, provider: Provider) -> DIResult<()>
    where
        T: ?Sized + 'static,
    {
        let type_id = TypeId::of::<T>();
        let service_name = type_name::<T>();
        let lifetime = provider.lifetime();

        let mut services = self.services.write();
        if services.get(&type_id).is_some_and(|entry| entry.resolved) {
            return Err(DIError::RegistrationAfterResolution {
                service: service_name.to_string(),
            });
        }
        services.insert(
            type_id,
            ServiceEntry {
                service_name,
                provider,
                resolved: false,
            },
        );

        debug!(service = service_name, ?lifetime, "registered service");
        Ok(())
    }

    fn erase<T, F>(factory: F) -> ErasedFactory
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&DIContainer) -> anyhow::Result<Arc<T>> + Send + Sync + 'static,
    {
        Arc::new(move |container: &DIContainer| -> anyhow::Result<ErasedArc> {
            let instance: Arc<T> = factory(container)?;
            Ok(Arc::new(instance) as ErasedArc)
        })
    }

    fn downcast<T>(erased: &ErasedArc, service_name: &str) -> DIResult<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        (**erased)
            .downcast_ref::<Arc<T>>()
            .cloned()
            .ok_or_else(|| DIError::TypeMismatch {
                service: service_name.to_string(),
            })
    }

    fn enter(&self, type_id: TypeId, service_name: &'static str) -> DIResult<ResolutionGuard<'_>> {
        let mut stack = self.resolving.lock();
        if let Some(position) = stack.iter().position(|(id, _)| *id == type_id) {
            let mut chain: Vec<String> = stack[position..]
                .iter()
                .map(|(_, name)| name.to_string())
                .collect();
            chain.push(service_name.to_string());
            return Err(DIError::CyclicDependency { chain });
        }
        stack.push((type_id, service_name));
        Ok(ResolutionGuard {
            stack: &self.resolving,
        })
    }
}

/// Снимает ключ со стека разрешения на любом пути выхода
struct ResolutionGuard<'a> {
    stack: &'a Mutex<Vec<(TypeId, &'static str)>>,
}

impl Drop for ResolutionGuard<'_> {
    fn drop(&mut self) {
        self.stack.lock().pop();
    }
}

impl std::fmt::Debug for DIContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DIContainer")
            .field("services", &self.registered_services())
            .finish()
    }
}
