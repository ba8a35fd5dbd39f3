//! Backend clients shared with every screen through a context provider.

use std::rc::Rc;

use shared::{BackendConfig, DataClient, HostedAuthClient};
use yew::{hook, use_context, use_memo};

#[derive(Debug, Clone)]
pub struct Services {
    pub auth: Rc<HostedAuthClient>,
    pub data: DataClient,
}

impl Services {
    pub fn new(config: BackendConfig) -> Self {
        let auth = Rc::new(HostedAuthClient::new(config));
        let data = DataClient::new(Rc::clone(&auth));
        Self { auth, data }
    }

    /// Clients configured from the values baked into the bundle.
    pub fn from_build_env() -> Self {
        Self::new(BackendConfig::from_build_env())
    }
}

impl PartialEq for Services {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.auth, &other.auth)
    }
}

/// The services provided by the composition root. Outside a provider an
/// unconfigured set is returned, so every call fails with `NotConfigured`.
#[hook]
pub fn use_services() -> Services {
    let fallback = use_memo((), |_| Services::new(BackendConfig::default()));
    use_context::<Services>().unwrap_or_else(|| (*fallback).clone())
}
