//! In-memory stand-ins for the [Repository] and [LegalValues] collaborators.
//!
//! Useful for testing code built on the resource services without an API to talk to.

use std::{future::Future, pin::Pin, sync::Mutex};

use onelogin_common::legal_values::LegalValueSet;

use crate::{
    legal_values::{decode_legal_values, LegalValues},
    repository::{Repository, RepositoryFuture, Request},
    Error,
};

type Handler<T> = Box<dyn Fn(&Request) -> Result<T, Error> + Send + Sync>;

/// The repository operation a request was made with.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Operation {
    /// [Repository::read]
    Read,
    /// [Repository::create]
    Create,
    /// [Repository::update]
    Update,
    /// [Repository::destroy]
    Destroy,
}

/// A [Repository] answering from closures.
///
/// Operations without a handler fail with an unclassified `"error"`.
/// Every request is recorded and available through [MockRepository::requests].
#[derive(Default)]
pub struct MockRepository {
    read: Option<Handler<Vec<Vec<u8>>>>,
    create: Option<Handler<Vec<u8>>>,
    update: Option<Handler<Vec<u8>>>,
    destroy: Option<Handler<Vec<u8>>>,
    requests: Mutex<Vec<(Operation, Request)>>,
}

impl MockRepository {
    /// Answer reads with `handler`, which returns one body per page.
    pub fn on_read(
        mut self,
        handler: impl Fn(&Request) -> Result<Vec<Vec<u8>>, Error> + Send + Sync + 'static,
    ) -> Self {
        self.read = Some(Box::new(handler));
        self
    }

    /// Answer creates with `handler`.
    pub fn on_create(
        mut self,
        handler: impl Fn(&Request) -> Result<Vec<u8>, Error> + Send + Sync + 'static,
    ) -> Self {
        self.create = Some(Box::new(handler));
        self
    }

    /// Answer updates with `handler`.
    pub fn on_update(
        mut self,
        handler: impl Fn(&Request) -> Result<Vec<u8>, Error> + Send + Sync + 'static,
    ) -> Self {
        self.update = Some(Box::new(handler));
        self
    }

    /// Answer destroys with `handler`.
    pub fn on_destroy(
        mut self,
        handler: impl Fn(&Request) -> Result<Vec<u8>, Error> + Send + Sync + 'static,
    ) -> Self {
        self.destroy = Some(Box::new(handler));
        self
    }

    /// The requests received so far, in order.
    pub fn requests(&self) -> Vec<(Operation, Request)> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn dispatch<T>(
        &self,
        operation: Operation,
        handler: &Option<Handler<T>>,
        request: Request,
    ) -> Result<T, Error> {
        let result = match handler {
            Some(handler) => handler(&request),
            None => Err(Error::Unclassified(anyhow::anyhow!("error"))),
        };

        if let Ok(mut requests) = self.requests.lock() {
            requests.push((operation, request));
        }

        result
    }
}

impl Repository for MockRepository {
    fn read(&self, request: Request) -> RepositoryFuture<'_, Vec<Vec<u8>>> {
        let result = self.dispatch(Operation::Read, &self.read, request);
        Box::pin(async move { result })
    }

    fn create(&self, request: Request) -> RepositoryFuture<'_, Vec<u8>> {
        let result = self.dispatch(Operation::Create, &self.create, request);
        Box::pin(async move { result })
    }

    fn update(&self, request: Request) -> RepositoryFuture<'_, Vec<u8>> {
        let result = self.dispatch(Operation::Update, &self.update, request);
        Box::pin(async move { result })
    }

    fn destroy(&self, request: Request) -> RepositoryFuture<'_, Vec<u8>> {
        let result = self.dispatch(Operation::Destroy, &self.destroy, request);
        Box::pin(async move { result })
    }
}

/// [LegalValues] answering from a closure, recording each address asked for.
pub struct MockLegalValues {
    handler: Box<dyn Fn(&str) -> Result<LegalValueSet, Error> + Send + Sync>,
    addresses: Mutex<Vec<String>>,
}

impl MockLegalValues {
    /// Answer every fetch with `handler`, which receives the address.
    pub fn new(
        handler: impl Fn(&str) -> Result<LegalValueSet, Error> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            addresses: Mutex::new(vec![]),
        }
    }

    /// Answer every fetch by decoding the same response body.
    ///
    /// A malformed body makes every fetch fail the way a real response would.
    pub fn respond_with(body: impl Into<String>) -> Self {
        let body = body.into();
        Self::new(move |_| decode_legal_values(body.as_bytes()))
    }

    /// Answer every fetch with no legal values, accepting anything.
    pub fn unconstrained() -> Self {
        Self::new(|_| Ok(LegalValueSet::default()))
    }

    /// The addresses fetched so far, in order.
    pub fn addresses(&self) -> Vec<String> {
        self.addresses
            .lock()
            .map(|addresses| addresses.clone())
            .unwrap_or_default()
    }
}

impl LegalValues for MockLegalValues {
    fn fetch<'a>(
        &'a self,
        address: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<LegalValueSet, Error>> + Send + 'a>> {
        if let Ok(mut addresses) = self.addresses.lock() {
            addresses.push(address.to_string());
        }
        let result = (self.handler)(address);
        Box::pin(async move { result })
    }
}
