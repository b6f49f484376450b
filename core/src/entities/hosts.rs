//! Host resource: inventory machines, optionally grouped.

use serde::Deserialize;

use crate::args::{CallArguments, IntoArguments};
use crate::entities::id_args;
use crate::error::DispatchError;
use crate::field::FieldValue;
use crate::http::HttpResponse;
use crate::route::{Operation, PathCandidate};
use crate::router::RequestRouter;
use crate::transport::Transport;

pub const LIST: Operation = Operation {
    name: "hosts.list",
    candidates: &[
        PathCandidate::get("/host_groups/{host_group_id}/hosts"),
        PathCandidate::get("/hosts"),
    ],
    params: &["search", "order"],
};

pub const SHOW: Operation = Operation {
    name: "hosts.show",
    candidates: &[PathCandidate::get("/hosts/{id}")],
    params: &[],
};

pub const CREATE: Operation = Operation {
    name: "hosts.create",
    candidates: &[
        PathCandidate::post("/host_groups/{host_group_id}/hosts"),
        PathCandidate::post("/hosts"),
    ],
    params: &["name", "comment", "managed", "host_group_id"],
};

pub const UPDATE: Operation = Operation {
    name: "hosts.update",
    candidates: &[PathCandidate::put("/hosts/{id}")],
    params: &["name", "comment", "managed"],
};

pub const DELETE: Operation = Operation {
    name: "hosts.delete",
    candidates: &[PathCandidate::delete("/hosts/{id}")],
    params: &[],
};

/// A host as the API returns it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Host {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub host_group_id: Option<u64>,
    #[serde(default)]
    pub managed: bool,
}

/// Input for creating a host. A `host_group_id` both scopes the request
/// to the nested endpoint and lands in the payload.
#[derive(Debug, Clone)]
pub struct NewHost {
    pub name: String,
    pub comment: Option<String>,
    pub managed: bool,
    pub host_group_id: Option<u64>,
}

impl IntoArguments for NewHost {
    fn into_arguments(self) -> CallArguments {
        let mut args = CallArguments::new();
        args.insert("name".to_string(), self.name.into());
        if let Some(comment) = self.comment {
            args.insert("comment".to_string(), comment.into());
        }
        args.insert("managed".to_string(), self.managed.into());
        if let Some(group) = self.host_group_id {
            args.insert("host_group_id".to_string(), group.into());
        }
        args
    }
}

/// Partial update; unset fields are left untouched by the server.
#[derive(Debug, Clone, Default)]
pub struct HostUpdate {
    pub name: FieldValue<String>,
    pub comment: FieldValue<String>,
    pub managed: FieldValue<bool>,
}

impl IntoArguments for HostUpdate {
    fn into_arguments(self) -> CallArguments {
        let mut args = CallArguments::new();
        if let Some(value) = self.name.into_param() {
            args.insert("name".to_string(), value);
        }
        if let Some(value) = self.comment.into_param() {
            args.insert("comment".to_string(), value);
        }
        if let Some(value) = self.managed.into_param() {
            args.insert("managed".to_string(), value);
        }
        args
    }
}

/// Host operations over a router.
#[derive(Debug)]
pub struct Hosts<'a, T> {
    router: &'a RequestRouter<T>,
}

impl<'a, T> Hosts<'a, T> {
    pub(crate) fn new(router: &'a RequestRouter<T>) -> Self {
        Self { router }
    }
}

impl<T: Transport> Hosts<'_, T> {
    /// Lists hosts; a `host_group_id` argument scopes the listing to
    /// that group's nested endpoint.
    pub fn list(&self, args: &CallArguments) -> Result<HttpResponse, DispatchError> {
        self.router.dispatch(&LIST, args)
    }

    pub fn show(&self, id: u64) -> Result<HttpResponse, DispatchError> {
        self.router.dispatch(&SHOW, &id_args(id))
    }

    pub fn create(&self, host: NewHost) -> Result<HttpResponse, DispatchError> {
        self.router.dispatch(&CREATE, &host.into_arguments())
    }

    pub fn update(&self, id: u64, update: HostUpdate) -> Result<HttpResponse, DispatchError> {
        let mut args = update.into_arguments();
        args.insert("id".to_string(), id.into());
        self.router.dispatch(&UPDATE, &args)
    }

    pub fn delete(&self, id: u64) -> Result<HttpResponse, DispatchError> {
        self.router.dispatch(&DELETE, &id_args(id))
    }
}
