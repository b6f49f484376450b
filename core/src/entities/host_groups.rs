//! Host-group resource: named collections of hosts.

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
    name: "host_groups.list",
    candidates: &[PathCandidate::get("/host_groups")],
    params: &["search", "order"],
};

pub const SHOW: Operation = Operation {
    name: "host_groups.show",
    candidates: &[PathCandidate::get("/host_groups/{id}")],
    params: &[],
};

pub const CREATE: Operation = Operation {
    name: "host_groups.create",
    candidates: &[PathCandidate::post("/host_groups")],
    params: &["name", "description"],
};

pub const UPDATE: Operation = Operation {
    name: "host_groups.update",
    candidates: &[PathCandidate::put("/host_groups/{id}")],
    params: &["name", "description"],
};

pub const DELETE: Operation = Operation {
    name: "host_groups.delete",
    candidates: &[PathCandidate::delete("/host_groups/{id}")],
    params: &[],
};

/// A host group as the API returns it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HostGroup {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Input for creating a host group.
#[derive(Debug, Clone)]
pub struct NewHostGroup {
    pub name: String,
    pub description: Option<String>,
}

impl IntoArguments for NewHostGroup {
    fn into_arguments(self) -> CallArguments {
        let mut args = CallArguments::new();
        args.insert("name".to_string(), self.name.into());
        if let Some(description) = self.description {
            args.insert("description".to_string(), description.into());
        }
        args
    }
}

/// Partial update; unset fields are left untouched by the server.
#[derive(Debug, Clone, Default)]
pub struct HostGroupUpdate {
    pub name: FieldValue<String>,
    pub description: FieldValue<String>,
}

impl IntoArguments for HostGroupUpdate {
    fn into_arguments(self) -> CallArguments {
        let mut args = CallArguments::new();
        if let Some(value) = self.name.into_param() {
            args.insert("name".to_string(), value);
        }
        if let Some(value) = self.description.into_param() {
            args.insert("description".to_string(), value);
        }
        args
    }
}

/// Host-group operations over a router.
#[derive(Debug)]
pub struct HostGroups<'a, T> {
    router: &'a RequestRouter<T>,
}

impl<'a, T> HostGroups<'a, T> {
    pub(crate) fn new(router: &'a RequestRouter<T>) -> Self {
        Self { router }
    }
}

impl<T: Transport> HostGroups<'_, T> {
    pub fn list(&self, args: &CallArguments) -> Result<HttpResponse, DispatchError> {
        self.router.dispatch(&LIST, args)
    }

    pub fn show(&self, id: u64) -> Result<HttpResponse, DispatchError> {
        self.router.dispatch(&SHOW, &id_args(id))
    }

    pub fn create(&self, group: NewHostGroup) -> Result<HttpResponse, DispatchError> {
        self.router.dispatch(&CREATE, &group.into_arguments())
    }

    pub fn update(
        &self,
        id: u64,
        update: HostGroupUpdate,
    ) -> Result<HttpResponse, DispatchError> {
        let mut args = update.into_arguments();
        args.insert("id".to_string(), id.into());
        self.router.dispatch(&UPDATE, &args)
    }

    pub fn delete(&self, id: u64) -> Result<HttpResponse, DispatchError> {
        self.router.dispatch(&DELETE, &id_args(id))
    }
}
