//! Cluster resource handler.

use crate::context::RequestContext;
use crate::error::HandlerError;
use crate::handler::{
    ParameterError, ResourceHandler, assemble_resource, create_object, derive_name, find_object,
    to_payload, update_bind_status,
};
use crate::resource::{Resource, ResourceClaim, ResourceClass};
use crate::store::{ObjectKey, StoreClient};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;

/// Kind tag for cluster resources.
pub const CLUSTER_KIND: &str = "Cluster";

const NAME_PREFIX: &str = "cluster";
const PROVISIONER: &str = "clusters.claimbroker.dev";

const DEFAULT_VERSION: &str = "1.31";
const DEFAULT_NODE_COUNT: u32 = 3;
const DEFAULT_REGION: &str = "us-east-1";

/// Kind-specific spec built from a class's parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClusterSpec {
    version: String,
    node_count: u32,
    region: String,
}

impl ClusterSpec {
    fn from_parameters(parameters: &BTreeMap<String, String>) -> Result<Self, ParameterError> {
        let version = parameters
            .get("version")
            .cloned()
            .unwrap_or_else(|| DEFAULT_VERSION.to_string());
        let node_count = match parameters.get("nodeCount") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ParameterError::new("nodeCount", raw))?,
            None => DEFAULT_NODE_COUNT,
        };
        let region = parameters
            .get("region")
            .cloned()
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        Ok(Self {
            version,
            node_count,
            region,
        })
    }
}

/// Handler for cluster provisioning and binding.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClusterHandler;

#[async_trait]
impl<S: StoreClient> ResourceHandler<S> for ClusterHandler {
    fn kind(&self) -> &'static str {
        CLUSTER_KIND
    }

    async fn find(
        &self,
        key: &ObjectKey,
        store: &S,
        context: &RequestContext,
    ) -> Result<Resource, HandlerError> {
        find_object(CLUSTER_KIND, key, store, context).await
    }

    async fn provision(
        &self,
        class: &ResourceClass,
        claim: &ResourceClaim,
        store: &S,
        context: &RequestContext,
    ) -> Result<Resource, HandlerError> {
        let name = derive_name(NAME_PREFIX, &claim.uid);
        let key = ObjectKey::new(&class.namespace, &name);

        let spec = ClusterSpec::from_parameters(&class.parameters)
            .map_err(|e| HandlerError::creation(CLUSTER_KIND, &key, e))?;
        let payload =
            to_payload(&spec).map_err(|e| HandlerError::creation(CLUSTER_KIND, &key, e))?;

        let resource = assemble_resource(name, PROVISIONER, class, claim, payload);
        create_object(CLUSTER_KIND, resource, store, context).await
    }

    async fn set_bind_status(
        &self,
        key: &ObjectKey,
        store: &S,
        bound: bool,
        context: &RequestContext,
    ) -> Result<(), HandlerError> {
        update_bind_status(CLUSTER_KIND, key, store, bound, context).await
    }
}
