//! Bucket resource handler.

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

/// Kind tag for bucket resources.
pub const BUCKET_KIND: &str = "Bucket";

const NAME_PREFIX: &str = "bucket";
const PROVISIONER: &str = "buckets.claimbroker.dev";

const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_STORAGE_CLASS: &str = "standard";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct BucketSpec {
    region: String,
    storage_class: String,
    versioning: bool,
}

impl BucketSpec {
    fn from_parameters(parameters: &BTreeMap<String, String>) -> Result<Self, ParameterError> {
        let region = parameters
            .get("region")
            .cloned()
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        let storage_class = parameters
            .get("storageClass")
            .cloned()
            .unwrap_or_else(|| DEFAULT_STORAGE_CLASS.to_string());
        let versioning = match parameters.get("versioning") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ParameterError::new("versioning", raw))?,
            None => false,
        };
        Ok(Self {
            region,
            storage_class,
            versioning,
        })
    }
}

/// Handler for bucket provisioning and binding.
#[derive(Debug, Clone, Copy, Default)]
pub struct BucketHandler;

#[async_trait]
impl<S: StoreClient> ResourceHandler<S> for BucketHandler {
    fn kind(&self) -> &'static str {
        BUCKET_KIND
    }

    async fn find(
        &self,
        key: &ObjectKey,
        store: &S,
        context: &RequestContext,
    ) -> Result<Resource, HandlerError> {
        find_object(BUCKET_KIND, key, store, context).await
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

        let spec = BucketSpec::from_parameters(&class.parameters)
            .map_err(|e| HandlerError::creation(BUCKET_KIND, &key, e))?;
        let payload = to_payload(&spec).map_err(|e| HandlerError::creation(BUCKET_KIND, &key, e))?;

        let resource = assemble_resource(name, PROVISIONER, class, claim, payload);
        create_object(BUCKET_KIND, resource, store, context).await
    }

    async fn set_bind_status(
        &self,
        key: &ObjectKey,
        store: &S,
        bound: bool,
        context: &RequestContext,
    ) -> Result<(), HandlerError> {
        update_bind_status(BUCKET_KIND, key, store, bound, context).await
    }
}
