//! Ephemeral debug container attachment: image choice, target container,
//! and the resulting `kubectl debug` invocation.

use crate::config::DebugConfig;
use crate::error::ApiError;
use crate::kubectl::{Invocation, Kubectl, NamespaceScope};
use tracing::{debug, warn};

const JSONPATH_IMAGES: &str = "jsonpath={.items[*].spec.containers[*].image}";

/// How the debug image was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    Explicit,
    Fast,
    /// Already running somewhere in the cluster, so likely pullable.
    Detected,
    Fallback,
}

#[derive(Debug, Clone, Default)]
pub struct DebugRequest {
    pub pod: String,
    pub namespace: Option<String>,
    pub image: Option<String>,
    pub container: Option<String>,
    pub fast: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugPlan {
    pub pod: String,
    pub namespace: Option<String>,
    pub image: String,
    pub image_source: ImageSource,
    /// Container whose process namespace the debug container joins.
    pub target: Option<String>,
}

impl DebugPlan {
    pub fn invocation(&self) -> Invocation {
        let mut invocation = Invocation::new(["debug", "-it", self.pod.as_str()]).namespace(
            NamespaceScope::or_default(self.namespace.clone()),
        );
        invocation = invocation.arg(format!("--image={}", self.image));
        if let Some(target) = &self.target {
            invocation = invocation.arg(format!("--target={}", target));
        }
        invocation
    }

    pub fn is_heavy_image(&self, config: &DebugConfig) -> bool {
        image_repository(&self.image) == image_repository(&config.full_image)
    }
}

/// Image choice without cluster access. `cluster_images` is the
/// whitespace-separated image list of running pods, when it could be read.
pub fn select_image(
    explicit: Option<&str>,
    fast: bool,
    cluster_images: Option<&str>,
    config: &DebugConfig,
) -> (String, ImageSource) {
    if let Some(image) = explicit.filter(|i| !i.trim().is_empty()) {
        return (image.to_string(), ImageSource::Explicit);
    }
    if fast {
        return (config.fast_image.clone(), ImageSource::Fast);
    }
    if let Some(images) = cluster_images {
        let images = images.to_lowercase();
        for candidate in [&config.full_image, &config.alpine_image] {
            let repository = image_repository(candidate).to_lowercase();
            if images.split_whitespace().any(|i| image_repository(i) == repository) {
                return (candidate.clone(), ImageSource::Detected);
            }
        }
    }
    (config.fast_image.clone(), ImageSource::Fallback)
}

/// Image reference without tag or digest (`docker.io/nicolaka/netshoot:latest` -> `docker.io/nicolaka/netshoot`).
pub fn image_repository(image: &str) -> &str {
    let image = image.split('@').next().unwrap_or(image);
    let name_start = image.rfind('/').map_or(0, |i| i + 1);
    match image[name_start..].find(':') {
        Some(colon) => &image[..name_start + colon],
        None => image,
    }
}

pub fn plan_debug(
    kubectl: &Kubectl,
    config: &DebugConfig,
    request: &DebugRequest,
) -> Result<DebugPlan, ApiError> {
    if request.pod.is_empty() {
        return Err(ApiError::InvalidArgument("pod name is required".to_string()));
    }

    let needs_lookup = request.image.as_deref().map_or(true, |i| i.trim().is_empty()) && !request.fast;
    let cluster_images = if needs_lookup {
        running_cluster_images(kubectl)
    } else {
        None
    };
    let (image, image_source) = select_image(
        request.image.as_deref(),
        request.fast,
        cluster_images.as_deref(),
        config,
    );

    let target = match &request.container {
        Some(container) if !container.is_empty() => Some(container.clone()),
        _ => first_container(kubectl, request),
    };

    debug!(pod = %request.pod, image = %image, source = ?image_source, target = ?target, "Debug plan");
    Ok(DebugPlan {
        pod: request.pod.clone(),
        namespace: request.namespace.clone(),
        image,
        image_source,
        target,
    })
}

fn running_cluster_images(kubectl: &Kubectl) -> Option<String> {
    let invocation = Invocation::new(["get", "pods"])
        .namespace(NamespaceScope::All)
        .args(["-o", JSONPATH_IMAGES]);
    match kubectl.capture(invocation) {
        Ok(images) => Some(images),
        Err(e) => {
            warn!(error = %e, "Could not list cluster images, using fallback debug image");
            None
        }
    }
}

fn first_container(kubectl: &Kubectl, request: &DebugRequest) -> Option<String> {
    match kubectl.container_names(
        &request.pod,
        NamespaceScope::or_default(request.namespace.clone()),
    ) {
        Ok(names) => names.into_iter().next(),
        Err(e) => {
            warn!(pod = %request.pod, error = %e, "Could not read pod containers");
            None
        }
    }
}
