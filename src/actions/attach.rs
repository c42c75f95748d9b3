//! Interactive shell in a pod, trying the richer shells first.

use crate::error::ApiError;
use crate::kubectl::{Invocation, Kubectl, NamespaceScope};
use tracing::debug;

/// Shells tried in order.
pub const SHELLS: [&str; 3] = ["bash", "zsh", "sh"];

#[derive(Debug, Clone, Default)]
pub struct ShellTarget {
    pub pod: String,
    pub namespace: Option<String>,
    pub container: Option<String>,
}

impl ShellTarget {
    pub fn invocation(&self, shell: &str) -> Invocation {
        let mut invocation = Invocation::new(["exec", "-it"])
            .namespace(NamespaceScope::or_default(self.namespace.clone()))
            .arg(self.pod.as_str());
        if let Some(container) = &self.container {
            invocation = invocation.args(["-c", container.as_str()]);
        }
        invocation.args(["--", shell])
    }
}

/// Run the first shell the container accepts and return its name once the
/// session ends. A missing kubectl stops the search at once.
pub fn attach_shell(kubectl: &Kubectl, target: &ShellTarget) -> Result<&'static str, ApiError> {
    for shell in SHELLS {
        eprintln!("Trying to attach with {}...", shell);
        match kubectl.interactive(target.invocation(shell)) {
            Ok(()) => return Ok(shell),
            Err(ApiError::KubectlFailed { status, .. }) => {
                debug!(shell, status = %status, "Shell session failed");
                eprintln!("{} not available, trying next shell...", shell);
            }
            Err(e) => return Err(e),
        }
    }
    Err(ApiError::NoShell {
        pod: target.pod.clone(),
        namespace: target.namespace.clone(),
    })
}
