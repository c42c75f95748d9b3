//! Commands run inside a pod container.

use crate::kubectl::{Invocation, NamespaceScope};

/// `kubectl exec [-n ns] <pod> [-c container] -- <command...>`
pub fn exec_invocation(
    pod: &str,
    namespace: Option<String>,
    container: Option<&str>,
    command: &[String],
) -> Invocation {
    let mut invocation = Invocation::new(["exec"])
        .namespace(NamespaceScope::or_default(namespace))
        .arg(pod);
    if let Some(container) = container {
        invocation = invocation.args(["-c", container]);
    }
    invocation.arg("--").args(command.iter().cloned())
}

/// `dig` run through the pod's `sh`, so the image needs `dig` installed.
/// Query words are joined as typed.
pub fn dig_invocation(
    pod: &str,
    namespace: Option<String>,
    container: Option<&str>,
    query: &[String],
) -> Invocation {
    let mut script = String::from("dig");
    for word in query {
        script.push(' ');
        script.push_str(word);
    }
    let mut invocation = Invocation::new(["exec", "-it"])
        .namespace(NamespaceScope::or_default(namespace))
        .arg(pod);
    if let Some(container) = container {
        invocation = invocation.args(["-c", container]);
    }
    invocation.args(["--", "sh", "-c"]).arg(script)
}
