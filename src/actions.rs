//! Workload actions
//!
//! Commands that change or enter workloads rather than read them: exec and
//! shell sessions, DNS lookups from inside a pod, port forwarding, edits with
//! a backup, and manifest apply. Each builds the kubectl invocation and checks
//! what can be checked locally before kubectl runs.

pub mod apply;
pub mod attach;
pub mod edit;
pub mod exec;
pub mod forward;

pub use apply::{ApplyRequest, ApplySource, DryRun};
pub use attach::{attach_shell, ShellTarget, SHELLS};
pub use edit::{backup_file_name, write_backup, EditFormat, EditRequest};
pub use exec::{dig_invocation, exec_invocation};
pub use forward::{ensure_port_free, forward_invocation, PortMapping};
