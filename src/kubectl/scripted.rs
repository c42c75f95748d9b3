//! In-memory runner that replays canned kubectl output and records calls.

use super::{Invocation, KubectlRunner};
use crate::error::ApiError;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone)]
enum Reply {
    Stdout(String),
    Failure(String),
}

#[derive(Debug, Default)]
struct Script {
    replies: Vec<(Vec<String>, Reply)>,
    calls: Vec<Vec<String>>,
    interactive: Vec<Vec<String>>,
}

/// Scripted [`KubectlRunner`].
///
/// Replies are matched by argument prefix (ignoring `--kubeconfig <path>`);
/// the first registered match wins and unmatched calls return empty stdout.
/// Clones share the same script, so a test can keep one handle and give
/// another to the code under test.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRunner {
    script: Rc<RefCell<Script>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond<I, S>(self, prefix: I, stdout: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(prefix, Reply::Stdout(stdout.into()))
    }

    pub fn fail<I, S>(self, prefix: I, stderr: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(prefix, Reply::Failure(stderr.into()))
    }

    fn push<I, S>(self, prefix: I, reply: Reply) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prefix = prefix.into_iter().map(Into::into).collect();
        self.script.borrow_mut().replies.push((prefix, reply));
        self
    }

    /// Full argument vectors of every captured call, in order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.script.borrow().calls.clone()
    }

    /// Full argument vectors of every interactive call, in order.
    pub fn interactive_calls(&self) -> Vec<Vec<String>> {
        self.script.borrow().interactive.clone()
    }

    fn reply_for(&self, invocation: &Invocation) -> Option<Reply> {
        let args = invocation.command_args();
        self.script
            .borrow()
            .replies
            .iter()
            .find(|(prefix, _)| args.starts_with(prefix))
            .map(|(_, reply)| reply.clone())
    }
}

impl KubectlRunner for ScriptedRunner {
    fn capture(&self, invocation: &Invocation) -> Result<String, ApiError> {
        self.script.borrow_mut().calls.push(invocation.to_args());
        match self.reply_for(invocation) {
            Some(Reply::Stdout(out)) => Ok(out),
            Some(Reply::Failure(stderr)) => Err(ApiError::KubectlFailed {
                status: "exit status 1".to_string(),
                stderr,
            }),
            None => Ok(String::new()),
        }
    }

    fn interactive(&self, invocation: &Invocation) -> Result<(), ApiError> {
        self.script.borrow_mut().interactive.push(invocation.to_args());
        match self.reply_for(invocation) {
            Some(Reply::Failure(stderr)) => Err(ApiError::KubectlFailed {
                status: "exit status 1".to_string(),
                stderr,
            }),
            _ => Ok(()),
        }
    }
}
