use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::core::error::RpcError;
use crate::xmlrpc::{Invoker, Value};

#[derive(Clone)]
enum Reply {
    Value(Value),
    Fault(i64, String),
    Timeout,
}

/// Canned replies keyed by method name; records every call it receives
#[derive(Default)]
pub struct MockInvoker {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<(String, Vec<Value>)>>,
}

impl MockInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, method: &str, value: Value) -> Self {
        self.replies.insert(method.to_string(), Reply::Value(value));
        self
    }

    pub fn fault(mut self, method: &str, code: i64, message: &str) -> Self {
        self.replies
            .insert(method.to_string(), Reply::Fault(code, message.to_string()));
        self
    }

    pub fn timeout(mut self, method: &str) -> Self {
        self.replies.insert(method.to_string(), Reply::Timeout);
        self
    }

    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Invoker for MockInvoker {
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, RpcError> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), params));

        match self.replies.get(method).cloned() {
            Some(Reply::Value(value)) => Ok(value),
            Some(Reply::Fault(code, message)) => Err(RpcError::Fault { code, message }),
            Some(Reply::Timeout) => Err(RpcError::Timeout),
            None => Err(RpcError::Fault {
                code: -506,
                message: format!("Method '{}' not defined", method),
            }),
        }
    }
}
