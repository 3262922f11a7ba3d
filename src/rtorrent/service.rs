use std::sync::Arc;
use tracing::{debug, warn};

use crate::core::error::{DecodeError, RpcError};
use crate::models::SystemSnapshot;
use crate::projection::{project_calls, project_rows, Record};
use crate::request::{MulticallRequest, SystemRequest};
use crate::xmlrpc::{Invoker, Value};

/// Typed operations against one rTorrent daemon
///
/// Built once at startup and shared by every handler.
pub struct Rtorrent {
    invoker: Arc<dyn Invoker>,
}

impl Rtorrent {
    pub fn new(invoker: Arc<dyn Invoker>) -> Self {
        Self { invoker }
    }

    /// Names of every RPC method the daemon exposes
    pub async fn list_methods(&self) -> Result<Vec<String>, RpcError> {
        let result = self.invoker.call("system.listMethods", Vec::new()).await?;

        let items = result.as_array().ok_or_else(|| {
            DecodeError::UnexpectedShape(format!(
                "system.listMethods returned {}",
                result.kind()
            ))
        })?;

        let methods = items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    DecodeError::UnexpectedShape(format!(
                        "system.listMethods entry is {}",
                        item.kind()
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(methods)
    }

    /// Load raw .torrent contents and start the download
    pub async fn load_raw_start(&self, data: Vec<u8>) -> Result<(), RpcError> {
        let size = data.len();
        self.invoker
            .call(
                "load.raw_start_verbose",
                vec![Value::from(""), Value::Base64(data)],
            )
            .await?;

        debug!(bytes = size, "Torrent loaded");
        Ok(())
    }

    pub async fn start(&self, hash: &str) -> Result<(), RpcError> {
        self.invoker.call("d.start", vec![Value::from(hash)]).await?;
        Ok(())
    }

    pub async fn stop(&self, hash: &str) -> Result<(), RpcError> {
        self.invoker.call("d.stop", vec![Value::from(hash)]).await?;
        Ok(())
    }

    /// Run a multicall and project every row onto `T`
    pub async fn multicall<T: Record>(&self, request: &MulticallRequest) -> Result<Vec<T>, RpcError> {
        debug_assert_eq!(T::KIND, request.kind());

        let result = self.invoker.call(request.method(), request.params()).await?;
        let records = project_rows::<T, _>(&result, request.selectors())?;

        debug!(
            kind = %request.kind(),
            selectors = request.selectors().len(),
            records = records.len(),
            "Multicall projected"
        );

        Ok(records)
    }

    /// Fetch the global snapshot with one `system.multicall`
    pub async fn system(&self, request: &SystemRequest) -> Result<SystemSnapshot, RpcError> {
        let result = self
            .invoker
            .call("system.multicall", request.params())
            .await?;

        let result = clear_faulted_calls(result, request.calls());

        Ok(project_calls(&result, request.calls())?)
    }
}

/// `system.multicall` reports a failed inner call as a fault struct in place
/// of its result row. Such rows become a nil singleton so the field keeps its
/// zero value, the same as a method the record does not know about.
fn clear_faulted_calls(result: Value, calls: &[String]) -> Value {
    let rows = match result {
        Value::Array(rows) => rows,
        other => return other,
    };

    let rows = rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| match row {
            Value::Struct(_) => {
                let code = match row.member("faultCode") {
                    Some(Value::Int(code)) => *code,
                    _ => 0,
                };
                let fault = row
                    .member("faultString")
                    .and_then(Value::as_str)
                    .unwrap_or("");
                let method = calls.get(index).map(String::as_str).unwrap_or("?");
                warn!(
                    method = method,
                    fault_code = code,
                    fault = fault,
                    "Call in system.multicall failed, leaving field empty"
                );
                Value::Array(vec![Value::Nil])
            }
            other => other,
        })
        .collect();

    Value::Array(rows)
}
