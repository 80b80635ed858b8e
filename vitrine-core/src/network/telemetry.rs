use tracing::{error, info};

use super::NetworkResult;

pub const NETWORK_TARGET: &str = "vitrine::network";

/// Emit the single structured log event for a classified call.
///
/// Success is logged at info. Rejections and transport failures are logged
/// at error; transport failures additionally carry a `transport_kind` field
/// so they can be told apart from server rejections.
pub fn log_outcome<T>(operation: &'static str, result: &NetworkResult<T>) {
    match result {
        NetworkResult::Success(_) => {
            info!(target: NETWORK_TARGET, operation, "request succeeded");
        }
        NetworkResult::Rejected { message, code } => {
            error!(
                target: NETWORK_TARGET,
                operation,
                code = ?code,
                message = message.as_deref().unwrap_or_default(),
                "request rejected"
            );
        }
        NetworkResult::TransportFailure(cause) => {
            error!(
                target: NETWORK_TARGET,
                operation,
                transport_kind = %cause.kind(),
                error = %cause,
                "request failed without a usable response"
            );
        }
    }
}
