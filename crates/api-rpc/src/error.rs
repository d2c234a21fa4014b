//! RPC Error Types
//!
//! Maps application errors to JSON-RPC error codes. User-facing
//! rejections are NOT errors; they ride in the join response payload.

use jsonrpsee::types::ErrorObjectOwned;
use muster_core::domain::DomainError;
use muster_core::error::AppError;

/// RPC Error Codes
pub mod code {
    pub const VALIDATION_ERROR: i32 = 4000;
    pub const NOT_FOUND: i32 = 4001;
    pub const CONFLICT: i32 = 4002;
    pub const THROTTLED: i32 = 4003;
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const CONTENT_ERROR: i32 = 5001;
    pub const SYSTEM_ERROR: i32 = 5002;
}

/// Convert AppError to JSON-RPC ErrorObject
pub fn to_rpc_error(err: AppError) -> ErrorObjectOwned {
    match err {
        AppError::Domain(e) => domain_to_rpc_error(e),
        AppError::Validation(msg) => {
            ErrorObjectOwned::owned(code::VALIDATION_ERROR, msg, None::<()>)
        }
        AppError::NotFound(msg) => ErrorObjectOwned::owned(code::NOT_FOUND, msg, None::<()>),
        AppError::Conflict(msg) => ErrorObjectOwned::owned(code::CONFLICT, msg, None::<()>),
        AppError::Content(msg) => ErrorObjectOwned::owned(code::CONTENT_ERROR, msg, None::<()>),
        AppError::Io(e) => ErrorObjectOwned::owned(code::SYSTEM_ERROR, e.to_string(), None::<()>),
        AppError::Serialization(e) => {
            ErrorObjectOwned::owned(code::VALIDATION_ERROR, e.to_string(), None::<()>)
        }
        AppError::Config(msg) => ErrorObjectOwned::owned(code::INTERNAL_ERROR, msg, None::<()>),
        AppError::Internal(msg) => ErrorObjectOwned::owned(code::INTERNAL_ERROR, msg, None::<()>),
    }
}

fn domain_to_rpc_error(err: DomainError) -> ErrorObjectOwned {
    let code = match err {
        DomainError::ActorNotFound(_) | DomainError::TicketNotFound { .. } => code::NOT_FOUND,
        DomainError::ActorAlreadyAttached(_) | DomainError::SlotTableFull(_) => code::CONFLICT,
        DomainError::UnknownActivity(_)
        | DomainError::BracketNotFound { .. }
        | DomainError::RatedJoinPath => code::VALIDATION_ERROR,
    };
    ErrorObjectOwned::owned(code, err.to_string(), None::<()>)
}

/// Throttle rejection (produced by the RPC layer itself)
pub fn throttled() -> ErrorObjectOwned {
    ErrorObjectOwned::owned(
        code::THROTTLED,
        "Join rate limit exceeded. Please slow down.",
        None::<()>,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_not_found_maps_to_4001() {
        let err = AppError::Domain(DomainError::ActorNotFound(7));
        assert_eq!(to_rpc_error(err).code(), code::NOT_FOUND);
    }

    #[test]
    fn configuration_faults_map_to_4000() {
        let err = AppError::Domain(DomainError::UnknownActivity(9999));
        assert_eq!(to_rpc_error(err).code(), code::VALIDATION_ERROR);
    }

    #[test]
    fn throttle_uses_4003() {
        assert_eq!(throttled().code(), code::THROTTLED);
    }
}
