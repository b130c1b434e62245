//! Deal Errors

use salvo::http::StatusError;

use deals_app::deals::{DealsServiceError, ErrorKind};

use crate::observability::observe_deal_operation;

const SUCCESS_OUTCOME: &str = "success";

pub(crate) fn into_status_error(error: DealsServiceError) -> StatusError {
    let brief = error.to_string();

    if error.is_forbidden() {
        return StatusError::forbidden().brief(brief);
    }

    match error.kind() {
        ErrorKind::InvalidInput => StatusError::bad_request().brief(brief),
        ErrorKind::NotFound => StatusError::not_found().brief(brief),
        ErrorKind::Conflict => StatusError::conflict().brief(brief),
        ErrorKind::Throttled => StatusError::too_many_requests().brief(brief),
        ErrorKind::InternalError => StatusError::internal_server_error().brief(brief),
    }
}

/// Count the outcome of a deal operation and map failures onto HTTP errors.
pub(crate) fn observed<T>(
    operation: &str,
    result: Result<T, DealsServiceError>,
) -> Result<T, StatusError> {
    match result {
        Ok(value) => {
            observe_deal_operation(operation, SUCCESS_OUTCOME);

            Ok(value)
        }
        Err(error) => {
            observe_deal_operation(operation, error.kind().as_str());

            Err(into_status_error(error))
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use deals_app::deals::{records::DealUuid, validation::ValidationError};

    use super::*;

    #[test]
    fn maps_error_kinds_to_status_codes() {
        let cases = [
            (
                DealsServiceError::from(ValidationError::InvalidValue),
                StatusCode::BAD_REQUEST,
            ),
            (
                DealsServiceError::from(ValidationError::ImmutableField),
                StatusCode::FORBIDDEN,
            ),
            (
                DealsServiceError::NotFound(DealUuid::new()),
                StatusCode::NOT_FOUND,
            ),
            (
                DealsServiceError::NameTaken {
                    name: "Acme".to_string(),
                },
                StatusCode::CONFLICT,
            ),
            (DealsServiceError::IdCollision, StatusCode::CONFLICT),
            (
                DealsServiceError::Configuration,
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let message = error.to_string();
            let status = into_status_error(error);

            assert_eq!(status.code, expected, "{message}");
            assert_eq!(status.brief, message);
        }
    }

    #[test]
    fn observed_passes_values_through() {
        let result = observed("get", Ok::<_, DealsServiceError>(7));

        assert_eq!(result.ok(), Some(7));
    }
}
