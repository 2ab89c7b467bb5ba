//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/residents/{resident_id}', use [format_endpoint].

/// The root route which reports that the server is running.
pub const ROOT: &str = "/";
/// The route to create and list residents.
pub const RESIDENTS: &str = "/residents";
/// The route to read, update and delete a single resident.
pub const RESIDENT: &str = "/residents/{resident_id}";
/// The route to create and list goals.
pub const GOALS: &str = "/goals";
/// The route to update and delete a single goal.
pub const GOAL: &str = "/goals/{goal_id}";
/// The route to post and list transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route to list the transactions of a single resident.
pub const RESIDENT_TRANSACTIONS: &str = "/transactions/resident/{resident_id}";
/// The route to update and delete a single transaction.
pub const TRANSACTION: &str = "/transactions/{transaction_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/goals/{goal_id}', '{goal_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::RESIDENTS);
        assert_endpoint_is_valid_uri(endpoints::RESIDENT);
        assert_endpoint_is_valid_uri(endpoints::GOALS);
        assert_endpoint_is_valid_uri(endpoints::GOAL);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS);
        assert_endpoint_is_valid_uri(endpoints::RESIDENT_TRANSACTIONS);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTION);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint(endpoints::RESIDENT, 1);

        assert_eq!(formatted_path, "/residents/1");
        assert!(formatted_path.parse::<Uri>().is_ok());

        // Parameter with single word should also work.
        let formatted_path = format_endpoint("/goals/{goal}", 1);

        assert_eq!(formatted_path, "/goals/1");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint(endpoints::TRANSACTIONS, 1);

        assert_eq!(formatted_path, "/transactions");
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/residents/{resident_id}/goals", 12);

        assert_eq!(formatted_path, "/residents/12/goals");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn parameter_at_end_of_nested_path() {
        let formatted_path = format_endpoint(endpoints::RESIDENT_TRANSACTIONS, 3);

        assert_eq!(formatted_path, "/transactions/resident/3");
    }
}
