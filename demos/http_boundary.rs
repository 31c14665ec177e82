//! A small service laid out in three layers, showing where each part of
//! an [`errorx::Error`] is produced and where it is consumed.
//!
//! - `domain`: the application's error catalog and constructors
//! - `db`: a data-access call that wraps a driver failure
//! - `server`: the boundary that picks a status and logs diagnostics
//!
//! Run with `cargo run --example http_boundary`.

use std::error::Error as StdError;

mod domain {
    use errorx::{Error, ErrorOption, ErrorType, with_caller, with_internal, with_type};
    use std::error::Error as StdError;

    pub const INVALID_PARAMS: ErrorType = ErrorType::new(1);
    pub const UNAUTHORIZED: ErrorType = ErrorType::new(2);
    pub const APPLICATION: ErrorType = ErrorType::new(3);

    const INVALID_PARAMS_TEXT: &str = "Invalid params";
    const DATABASE_TEXT: &str = "Unknown server error";
    const UNAUTHORIZED_TEXT: &str = "Unauthorized";

    /// Hide a driver failure behind a generic message. The caller recorded is
    /// the line in the repository that called this helper.
    #[track_caller]
    pub fn wrap_db_error<E>(err: E, options: impl IntoIterator<Item = ErrorOption>) -> Error
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Error::new(
            DATABASE_TEXT,
            [with_internal(err), with_caller()].into_iter().chain(options),
        )
    }

    pub fn unauthorized() -> Error {
        Error::new(UNAUTHORIZED_TEXT, [with_type(UNAUTHORIZED)])
    }

    pub fn invalid_params<E>(err: E) -> Error
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Error::new(
            INVALID_PARAMS_TEXT,
            [with_type(INVALID_PARAMS), with_internal(err)],
        )
    }
}

mod db {
    use super::domain;
    use errorx::with_int;
    use std::io;

    pub type Row = Vec<(String, String)>;

    pub fn some_data_request(id: i64) -> errorx::Result<Row> {
        exec_sql("SELECT * FROM table_name WHERE id = ?", id)
            .map_err(|err| domain::wrap_db_error(err, [with_int("id", id)]))
    }

    fn exec_sql(_sql: &str, _id: i64) -> io::Result<Row> {
        Err(io::Error::new(io::ErrorKind::ConnectionRefused, "any db error"))
    }
}

mod server {
    use super::domain;
    use errorx::as_error;
    use std::error::Error as StdError;

    /// Status and body as they would go on the wire.
    pub struct Response {
        pub status: u16,
        pub body: String,
    }

    /// Only the message reaches the client; everything else goes to the log.
    pub fn write_error(err: &(dyn StdError + 'static)) -> Response {
        let Some(errx) = as_error(err) else {
            eprintln!("unknown error type: {}", err);
            return Response {
                status: 500,
                body: err.to_string(),
            };
        };

        match errx.json_string() {
            Ok(json) => eprintln!("error: {} fields: {}", err, json),
            Err(json_err) => eprintln!("error: {} (fields unavailable: {})", err, json_err),
        }
        errx.with_log_record(|record| eprintln!("  {}", record));

        let status = match errx.kind() {
            domain::APPLICATION => 200,
            domain::INVALID_PARAMS => 400,
            domain::UNAUTHORIZED => 401,
            _ => 500,
        };

        Response {
            status,
            body: err.to_string(),
        }
    }
}

fn report(label: &str, err: &(dyn StdError + 'static)) {
    let response = server::write_error(err);
    println!("{:<16} -> {} {}", label, response.status, response.body);
}

fn main() {
    report("unauthorized", &domain::unauthorized());
    report(
        "invalid params",
        &domain::invalid_params("some param is invalid"),
    );

    if let Err(err) = db::some_data_request(42) {
        report("data request", &err);
    }

    let foreign = std::io::Error::other("upstream timed out");
    report("foreign", &foreign);
}

#[cfg(test)]
mod tests {
    use super::*;
    use errorx::{CALLER_KEY, as_error};

    #[test]
    fn catalog_maps_to_status() {
        assert_eq!(server::write_error(&domain::unauthorized()).status, 401);
        assert_eq!(server::write_error(&domain::invalid_params("bad")).status, 400);
        let app = errorx::Error::new("done", [errorx::with_type(domain::APPLICATION)]);
        assert_eq!(server::write_error(&app).status, 200);
    }

    #[test]
    fn db_failure_is_hidden_but_recorded() {
        let err = db::some_data_request(42).unwrap_err();
        let response = server::write_error(&err);
        assert_eq!(response.status, 500);
        assert_eq!(response.body, "Unknown server error");

        let errx = as_error(&err).unwrap();
        assert_eq!(errx.internal().unwrap().to_string(), "any db error");
        assert_eq!(errx.field("id"), Some("42"));
        assert!(errx.field(CALLER_KEY).unwrap().starts_with("demos/http_boundary.rs:"));
    }

    #[test]
    fn foreign_errors_are_internal() {
        let response = server::write_error(&std::io::Error::other("boom"));
        assert_eq!(response.status, 500);
        assert_eq!(response.body, "boom");
    }
}
