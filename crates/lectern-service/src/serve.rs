//! Synchronous serve loop for line-delimited services.
//!
//! Reads one request line at a time, answers it, and only then reads the
//! next line. The strict one-at-a-time handling is what gives callers the
//! ordering guarantee: response `i` is flushed before line `i + 1` is
//! consumed, and a later request observes every state mutation made by an
//! earlier one.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::{debug, info, warn};

use lectern_protocol::{
    DecodeError, EncodeError, LineReader, MAX_REQUEST_BYTES, Request, RequestLine, Response,
    ResponseWriter,
};

use crate::dispatch::{DispatchError, Dispatcher};

/// Tracing target for serve loop events.
pub(crate) const SERVE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::serve");

/// Errors that terminate the serve loop.
///
/// Request-level failures never appear here; they are answered on the wire
/// and the loop continues.
#[derive(Debug, Error)]
pub enum ServeError {
    /// The input stream failed mid-read.
    #[error("failed to read request line: {0}")]
    Read(#[from] io::Error),

    /// A response could not be serialised or written.
    #[error("failed to answer request: {0}")]
    Respond(#[from] EncodeError),
}

/// Serves line-delimited requests until the input stream closes.
///
/// Returns the number of lines answered. Every input line is answered with
/// exactly one response line, malformed input included, so the count equals
/// the number of lines read.
///
/// # Errors
///
/// Returns [`ServeError`] when the input stream fails or a response cannot
/// be written.
pub fn serve<R, W, D>(input: R, output: W, dispatcher: &mut D) -> Result<u64, ServeError>
where
    R: BufRead,
    W: Write,
    D: Dispatcher,
{
    let mut reader = LineReader::new(input);
    let mut writer = ResponseWriter::new(output);
    let mut answered: u64 = 0;

    info!(
        target: SERVE_TARGET,
        service = dispatcher.service_name(),
        "serving requests"
    );

    while let Some(line) = reader.next_line()? {
        let response = answer_line(dispatcher, &line);
        writer.write(&response)?;
        answered += 1;
    }

    info!(
        target: SERVE_TARGET,
        service = dispatcher.service_name(),
        requests = answered,
        "input stream closed"
    );

    Ok(answered)
}

/// Produces the single response owed for one input line.
fn answer_line<D: Dispatcher>(dispatcher: &mut D, line: &RequestLine) -> Response {
    let request = match decode_line(line) {
        Ok(request) => request,
        Err(error) => {
            warn!(target: SERVE_TARGET, %error, "failed to decode request");
            return Response::failure(error.request_id().cloned(), error.to_string());
        }
    };

    let id = request.id.clone();
    let Some(method) = request.method else {
        warn!(target: SERVE_TARGET, "request carried no method");
        return Response::failure(id, DispatchError::UnknownMethod.to_string());
    };

    debug!(target: SERVE_TARGET, method = %method, "dispatching request");
    match dispatcher.dispatch(&method, request.params) {
        Ok(result) => Response::success(id, result),
        Err(error) => {
            warn!(target: SERVE_TARGET, method = %method, %error, "request failed");
            Response::failure(id, error.to_string())
        }
    }
}

/// Decodes one framed line into a request envelope.
fn decode_line(line: &RequestLine) -> Result<Request, DecodeError> {
    match line {
        RequestLine::Complete(bytes) => Request::parse(bytes),
        RequestLine::Oversized { size } => {
            Err(DecodeError::request_too_large(*size, MAX_REQUEST_BYTES))
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    use super::*;

    /// Scripted dispatcher used to observe loop behaviour.
    struct EchoService {
        calls: Vec<String>,
    }

    impl Dispatcher for EchoService {
        fn service_name(&self) -> &'static str {
            "echo"
        }

        fn dispatch(
            &mut self,
            method: &str,
            params: Option<Value>,
        ) -> Result<Value, DispatchError> {
            self.calls.push(method.to_string());
            match method {
                "echo.params" => Ok(params.unwrap_or(Value::Null)),
                "echo.fail" => Err(DispatchError::internal("scripted failure")),
                _ => Err(DispatchError::UnknownMethod),
            }
        }
    }

    mock! {
        Service {}

        impl Dispatcher for Service {
            fn service_name(&self) -> &'static str;
            fn dispatch(
                &mut self,
                method: &str,
                params: Option<Value>,
            ) -> Result<Value, DispatchError>;
        }
    }

    #[fixture]
    fn echo() -> EchoService {
        EchoService { calls: Vec::new() }
    }

    fn run_serve(input: &str, dispatcher: &mut EchoService) -> (u64, Vec<Value>) {
        let mut output = Vec::new();
        let answered =
            serve(input.as_bytes(), &mut output, dispatcher).expect("serve should finish");
        let responses = output
            .split(|byte| *byte == b'\n')
            .filter(|line| !line.is_empty())
            .map(|line| serde_json::from_slice(line).expect("response should be valid JSON"))
            .collect();
        (answered, responses)
    }

    #[rstest]
    fn answers_every_line_in_order(mut echo: EchoService) {
        let input = "{\"id\":1,\"method\":\"echo.params\",\"params\":\"a\"}\n\
                     {\"id\":2,\"method\":\"bogus\"}\n\
                     {\"id\":3,\"method\":\"echo.params\",\"params\":\"c\"}\n";
        let (answered, responses) = run_serve(input, &mut echo);

        assert_eq!(answered, 3);
        assert_eq!(
            responses,
            vec![
                json!({"id": 1, "result": "a"}),
                json!({"id": 2, "error": {"message": "unknown method"}}),
                json!({"id": 3, "result": "c"}),
            ]
        );
    }

    #[rstest]
    fn malformed_line_is_answered_and_loop_continues(mut echo: EchoService) {
        let input = "not json\n{\"id\":2,\"method\":\"echo.params\"}\n";
        let (answered, responses) = run_serve(input, &mut echo);

        assert_eq!(answered, 2);
        let first = responses.first().expect("first response");
        assert!(first.get("id").is_none());
        let message = first
            .pointer("/error/message")
            .and_then(Value::as_str)
            .expect("error message");
        assert!(message.starts_with("malformed JSONL"));
        assert_eq!(responses.get(1), Some(&json!({"id": 2, "result": null})));
        assert_eq!(echo.calls, vec!["echo.params".to_string()]);
    }

    #[rstest]
    fn missing_method_answers_unknown_method(mut echo: EchoService) {
        let (_, responses) = run_serve("{\"id\":5}\n", &mut echo);

        assert_eq!(
            responses,
            vec![json!({"id": 5, "error": {"message": "unknown method"}})]
        );
        assert!(echo.calls.is_empty());
    }

    #[rstest]
    fn envelope_mismatch_echoes_salvaged_id(mut echo: EchoService) {
        let (_, responses) = run_serve("{\"id\":9,\"method\":42}\n", &mut echo);

        let first = responses.first().expect("first response");
        assert_eq!(first.get("id"), Some(&json!(9)));
        assert!(first.pointer("/error/message").is_some());
        assert!(echo.calls.is_empty());
    }

    #[rstest]
    fn absent_id_stays_absent_and_null_id_is_kept(mut echo: EchoService) {
        let input = "{\"method\":\"echo.params\"}\n{\"id\":null,\"method\":\"echo.params\"}\n";
        let (_, responses) = run_serve(input, &mut echo);

        let absent = responses.first().and_then(Value::as_object).expect("object");
        assert!(!absent.contains_key("id"));
        let kept = responses.get(1).and_then(Value::as_object).expect("object");
        assert_eq!(kept.get("id"), Some(&Value::Null));
    }

    #[rstest]
    fn handler_failure_is_answered_and_loop_continues(mut echo: EchoService) {
        let input = "{\"id\":1,\"method\":\"echo.fail\"}\n{\"id\":2,\"method\":\"echo.params\"}\n";
        let (answered, responses) = run_serve(input, &mut echo);

        assert_eq!(answered, 2);
        assert_eq!(
            responses.first(),
            Some(&json!({"id": 1, "error": {"message": "internal error: scripted failure"}}))
        );
        assert_eq!(responses.get(1), Some(&json!({"id": 2, "result": null})));
    }

    #[rstest]
    fn oversized_line_is_answered_and_loop_continues(mut echo: EchoService) {
        let padding = "x".repeat(MAX_REQUEST_BYTES + 1);
        let input = format!("{padding}\n{{\"id\":2,\"method\":\"echo.params\"}}\n");
        let (answered, responses) = run_serve(&input, &mut echo);

        assert_eq!(answered, 2);
        let message = responses
            .first()
            .and_then(|response| response.pointer("/error/message"))
            .and_then(Value::as_str)
            .expect("error message");
        assert!(message.starts_with("request too large"));
        assert_eq!(responses.get(1), Some(&json!({"id": 2, "result": null})));
    }

    #[rstest]
    fn empty_input_serves_nothing(mut echo: EchoService) {
        let (answered, responses) = run_serve("", &mut echo);

        assert_eq!(answered, 0);
        assert!(responses.is_empty());
        assert!(echo.calls.is_empty());
    }

    #[test]
    fn dispatch_receives_method_and_params() {
        let mut service = MockService::new();
        service.expect_service_name().returning(|| "mock");
        service
            .expect_dispatch()
            .once()
            .withf(|method, params| {
                method == "tokens.apply" && params == &Some(json!({"accent": "teal"}))
            })
            .returning(|_, _| Ok(json!({"ok": true})));

        let mut output = Vec::new();
        let input = "{\"id\":1,\"method\":\"tokens.apply\",\"params\":{\"accent\":\"teal\"}}\n";
        let answered =
            serve(input.as_bytes(), &mut output, &mut service).expect("serve should finish");

        assert_eq!(answered, 1);
        let response: Value =
            serde_json::from_slice(&output).expect("response should be valid JSON");
        assert_eq!(response, json!({"id": 1, "result": {"ok": true}}));
    }

    #[test]
    fn decode_failures_never_reach_the_dispatcher() {
        let mut service = MockService::new();
        service.expect_service_name().returning(|| "mock");
        service.expect_dispatch().never();

        let mut output = Vec::new();
        let answered =
            serve(&b"{broken\n"[..], &mut output, &mut service).expect("serve should finish");

        assert_eq!(answered, 1);
    }
}
